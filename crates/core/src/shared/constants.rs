use std::time::Duration;

/// Incremental tracking is only attempted when the previous mode decision
/// happened less than this long ago.
pub const DETECTION_INTERVAL_THRESHOLD: Duration = Duration::from_millis(500);

/// Tracks scoring below this are discarded in favour of a full detection.
pub const TRACKING_CONFIDENCE_THRESHOLD: f64 = 0.8;

pub const CONFIG_DIR_NAME: &str = "facetrack";
pub const CONFIG_FILE_NAME: &str = "config.json";
