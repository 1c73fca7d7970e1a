use serde::{Deserialize, Serialize};

use crate::detection::domain::face_geometry_provider::ProviderError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Tracker quality level.
///
/// `Fast` trackers commonly report a binary confidence (0.0 or 1.0), which
/// is useless against a threshold; `Accurate` yields a continuous score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingPrecision {
    Fast,
    Accurate,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackObservation {
    pub region: Region,
    pub confidence: f64,
}

impl TrackObservation {
    pub fn new(region: Region, confidence: f64) -> Self {
        Self { region, confidence }
    }

    /// Rejects observations outside normalized space or with a confidence
    /// that is not a score in `[0, 1]`.
    pub fn validate(&self) -> Result<(), String> {
        if !self.region.is_normalized() {
            return Err(format!("region out of bounds: {:?}", self.region));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence out of range: {}", self.confidence));
        }
        Ok(())
    }
}

/// Incremental tracker state held by the platform.
///
/// Sessions accumulate native tracker state over time; `reset` discards all
/// of it so the next `track_region` starts fresh.
pub trait TrackingSession: Send {
    fn track_region(
        &mut self,
        previous: &Region,
        frame: &Frame,
        precision: TrackingPrecision,
    ) -> Result<TrackObservation, ProviderError>;

    fn reset(&mut self);
}
