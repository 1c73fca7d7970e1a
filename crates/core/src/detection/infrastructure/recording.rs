//! JSON recordings of geometry-provider responses, one entry per frame.
//!
//! ```json
//! {"frames": [
//!   {"timestamp_ms": 0,  "detections": {"ok": [{"x": 0.3, "y": 0.3, "width": 0.4, "height": 0.4}]},
//!    "landmarks": {"ok": {"nose": [{"x": 0.5, "y": 0.5}]}}},
//!   {"timestamp_ms": 33, "track": {"ok": {"region": {...}, "confidence": 0.93}}},
//!   {"timestamp_ms": 66, "track": {"lost": "occluded"}}
//! ]}
//! ```
//!
//! A missing `detections` entry means "no faces"; missing `track` or
//! `landmarks` entries replay as provider failures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_geometry_provider::ProviderError;
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::tracking_session::TrackObservation;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse recording: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("recording timestamps go backwards at frame {0}")]
    NonMonotonic(usize),
}

/// One recorded provider answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedResponse<T> {
    Ok(T),
    Failed(String),
    Lost(String),
}

impl<T: Clone> RecordedResponse<T> {
    pub fn to_result(&self) -> Result<T, ProviderError> {
        match self {
            RecordedResponse::Ok(value) => Ok(value.clone()),
            RecordedResponse::Failed(reason) => Err(ProviderError::Failed(reason.clone())),
            RecordedResponse::Lost(reason) => Err(ProviderError::Lost(reason.clone())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub timestamp_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detections: Option<RecordedResponse<Vec<Region>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<RecordedResponse<TrackObservation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<RecordedResponse<FaceLandmarks>>,
}

impl RecordedFrame {
    pub fn timestamp(&self) -> Duration {
        Duration::from_millis(self.timestamp_ms)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordingError> {
        let recording: Self = serde_json::from_str(json)?;
        recording.validate()?;
        Ok(recording)
    }

    fn validate(&self) -> Result<(), RecordingError> {
        for (i, pair) in self.frames.windows(2).enumerate() {
            if pair[1].timestamp_ms < pair[0].timestamp_ms {
                return Err(RecordingError::NonMonotonic(i + 1));
            }
        }
        Ok(())
    }

    pub fn frame(&self, index: usize) -> Option<&RecordedFrame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
