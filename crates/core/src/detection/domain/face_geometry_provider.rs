use thiserror::Error;

use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::tracking_session::TrackingSession;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Failure reported by a geometry primitive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("{0}")]
    Failed(String),

    /// The tracker can no longer follow its target and its session must be
    /// reset before it is used again.
    #[error("target lost: {0}")]
    Lost(String),

    #[error("invalid output: {0}")]
    InvalidOutput(String),
}

impl ProviderError {
    pub fn is_lost(&self) -> bool {
        matches!(self, ProviderError::Lost(_))
    }
}

/// Domain interface for the face geometry primitives (full-frame face
/// search, landmark extraction, incremental tracking).
///
/// Calls may block for as long as the underlying model needs; the caller
/// serializes them.
pub trait FaceGeometryProvider: Send {
    fn detect_face_regions(&mut self, frame: &Frame) -> Result<Vec<Region>, ProviderError>;

    fn detect_landmarks(
        &mut self,
        region: &Region,
        frame: &Frame,
    ) -> Result<FaceLandmarks, ProviderError>;

    /// Opens a tracking session. The caller owns it exclusively.
    fn tracking_session(&mut self) -> Box<dyn TrackingSession>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_lost() {
        assert!(ProviderError::Lost("occluded".into()).is_lost());
        assert!(!ProviderError::Failed("timeout".into()).is_lost());
        assert!(!ProviderError::InvalidOutput("empty".into()).is_lost());
    }

    #[test]
    fn test_display() {
        assert_eq!(ProviderError::Failed("boom".into()).to_string(), "boom");
        assert_eq!(
            ProviderError::Lost("occluded".into()).to_string(),
            "target lost: occluded"
        );
    }
}
