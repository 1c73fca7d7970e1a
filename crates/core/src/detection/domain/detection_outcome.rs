use serde::Serialize;
use thiserror::Error;

use crate::shared::point::Point;
use crate::shared::region::Region;

/// What one orchestrator cycle resolved.
///
/// `landmarks` share the coordinate space of `region` and follow the fixed
/// landmark group order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionOutcome {
    NotFound,
    FoundByDetection { region: Region, landmarks: Vec<Point> },
    FoundByTracking { region: Region, landmarks: Vec<Point> },
}

impl DetectionOutcome {
    pub fn region(&self) -> Option<&Region> {
        match self {
            DetectionOutcome::NotFound => None,
            DetectionOutcome::FoundByDetection { region, .. }
            | DetectionOutcome::FoundByTracking { region, .. } => Some(region),
        }
    }

    pub fn landmarks(&self) -> &[Point] {
        match self {
            DetectionOutcome::NotFound => &[],
            DetectionOutcome::FoundByDetection { landmarks, .. }
            | DetectionOutcome::FoundByTracking { landmarks, .. } => landmarks,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetectionOutcome::NotFound => "not_found",
            DetectionOutcome::FoundByDetection { .. } => "detection",
            DetectionOutcome::FoundByTracking { .. } => "tracking",
        }
    }
}

/// Why a cycle produced no outcome. Every variant carries the provider's
/// reason and none of them is fatal to the orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FailureKind {
    #[error("Error in face detection: {0}")]
    DetectionFailed(String),

    #[error("Error in face tracking: {0}")]
    TrackingFailed(String),

    #[error("Error in landmarks detection: {0}")]
    LandmarksFailed(String),
}

impl FailureKind {
    pub fn reason(&self) -> &str {
        match self {
            FailureKind::DetectionFailed(r)
            | FailureKind::TrackingFailed(r)
            | FailureKind::LandmarksFailed(r) => r,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::DetectionFailed(_) => "detection_failed",
            FailureKind::TrackingFailed(_) => "tracking_failed",
            FailureKind::LandmarksFailed(_) => "landmarks_failed",
        }
    }
}

/// Result of a single orchestrator cycle.
pub type CycleResult = Result<DetectionOutcome, FailureKind>;
