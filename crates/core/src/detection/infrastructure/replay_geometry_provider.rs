use std::sync::Arc;

use crate::detection::domain::face_geometry_provider::{FaceGeometryProvider, ProviderError};
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::tracking_session::{
    TrackObservation, TrackingPrecision, TrackingSession,
};
use crate::detection::infrastructure::recording::{RecordedFrame, Recording};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Replays recorded geometry-provider responses by frame index.
///
/// Stands in for the platform's detector, tracker and landmark extractor
/// so a captured session can be re-run through the orchestrator offline.
pub struct ReplayGeometryProvider {
    recording: Arc<Recording>,
}

impl ReplayGeometryProvider {
    pub fn new(recording: Arc<Recording>) -> Self {
        Self { recording }
    }
}

fn recorded_frame<'a>(
    recording: &'a Recording,
    frame: &Frame,
) -> Result<&'a RecordedFrame, ProviderError> {
    recording
        .frame(frame.index())
        .ok_or_else(|| ProviderError::Failed(format!("frame {} not in recording", frame.index())))
}

impl FaceGeometryProvider for ReplayGeometryProvider {
    fn detect_face_regions(&mut self, frame: &Frame) -> Result<Vec<Region>, ProviderError> {
        let recorded = recorded_frame(&self.recording, frame)?;
        match &recorded.detections {
            Some(response) => response.to_result(),
            None => Ok(Vec::new()),
        }
    }

    fn detect_landmarks(
        &mut self,
        _region: &Region,
        frame: &Frame,
    ) -> Result<FaceLandmarks, ProviderError> {
        let recorded = recorded_frame(&self.recording, frame)?;
        match &recorded.landmarks {
            Some(response) => response.to_result(),
            None => Err(ProviderError::Failed("no landmarks".into())),
        }
    }

    fn tracking_session(&mut self) -> Box<dyn TrackingSession> {
        Box::new(ReplayTrackingSession {
            recording: self.recording.clone(),
            resets: 0,
        })
    }
}

/// Tracking half of the replay: answers from the recording's `track` entries.
pub struct ReplayTrackingSession {
    recording: Arc<Recording>,
    resets: usize,
}

impl ReplayTrackingSession {
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl TrackingSession for ReplayTrackingSession {
    fn track_region(
        &mut self,
        _previous: &Region,
        frame: &Frame,
        precision: TrackingPrecision,
    ) -> Result<TrackObservation, ProviderError> {
        let recorded = recorded_frame(&self.recording, frame)?;
        let observation = match &recorded.track {
            Some(response) => response.to_result()?,
            None => return Err(ProviderError::Failed("no track observation".into())),
        };
        // Recordings capture accurate-mode scores; fast mode only ever
        // reports whether the target is still there.
        Ok(match precision {
            TrackingPrecision::Accurate => observation,
            TrackingPrecision::Fast => TrackObservation {
                confidence: if observation.confidence > 0.0 { 1.0 } else { 0.0 },
                ..observation
            },
        })
    }

    fn reset(&mut self) {
        self.resets += 1;
        log::debug!("Replay tracking session reset ({} so far)", self.resets);
    }
}
