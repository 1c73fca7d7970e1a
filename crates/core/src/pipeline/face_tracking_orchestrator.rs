use std::time::Duration;

use crate::detection::domain::detection_outcome::{CycleResult, DetectionOutcome, FailureKind};
use crate::detection::domain::face_geometry_provider::{FaceGeometryProvider, ProviderError};
use crate::detection::domain::tracking_session::{TrackingPrecision, TrackingSession};
use crate::pipeline::outcome_channel::OutcomeSender;
use crate::shared::clock::Clock;
use crate::shared::frame::Frame;
use crate::shared::point::Point;
use crate::shared::region::Region;
use crate::shared::tracker_config::TrackerConfig;

/// The face resolved by the most recent successful detect or track.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TrackedFace {
    region: Region,
    /// Only set by a track; a fresh detection has no tracking score.
    confidence: Option<f64>,
}

#[derive(Debug, Default)]
struct OrchestratorState {
    last_decision_at: Option<Duration>,
    tracking_enabled: bool,
    tracked_face: Option<TrackedFace>,
}

impl OrchestratorState {
    fn clear_tracking(&mut self) {
        self.tracking_enabled = false;
        self.tracked_face = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Detect,
    Track,
}

/// Per-frame face orchestration: full detection or incremental tracking,
/// followed by landmark extraction on the resolved region.
///
/// Tracking is chosen only right after a successful detect/track and while
/// the previous decision is younger than the detection interval. A track
/// scoring below the confidence threshold falls back to one detection on
/// the same frame.
pub struct FaceTrackingOrchestrator {
    provider: Box<dyn FaceGeometryProvider>,
    session: Box<dyn TrackingSession>,
    clock: Box<dyn Clock>,
    detection_interval: Duration,
    confidence_threshold: f64,
    state: OrchestratorState,
}

impl FaceTrackingOrchestrator {
    pub fn new(
        mut provider: Box<dyn FaceGeometryProvider>,
        clock: Box<dyn Clock>,
        config: &TrackerConfig,
    ) -> Self {
        let session = provider.tracking_session();
        Self {
            provider,
            session,
            clock,
            detection_interval: config.detection_interval(),
            confidence_threshold: config.tracking_confidence_threshold,
            state: OrchestratorState::default(),
        }
    }

    /// Runs one cycle and hands its result to `reply`.
    pub fn process(&mut self, frame: &Frame, reply: OutcomeSender) {
        reply.deliver(self.process_frame(frame));
    }

    /// Runs one cycle and returns its result directly.
    pub fn process_frame(&mut self, frame: &Frame) -> CycleResult {
        let result = match self.select_mode() {
            Mode::Detect => self.detect(frame),
            Mode::Track => self.track(frame),
        };
        if let Err(failure) = &result {
            log::warn!("Frame {}: {failure}", frame.index());
        }
        result
    }

    fn select_mode(&mut self) -> Mode {
        let now = self.clock.now();
        let within_window = self
            .state
            .last_decision_at
            .is_some_and(|last| now.saturating_sub(last) < self.detection_interval);
        // The window runs from the previous decision, not the last find.
        self.state.last_decision_at = Some(now);

        if self.state.tracking_enabled && within_window {
            Mode::Track
        } else {
            Mode::Detect
        }
    }

    fn detect(&mut self, frame: &Frame) -> CycleResult {
        let regions = self
            .provider
            .detect_face_regions(frame)
            .map_err(|e| FailureKind::DetectionFailed(e.to_string()))?;
        if let Some(bad) = regions.iter().find(|r| !r.is_normalized()) {
            let e = ProviderError::InvalidOutput(format!("region out of bounds: {bad:?}"));
            return Err(FailureKind::DetectionFailed(e.to_string()));
        }

        let Some(region) = Region::largest(&regions).copied() else {
            log::debug!("Frame {}: no face found", frame.index());
            self.state.clear_tracking();
            return Ok(DetectionOutcome::NotFound);
        };
        log::debug!(
            "Frame {}: detected {} face(s), tracking largest",
            frame.index(),
            regions.len()
        );

        self.state.tracked_face = Some(TrackedFace {
            region,
            confidence: None,
        });
        self.state.tracking_enabled = true;
        // A new seed observation invalidates whatever the tracker holds.
        self.session.reset();

        let landmarks = self.extract_landmarks(&region, frame)?;
        Ok(DetectionOutcome::FoundByDetection { region, landmarks })
    }

    fn track(&mut self, frame: &Frame) -> CycleResult {
        let Some(previous) = self.state.tracked_face.map(|f| f.region) else {
            self.state.clear_tracking();
            return Err(FailureKind::TrackingFailed("no prior observation".into()));
        };

        let tracked = self
            .session
            .track_region(&previous, frame, TrackingPrecision::Accurate);
        let observation = match tracked {
            Ok(observation) => observation,
            Err(e) => {
                if e.is_lost() {
                    log::info!(
                        "Frame {}: tracker lost target, resetting session",
                        frame.index()
                    );
                    self.session.reset();
                }
                self.state.clear_tracking();
                return Err(FailureKind::TrackingFailed(e.to_string()));
            }
        };
        if let Err(reason) = observation.validate() {
            self.state.clear_tracking();
            return Err(FailureKind::TrackingFailed(reason));
        }

        if observation.confidence < self.confidence_threshold {
            log::info!(
                "Frame {}: tracking confidence {:.2} below {:.2}, re-detecting",
                frame.index(),
                observation.confidence,
                self.confidence_threshold
            );
            self.state.clear_tracking();
            // Detect never re-enters track, so this is the only re-dispatch.
            return self.detect(frame);
        }

        let region = observation.region;
        self.state.tracked_face = Some(TrackedFace {
            region,
            confidence: Some(observation.confidence),
        });
        self.state.tracking_enabled = true;

        let landmarks = self.extract_landmarks(&region, frame)?;
        Ok(DetectionOutcome::FoundByTracking { region, landmarks })
    }

    /// Landmark failures leave the tracked face in place: the region itself
    /// was resolved correctly.
    fn extract_landmarks(
        &mut self,
        region: &Region,
        frame: &Frame,
    ) -> Result<Vec<Point>, FailureKind> {
        let landmarks = self
            .provider
            .detect_landmarks(region, frame)
            .map_err(|e| FailureKind::LandmarksFailed(e.to_string()))?;
        Ok(landmarks.flatten_into(region))
    }
}
