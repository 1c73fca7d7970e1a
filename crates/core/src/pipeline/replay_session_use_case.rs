use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::detection::domain::detection_outcome::CycleResult;
use crate::detection::infrastructure::recording::Recording;
use crate::detection::infrastructure::replay_geometry_provider::ReplayGeometryProvider;
use crate::pipeline::face_tracking_orchestrator::FaceTrackingOrchestrator;
use crate::pipeline::infrastructure::threaded_tracking_worker::ThreadedTrackingWorker;
use crate::pipeline::tracking_logger::TrackingLogger;
use crate::shared::clock::ManualClock;
use crate::shared::frame::Frame;
use crate::shared::tracker_config::TrackerConfig;

/// Per-frame result of a replayed session.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub index: usize,
    pub timestamp: Duration,
    pub result: CycleResult,
}

/// Re-runs a recorded capture session through the orchestrator.
///
/// Recorded timestamps drive the orchestrator's clock, so the staleness
/// window behaves as it did during capture regardless of replay speed.
pub struct ReplaySessionUseCase {
    recording: Arc<Recording>,
    config: TrackerConfig,
    logger: Box<dyn TrackingLogger>,
}

impl ReplaySessionUseCase {
    pub fn new(
        recording: Arc<Recording>,
        config: TrackerConfig,
        logger: Box<dyn TrackingLogger>,
    ) -> Self {
        Self {
            recording,
            config,
            logger,
        }
    }

    pub fn execute(&mut self) -> Result<Vec<FrameReport>, Box<dyn std::error::Error>> {
        let clock = ManualClock::new();
        let orchestrator = FaceTrackingOrchestrator::new(
            Box::new(ReplayGeometryProvider::new(self.recording.clone())),
            Box::new(clock.clone()),
            &self.config,
        );
        let worker = ThreadedTrackingWorker::spawn(orchestrator);

        let total = self.recording.len();
        self.logger.info(&format!("Replaying {total} recorded frames"));

        let mut reports = Vec::with_capacity(total);
        for (index, recorded) in self.recording.frames.iter().enumerate() {
            clock.set(recorded.timestamp());

            let started = Instant::now();
            let receiver = worker.submit(Frame::placeholder(index))?;
            let result = receiver.wait()?;
            self.logger
                .timing("cycle", started.elapsed().as_secs_f64() * 1000.0);

            match &result {
                Ok(outcome) => self.logger.count(outcome.label()),
                Err(failure) => self.logger.count(failure.label()),
            }
            self.logger.progress(index + 1, total);

            reports.push(FrameReport {
                index,
                timestamp: recorded.timestamp(),
                result,
            });
        }

        worker.shutdown()?;
        self.logger.summary();
        Ok(reports)
    }
}
