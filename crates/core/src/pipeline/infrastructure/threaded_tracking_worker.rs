use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use thiserror::Error;

use crate::pipeline::face_tracking_orchestrator::FaceTrackingOrchestrator;
use crate::pipeline::outcome_channel::{outcome_channel, OutcomeReceiver, OutcomeSender};
use crate::shared::frame::Frame;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// A cycle is still in flight; the frame was dropped.
    #[error("a frame is already being processed")]
    Busy,

    #[error("tracking worker has stopped")]
    Disconnected,
}

#[derive(Error, Debug)]
#[error("tracking worker panicked")]
pub struct WorkerPanicked;

struct Job {
    frame: Frame,
    reply: OutcomeSender,
}

/// Runs a [`FaceTrackingOrchestrator`] on a dedicated thread and feeds it
/// one frame at a time.
///
/// Frames submitted while a cycle is in flight are rejected with
/// [`SubmitError::Busy`] and counted as dropped, so the orchestrator never
/// sees overlapping cycles and results come back in submission order.
pub struct ThreadedTrackingWorker {
    job_tx: Option<Sender<Job>>,
    in_flight: Arc<AtomicBool>,
    dropped: AtomicUsize,
    handle: Option<JoinHandle<FaceTrackingOrchestrator>>,
}

impl ThreadedTrackingWorker {
    pub fn spawn(orchestrator: FaceTrackingOrchestrator) -> Self {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<Job>(1);
        let handle = std::thread::spawn(move || {
            let mut orchestrator = orchestrator;
            for job in job_rx {
                orchestrator.process(&job.frame, job.reply);
            }
            orchestrator
        });

        Self {
            job_tx: Some(job_tx),
            in_flight: Arc::new(AtomicBool::new(false)),
            dropped: AtomicUsize::new(0),
            handle: Some(handle),
        }
    }

    /// Hands `frame` to the worker, or drops it if a cycle is in flight.
    pub fn submit(&self, frame: Frame) -> Result<OutcomeReceiver, SubmitError> {
        if self.handle.as_ref().map_or(true, |h| h.is_finished()) {
            return Err(SubmitError::Disconnected);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Dropping frame {} ({dropped} dropped so far)", frame.index());
            return Err(SubmitError::Busy);
        }

        let (forward, receiver) = outcome_channel();
        let in_flight = self.in_flight.clone();
        // Clear the flag before forwarding so a caller woken by the result
        // can submit the next frame immediately.
        let reply = OutcomeSender::callback(move |result| {
            in_flight.store(false, Ordering::Release);
            forward.deliver(result);
        });

        let sent = self
            .job_tx
            .as_ref()
            .ok_or(SubmitError::Disconnected)
            .and_then(|tx| {
                tx.send(Job { frame, reply })
                    .map_err(|_| SubmitError::Disconnected)
            });
        if let Err(e) = sent {
            self.in_flight.store(false, Ordering::Release);
            return Err(e);
        }
        Ok(receiver)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn dropped_frames(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stops accepting frames, lets the in-flight cycle finish, and returns
    /// the orchestrator.
    pub fn shutdown(mut self) -> Result<FaceTrackingOrchestrator, WorkerPanicked> {
        self.job_tx.take();
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| WorkerPanicked),
            None => Err(WorkerPanicked),
        }
    }
}

impl Drop for ThreadedTrackingWorker {
    fn drop(&mut self) {
        self.job_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Tracking worker panicked");
            }
        }
    }
}
