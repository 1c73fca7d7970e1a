//! Single-use delivery of one cycle's result.
//!
//! An [`OutcomeSender`] is consumed by [`OutcomeSender::deliver`], so a
//! second delivery for the same cycle does not compile.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use thiserror::Error;

use crate::detection::domain::detection_outcome::CycleResult;

/// Creates a connected sender/receiver pair for one cycle.
pub fn outcome_channel() -> (OutcomeSender, OutcomeReceiver) {
    // Capacity 1: delivering never blocks.
    let (tx, rx) = crossbeam_channel::bounded(1);
    (
        OutcomeSender {
            target: Target::Channel(tx),
        },
        OutcomeReceiver { rx },
    )
}

enum Target {
    Channel(Sender<CycleResult>),
    Callback(Box<dyn FnOnce(CycleResult) + Send>),
}

/// Reply slot for exactly one cycle.
pub struct OutcomeSender {
    target: Target,
}

impl OutcomeSender {
    /// Wraps a completion handler. It runs at most once, on delivery.
    pub fn callback(f: impl FnOnce(CycleResult) + Send + 'static) -> Self {
        Self {
            target: Target::Callback(Box::new(f)),
        }
    }

    /// Delivers the result, consuming the sender.
    ///
    /// A receiver that has gone away is not an error: the result is dropped.
    pub fn deliver(self, result: CycleResult) {
        match self.target {
            Target::Channel(tx) => {
                if tx.send(result).is_err() {
                    log::debug!("Outcome receiver dropped before delivery");
                }
            }
            Target::Callback(f) => f(result),
        }
    }
}

/// The sending side was dropped without delivering.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("outcome sender dropped without delivering a result")]
pub struct OutcomeDropped;

/// Receiving end for one cycle's result.
pub struct OutcomeReceiver {
    rx: Receiver<CycleResult>,
}

impl OutcomeReceiver {
    /// Blocks until the result arrives.
    pub fn wait(self) -> Result<CycleResult, OutcomeDropped> {
        self.rx.recv().map_err(|_| OutcomeDropped)
    }

    /// Returns the result if it has already arrived. `Ok(None)` means still
    /// pending.
    pub fn try_take(&self) -> Result<Option<CycleResult>, OutcomeDropped> {
        match self.rx.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(OutcomeDropped),
        }
    }
}
