//! One-shot completion channel between a step and the sequencer.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::StepError;

/// What a reporter delivers: readiness or the reason it could not be decided.
pub type StepOutcome = Result<ConditionStatus, StepError>;

/// Informational payload attached to a readiness report.
///
/// The rollover-ready step has nothing to add; it serializes to `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmptyInfo {}

/// Readiness report delivered on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionStatus {
    /// Whether the step's condition holds and the sequencer may advance.
    pub conditions_met: bool,
    /// Extra information for operators.
    pub info: EmptyInfo,
}

impl ConditionStatus {
    /// Status with explicit info.
    pub const fn new(conditions_met: bool, info: EmptyInfo) -> Self {
        Self {
            conditions_met,
            info,
        }
    }

    /// Status with empty info.
    pub const fn ready(conditions_met: bool) -> Self {
        Self::new(conditions_met, EmptyInfo {})
    }
}

/// Sending half; consumed by the first report.
#[derive(Debug)]
pub struct OutcomeReporter {
    tx: oneshot::Sender<StepOutcome>,
}

/// Receiving half held by the sequencer.
#[derive(Debug)]
pub struct OutcomeReceiver {
    rx: oneshot::Receiver<StepOutcome>,
}

impl OutcomeReporter {
    /// Create a connected reporter/receiver pair.
    pub fn channel() -> (Self, OutcomeReceiver) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, OutcomeReceiver { rx })
    }

    /// Report readiness.
    pub fn on_ready(self, conditions_met: bool, info: EmptyInfo) {
        self.complete(Ok(ConditionStatus::new(conditions_met, info)));
    }

    /// Report failure.
    pub fn on_failure(self, error: StepError) {
        self.complete(Err(error));
    }

    /// Report an already-built outcome.
    pub fn complete(self, outcome: StepOutcome) {
        if self.tx.send(outcome).is_err() {
            tracing::debug!("outcome receiver dropped before the step reported");
        }
    }
}

impl OutcomeReceiver {
    /// Wait for the report.
    ///
    /// Resolves to [`StepError::ReporterDropped`] if the reporter was dropped
    /// without reporting.
    pub async fn recv(self) -> StepOutcome {
        self.rx.await.unwrap_or(Err(StepError::ReporterDropped))
    }
}
