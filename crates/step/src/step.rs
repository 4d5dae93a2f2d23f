//! Step traits the lifecycle sequencer drives.

use std::time::Duration;

use async_trait::async_trait;
use ilm_core::StepKey;

use crate::metadata::IndexMetadata;
use crate::reporter::OutcomeReporter;

/// A single step of a lifecycle policy.
pub trait Step: Send + Sync {
    /// Position of this step.
    fn key(&self) -> &StepKey;

    /// Step to move to once this one reports ready.
    fn next_key(&self) -> &StepKey;

    /// Step name; defaults to the name part of [`key`](Self::key).
    fn name(&self) -> &str {
        &self.key().name
    }

    /// Whether the sequencer may run this step again after a failure.
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Step that waits on a condition evaluated against each new index snapshot.
///
/// The sequencer calls [`evaluate_condition`](Self::evaluate_condition) with a
/// fresh reporter and never runs two evaluations of the same index at once.
#[async_trait]
pub trait AsyncWaitStep: Step {
    /// Evaluate the condition and report through `reporter` exactly once.
    async fn evaluate_condition(
        &self,
        metadata: &IndexMetadata,
        reporter: OutcomeReporter,
        master_timeout: Duration,
    );
}
