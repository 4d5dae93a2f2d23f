//! The `check-rollover-ready` step.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use ilm_core::StepKey;
use ilm_log::observability::HookRegistry;

use crate::client::IndicesClient;
use crate::evaluator::{ConditionEvaluator, EvaluationOutcome};
use crate::events::StepEvent;
use crate::metadata::IndexMetadata;
use crate::reporter::{OutcomeReporter, StepOutcome};
use crate::requester::DryRunRotationRequester;
use crate::step::{AsyncWaitStep, Step};
use crate::thresholds::RolloverThresholds;

/// Waits until the index's rollover alias is ready to be rolled over.
///
/// Reports ready immediately when the index was already rolled over or is
/// marked indexing-complete. Otherwise it checks the alias binding and asks the
/// coordinator for a dry-run rollover with the configured thresholds; the step
/// is ready once any threshold is met.
///
/// Two steps are equal when their keys and thresholds are equal.
///
/// # Examples
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use std::time::Duration;
/// # use ilm_core::StepKey;
/// # use ilm_step::{IndexMetadata, IndicesClient, RolloverThresholds, WaitForRolloverReadyStep};
/// # async fn demo(client: Arc<dyn IndicesClient>, metadata: IndexMetadata) {
/// let step = WaitForRolloverReadyStep::new(
///     StepKey::new("hot", "rollover", WaitForRolloverReadyStep::NAME),
///     StepKey::new("hot", "rollover", "attempt-rollover"),
///     client,
///     RolloverThresholds::new().with_max_docs(1000),
/// );
/// let _status = step.evaluate(&metadata, Duration::from_secs(30)).await;
/// # }
/// ```
pub struct WaitForRolloverReadyStep {
    key: StepKey,
    next_key: StepKey,
    thresholds: RolloverThresholds,
    evaluator: ConditionEvaluator,
    requester: DryRunRotationRequester,
    hooks: Arc<HookRegistry>,
}

impl WaitForRolloverReadyStep {
    /// Step name within the rollover action.
    pub const NAME: &'static str = "check-rollover-ready";

    /// Create the step with an empty hook registry.
    pub fn new(
        key: StepKey,
        next_key: StepKey,
        client: Arc<dyn IndicesClient>,
        thresholds: RolloverThresholds,
    ) -> Self {
        Self {
            key,
            next_key,
            thresholds,
            evaluator: ConditionEvaluator::new(),
            requester: DryRunRotationRequester::new(client),
            hooks: Arc::new(HookRegistry::new()),
        }
    }

    /// Emit step events to `hooks`.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<HookRegistry>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Configured thresholds.
    pub fn thresholds(&self) -> &RolloverThresholds {
        &self.thresholds
    }

    /// Registry the step emits to.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// Evaluate readiness of `metadata` and return the outcome directly.
    pub async fn evaluate(&self, metadata: &IndexMetadata, master_timeout: Duration) -> StepOutcome {
        let index = metadata.index().as_str();
        let outcome = match self.evaluator.evaluate(metadata) {
            EvaluationOutcome::PendingDryRun { alias } => {
                self.hooks.emit(&StepEvent::DryRunDispatched {
                    index: index.to_owned(),
                    alias: alias.to_string(),
                    conditions: self.thresholds.conditions().len(),
                });
                tracing::debug!(index, %alias, ?master_timeout, "sending dry-run rollover");

                let started = Instant::now();
                match self
                    .requester
                    .request_dry_run(alias.clone(), &self.thresholds, master_timeout)
                    .await
                {
                    Ok(conditions_met) => {
                        self.hooks.emit(&StepEvent::DryRunCompleted {
                            index: index.to_owned(),
                            alias: alias.to_string(),
                            conditions_met,
                            duration: started.elapsed(),
                        });
                        tracing::debug!(index, %alias, conditions_met, "dry-run rollover answered");
                        EvaluationOutcome::DryRunSatisfied(conditions_met)
                    }
                    Err(cause) => EvaluationOutcome::OperationError(cause),
                }
            }
            outcome => outcome,
        };

        let alias = metadata.settings().rollover_alias().unwrap_or_default();
        match &outcome {
            EvaluationOutcome::AlreadyRotated => {
                tracing::info!(
                    index,
                    alias,
                    "index has already been rolled over; skipping rollover conditions"
                );
                self.hooks.emit(&StepEvent::RolloverAlreadyCompleted {
                    index: index.to_owned(),
                    alias: alias.to_owned(),
                });
            }
            EvaluationOutcome::IndexingComplete => {
                tracing::debug!(
                    index,
                    alias,
                    "indexing is complete; skipping rollover conditions"
                );
                self.hooks.emit(&StepEvent::IndexingCompleteSkip {
                    index: index.to_owned(),
                    alias: alias.to_owned(),
                });
            }
            _ => {}
        }

        let result = outcome.into_step_outcome();
        if let Err(error) = &result {
            tracing::warn!(index, step = %self.key, kind = error.kind(), %error, "rollover readiness check failed");
            self.hooks.emit(&StepEvent::StepFailed {
                index: index.to_owned(),
                kind: error.kind(),
                error: error.to_string(),
            });
        }
        result
    }
}

impl Step for WaitForRolloverReadyStep {
    fn key(&self) -> &StepKey {
        &self.key
    }

    fn next_key(&self) -> &StepKey {
        &self.next_key
    }

    /// Always retryable: every failure, including configuration errors, is
    /// re-evaluated on the next cluster state.
    fn is_retryable(&self) -> bool {
        true
    }
}

#[async_trait]
impl AsyncWaitStep for WaitForRolloverReadyStep {
    async fn evaluate_condition(
        &self,
        metadata: &IndexMetadata,
        reporter: OutcomeReporter,
        master_timeout: Duration,
    ) {
        reporter.complete(self.evaluate(metadata, master_timeout).await);
    }
}

impl PartialEq for WaitForRolloverReadyStep {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.next_key == other.next_key && self.thresholds == other.thresholds
    }
}

impl Eq for WaitForRolloverReadyStep {}

impl Hash for WaitForRolloverReadyStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.next_key.hash(state);
        self.thresholds.hash(state);
    }
}

impl fmt::Debug for WaitForRolloverReadyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitForRolloverReadyStep")
            .field("key", &self.key)
            .field("next_key", &self.next_key)
            .field("thresholds", &self.thresholds)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
