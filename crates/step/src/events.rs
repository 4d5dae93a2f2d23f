//! Observability events emitted by the rollover-ready step.

use std::time::Duration;

use ilm_log::observability::ObservabilityEvent;

/// Event emitted by [`WaitForRolloverReadyStep`](crate::WaitForRolloverReadyStep).
///
/// Delivered to the hooks of the step's injected
/// [`HookRegistry`](ilm_log::observability::HookRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    /// The index was already rolled over; reported ready without a request.
    RolloverAlreadyCompleted {
        /// Index under evaluation.
        index: String,
        /// Rollover alias.
        alias: String,
    },
    /// Indexing is complete; reported ready without a request.
    IndexingCompleteSkip {
        /// Index under evaluation.
        index: String,
        /// Rollover alias.
        alias: String,
    },
    /// A dry-run rollover request is about to be sent.
    DryRunDispatched {
        /// Index under evaluation.
        index: String,
        /// Alias being dry-run.
        alias: String,
        /// Number of conditions in the request.
        conditions: usize,
    },
    /// The dry-run request answered.
    DryRunCompleted {
        /// Index under evaluation.
        index: String,
        /// Alias that was dry-run.
        alias: String,
        /// Whether any condition was met.
        conditions_met: bool,
        /// Time spent waiting on the coordinator.
        duration: Duration,
    },
    /// The step reported a failure.
    StepFailed {
        /// Index under evaluation.
        index: String,
        /// [`StepError::kind`](crate::StepError::kind) of the failure.
        kind: &'static str,
        /// Failure message.
        error: String,
    },
}

impl ObservabilityEvent for StepEvent {
    fn name(&self) -> &str {
        match self {
            Self::RolloverAlreadyCompleted { .. } => "rollover_already_completed",
            Self::IndexingCompleteSkip { .. } => "indexing_complete_skip",
            Self::DryRunDispatched { .. } => "dry_run_dispatched",
            Self::DryRunCompleted { .. } => "dry_run_completed",
            Self::StepFailed { .. } => "step_failed",
        }
    }

    fn data(&self) -> Option<serde_json::Value> {
        let data = match self {
            Self::RolloverAlreadyCompleted { index, alias }
            | Self::IndexingCompleteSkip { index, alias } => serde_json::json!({
                "index": index,
                "alias": alias,
            }),
            Self::DryRunDispatched {
                index,
                alias,
                conditions,
            } => serde_json::json!({
                "index": index,
                "alias": alias,
                "conditions": conditions,
            }),
            Self::DryRunCompleted {
                index,
                alias,
                conditions_met,
                duration,
            } => serde_json::json!({
                "index": index,
                "alias": alias,
                "conditions_met": conditions_met,
                "duration_ms": duration.as_millis(),
            }),
            Self::StepFailed { index, kind, error } => serde_json::json!({
                "index": index,
                "kind": kind,
                "error": error,
            }),
        };
        Some(data)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn names_are_stable() {
        let event = StepEvent::IndexingCompleteSkip {
            index: "logs-000001".into(),
            alias: "logs-write".into(),
        };
        assert_eq!(event.name(), "indexing_complete_skip");

        let event = StepEvent::StepFailed {
            index: "logs-000001".into(),
            kind: "write_binding",
            error: "not the write index".into(),
        };
        assert_eq!(event.name(), "step_failed");
    }

    #[test]
    fn completed_event_carries_duration() {
        let event = StepEvent::DryRunCompleted {
            index: "logs-000001".into(),
            alias: "logs-write".into(),
            conditions_met: true,
            duration: Duration::from_millis(42),
        };

        assert_eq!(
            event.data(),
            Some(serde_json::json!({
                "index": "logs-000001",
                "alias": "logs-write",
                "conditions_met": true,
                "duration_ms": 42,
            }))
        );
    }
}
