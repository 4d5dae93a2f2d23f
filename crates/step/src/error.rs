use thiserror::Error;

use crate::client::ClientError;

/// Failure reported by a lifecycle step through
/// [`OutcomeReporter::on_failure`](crate::OutcomeReporter::on_failure).
///
/// The variants classify *why* a step could not report readiness. They do not
/// decide retry policy: [`Step::is_retryable`](crate::Step::is_retryable) is
/// what the sequencer consults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepError {
    /// Policy or alias configuration is missing or inconsistent with the index.
    ///
    /// Needs operator correction.
    #[error("{0}")]
    Configuration(String),

    /// The index is bound to the alias but another index is the write target.
    ///
    /// May clear up once cluster state changes.
    #[error("{0}")]
    WriteBinding(String),

    /// The index is marked indexing-complete yet is still the write target.
    ///
    /// Contradictory state; needs operator intervention.
    #[error("{0}")]
    IndexingCompleteConflict(String),

    /// The dry-run rollover request failed in transport or at the coordinator.
    #[error("dry-run rollover request failed: {0}")]
    Operation(#[from] ClientError),

    /// An outcome still waiting on its dry run was converted into a report.
    #[error("dry-run rollover check for alias [{alias}] has not completed")]
    DryRunPending {
        /// Alias whose dry run is outstanding.
        alias: String,
    },

    /// The reporter was dropped without reporting an outcome.
    #[error("outcome reporter dropped without reporting")]
    ReporterDropped,
}

impl StepError {
    /// Stable snake_case name of the variant, used in events and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::WriteBinding(_) => "write_binding",
            Self::IndexingCompleteConflict(_) => "indexing_complete_conflict",
            Self::Operation(_) => "operation",
            Self::DryRunPending { .. } => "dry_run_pending",
            Self::ReporterDropped => "reporter_dropped",
        }
    }

    /// Returns `true` for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` if retrying cannot help until an operator acts.
    pub fn requires_operator(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::IndexingCompleteConflict(_)
        )
    }

    /// Returns `true` if the failure may resolve by itself on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::WriteBinding(_) | Self::Operation(_))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn classification() {
        let config = StepError::Configuration("alias missing".into());
        assert!(config.is_configuration());
        assert!(config.requires_operator());
        assert!(!config.is_transient());

        let conflict = StepError::IndexingCompleteConflict("still writing".into());
        assert!(conflict.requires_operator());

        let binding = StepError::WriteBinding("not the write index".into());
        assert!(binding.is_transient());
        assert!(!binding.requires_operator());

        let op = StepError::from(ClientError::Timeout(Duration::from_secs(30)));
        assert!(op.is_transient());
        assert_eq!(op.kind(), "operation");
    }

    #[test]
    fn display_passes_reason_through() {
        let err = StepError::WriteBinding("index [a] is not the write index for alias [b]".into());
        assert_eq!(
            err.to_string(),
            "index [a] is not the write index for alias [b]"
        );

        let err = StepError::Operation(ClientError::Transport("connection reset".into()));
        assert_eq!(
            err.to_string(),
            "dry-run rollover request failed: transport error: connection reset"
        );
    }
}
