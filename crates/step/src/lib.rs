#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # ILM Step
//!
//! The `check-rollover-ready` lifecycle step.
//!
//! ## Key Components
//!
//! - [`IndexMetadata`]: read-only snapshot of an index's settings and aliases
//! - [`ConditionEvaluator`]: decides readiness locally where it can
//! - [`DryRunRotationRequester`]: asks the coordinator through [`IndicesClient`]
//! - [`OutcomeReporter`]: one-shot report back to the sequencer
//! - [`WaitForRolloverReadyStep`]: ties the above together behind [`AsyncWaitStep`]
//!
//! ## Flow
//!
//! ```text
//! evaluate_condition ─▶ ConditionEvaluator ─▶ terminal ───────────────┐
//!                                  │                                  ▼
//!                                  └─▶ dry run ─▶ IndicesClient ─▶ OutcomeReporter
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod metadata;
pub mod step;

mod evaluator;
mod reporter;
mod requester;
mod rollover_ready;
mod thresholds;

pub use client::{ClientError, IndicesClient, RolloverRequest, RolloverResponse};
pub use config::StepConfig;
pub use error::StepError;
pub use evaluator::{ConditionEvaluator, EvaluationOutcome};
pub use events::StepEvent;
pub use metadata::{
    AliasBinding, AliasMetadata, IndexMetadata, IndexMetadataBuilder, RolloverInfo, WriteBinding,
};
pub use reporter::{ConditionStatus, EmptyInfo, OutcomeReceiver, OutcomeReporter, StepOutcome};
pub use requester::DryRunRotationRequester;
pub use rollover_ready::WaitForRolloverReadyStep;
pub use step::{AsyncWaitStep, Step};
pub use thresholds::{Condition, RolloverThresholds};

/// Result type for step evaluation.
pub type Result<T> = std::result::Result<T, StepError>;
