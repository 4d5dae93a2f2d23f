//! Runtime settings for lifecycle step evaluation.

use std::time::Duration;

use ilm_core::{CoreError, TimeValue};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`StepConfig::master_timeout`].
pub const MASTER_TIMEOUT_ENV: &str = "ILM_MASTER_TIMEOUT";

/// Settings the sequencer passes into each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Master node timeout forwarded to the coordinator.
    pub master_timeout: TimeValue,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            master_timeout: TimeValue::from_secs(30),
        }
    }
}

impl StepConfig {
    /// Defaults overridden by `ILM_MASTER_TIMEOUT` (e.g. `"45s"`) when set.
    pub fn from_env() -> Result<Self, CoreError> {
        match std::env::var(MASTER_TIMEOUT_ENV) {
            Ok(raw) => Ok(Self {
                master_timeout: raw.trim().parse()?,
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Master timeout as a [`Duration`].
    pub fn master_timeout(&self) -> Duration {
        self.master_timeout.as_duration()
    }
}
