//! Event and hook traits behind [`HookRegistry`](super::HookRegistry)
//!
//! A step describes what happened with an [`ObservabilityEvent`]; every
//! [`ObservabilityHook`] on the registry sees it synchronously.

use std::time::SystemTime;

/// Something a lifecycle step wants hooks to know about
///
/// # Example
///
/// ```rust
/// use ilm_log::observability::ObservabilityEvent;
///
/// struct DryRunSent {
///     alias: String,
/// }
///
/// impl ObservabilityEvent for DryRunSent {
///     fn name(&self) -> &str {
///         "dry_run_sent"
///     }
///
///     fn data(&self) -> Option<serde_json::Value> {
///         Some(serde_json::json!({ "alias": self.alias }))
///     }
/// }
/// ```
pub trait ObservabilityEvent: Send + Sync {
    /// Stable snake_case name, e.g. `"dry_run_dispatched"`
    fn name(&self) -> &str;

    /// Time of the event
    ///
    /// The default is the moment of the call.
    fn timestamp(&self) -> SystemTime {
        SystemTime::now()
    }

    /// Structured payload
    ///
    /// `None` when the name says everything.
    fn data(&self) -> Option<serde_json::Value> {
        None
    }
}

/// Receiver of every event emitted on a registry
///
/// Implementations should be fast and non-blocking; they run inline on the
/// emitting task.
pub trait ObservabilityHook: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: &dyn ObservabilityEvent);

    /// Runs once on registration
    fn initialize(&self) {}

    /// Runs when the registry shuts down
    fn shutdown(&self) {}
}

/// Hook that forwards every event to `tracing` at a fixed level
///
/// # Example
///
/// ```rust
/// use ilm_log::observability::{HookRegistry, LoggingHook};
/// use std::sync::Arc;
///
/// let registry = HookRegistry::new();
/// registry.register(Arc::new(LoggingHook::new(tracing::Level::INFO)));
/// ```
#[derive(Debug)]
pub struct LoggingHook {
    level: tracing::Level,
}

impl LoggingHook {
    /// Log events at `level`
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl ObservabilityHook for LoggingHook {
    fn on_event(&self, event: &dyn ObservabilityEvent) {
        use tracing::Level;

        let name = event.name();
        let data = event.data();
        if self.level == Level::ERROR {
            tracing::error!(event = name, ?data, "observability event");
        } else if self.level == Level::WARN {
            tracing::warn!(event = name, ?data, "observability event");
        } else if self.level == Level::INFO {
            tracing::info!(event = name, ?data, "observability event");
        } else if self.level == Level::DEBUG {
            tracing::debug!(event = name, ?data, "observability event");
        } else {
            tracing::trace!(event = name, ?data, "observability event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rotated;

    impl ObservabilityEvent for Rotated {
        fn name(&self) -> &str {
            "rotated"
        }
    }

    #[test]
    fn default_event_has_no_data() {
        assert_eq!(Rotated.data(), None);
        assert!(Rotated.timestamp() <= SystemTime::now());
    }

    #[test]
    fn logging_hook_accepts_every_level() {
        for level in [
            tracing::Level::ERROR,
            tracing::Level::WARN,
            tracing::Level::INFO,
            tracing::Level::DEBUG,
            tracing::Level::TRACE,
        ] {
            LoggingHook::new(level).on_event(&Rotated);
        }
    }
}
