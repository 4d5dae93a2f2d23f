//! Observability event system
//!
//! Crates emit domain-specific events through a [`HookRegistry`] they are
//! handed at construction time; hooks registered on that registry observe them.
//!
//! - **Events**: Implement [`ObservabilityEvent`] to define custom events
//! - **Hooks**: Implement [`ObservabilityHook`] to receive events
//! - **Registry**: [`HookRegistry`] fans events out to hooks
//!
//! # Example
//!
//! ```rust
//! use ilm_log::observability::{HookRegistry, ObservabilityEvent, ObservabilityHook};
//! use std::sync::Arc;
//!
//! struct MyEvent;
//!
//! impl ObservabilityEvent for MyEvent {
//!     fn name(&self) -> &str {
//!         "my_event"
//!     }
//! }
//!
//! struct MyHook;
//!
//! impl ObservabilityHook for MyHook {
//!     fn on_event(&self, event: &dyn ObservabilityEvent) {
//!         println!("Received event: {}", event.name());
//!     }
//! }
//!
//! let registry = HookRegistry::new();
//! registry.register(Arc::new(MyHook));
//! registry.emit(&MyEvent);
//! ```

mod hooks;
mod registry;

pub use hooks::{LoggingHook, ObservabilityEvent, ObservabilityHook};
pub use registry::HookRegistry;
