//! Injectable registry for observability hooks

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::hooks::{ObservabilityEvent, ObservabilityHook};

/// Registry that fans events out to its hooks
///
/// Owned by whoever builds the steps and shared as `Arc<HookRegistry>`;
/// there is no process-wide instance. An empty registry makes
/// [`emit`](Self::emit) a read-lock and an empty loop.
///
/// # Thread Safety
///
/// Uses `parking_lot::RwLock`: concurrent emits, exclusive registration.
#[derive(Default)]
pub struct HookRegistry {
    hooks: RwLock<Vec<Arc<dyn ObservabilityHook>>>,
}

impl HookRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with one hook already registered
    #[must_use]
    pub fn with_hook(hook: Arc<dyn ObservabilityHook>) -> Self {
        let registry = Self::new();
        registry.register(hook);
        registry
    }

    /// Register a new hook
    ///
    /// The hook's `initialize()` method is called immediately.
    pub fn register(&self, hook: Arc<dyn ObservabilityHook>) {
        hook.initialize();
        self.hooks.write().push(hook);
    }

    /// Emit an event to all registered hooks
    pub fn emit(&self, event: &dyn ObservabilityEvent) {
        for hook in self.hooks.read().iter() {
            hook.on_event(event);
        }
    }

    /// Call `shutdown()` on each hook and clear the registry
    pub fn shutdown(&self) {
        let hooks = std::mem::take(&mut *self.hooks.write());
        for hook in &hooks {
            hook.shutdown();
        }
    }

    /// Number of registered hooks
    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hook_count())
            .finish()
    }
}
