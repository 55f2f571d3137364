//! The controller contract.
//!
//! A controller is a long-lived state holder that UI code subscribes to. Concrete
//! controllers embed a [`ControllerBase`] and implement [`Controller`]; everything
//! else (`add_listener`, `notify_listeners`, `dispose`, ...) comes from the blanket
//! [`ControllerExt`] implementation and cannot be overridden.
//!
//! # Examples
//!
//! ```rust
//! use controller_registry::{Controller, ControllerBase, ControllerExt, Registry, RegistryApi};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! #[derive(Default)]
//! struct Counter {
//!     base: ControllerBase,
//!     value: AtomicU32,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         self.value.fetch_add(1, Ordering::SeqCst);
//!         self.notify_listeners();
//!     }
//! }
//!
//! impl Controller for Counter {
//!     fn base(&self) -> &ControllerBase {
//!         &self.base
//!     }
//! }
//!
//! let registry = Registry::new();
//! let counter = registry.put(Counter::default(), None);
//! counter.increment();
//! assert!(counter.is_managed());
//!
//! counter.dispose();
//! assert!(!registry.is_registered::<Counter>(None));
//! ```

use std::sync::{Arc, Mutex};

use crate::lifecycle::LifecycleBridge;
use crate::listeners::{Listener, Listeners};
use crate::registry_entry::ControllerId;

/// Lifecycle hooks every controller provides.
///
/// Both hooks run synchronously on the thread performing the registry operation,
/// with no registry lock held, so they may call back into the registry.
pub trait Controller: Send + Sync + 'static {
    /// Access to the embedded listener set and lifecycle binding.
    fn base(&self) -> &ControllerBase;

    /// Called once, right after the controller became reachable through the registry.
    fn on_init(&self) {}

    /// Called once, right before the controller is evicted.
    ///
    /// Listeners are already cleared when this runs.
    fn on_close(&self) {}
}

/// Where a controller is in its managed lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, never registered.
    Unregistered,
    /// Owned by a registry entry.
    Registered,
    /// Evicted. The instance keeps working but is no longer managed.
    Disposed,
}

#[derive(Default)]
enum Binding {
    #[default]
    Unbound,
    Bound(Arc<LifecycleBridge>),
    Released,
}

/// State shared by all controllers: the listener set and the lifecycle bridge slot.
#[derive(Default)]
pub struct ControllerBase {
    listeners: Listeners,
    binding: Mutex<Binding>,
}

impl ControllerBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn state(&self) -> LifecycleState {
        match &*self.binding.lock().unwrap_or_else(|p| p.into_inner()) {
            Binding::Unbound => LifecycleState::Unregistered,
            Binding::Bound(_) => LifecycleState::Registered,
            Binding::Released => LifecycleState::Disposed,
        }
    }

    /// One-shot bind step. Returns `false` if the controller was ever bound before.
    pub(crate) fn bind(&self, bridge: Arc<LifecycleBridge>) -> bool {
        let mut binding = self.binding.lock().unwrap_or_else(|p| p.into_inner());
        match *binding {
            Binding::Unbound => {
                *binding = Binding::Bound(bridge);
                true
            }
            _ => false,
        }
    }

    /// Drops the bridge if it is the one identified by `id`.
    pub(crate) fn release(&self, id: &ControllerId) {
        let mut binding = self.binding.lock().unwrap_or_else(|p| p.into_inner());
        if matches!(&*binding, Binding::Bound(bridge) if bridge.id() == id) {
            *binding = Binding::Released;
        }
    }

    fn bridge(&self) -> Option<Arc<LifecycleBridge>> {
        match &*self.binding.lock().unwrap_or_else(|p| p.into_inner()) {
            Binding::Bound(bridge) => Some(Arc::clone(bridge)),
            _ => None,
        }
    }

    pub(crate) fn registration_id(&self) -> Option<ControllerId> {
        self.bridge().map(|bridge| bridge.id().clone())
    }

    pub(crate) fn dispose(&self) {
        // Cloned out so the binding lock is free while the registry runs `on_close`.
        if let Some(bridge) = self.bridge() {
            bridge.call_dispose();
        }
    }
}

impl std::fmt::Debug for ControllerBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerBase")
            .field("listeners", &self.listeners.len())
            .field("state", &self.state())
            .finish()
    }
}

/// Operations available on every [`Controller`].
///
/// Implemented for all controllers through a blanket impl, so these cannot be
/// replaced by a concrete controller.
pub trait ControllerExt {
    fn add_listener(&self, listener: &Listener);

    fn remove_listener(&self, listener: &Listener);

    /// Broadcasts a change to every current listener. Call it after mutating state.
    fn notify_listeners(&self);

    /// Removes this controller from the registry that manages it.
    ///
    /// Runs `on_close` through the registry. Disposing an unmanaged or already
    /// disposed controller does nothing.
    fn dispose(&self);

    fn is_managed(&self) -> bool;

    fn lifecycle_state(&self) -> LifecycleState;

    /// The id of the registry entry managing this controller, if any.
    fn registration_id(&self) -> Option<ControllerId>;
}

impl<C: Controller + ?Sized> ControllerExt for C {
    fn add_listener(&self, listener: &Listener) {
        self.base().listeners().add(listener);
    }

    fn remove_listener(&self, listener: &Listener) {
        self.base().listeners().remove(listener);
    }

    fn notify_listeners(&self) {
        self.base().listeners().notify();
    }

    fn dispose(&self) {
        self.base().dispose();
    }

    fn is_managed(&self) -> bool {
        self.base().state() == LifecycleState::Registered
    }

    fn lifecycle_state(&self) -> LifecycleState {
        self.base().state()
    }

    fn registration_id(&self) -> Option<ControllerId> {
        self.base().registration_id()
    }
}
