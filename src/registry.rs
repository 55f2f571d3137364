//! Registry handles: an explicit, cloneable [`Registry`] context and the
//! process-wide default registry exposed as free functions.
//!
//! # Examples
//!
//! ```
//! use controller_registry::{Controller, ControllerBase, Registry, RegistryApi};
//!
//! #[derive(Default)]
//! struct Session {
//!     base: ControllerBase,
//! }
//!
//! impl Controller for Session {
//!     fn base(&self) -> &ControllerBase {
//!         &self.base
//!     }
//! }
//!
//! // One registry per tenant, nothing shared between them.
//! let tenant_a = Registry::new();
//! let tenant_b = Registry::new();
//!
//! tenant_a.put(Session::default(), None);
//! assert!(tenant_a.is_registered::<Session>(None));
//! assert!(!tenant_b.is_registered::<Session>(None));
//! ```

use std::sync::{Arc, LazyLock};

use crate::controller::Controller;
use crate::registry_entry::ControllerId;
use crate::registry_state::RegistryState;
use crate::registry_trait::RegistryApi;
use crate::{RegistryError, RegistryEvent};

/// An explicitly owned registry.
///
/// Clones share the same entries. Dropping the last clone drops every controller
/// still registered without running `on_close`; call
/// [`delete_all`](RegistryApi::delete_all) first if hooks must run.
#[derive(Clone, Default)]
pub struct Registry {
    state: Arc<RegistryState>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryApi for Registry {
    fn state(&self) -> &Arc<RegistryState> {
        &self.state
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Registry").field(&self.state).finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Process-wide default registry
// -------------------------------------------------------------------------------------------------

/// Global registry used by the free functions below.
static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Returns a handle to the process-wide default registry.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Registers `controller` in the default registry. See [`RegistryApi::put`].
pub fn put<C: Controller>(controller: C, tag: Option<&str>) -> Arc<C> {
    GLOBAL_REGISTRY.put(controller, tag)
}

/// Registers an already shared controller. See [`RegistryApi::put_arc`].
pub fn put_arc<C: Controller>(controller: Arc<C>, tag: Option<&str>) -> Arc<C> {
    GLOBAL_REGISTRY.put_arc(controller, tag)
}

/// Looks up `(C, tag)` in the default registry. See [`RegistryApi::find`].
pub fn find<C: Controller>(tag: Option<&str>) -> Result<Arc<C>, RegistryError> {
    GLOBAL_REGISTRY.find(tag)
}

pub fn is_registered<C: Controller>(tag: Option<&str>) -> bool {
    GLOBAL_REGISTRY.is_registered::<C>(tag)
}

pub fn delete<C: Controller>(tag: Option<&str>) {
    GLOBAL_REGISTRY.delete::<C>(tag)
}

pub fn delete_by_id(id: &ControllerId) {
    GLOBAL_REGISTRY.delete_by_id(id)
}

pub fn delete_all() {
    GLOBAL_REGISTRY.delete_all()
}

/// Per-request reset of the default registry. Same as [`delete_all`].
pub fn clear_for_ssr() {
    GLOBAL_REGISTRY.clear_for_ssr()
}

pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
    GLOBAL_REGISTRY.set_trace_callback(callback)
}

pub fn clear_trace_callback() {
    GLOBAL_REGISTRY.clear_trace_callback()
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ControllerBase, ControllerExt};
    use serial_test::serial;

    #[derive(Default)]
    struct Probe {
        base: ControllerBase,
    }

    impl Controller for Probe {
        fn base(&self) -> &ControllerBase {
            &self.base
        }
    }

    #[test]
    #[serial]
    fn test_global_put_find_delete() {
        delete_all();

        let probe = put(Probe::default(), None);
        assert!(is_registered::<Probe>(None));
        assert!(Arc::ptr_eq(&probe, &find::<Probe>(None).unwrap()));

        delete::<Probe>(None);
        assert!(!is_registered::<Probe>(None));
    }

    #[test]
    #[serial]
    fn test_global_dispose_routes_back() {
        delete_all();

        let probe = put(Probe::default(), Some("self"));
        probe.dispose();

        assert!(!is_registered::<Probe>(Some("self")));
        assert!(global().is_empty());
    }

    #[test]
    #[serial]
    fn test_global_delete_by_id() {
        delete_all();

        let probe = put(Probe::default(), None);
        delete_by_id(&probe.registration_id().unwrap());
        assert!(global().is_empty());
    }

    #[test]
    #[serial]
    fn test_clear_for_ssr() {
        delete_all();

        put(Probe::default(), None);
        put(Probe::default(), Some("request"));
        clear_for_ssr();

        assert!(global().is_empty());
    }

    #[test]
    #[serial]
    fn test_global_trace_callback() {
        delete_all();
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNT: AtomicUsize = AtomicUsize::new(0);
        COUNT.store(0, Ordering::SeqCst);

        set_trace_callback(|_e| {
            COUNT.fetch_add(1, Ordering::SeqCst);
        });
        put(Probe::default(), None);
        clear_trace_callback();
        delete_all();

        assert_eq!(COUNT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registry_clones_share_state() {
        let a = Registry::new();
        let b = a.clone();
        a.put(Probe::default(), None);
        assert!(b.is_registered::<Probe>(None));
    }

    #[test]
    fn test_dispose_after_registry_dropped() {
        let registry = Registry::new();
        let probe = registry.put(Probe::default(), None);
        drop(registry);

        // The bridge only holds a weak route back, so this is inert.
        probe.dispose();
        assert!(probe.base().listeners().is_empty());
    }
}
