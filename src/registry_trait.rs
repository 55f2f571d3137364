//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! registering, finding and disposing controllers.
//!
//! The registry is keyed by `(TypeId, tag)`: each concrete controller type can have
//! one untagged instance plus one instance per distinct tag. The untagged key is
//! its own identity, never a wildcard, and `Some("")` is a tag like any other.

use std::sync::Arc;

use crate::controller::Controller;
use crate::registry_entry::{ControllerId, EntryInfo};
use crate::registry_state::RegistryState;
use crate::{RegistryError, RegistryEvent};

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// the `state` accessor to be implemented.
pub trait RegistryApi {
    /// Access the shared storage of this registry.
    fn state(&self) -> &Arc<RegistryState>;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked after the registry lock is released, so it may use
    /// the registry itself.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.state().set_trace_callback(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Registered controllers are not affected.
    fn clear_trace_callback(&self) {
        self.state().clear_trace_callback();
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Register a controller under `(C, tag)` and return the managed instance.
    ///
    /// If the key is already taken, the existing instance is returned and
    /// `controller` is dropped; `on_init` does not run again. Otherwise a lifecycle
    /// bridge is bound, the entry is appended and `on_init` runs once the
    /// controller is reachable through [`find`](Self::find).
    fn put<C: Controller>(&self, controller: C, tag: Option<&str>) -> Arc<C> {
        self.state().put(controller, tag)
    }

    /// Like [`put`](Self::put) for a controller that is already shared.
    ///
    /// A controller can be managed by one entry only: if `controller` is or was
    /// registered elsewhere it is returned unchanged and stays unmanaged here.
    fn put_arc<C: Controller>(&self, controller: Arc<C>, tag: Option<&str>) -> Arc<C> {
        self.state().put_arc(controller, tag)
    }

    /// Retrieve the managed instance registered under `(C, tag)`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::TypeNotFound`] when `tag` is `None` and no untagged instance exists
    /// - [`RegistryError::TaggedNotFound`] when no instance exists for the given tag
    fn find<C: Controller>(&self, tag: Option<&str>) -> Result<Arc<C>, RegistryError> {
        self.state().find(tag)
    }

    /// Check whether `(C, tag)` is registered.
    fn is_registered<C: Controller>(&self, tag: Option<&str>) -> bool {
        self.state().is_registered::<C>(tag)
    }

    /// Close and evict the controller registered under `(C, tag)`.
    ///
    /// Listeners are cleared and `on_close` runs before eviction. Missing keys are a no-op.
    fn delete<C: Controller>(&self, tag: Option<&str>) {
        self.state().delete::<C>(tag);
    }

    /// Close and evict the entry with the given id. Missing ids are a no-op.
    fn delete_by_id(&self, id: &ControllerId) {
        self.state().delete_by_id(id);
    }

    /// Close and evict every entry, in insertion order.
    fn delete_all(&self) {
        self.state().delete_all();
    }

    /// Per-request reset for hosts that serve many requests from one registry.
    ///
    /// Same as [`delete_all`](Self::delete_all); call it before any lookup in a new request.
    fn clear_for_ssr(&self) {
        self.delete_all();
    }

    /// Number of live entries.
    fn len(&self) -> usize {
        self.state().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current entries, in insertion order.
    fn entries(&self) -> Vec<EntryInfo> {
        self.state().entries()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
