//! Per-registration bridge between a registry entry and its controller.

use std::sync::{Arc, Weak};

use crate::controller::Controller;
use crate::registry_entry::ControllerId;
use crate::registry_state::RegistryState;

/// Carries the init, close and dispose routes for one registration.
///
/// Created fresh on every accepted `put`. The bridge only holds weak references,
/// so neither the controller nor the registry is kept alive by it.
pub struct LifecycleBridge {
    id: ControllerId,
    controller: Weak<dyn Controller>,
    registry: Weak<RegistryState>,
}

impl LifecycleBridge {
    pub(crate) fn new(
        id: ControllerId,
        controller: &Arc<dyn Controller>,
        registry: &Arc<RegistryState>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            controller: Arc::downgrade(controller),
            registry: Arc::downgrade(registry),
        })
    }

    pub fn id(&self) -> &ControllerId {
        &self.id
    }

    pub(crate) fn call_init(&self) {
        if let Some(controller) = self.controller.upgrade() {
            controller.on_init();
        }
    }

    /// Clears the listener set, then runs the controller's own `on_close`.
    pub(crate) fn call_close(&self) {
        if let Some(controller) = self.controller.upgrade() {
            controller.base().listeners().clear();
            controller.on_close();
        }
    }

    /// Routes a self-dispose back to the owning registry.
    pub(crate) fn call_dispose(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.delete_by_id(&self.id);
        }
    }

    /// Detaches the bridge from its controller after eviction.
    pub(crate) fn release(&self) {
        if let Some(controller) = self.controller.upgrade() {
            controller.base().release(&self.id);
        }
    }
}

impl std::fmt::Debug for LifecycleBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleBridge")
            .field("id", &self.id)
            .field("alive", &(self.controller.strong_count() > 0))
            .finish()
    }
}
