//! Shared state behind every registry: the ordered entry list and the trace slot.
//!
//! All operations follow the same locking rule: the entry lock is held only for
//! the scan/insert/remove itself, never while a controller hook, a listener, or
//! the trace callback runs. That keeps hooks free to call back into the registry.

use std::any::{Any, TypeId};
use std::sync::{Arc, Mutex};

use crate::controller::{Controller, ControllerExt};
use crate::lifecycle::LifecycleBridge;
use crate::registry_entry::{ControllerId, EntryInfo, RegistryEntry};
use crate::{RegistryError, RegistryEvent};

enum Slot {
    Existing(Arc<dyn Any + Send + Sync>),
    Inserted,
    Refused,
}

/// User-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Storage of one registry.
///
/// Obtain one through [`Registry`](crate::Registry) or
/// [`define_registry!`](crate::define_registry) rather than directly.
#[derive(Default)]
pub struct RegistryState {
    entries: Mutex<Vec<RegistryEntry>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl RegistryState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ---------------------------------------------------------------------------------------------
    // Tracing
    // ---------------------------------------------------------------------------------------------

    pub(crate) fn set_trace_callback(&self, callback: Arc<TraceCallback>) {
        *self.trace.lock().unwrap_or_else(|p| p.into_inner()) = Some(callback);
    }

    pub(crate) fn clear_trace_callback(&self) {
        *self.trace.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    fn emit_event(&self, event: RegistryEvent) {
        tracing::debug!(target: "controller_registry", %event);

        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------------------------------

    fn lookup(&self, type_id: TypeId, tag: Option<&str>) -> Option<Arc<dyn Any + Send + Sync>> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .find(|e| e.matches(type_id, tag))
            .map(|e| Arc::clone(&e.controller))
    }

    pub(crate) fn put<C: Controller>(self: &Arc<Self>, controller: C, tag: Option<&str>) -> Arc<C> {
        self.put_arc(Arc::new(controller), tag)
    }

    pub(crate) fn put_arc<C: Controller>(
        self: &Arc<Self>,
        controller: Arc<C>,
        tag: Option<&str>,
    ) -> Arc<C> {
        let type_name = std::any::type_name::<C>();

        let id = ControllerId::generate();
        let as_dyn: Arc<dyn Controller> = controller.clone();
        let bridge = LifecycleBridge::new(id.clone(), &as_dyn, self);

        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            if let Some(entry) = entries.iter().find(|e| e.matches(TypeId::of::<C>(), tag)) {
                Slot::Existing(Arc::clone(&entry.controller))
            } else if controller.base().bind(Arc::clone(&bridge)) {
                entries.push(RegistryEntry {
                    id,
                    type_id: TypeId::of::<C>(),
                    type_name,
                    tag: tag.map(str::to_string),
                    controller: controller.clone(),
                    bridge: Arc::clone(&bridge),
                    closing: false,
                });
                Slot::Inserted
            } else {
                Slot::Refused
            }
        };

        match slot {
            Slot::Refused => {
                tracing::warn!(
                    target: "controller_registry",
                    type_name,
                    state = ?controller.lifecycle_state(),
                    "refusing to register a controller that is or was already managed"
                );
                self.emit_event(RegistryEvent::PutRefused {
                    type_name,
                    tag: tag.map(str::to_string),
                });
                controller
            }
            Slot::Existing(existing) => {
                self.emit_event(RegistryEvent::Put {
                    type_name,
                    tag: tag.map(str::to_string),
                    reused: true,
                });
                // The TypeId matched, so the downcast holds.
                existing.downcast::<C>().unwrap_or(controller)
            }
            Slot::Inserted => {
                self.emit_event(RegistryEvent::Put {
                    type_name,
                    tag: tag.map(str::to_string),
                    reused: false,
                });
                bridge.call_init();
                controller
            }
        }
    }

    pub(crate) fn find<C: Controller>(&self, tag: Option<&str>) -> Result<Arc<C>, RegistryError> {
        let type_name = std::any::type_name::<C>();

        let result = match self.lookup(TypeId::of::<C>(), tag) {
            Some(any) => any
                .downcast::<C>()
                .map_err(|_| RegistryError::TypeMismatch { type_name }),
            None => Err(RegistryError::not_found(type_name, tag)),
        };

        self.emit_event(RegistryEvent::Find {
            type_name,
            tag: tag.map(str::to_string),
            found: result.is_ok(),
        });

        result
    }

    pub(crate) fn is_registered<C: Controller>(&self, tag: Option<&str>) -> bool {
        let found = self.lookup(TypeId::of::<C>(), tag).is_some();

        self.emit_event(RegistryEvent::IsRegistered {
            type_name: std::any::type_name::<C>(),
            tag: tag.map(str::to_string),
            found,
        });

        found
    }

    // ---------------------------------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------------------------------

    /// Marks the first matching entry as closing and hands back its bridge.
    fn begin_close(&self, pred: impl Fn(&RegistryEntry) -> bool) -> Option<Arc<LifecycleBridge>> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        let entry = entries.iter_mut().find(|e| !e.closing && pred(e))?;
        entry.closing = true;
        Some(Arc::clone(&entry.bridge))
    }

    /// Runs the close hooks, then evicts the entry and detaches the bridge.
    fn close_and_evict(&self, bridge: &LifecycleBridge) {
        bridge.call_close();

        let evicted = {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            entries
                .iter()
                .position(|e| &e.id == bridge.id())
                .map(|index| entries.remove(index))
        };

        bridge.release();
        // Dropped outside the lock: a controller's own Drop may touch the registry.
        drop(evicted);
    }

    pub(crate) fn delete<C: Controller>(&self, tag: Option<&str>) {
        let bridge = self.begin_close(|e| e.matches(TypeId::of::<C>(), tag));

        self.emit_event(RegistryEvent::Delete {
            type_name: std::any::type_name::<C>(),
            tag: tag.map(str::to_string),
            found: bridge.is_some(),
        });

        if let Some(bridge) = bridge {
            self.close_and_evict(&bridge);
        }
    }

    pub(crate) fn delete_by_id(&self, id: &ControllerId) {
        let bridge = self.begin_close(|e| &e.id == id);

        self.emit_event(RegistryEvent::DeleteById {
            id: id.clone(),
            found: bridge.is_some(),
        });

        if let Some(bridge) = bridge {
            self.close_and_evict(&bridge);
        }
    }

    pub(crate) fn delete_all(&self) {
        let bridges: Vec<Arc<LifecycleBridge>> = {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            entries
                .iter_mut()
                .filter(|e| !e.closing)
                .map(|e| {
                    e.closing = true;
                    Arc::clone(&e.bridge)
                })
                .collect()
        };

        self.emit_event(RegistryEvent::DeleteAll {
            count: bridges.len(),
        });

        for bridge in bridges {
            self.close_and_evict(&bridge);
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub(crate) fn entries(&self) -> Vec<EntryInfo> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .map(RegistryEntry::info)
            .collect()
    }
}

impl std::fmt::Debug for RegistryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryState")
            .field("entries", &self.entries())
            .finish()
    }
}
