//! # Controller Registry
//!
//! A registry that creates, finds and disposes controllers (plain state holders)
//! keyed by their concrete type and an optional string tag, plus a minimal
//! listener mechanism so views can subscribe to controller changes.
//!
//! ## Quick Start
//!
//! ```rust
//! use controller_registry::{listener, Controller, ControllerBase, ControllerExt};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! #[derive(Default)]
//! struct Counter {
//!     base: ControllerBase,
//!     value: AtomicU32,
//! }
//!
//! impl Controller for Counter {
//!     fn base(&self) -> &ControllerBase {
//!         &self.base
//!     }
//! }
//!
//! let counter = controller_registry::put(Counter::default(), None);
//! counter.add_listener(&listener(|| println!("counter changed")));
//!
//! counter.value.fetch_add(1, Ordering::SeqCst);
//! counter.notify_listeners();
//!
//! let same = controller_registry::find::<Counter>(None).unwrap();
//! assert_eq!(same.value.load(Ordering::SeqCst), 1);
//!
//! controller_registry::delete::<Counter>(None);
//! assert!(!controller_registry::is_registered::<Counter>(None));
//! ```
//!
//! ## Features
//!
//! - **Tag-aware identity**: one instance per `(type, tag)`, the untagged key included
//! - **Lifecycle hooks**: `on_init` after registration, `on_close` before eviction
//! - **Self-dispose**: controllers can remove themselves through `dispose()`
//! - **Isolated registries**: explicit [`Registry`] values or [`define_registry!`] modules
//! - **Tracing support**: optional callback plus `tracing` debug events
//!
//! ## Main Functions
//!
//! - [`put`] - Register a controller in the default registry
//! - [`find`] - Retrieve a registered controller
//! - [`is_registered`] - Check if `(type, tag)` is registered
//! - [`delete`] / [`delete_all`] - Close and evict controllers
//! - [`clear_for_ssr`] - Per-request reset for multi-request hosts

mod binding;
mod controller;
mod lifecycle;
mod listeners;
mod macros;
mod registry;
mod registry_entry;
mod registry_error;
mod registry_event;
mod registry_state;
mod registry_trait;

pub mod notifications;

pub use binding::Binding;
pub use controller::{Controller, ControllerBase, ControllerExt, LifecycleState};
pub use lifecycle::LifecycleBridge;
pub use listeners::{listener, Listener, Listeners};
pub use registry::{
    clear_for_ssr, clear_trace_callback, delete, delete_all, delete_by_id, find, global,
    is_registered, put, put_arc, set_trace_callback, Registry,
};
pub use registry_entry::{ControllerId, EntryInfo};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_state::{RegistryState, TraceCallback};
pub use registry_trait::RegistryApi;
