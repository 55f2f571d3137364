//! Toast-style notification queue built on top of [`Controller`](crate::Controller).
//!
//! [`NotificationsWorker`] is a regular controller: put it in a registry, bind a
//! view to it, and it broadcasts whenever the visible list changes. Additions are
//! staggered, removals are debounced into batches, and notifications may expire on
//! their own.
//!
//! ```rust,no_run
//! use controller_registry::notifications::{NotificationConfig, NotificationParams, NotificationsWorker};
//! use controller_registry::{Registry, RegistryApi};
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let registry = Registry::new();
//! let worker = registry.put(NotificationsWorker::new(NotificationConfig::default()), None);
//!
//! worker.create_notification(
//!     NotificationParams::new()
//!         .title("Saved")
//!         .remove_after(Duration::from_secs(5)),
//! );
//! # }
//! ```

mod config;
mod notification;
mod worker;

pub use config::NotificationConfig;
pub use notification::{Callback, Notification, NotificationParams, DEFAULT_COLOR};
pub use worker::NotificationsWorker;
