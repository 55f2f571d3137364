//! # Notification worker - a controller with two debounced work queues.
//!
//! ## Architecture
//! ```text
//! create_notification ─► addition_queue ─► drain_additions (one per `stagger`)
//!                                                  ▲ blocked while removals run
//! remove_notification ─► removal_queue ─► debounce window ─► drain_removals
//!                                                  │  >1 queued: one broadcast, batch settle
//!                                                  └─ 1 queued : one broadcast, single settle
//! ```
//!
//! ## Rules
//! - At most one addition drain and one removal drain run at a time.
//! - Removals take priority: additions wait until the removal drain finished.
//! - Removals queued during a settle pause restart the debounce window.
//! - The queue lock is never held across an `.await` or while listeners run.
//! - Closing the controller cancels every pending timer. Afterwards removals apply
//!   immediately and new notifications are not shown.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use super::{Notification, NotificationConfig, NotificationParams};
use crate::controller::{Controller, ControllerBase, ControllerExt};

#[derive(Default)]
struct QueueState {
    notifications: Vec<Arc<Notification>>,
    removal_queue: VecDeque<Arc<Notification>>,
    addition_queue: VecDeque<Arc<Notification>>,
    is_processing_removals: bool,
    is_processing_additions: bool,
    removal_debounce: Option<CancellationToken>,
}

/// Controller holding the visible notifications and their pending work.
///
/// Every method that schedules work spawns onto the current Tokio runtime and
/// must be called from within one.
pub struct NotificationsWorker {
    base: ControllerBase,
    config: NotificationConfig,
    state: Mutex<QueueState>,
    shutdown: CancellationToken,
}

impl NotificationsWorker {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            base: ControllerBase::new(),
            config,
            state: Mutex::new(QueueState::default()),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Snapshot of the visible notifications, oldest first.
    pub fn notifications(&self) -> Vec<Arc<Notification>> {
        self.lock().notifications.clone()
    }

    pub fn pending_additions(&self) -> usize {
        self.lock().addition_queue.len()
    }

    pub fn pending_removals(&self) -> usize {
        self.lock().removal_queue.len()
    }

    /// Queues a new notification for display and arms its expiry timer, if any.
    ///
    /// A closed worker no longer schedules anything: the notification is returned
    /// but never shown.
    pub fn create_notification(self: &Arc<Self>, params: NotificationParams) -> Arc<Notification> {
        let notification = Arc::new(Notification::new(params, Arc::downgrade(self)));
        if self.is_closed() {
            tracing::warn!(
                id = notification.id(),
                "notification worker is closed; notification will not be shown"
            );
            return notification;
        }
        tracing::debug!(id = notification.id(), "notification queued for display");

        self.lock().addition_queue.push_back(Arc::clone(&notification));
        self.process_addition_queue();

        if let Some(after) = notification.remove_after() {
            self.schedule_expiry(&notification, after, self.config.expiry_settle);
        }
        notification
    }

    /// Queues `notification` for removal and restarts the debounce window.
    ///
    /// Removals requested within one window are applied as a single batch. On a
    /// closed worker there are no timers left, so the removal applies immediately.
    pub fn remove_notification(self: &Arc<Self>, notification: &Arc<Notification>) {
        notification.cancel_expiry();

        if self.is_closed() {
            tracing::debug!(id = notification.id(), "worker closed; removing without debounce");
            self.remove_now(notification);
            return;
        }

        {
            let mut state = self.lock();
            if !state
                .removal_queue
                .iter()
                .any(|queued| Arc::ptr_eq(queued, notification))
            {
                state.removal_queue.push_back(Arc::clone(notification));
            }
        }
        self.arm_removal_debounce();
    }

    /// True once the worker was closed by its registry.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Removes every visible notification at once, firing each `on_close`.
    pub fn clear_notifications(&self) {
        let cleared = std::mem::take(&mut self.lock().notifications);
        for notification in &cleared {
            notification.cancel_expiry();
            notification.fire_close();
        }
        tracing::debug!(count = cleared.len(), "notifications cleared");
        self.notify_listeners();
    }

    /// Arms the two-phase expiry: trigger the exit animation after `after`,
    /// then queue the removal after `settle`.
    pub(crate) fn schedule_expiry(
        self: &Arc<Self>,
        notification: &Arc<Notification>,
        after: Duration,
        settle: Duration,
    ) {
        let token = self.shutdown.child_token();
        notification.replace_expiry(token.clone());

        let worker = Arc::clone(self);
        let notification = Arc::clone(notification);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = time::sleep(after) => {}
            }

            tracing::debug!(id = notification.id(), "auto-removal time reached");
            notification.begin_auto_removal();
            worker.notify_listeners();

            tokio::select! {
                _ = token.cancelled() => return,
                _ = time::sleep(settle) => {}
            }
            worker.remove_notification(&notification);
        });
    }

    /// (Re)starts the debounce window; the removal drain runs when it elapses.
    fn arm_removal_debounce(self: &Arc<Self>) {
        let token = {
            let mut state = self.lock();
            if let Some(previous) = state.removal_debounce.take() {
                previous.cancel();
            }
            let token = self.shutdown.child_token();
            state.removal_debounce = Some(token.clone());
            token
        };

        let worker = Arc::clone(self);
        let debounce = self.config.removal_debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = time::sleep(debounce) => worker.drain_removals().await,
            }
        });
    }

    fn remove_now(&self, notification: &Arc<Notification>) {
        let was_shown = {
            let mut state = self.lock();
            state
                .removal_queue
                .retain(|queued| !Arc::ptr_eq(queued, notification));
            state
                .addition_queue
                .retain(|pending| !Arc::ptr_eq(pending, notification));
            match state
                .notifications
                .iter()
                .position(|shown| Arc::ptr_eq(shown, notification))
            {
                Some(index) => {
                    state.notifications.remove(index);
                    true
                }
                None => false,
            }
        };

        if was_shown {
            notification.fire_close();
            self.notify_listeners();
        }
    }

    fn process_addition_queue(self: &Arc<Self>) {
        {
            let mut state = self.lock();
            if state.is_processing_removals
                || state.is_processing_additions
                || state.addition_queue.is_empty()
            {
                return;
            }
            state.is_processing_additions = true;
        }

        let worker = Arc::clone(self);
        tokio::spawn(async move { worker.drain_additions().await });
    }

    async fn drain_additions(self: Arc<Self>) {
        loop {
            let added = {
                let mut state = self.lock();
                match state.addition_queue.pop_front() {
                    Some(notification) => {
                        state.notifications.push(Arc::clone(&notification));
                        Some(notification)
                    }
                    None => {
                        state.is_processing_additions = false;
                        None
                    }
                }
            };
            let Some(added) = added else {
                return;
            };

            tracing::trace!(id = added.id(), "notification shown");
            self.notify_listeners();

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    self.lock().is_processing_additions = false;
                    return;
                }
                _ = time::sleep(self.config.stagger) => {}
            }
        }
    }

    async fn drain_removals(self: Arc<Self>) {
        let (is_batch, removed) = {
            let mut state = self.lock();
            if state.is_processing_removals || state.removal_queue.is_empty() {
                return;
            }
            state.is_processing_removals = true;

            let is_batch = state.removal_queue.len() > 1;
            let queued: Vec<_> = state.removal_queue.drain(..).collect();

            let mut removed = Vec::with_capacity(queued.len());
            for notification in queued {
                if let Some(index) = state
                    .notifications
                    .iter()
                    .position(|shown| Arc::ptr_eq(shown, &notification))
                {
                    state.notifications.remove(index);
                    removed.push(notification);
                } else {
                    // Never shown yet: drop it from the pending additions instead.
                    state
                        .addition_queue
                        .retain(|pending| !Arc::ptr_eq(pending, &notification));
                }
            }
            (is_batch, removed)
        };

        for notification in &removed {
            notification.fire_close();
        }
        tracing::debug!(count = removed.len(), is_batch, "notifications removed");

        let settle = if is_batch {
            self.notify_listeners();
            Some(self.config.batch_removal_settle)
        } else if !removed.is_empty() {
            self.notify_listeners();
            Some(self.config.single_removal_settle)
        } else {
            None
        };

        if let Some(settle) = settle {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    self.lock().is_processing_removals = false;
                    return;
                }
                _ = time::sleep(settle) => {}
            }
        }

        let queued_while_settling = {
            let mut state = self.lock();
            state.is_processing_removals = false;
            !state.removal_queue.is_empty()
        };

        if queued_while_settling {
            // Late removals get a full window of their own so they can still batch.
            self.arm_removal_debounce();
        } else {
            self.process_addition_queue();
        }
    }
}

impl Default for NotificationsWorker {
    fn default() -> Self {
        Self::new(NotificationConfig::default())
    }
}

impl Controller for NotificationsWorker {
    fn base(&self) -> &ControllerBase {
        &self.base
    }

    fn on_close(&self) {
        tracing::debug!("notification worker closed; cancelling timers");
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for NotificationsWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("NotificationsWorker")
            .field("config", &self.config)
            .field("notifications", &state.notifications.len())
            .field("pending_additions", &state.addition_queue.len())
            .field("pending_removals", &state.removal_queue.len())
            .finish()
    }
}
