//! A single toast-style notification and the parameters it is created from.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::NotificationsWorker;
use crate::registry_entry::random_token;

/// Callback attached to a notification.
pub type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

pub const DEFAULT_COLOR: &str = "#37C68F";

/// Parameters for [`NotificationsWorker::create_notification`].
#[derive(Clone, Default)]
pub struct NotificationParams {
    pub title: Option<String>,
    pub message: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    /// Self-expire after this long. `None` keeps the notification until removed.
    pub remove_after: Option<Duration>,
    pub on_click: Option<Callback>,
    pub on_close: Option<Callback>,
}

impl NotificationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn remove_after(mut self, after: Duration) -> Self {
        self.remove_after = Some(after);
        self
    }

    pub fn on_click(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(f));
        self
    }

    pub fn on_close(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(f));
        self
    }
}

impl std::fmt::Debug for NotificationParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationParams")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("color", &self.color)
            .field("icon", &self.icon)
            .field("remove_after", &self.remove_after)
            .finish_non_exhaustive()
    }
}

/// A notification owned by a [`NotificationsWorker`].
///
/// Identity is the `Arc` allocation: two notifications with equal fields are
/// still distinct.
pub struct Notification {
    id: String,
    title: Option<String>,
    message: Option<String>,
    color: String,
    icon: String,
    remove_after: Option<Duration>,
    on_click: Option<Callback>,
    on_close: Option<Callback>,
    is_auto_removing: AtomicBool,
    is_hovered: AtomicBool,
    expiry: Mutex<Option<CancellationToken>>,
    on_animate_removal: Mutex<Option<Callback>>,
    worker: Weak<NotificationsWorker>,
}

impl Notification {
    pub(crate) fn new(params: NotificationParams, worker: Weak<NotificationsWorker>) -> Self {
        Self {
            id: random_token(),
            title: params.title,
            message: params.message,
            color: params.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: params.icon.unwrap_or_default(),
            remove_after: params.remove_after,
            on_click: params.on_click,
            on_close: params.on_close,
            is_auto_removing: AtomicBool::new(false),
            is_hovered: AtomicBool::new(false),
            expiry: Mutex::new(None),
            on_animate_removal: Mutex::new(None),
            worker,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn remove_after(&self) -> Option<Duration> {
        self.remove_after
    }

    /// True once the expiry timer fired and the exit animation was triggered.
    pub fn is_auto_removing(&self) -> bool {
        self.is_auto_removing.load(Ordering::SeqCst)
    }

    pub fn is_hovered(&self) -> bool {
        self.is_hovered.load(Ordering::SeqCst)
    }

    /// Hook used by the view to start its exit animation when the notification expires.
    pub fn set_on_animate_removal(&self, f: impl Fn() + Send + Sync + 'static) {
        *self
            .on_animate_removal
            .lock()
            .unwrap_or_else(|p| p.into_inner()) = Some(Arc::new(f));
    }

    pub fn click(&self) {
        if let Some(on_click) = &self.on_click {
            on_click();
        }
    }

    /// Manual removal. Cancels a pending expiry and queues the removal.
    pub fn remove(self: &Arc<Self>) {
        self.cancel_expiry();
        if let Some(worker) = self.worker.upgrade() {
            worker.remove_notification(self);
        }
    }

    /// Stops the expiry timer while the pointer hovers the notification.
    ///
    /// Once the exit animation started the removal is already committed, so
    /// hovering only updates [`is_hovered`](Self::is_hovered).
    pub fn pause_auto_removal(&self) {
        self.is_hovered.store(true, Ordering::SeqCst);
        if !self.is_auto_removing() {
            self.cancel_expiry();
        }
    }

    /// Restarts the full expiry timer unless the exit animation already started.
    pub fn resume_auto_removal(self: &Arc<Self>) {
        self.is_hovered.store(false, Ordering::SeqCst);
        let Some(after) = self.remove_after else {
            return;
        };
        if self.is_auto_removing() {
            return;
        }
        if let Some(worker) = self.worker.upgrade() {
            let settle = worker.config().resume_settle;
            worker.schedule_expiry(self, after, settle);
        }
    }

    pub(crate) fn fire_close(&self) {
        if let Some(on_close) = &self.on_close {
            on_close();
        }
    }

    pub(crate) fn begin_auto_removal(&self) {
        self.is_auto_removing.store(true, Ordering::SeqCst);
        let animate = self
            .on_animate_removal
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(animate) = animate {
            animate();
        }
    }

    /// Installs a new expiry token, cancelling the previous one.
    pub(crate) fn replace_expiry(&self, token: CancellationToken) {
        let previous = self
            .expiry
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .replace(token);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    pub(crate) fn cancel_expiry(&self) {
        let pending = self.expiry.lock().unwrap_or_else(|p| p.into_inner()).take();
        if let Some(pending) = pending {
            pending.cancel();
        }
    }
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notification")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("color", &self.color)
            .field("remove_after", &self.remove_after)
            .field("is_auto_removing", &self.is_auto_removing())
            .field("is_hovered", &self.is_hovered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_defaults_applied() {
        let n = Notification::new(NotificationParams::new().title("Saved"), Weak::new());
        assert_eq!(n.title(), Some("Saved"));
        assert_eq!(n.message(), None);
        assert_eq!(n.color(), DEFAULT_COLOR);
        assert_eq!(n.icon(), "");
        assert_eq!(n.remove_after(), None);
        assert!(!n.is_auto_removing());
    }

    #[test]
    fn test_click_invokes_callback() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let c = clicks.clone();
        let n = Notification::new(
            NotificationParams::new().on_click(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }),
            Weak::new(),
        );

        n.click();
        n.click();

        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_replace_expiry_cancels_previous() {
        let n = Notification::new(NotificationParams::new(), Weak::new());
        let first = CancellationToken::new();
        let second = CancellationToken::new();

        n.replace_expiry(first.clone());
        n.replace_expiry(second.clone());
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        n.pause_auto_removal();
        assert!(second.is_cancelled());
        assert!(n.is_hovered());
    }

    #[test]
    fn test_pause_during_exit_animation_keeps_timer() {
        let n = Notification::new(NotificationParams::new(), Weak::new());
        let settle = CancellationToken::new();
        n.replace_expiry(settle.clone());
        n.begin_auto_removal();

        n.pause_auto_removal();

        assert!(n.is_hovered());
        assert!(!settle.is_cancelled());
    }

    #[test]
    fn test_remove_without_worker_is_noop() {
        let n = Arc::new(Notification::new(NotificationParams::new(), Weak::new()));
        n.remove();
        n.resume_auto_removal();
        assert!(!n.is_hovered());
    }
}
