//! # Notification queue timing.
//!
//! All delays are presentation tuning; none of them affects which notifications
//! end up shown or removed, only when and in how many broadcasts.

use std::time::Duration;

/// Timing configuration for [`NotificationsWorker`](super::NotificationsWorker).
///
/// ## Field semantics
/// - `stagger`: pause after each drained addition (staggered entry)
/// - `removal_debounce`: quiet window that coalesces removals into one batch
/// - `single_removal_settle`: pause after removing a lone notification
/// - `batch_removal_settle`: pause after removing a batch
/// - `expiry_settle`: time between the exit animation trigger and removal on expiry
/// - `resume_settle`: same as `expiry_settle`, for timers restarted by `resume_auto_removal`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationConfig {
    pub stagger: Duration,
    pub removal_debounce: Duration,
    pub single_removal_settle: Duration,
    pub batch_removal_settle: Duration,
    pub expiry_settle: Duration,
    pub resume_settle: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            stagger: Duration::from_millis(80),
            removal_debounce: Duration::from_millis(150),
            single_removal_settle: Duration::from_millis(100),
            batch_removal_settle: Duration::from_millis(200),
            expiry_settle: Duration::from_millis(120),
            resume_settle: Duration::from_millis(300),
        }
    }
}

impl NotificationConfig {
    /// Every delay set to zero. Handy for tests that only care about ordering.
    pub fn immediate() -> Self {
        Self {
            stagger: Duration::ZERO,
            removal_debounce: Duration::ZERO,
            single_removal_settle: Duration::ZERO,
            batch_removal_settle: Duration::ZERO,
            expiry_settle: Duration::ZERO,
            resume_settle: Duration::ZERO,
        }
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_removal_debounce(mut self, debounce: Duration) -> Self {
        self.removal_debounce = debounce;
        self
    }

    pub fn with_single_removal_settle(mut self, settle: Duration) -> Self {
        self.single_removal_settle = settle;
        self
    }

    pub fn with_batch_removal_settle(mut self, settle: Duration) -> Self {
        self.batch_removal_settle = settle;
        self
    }

    pub fn with_expiry_settle(mut self, settle: Duration) -> Self {
        self.expiry_settle = settle;
        self
    }

    pub fn with_resume_settle(mut self, settle: Duration) -> Self {
        self.resume_settle = settle;
        self
    }
}
