//! Ordered listener set with snapshot broadcast.
//!
//! A [`Listeners`] value is the listenable half of every controller. Callbacks are
//! kept in insertion order, duplicates are allowed, and removal is by identity
//! (the same `Arc` allocation).

use std::sync::{Arc, Mutex};

/// A zero-argument change callback.
///
/// Listeners are compared by allocation, so keep a clone of the `Arc` you added
/// if you want to remove it later.
pub type Listener = Arc<dyn Fn() + Send + Sync + 'static>;

/// Wraps a closure into a [`Listener`].
///
/// # Examples
///
/// ```rust
/// use controller_registry::{listener, Listeners};
///
/// let listeners = Listeners::new();
/// let on_change = listener(|| println!("changed"));
/// listeners.add(&on_change);
/// assert_eq!(listeners.len(), 1);
/// ```
pub fn listener(f: impl Fn() + Send + Sync + 'static) -> Listener {
    Arc::new(f)
}

/// Insertion-ordered set of [`Listener`]s.
#[derive(Default)]
pub struct Listeners {
    inner: Mutex<Vec<Listener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener`. Adding the same listener twice makes it fire twice per broadcast.
    pub fn add(&self, listener: &Listener) {
        self.inner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Arc::clone(listener));
    }

    /// Removes every entry that is `listener`. Unknown listeners are ignored.
    pub fn remove(&self, listener: &Listener) {
        self.inner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .retain(|l| !Arc::ptr_eq(l, listener));
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every listener in insertion order.
    ///
    /// The sequence is snapshotted before the first call and the lock is released,
    /// so listeners may add or remove listeners (or broadcast again) freely. Changes
    /// made during a broadcast take effect from the next broadcast on.
    pub fn notify(&self) {
        let snapshot: Vec<Listener> = self
            .inner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();

        for listener in snapshot {
            listener();
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}
