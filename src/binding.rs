//! Scoped subscription used by view layers.
//!
//! A [`Binding`] subscribes a re-render callback when it is mounted and
//! unsubscribes when dropped. With `auto_dispose` set, dropping it also disposes
//! the controller, so the next mount starts from a fresh instance; without it the
//! controller (and its state) outlives the view.

use std::sync::Arc;

use crate::controller::{Controller, ControllerExt};
use crate::listeners::{listener, Listener};

/// RAII guard tying a listener to the lifetime of a view.
///
/// # Examples
///
/// ```rust
/// use controller_registry::{Binding, Controller, ControllerBase, Registry, RegistryApi};
///
/// #[derive(Default)]
/// struct Form {
///     base: ControllerBase,
/// }
///
/// impl Controller for Form {
///     fn base(&self) -> &ControllerBase {
///         &self.base
///     }
/// }
///
/// let registry = Registry::new();
/// let form = registry.put(Form::default(), None);
///
/// let view = Binding::mount(form, || println!("render"), true);
/// drop(view);
///
/// assert!(!registry.is_registered::<Form>(None));
/// ```
pub struct Binding<C: Controller> {
    controller: Arc<C>,
    listener: Listener,
    auto_dispose: bool,
}

impl<C: Controller> Binding<C> {
    pub fn mount(
        controller: Arc<C>,
        on_change: impl Fn() + Send + Sync + 'static,
        auto_dispose: bool,
    ) -> Self {
        let listener = listener(on_change);
        controller.add_listener(&listener);
        Self {
            controller,
            listener,
            auto_dispose,
        }
    }

    pub fn controller(&self) -> &Arc<C> {
        &self.controller
    }

    pub fn auto_dispose(&self) -> bool {
        self.auto_dispose
    }
}

impl<C: Controller> Drop for Binding<C> {
    fn drop(&mut self) {
        self.controller.remove_listener(&self.listener);
        if self.auto_dispose {
            self.controller.dispose();
        }
    }
}

impl<C: Controller> std::fmt::Debug for Binding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("controller", &std::any::type_name::<C>())
            .field("auto_dispose", &self.auto_dispose)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ControllerBase, Registry, RegistryApi};
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

    #[derive(Default)]
    struct Incremental {
        base: ControllerBase,
        counter: AtomicU32,
    }

    impl Incremental {
        fn increment(&self) {
            self.counter.fetch_add(1, Ordering::SeqCst);
            self.notify_listeners();
        }
    }

    impl Controller for Incremental {
        fn base(&self) -> &ControllerBase {
            &self.base
        }
    }

    fn mount_counting(
        registry: &Registry,
        auto_dispose: bool,
        renders: &Arc<AtomicUsize>,
    ) -> Binding<Incremental> {
        let controller = registry.put(Incremental::default(), None);
        let renders = renders.clone();
        Binding::mount(
            controller,
            move || {
                renders.fetch_add(1, Ordering::SeqCst);
            },
            auto_dispose,
        )
    }

    #[test]
    fn test_auto_dispose_resets_on_remount() {
        let registry = Registry::new();
        let renders = Arc::new(AtomicUsize::new(0));

        let view = mount_counting(&registry, true, &renders);
        for _ in 0..3 {
            view.controller().increment();
        }
        assert_eq!(view.controller().counter.load(Ordering::SeqCst), 3);
        assert_eq!(renders.load(Ordering::SeqCst), 3);
        drop(view);

        let view = mount_counting(&registry, true, &renders);
        view.controller().increment();
        assert_eq!(view.controller().counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_without_auto_dispose_state_persists() {
        let registry = Registry::new();
        let renders = Arc::new(AtomicUsize::new(0));

        let view = mount_counting(&registry, false, &renders);
        for _ in 0..3 {
            view.controller().increment();
        }
        let controller = view.controller().clone();
        drop(view);

        assert!(controller.base().listeners().is_empty());
        assert!(registry.is_registered::<Incremental>(None));

        let view = mount_counting(&registry, false, &renders);
        view.controller().increment();
        assert_eq!(view.controller().counter.load(Ordering::SeqCst), 4);
    }
}
