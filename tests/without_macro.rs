//! Integration tests demonstrating how to build a controller registry WITHOUT the macro.
//!
//! This shows the manual implementation approach: a static `RegistryState` plus a
//! zero-sized type implementing `RegistryApi`.
//!
//! NOTE: All tests use #[serial] because they share the same static registry (MY_REGISTRY).
//! Each test starts with `delete_all()` to get a clean slate.

use serial_test::serial;
use controller_registry::{
    listener, Controller, ControllerBase, ControllerExt, RegistryApi, RegistryEvent,
    RegistryState,
};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

// ============================================================================
// Manual Registry Implementation (Without Macro)
// ============================================================================

static MY_STATE: LazyLock<Arc<RegistryState>> = LazyLock::new(RegistryState::new);

struct MyRegistry;

impl RegistryApi for MyRegistry {
    fn state(&self) -> &Arc<RegistryState> {
        &MY_STATE
    }
}

const MY_REGISTRY: MyRegistry = MyRegistry;

// ============================================================================
// Controllers
// ============================================================================

#[derive(Default)]
struct DemoController {
    base: ControllerBase,
    counter: AtomicU32,
}

impl DemoController {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
        self.notify_listeners();
    }
}

impl Controller for DemoController {
    fn base(&self) -> &ControllerBase {
        &self.base
    }
}

/// Checks its own registration from inside `on_init`.
#[derive(Default)]
struct SelfAware {
    base: ControllerBase,
    saw_itself: AtomicU32,
}

impl Controller for SelfAware {
    fn base(&self) -> &ControllerBase {
        &self.base
    }

    fn on_init(&self) {
        if MY_REGISTRY.is_registered::<SelfAware>(None) {
            self.saw_itself.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Disposes itself again from inside `on_close`.
#[derive(Default)]
struct Reentrant {
    base: ControllerBase,
    closes: AtomicUsize,
}

impl Controller for Reentrant {
    fn base(&self) -> &ControllerBase {
        &self.base
    }

    fn on_close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.dispose();
    }
}

// ============================================================================
// Tests Using Manual Implementation
// ============================================================================

#[test]
#[serial]
fn test_basic_put_and_find() {
    MY_REGISTRY.delete_all();

    let controller = MY_REGISTRY.put(DemoController::default(), None);
    let found: Arc<DemoController> = MY_REGISTRY.find(None).unwrap();

    assert!(Arc::ptr_eq(&controller, &found));
}

#[test]
#[serial]
fn test_on_init_sees_own_registration() {
    MY_REGISTRY.delete_all();

    let controller = MY_REGISTRY.put(SelfAware::default(), None);

    assert_eq!(controller.saw_itself.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_dispose_from_on_close_does_not_recurse() {
    MY_REGISTRY.delete_all();

    let controller = MY_REGISTRY.put(Reentrant::default(), None);
    controller.dispose();

    assert_eq!(controller.closes.load(Ordering::SeqCst), 1);
    assert!(MY_REGISTRY.is_empty());
}

#[test]
#[serial]
fn test_listeners_fire_in_order() {
    MY_REGISTRY.delete_all();

    let controller = MY_REGISTRY.put(DemoController::default(), None);
    let log = Arc::new(Mutex::new(Vec::new()));

    let (l1, l2) = (log.clone(), log.clone());
    controller.add_listener(&listener(move || l1.lock().unwrap().push("L1")));
    controller.add_listener(&listener(move || l2.lock().unwrap().push("L2")));

    for _ in 0..3 {
        controller.increment();
    }

    assert_eq!(
        *log.lock().unwrap(),
        vec!["L1", "L2", "L1", "L2", "L1", "L2"]
    );
}

#[test]
#[serial]
fn test_with_tracing() {
    MY_REGISTRY.delete_all();

    let event_count = Arc::new(AtomicUsize::new(0));
    let event_count_clone = Arc::clone(&event_count);

    MY_REGISTRY.set_trace_callback(move |_event: &RegistryEvent| {
        event_count_clone.fetch_add(1, Ordering::SeqCst);
    });

    MY_REGISTRY.put(DemoController::default(), None); // +1 event
    let _ = MY_REGISTRY.find::<DemoController>(None); // +1 event
    MY_REGISTRY.is_registered::<DemoController>(None); // +1 event

    assert_eq!(event_count.load(Ordering::SeqCst), 3);

    MY_REGISTRY.clear_trace_callback();
}

#[test]
#[serial]
fn test_trace_callback_may_use_registry() {
    MY_REGISTRY.delete_all();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    MY_REGISTRY.set_trace_callback(move |event| {
        if let RegistryEvent::Put { .. } = event {
            seen_clone.lock().unwrap().push(MY_REGISTRY.len());
        }
    });

    MY_REGISTRY.put(DemoController::default(), None);
    MY_REGISTRY.clear_trace_callback();

    assert_eq!(*seen.lock().unwrap(), vec![1]);
}
