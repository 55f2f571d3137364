//! Integration tests for tracing and event monitoring.
//!
//! The trace callback receives every registry operation, which is useful for
//! debugging view bindings that subscribe to the wrong controller.

use controller_registry::{define_registry, Controller, ControllerBase, ControllerExt, RegistryEvent};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Counter {
    base: ControllerBase,
}

impl Controller for Counter {
    fn base(&self) -> &ControllerBase {
        &self.base
    }
}

fn collect_events(
    set: impl FnOnce(Box<dyn Fn(&RegistryEvent) + Send + Sync>),
) -> Arc<Mutex<Vec<RegistryEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    set(Box::new(move |event| {
        events_clone.lock().unwrap().push(event.clone());
    }));
    events
}

#[test]
fn test_basic_tracing() {
    define_registry!(traced1);
    let events = collect_events(|cb| traced1::set_trace_callback(cb));

    traced1::put(Counter::default(), None);
    let _ = traced1::find::<Counter>(None);
    let _ = traced1::is_registered::<Counter>(None);

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 3);
    assert!(matches!(captured[0], RegistryEvent::Put { reused: false, .. }));
    assert!(matches!(captured[1], RegistryEvent::Find { found: true, .. }));
    assert!(matches!(captured[2], RegistryEvent::IsRegistered { found: true, .. }));
}

#[test]
fn test_trace_put_reuse() {
    define_registry!(traced2);
    let events = collect_events(|cb| traced2::set_trace_callback(cb));

    traced2::put(Counter::default(), Some("x"));
    traced2::put(Counter::default(), Some("x"));

    let captured = events.lock().unwrap();
    assert_eq!(
        captured[1],
        RegistryEvent::Put {
            type_name: std::any::type_name::<Counter>(),
            tag: Some("x".to_string()),
            reused: true,
        }
    );

    traced2::clear_trace_callback();
}

#[test]
fn test_trace_dispose_goes_through_delete_by_id() {
    define_registry!(traced3);
    let events = collect_events(|cb| traced3::set_trace_callback(cb));

    let counter = traced3::put(Counter::default(), None);
    let id = counter.registration_id().unwrap();
    counter.dispose();
    counter.dispose();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[1], RegistryEvent::DeleteById { id, found: true });
}

#[test]
fn test_trace_delete_missing() {
    define_registry!(traced4);
    let events = collect_events(|cb| traced4::set_trace_callback(cb));

    traced4::delete::<Counter>(Some("ghost"));

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].to_string().ends_with("tag: 'ghost', found: false }"));
}

#[test]
fn test_clear_trace_callback() {
    define_registry!(traced5);
    let events = collect_events(|cb| traced5::set_trace_callback(cb));

    traced5::put(Counter::default(), None);
    traced5::clear_trace_callback();
    traced5::delete_all();

    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_callback_can_use_different_registry() {
    define_registry!(main_registry);
    define_registry!(log_registry);

    main_registry::set_trace_callback(move |event| {
        if let RegistryEvent::Put { .. } = event {
            log_registry::put(Counter::default(), Some("last-put"));
        }
    });

    main_registry::put(Counter::default(), None);

    assert!(log_registry::is_registered::<Counter>(Some("last-put")));
    main_registry::clear_trace_callback();
}

#[test]
fn test_trace_refused_put() {
    define_registry!(traced6);
    let events = collect_events(|cb| traced6::set_trace_callback(cb));

    let counter = traced6::put(Counter::default(), Some("once"));
    counter.dispose();
    traced6::put_arc(counter.clone(), Some("once"));
    traced6::clear_trace_callback();
    assert!(!traced6::is_registered::<Counter>(Some("once")));

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 3);
    assert_eq!(
        captured[2],
        RegistryEvent::PutRefused {
            type_name: std::any::type_name::<Counter>(),
            tag: Some("once".to_string()),
        }
    );
}
