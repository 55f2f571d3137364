//! Notification queue demo for controller-registry.
//!
//! Demonstrates:
//! - Registering a `NotificationsWorker` as a controller
//! - Staggered additions and debounced, batched removals
//! - Self-expiring notifications with a two-phase exit
//!
//! Run with: `cargo run --example notifications`

use controller_registry::notifications::{NotificationConfig, NotificationParams, NotificationsWorker};
use controller_registry::{listener, ControllerExt, Registry, RegistryApi};
use std::sync::Arc;
use std::time::Duration;

fn render(worker: &NotificationsWorker) {
    let titles: Vec<_> = worker
        .notifications()
        .iter()
        .map(|n| n.title().unwrap_or("(untitled)").to_string())
        .collect();
    println!("   render: {titles:?}");
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== controller-registry: Notifications ===\n");

    let registry = Registry::new();
    let worker = registry.put(NotificationsWorker::new(NotificationConfig::default()), None);

    let view = Arc::downgrade(&worker);
    worker.add_listener(&listener(move || {
        if let Some(worker) = view.upgrade() {
            render(&worker);
        }
    }));

    // -------------------------------------------------------------------------
    // 1. Additions appear one at a time
    // -------------------------------------------------------------------------
    println!("1. Creating three notifications...");

    let saved = worker.create_notification(
        NotificationParams::new()
            .title("Saved")
            .on_close(|| println!("   'Saved' closed")),
    );
    let synced = worker.create_notification(
        NotificationParams::new()
            .title("Synced")
            .on_close(|| println!("   'Synced' closed")),
    );
    let expiring = worker.create_notification(
        NotificationParams::new()
            .title("Expiring")
            .remove_after(Duration::from_millis(600)),
    );
    expiring.set_on_animate_removal(|| println!("   'Expiring' starts its exit animation"));

    tokio::time::sleep(Duration::from_millis(300)).await;

    // -------------------------------------------------------------------------
    // 2. Removals within the debounce window form one batch
    // -------------------------------------------------------------------------
    println!("\n2. Removing two notifications back to back...");

    saved.remove();
    synced.remove();
    tokio::time::sleep(Duration::from_millis(400)).await;

    // -------------------------------------------------------------------------
    // 3. The last one expires on its own
    // -------------------------------------------------------------------------
    println!("\n3. Waiting for expiry...");

    tokio::time::sleep(Duration::from_millis(600)).await;
    println!("   Remaining: {}", worker.notifications().len());

    registry.delete_all();
    println!("\n=== Done ===");
}
