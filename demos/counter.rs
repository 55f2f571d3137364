//! Counter demo for controller-registry.
//!
//! Demonstrates:
//! - Registering a controller with `put()` and looking it up with `find()`
//! - Two views sharing one controller through the listener mechanism
//! - `Binding` with and without `auto_dispose`
//! - Tagged instances of the same controller type
//!
//! Run with: `cargo run --example counter`

use controller_registry::{define_registry, Binding, Controller, ControllerBase, ControllerExt};
use std::sync::atomic::{AtomicU32, Ordering};

// Create an isolated registry for this demo
define_registry!(app);

#[derive(Default)]
struct CounterController {
    base: ControllerBase,
    value: AtomicU32,
}

impl CounterController {
    fn increment(&self) {
        self.value.fetch_add(1, Ordering::SeqCst);
        self.notify_listeners();
    }

    fn value(&self) -> u32 {
        self.value.load(Ordering::SeqCst)
    }
}

impl Controller for CounterController {
    fn base(&self) -> &ControllerBase {
        &self.base
    }

    fn on_init(&self) {
        println!("   [on_init] counter registered");
    }

    fn on_close(&self) {
        println!("   [on_close] counter disposed at {}", self.value());
    }
}

fn main() {
    println!("=== controller-registry: Counter ===\n");

    // -------------------------------------------------------------------------
    // 1. Two views share the untagged counter
    // -------------------------------------------------------------------------
    println!("1. Mounting two views on the shared counter...");

    let header = Binding::mount(
        app::put(CounterController::default(), None),
        || println!("   header re-rendered"),
        false,
    );
    let footer = Binding::mount(
        app::find::<CounterController>(None).unwrap(),
        || println!("   footer re-rendered"),
        false,
    );

    header.controller().increment();
    footer.controller().increment();
    println!("   Value: {}", header.controller().value());

    // -------------------------------------------------------------------------
    // 2. Unmounting without auto_dispose keeps the state
    // -------------------------------------------------------------------------
    println!("\n2. Unmounting both views (auto_dispose = false)...");

    drop(header);
    drop(footer);

    let counter = app::find::<CounterController>(None).unwrap();
    println!("   Still registered, value: {}", counter.value());

    // -------------------------------------------------------------------------
    // 3. Tagged instances are independent
    // -------------------------------------------------------------------------
    println!("\n3. Mounting a tagged counter with auto_dispose...");

    let sidebar = Binding::mount(
        app::put(CounterController::default(), Some("sidebar")),
        || println!("   sidebar re-rendered"),
        true,
    );
    sidebar.controller().increment();
    println!(
        "   sidebar: {}, untagged: {}",
        sidebar.controller().value(),
        counter.value()
    );

    drop(sidebar);
    println!(
        "   sidebar registered after unmount: {}",
        app::is_registered::<CounterController>(Some("sidebar"))
    );

    // -------------------------------------------------------------------------
    // 4. Dispose everything
    // -------------------------------------------------------------------------
    println!("\n4. Deleting all controllers...");

    app::delete_all();
    println!("   Lookup after delete_all: {:?}", app::find::<CounterController>(None).err());

    println!("\n=== Done ===");
}
