//! Macros for creating isolated static registries.

/// Creates an isolated, process-wide controller registry as a module.
///
/// The macro generates a module containing:
/// - A state static (hidden)
/// - An `Api` struct that implements `RegistryApi`
/// - Free functions delegating to it
///
/// # Examples
///
/// ```rust
/// use controller_registry::{define_registry, Controller, ControllerBase};
///
/// #[derive(Default)]
/// struct Cart {
///     base: ControllerBase,
/// }
///
/// impl Controller for Cart {
///     fn base(&self) -> &ControllerBase {
///         &self.base
///     }
/// }
///
/// define_registry!(shop);
/// define_registry!(admin);
///
/// shop::put(Cart::default(), None);
///
/// // No interference between registries
/// assert!(shop::is_registered::<Cart>(None));
/// assert!(!admin::is_registered::<Cart>(None));
/// ```
///
/// # Trait-Based Usage
///
/// The `API` constant is available for code that is generic over `RegistryApi`:
///
/// ```rust
/// use controller_registry::{define_registry, RegistryApi};
///
/// define_registry!(app);
///
/// assert!(app::API.is_empty());
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            #![allow(dead_code)]

            use std::sync::{Arc, LazyLock};

            // Storage for registered controllers (module-private)
            static STATE: LazyLock<Arc<$crate::RegistryState>> =
                LazyLock::new($crate::RegistryState::new);

            /// Zero-sized type that implements the registry API.
            pub struct Api;

            impl $crate::RegistryApi for Api {
                fn state(&self) -> &Arc<$crate::RegistryState> {
                    &STATE
                }
            }

            /// Convenient constant for accessing the registry API.
            pub const API: Api = Api;

            /// Register a controller in the registry.
            pub fn put<C: $crate::Controller>(controller: C, tag: Option<&str>) -> Arc<C> {
                use $crate::RegistryApi;
                API.put(controller, tag)
            }

            pub fn put_arc<C: $crate::Controller>(controller: Arc<C>, tag: Option<&str>) -> Arc<C> {
                use $crate::RegistryApi;
                API.put_arc(controller, tag)
            }

            /// Retrieve a registered controller.
            pub fn find<C: $crate::Controller>(
                tag: Option<&str>,
            ) -> Result<Arc<C>, $crate::RegistryError> {
                use $crate::RegistryApi;
                API.find(tag)
            }

            /// Check if a controller is registered.
            pub fn is_registered<C: $crate::Controller>(tag: Option<&str>) -> bool {
                use $crate::RegistryApi;
                API.is_registered::<C>(tag)
            }

            /// Close and evict a controller.
            pub fn delete<C: $crate::Controller>(tag: Option<&str>) {
                use $crate::RegistryApi;
                API.delete::<C>(tag)
            }

            /// Close and evict an entry by id.
            pub fn delete_by_id(id: &$crate::ControllerId) {
                use $crate::RegistryApi;
                API.delete_by_id(id)
            }

            /// Close and evict every controller.
            pub fn delete_all() {
                use $crate::RegistryApi;
                API.delete_all()
            }

            /// Per-request reset, same as `delete_all`.
            pub fn clear_for_ssr() {
                use $crate::RegistryApi;
                API.clear_for_ssr()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                use $crate::RegistryApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::RegistryApi;
                API.clear_trace_callback()
            }
        }
    };
}
