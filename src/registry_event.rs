use std::fmt;

use crate::registry_entry::ControllerId;

/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`
/// and are also logged through `tracing` at debug level.
///
/// # Examples
///
/// ```rust
/// use controller_registry::RegistryEvent;
///
/// let event = RegistryEvent::Find {
///     type_name: "Counter",
///     tag: Some("main".to_string()),
///     found: false,
/// };
/// assert_eq!(event.to_string(), "find { type_name: Counter, tag: 'main', found: false }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A controller was put. `reused` is true when an existing instance was returned.
    Put {
        type_name: &'static str,
        tag: Option<String>,
        reused: bool,
    },

    /// A controller that is or was managed elsewhere was passed to `put_arc` and
    /// handed back unmanaged.
    PutRefused {
        type_name: &'static str,
        tag: Option<String>,
    },

    /// A controller was looked up with `find`.
    Find {
        type_name: &'static str,
        tag: Option<String>,
        found: bool,
    },

    /// A registration check was performed.
    IsRegistered {
        type_name: &'static str,
        tag: Option<String>,
        found: bool,
    },

    /// A delete by type and tag was requested.
    Delete {
        type_name: &'static str,
        tag: Option<String>,
        found: bool,
    },

    /// A delete by entry id was requested (self-dispose goes through here).
    DeleteById { id: ControllerId, found: bool },

    /// Every entry was closed and evicted.
    DeleteAll { count: usize },
}

struct TagDisplay<'a>(&'a Option<String>);

impl fmt::Display for TagDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(tag) => write!(f, "'{tag}'"),
            None => f.write_str("none"),
        }
    }
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Put {
                type_name,
                tag,
                reused,
            } => write!(
                f,
                "put {{ type_name: {type_name}, tag: {}, reused: {reused} }}",
                TagDisplay(tag)
            ),
            RegistryEvent::PutRefused { type_name, tag } => write!(
                f,
                "put_refused {{ type_name: {type_name}, tag: {} }}",
                TagDisplay(tag)
            ),
            RegistryEvent::Find {
                type_name,
                tag,
                found,
            } => write!(
                f,
                "find {{ type_name: {type_name}, tag: {}, found: {found} }}",
                TagDisplay(tag)
            ),
            RegistryEvent::IsRegistered {
                type_name,
                tag,
                found,
            } => write!(
                f,
                "is_registered {{ type_name: {type_name}, tag: {}, found: {found} }}",
                TagDisplay(tag)
            ),
            RegistryEvent::Delete {
                type_name,
                tag,
                found,
            } => write!(
                f,
                "delete {{ type_name: {type_name}, tag: {}, found: {found} }}",
                TagDisplay(tag)
            ),
            RegistryEvent::DeleteById { id, found } => {
                write!(f, "delete_by_id {{ id: {id}, found: {found} }}")
            }
            RegistryEvent::DeleteAll { count } => {
                write!(f, "delete_all {{ count: {count} }}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_event_display() {
        let event = RegistryEvent::Put {
            type_name: "Counter",
            tag: None,
            reused: false,
        };
        assert_eq!(
            event.to_string(),
            "put { type_name: Counter, tag: none, reused: false }"
        );

        let event = RegistryEvent::IsRegistered {
            type_name: "Counter",
            tag: Some(String::new()),
            found: true,
        };
        assert_eq!(
            event.to_string(),
            "is_registered { type_name: Counter, tag: '', found: true }"
        );

        let event = RegistryEvent::Delete {
            type_name: "Counter",
            tag: Some("x".into()),
            found: false,
        };
        assert_eq!(
            event.to_string(),
            "delete { type_name: Counter, tag: 'x', found: false }"
        );

        let event = RegistryEvent::PutRefused {
            type_name: "Counter",
            tag: None,
        };
        assert_eq!(
            event.to_string(),
            "put_refused { type_name: Counter, tag: none }"
        );

        let event = RegistryEvent::DeleteAll { count: 3 };
        assert_eq!(event.to_string(), "delete_all { count: 3 }");
    }

    #[test]
    fn test_registry_event_clone() {
        let event = RegistryEvent::DeleteAll { count: 1 };
        assert_eq!(event.clone(), event);
    }
}
