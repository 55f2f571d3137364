use thiserror::Error;

/// Errors surfaced by registry lookups.
///
/// Only [`find`](crate::RegistryApi::find) can fail; deletes never do.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No untagged instance of the type is registered.
    #[error("No instance of {type_name} found.")]
    TypeNotFound { type_name: &'static str },

    /// No instance of the type is registered under this tag.
    #[error("No instance of {type_name} with tag '{tag}' found.")]
    TaggedNotFound { type_name: &'static str, tag: String },

    /// The stored controller did not downcast to the requested type.
    #[error("Type mismatch in registry for type: {type_name}")]
    TypeMismatch { type_name: &'static str },
}

impl RegistryError {
    pub(crate) fn not_found(type_name: &'static str, tag: Option<&str>) -> Self {
        match tag {
            None => RegistryError::TypeNotFound { type_name },
            Some(tag) => RegistryError::TaggedNotFound {
                type_name,
                tag: tag.to_string(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::TypeNotFound { .. } | RegistryError::TaggedNotFound { .. }
        )
    }

    /// Short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::TypeNotFound { .. } => "registry_type_not_found",
            RegistryError::TaggedNotFound { .. } => "registry_tagged_not_found",
            RegistryError::TypeMismatch { .. } => "registry_type_mismatch",
        }
    }
}
