//! Error types for the loam containers.
//!
//! Uses `thiserror` for ergonomic error definition. Every variant here is
//! recoverable misuse: the operation that produced it was a no-op and the
//! container is still in a consistent state. Allocation exhaustion has no
//! variant; growth that cannot be satisfied aborts through the global
//! allocator, since a structure observed mid-growth cannot be trusted.

use thiserror::Error;

use crate::identity::Identity;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for loam container operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The key is already present in the hash table.
    #[error("key '{key}' is already in the table")]
    DuplicateKey {
        /// Display form of the offending key.
        key: String,
    },

    /// The key is not present in the hash table.
    #[error("key '{key}' is not in the table")]
    KeyNotFound {
        /// Display form of the offending key.
        key: String,
    },

    /// No entity type with this name has been declared.
    #[error("unknown entity type '{name}'")]
    UnknownType {
        /// The type name that was looked up.
        name: String,
    },

    /// The entity type has no component with this name.
    #[error("unknown component '{component}' on entity type '{entity_type}'")]
    UnknownComponent {
        /// The component name that was looked up.
        component: String,
        /// The entity type that was queried.
        entity_type: String,
    },

    /// The identity does not name a live entity of this type.
    #[error("unknown entity {identity:?}")]
    UnknownEntity {
        /// The identity that was looked up.
        identity: Identity,
    },

    /// A component was accessed with a different element type than it
    /// was declared with.
    #[error("component '{component}' holds {stored} elements, accessed as {requested}")]
    ComponentTypeMismatch {
        /// The component name.
        component: String,
        /// Type name the component was declared with.
        stored: &'static str,
        /// Type name the access requested.
        requested: &'static str,
    },

    /// An entity type with this name already exists.
    #[error("entity type '{name}' already exists")]
    DuplicateType {
        /// The type name that was re-declared.
        name: String,
    },

    /// The component name was already added to the open declaration.
    #[error("component '{component}' already exists on entity type '{entity_type}'")]
    DuplicateComponent {
        /// The component name that was re-added.
        component: String,
        /// The entity type being declared.
        entity_type: String,
    },

    /// A declaration was started while another is still open, or an
    /// instance was created for a type whose schema is not yet closed.
    #[error("declaration of entity type '{name}' is still open")]
    DeclarationInProgress {
        /// The entity type whose declaration is open.
        name: String,
    },

    /// A declaration operation was issued with no open declaration.
    #[error("no entity type declaration is open")]
    NoDeclaration,

    /// An entity type or component name was empty.
    #[error("{what} name cannot be empty")]
    EmptyName {
        /// What was being named ("entity type" or "component").
        what: &'static str,
    },
}

impl Error {
    /// Creates a duplicate-key error from any displayable key.
    #[must_use]
    pub fn duplicate_key(key: impl ToString) -> Self {
        Self::DuplicateKey {
            key: key.to_string(),
        }
    }

    /// Creates a key-not-found error from any displayable key.
    #[must_use]
    pub fn key_not_found(key: impl ToString) -> Self {
        Self::KeyNotFound {
            key: key.to_string(),
        }
    }

    /// Creates an unknown-type error.
    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Creates an unknown-component error.
    #[must_use]
    pub fn unknown_component(component: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self::UnknownComponent {
            component: component.into(),
            entity_type: entity_type.into(),
        }
    }

    /// Creates an unknown-entity error.
    #[must_use]
    pub fn unknown_entity(identity: Identity) -> Self {
        Self::UnknownEntity { identity }
    }
}
