//! Metadata core for object-relational mapping: the entity-type graph,
//! annotation storage with configuration-source arbitration, and the
//! inverse-resolution engine for skip (many-to-many) navigations.

pub mod access;
pub mod annotation;
pub mod build;
pub mod error;
pub mod node;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

/// Maximum length for entity-type identifiers.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Maximum length for property identifiers.
pub const MAX_PROPERTY_NAME_LEN: usize = 64;

/// Maximum length for navigation and skip-navigation identifiers.
pub const MAX_NAVIGATION_NAME_LEN: usize = 64;

/// Maximum number of properties allowed in a key.
pub const MAX_KEY_PROPERTIES: usize = 16;

use crate::{build::BuildError, node::NodeError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        access::{Accessor, AccessorSlot, FieldInfo, PropertyAccessMode},
        annotation::{Annotatable, Annotation, AnnotationMap},
        err,
        error::ErrorTree,
        node::*,
        types::{ConfigurationSource, Primitive, Value},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    NodeError(#[from] NodeError),
}
