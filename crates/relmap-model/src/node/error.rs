use crate::types::Primitive;
use thiserror::Error as ThisError;

///
/// NodeError
///
/// Synchronous failures raised by graph mutations. Every operation
/// validates before it mutates, so a returned error means nothing changed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NodeError {
    #[error("a to-principal navigation cannot be a collection: '{name}' on '{entity}'")]
    CollectionToPrincipal { entity: String, name: String },

    #[error("entity type '{name}' is already defined on the model")]
    DuplicateEntityType { name: String },

    #[error("foreign key ({properties}) referencing '{principal}' is already defined on '{entity}'")]
    DuplicateForeignKey {
        entity: String,
        principal: String,
        properties: String,
    },

    #[error("key ({properties}) is already defined on '{entity}'")]
    DuplicateKey { entity: String, properties: String },

    #[error("navigation '{name}' is already defined on '{entity}'")]
    DuplicateNavigation { entity: String, name: String },

    #[error("property '{name}' is already defined on '{entity}'")]
    DuplicateProperty { entity: String, name: String },

    #[error("foreign key on '{entity}' must cover at least one property")]
    EmptyForeignKey { entity: String },

    #[error("key on '{entity}' must cover at least one property")]
    EmptyKey { entity: String },

    #[error("entity type '{name}' cannot be removed: still referenced by {holder}")]
    EntityTypeInUse { name: String, holder: String },

    #[error(
        "foreign key on '{entity}' covers {dependent_count} properties but the principal key on '{principal}' covers {principal_count}"
    )]
    ForeignKeyCountMismatch {
        entity: String,
        principal: String,
        dependent_count: usize,
        principal_count: usize,
    },

    #[error(
        "navigation '{existing}' already occupies the {slot} slot of the foreign key on '{entity}'"
    )]
    ForeignKeyNavigationDefined {
        entity: String,
        existing: String,
        slot: &'static str,
    },

    #[error(
        "foreign key property '{dependent_property}' ({dependent_primitive}) on '{entity}' cannot hold principal key property '{principal_property}' ({principal_primitive})"
    )]
    ForeignKeyTypeMismatch {
        entity: String,
        dependent_property: String,
        dependent_primitive: Primitive,
        principal_property: String,
        principal_primitive: Primitive,
    },

    #[error("{what} name '{name}' {reason}")]
    InvalidIdentifier {
        what: &'static str,
        name: String,
        reason: String,
    },

    #[error(
        "skip navigation '{inverse}' traverses association entity type '{inverse_association}' but '{navigation}' traverses '{association}'"
    )]
    InverseAssociationMismatch {
        navigation: String,
        association: String,
        inverse: String,
        inverse_association: String,
    },

    #[error(
        "skip navigation '{inverse}' on '{inverse_entity}' cannot be the inverse of '{navigation}' on '{entity}': the navigations do not target each other's declaring entity types"
    )]
    InverseEndpointMismatch {
        navigation: String,
        entity: String,
        inverse: String,
        inverse_entity: String,
    },

    #[error("key on '{entity}' covers {count} properties (maximum {max})")]
    KeyTooWide {
        entity: String,
        count: usize,
        max: usize,
    },

    #[error("property does not belong to entity type '{entity}'")]
    PropertyNotOnEntity { entity: String },

    #[error("skip navigation '{name}' cannot be its own inverse")]
    SelfInverse { name: String },

    #[error(
        "skip navigation '{name}' on '{entity}' declares the {side} side of its foreign key, but that side is '{actual}'"
    )]
    SkipNavigationWrongSide {
        entity: String,
        name: String,
        side: &'static str,
        actual: String,
    },

    #[error("entity type id {id} does not exist on the model")]
    UnknownEntityType { id: u32 },

    #[error("foreign key does not exist on entity type '{entity}'")]
    UnknownForeignKey { entity: String },

    #[error("key does not exist on entity type '{entity}'")]
    UnknownKey { entity: String },

    #[error("skip navigation does not exist on entity type '{entity}'")]
    UnknownSkipNavigation { entity: String },
}

impl NodeError {
    // Construct one duplicate-entity-type error.
    pub(crate) fn duplicate_entity_type(name: impl Into<String>) -> Self {
        Self::DuplicateEntityType { name: name.into() }
    }

    // Construct one duplicate-property error.
    pub(crate) fn duplicate_property(entity: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateProperty {
            entity: entity.into(),
            name: name.into(),
        }
    }

    // Construct one duplicate-key error over a rendered property list.
    pub(crate) fn duplicate_key(entity: impl Into<String>, properties: impl Into<String>) -> Self {
        Self::DuplicateKey {
            entity: entity.into(),
            properties: properties.into(),
        }
    }

    // Construct one duplicate-navigation-name error.
    pub(crate) fn duplicate_navigation(
        entity: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::DuplicateNavigation {
            entity: entity.into(),
            name: name.into(),
        }
    }

    // Construct one invalid-identifier error.
    pub(crate) fn invalid_identifier(
        what: &'static str,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidIdentifier {
            what,
            name: name.into(),
            reason: reason.into(),
        }
    }

    // Construct one inverse-endpoint-mismatch error naming both sides.
    pub(crate) fn inverse_endpoint_mismatch(
        navigation: impl Into<String>,
        entity: impl Into<String>,
        inverse: impl Into<String>,
        inverse_entity: impl Into<String>,
    ) -> Self {
        Self::InverseEndpointMismatch {
            navigation: navigation.into(),
            entity: entity.into(),
            inverse: inverse.into(),
            inverse_entity: inverse_entity.into(),
        }
    }

    // Construct one inverse-association-mismatch error naming both join types.
    pub(crate) fn inverse_association_mismatch(
        navigation: impl Into<String>,
        association: impl Into<String>,
        inverse: impl Into<String>,
        inverse_association: impl Into<String>,
    ) -> Self {
        Self::InverseAssociationMismatch {
            navigation: navigation.into(),
            association: association.into(),
            inverse: inverse.into(),
            inverse_association: inverse_association.into(),
        }
    }

    // Construct one unknown-entity-type error from a stale id.
    pub(crate) const fn unknown_entity_type(id: super::EntityTypeId) -> Self {
        Self::UnknownEntityType { id: id.0 }
    }

    // Construct one unknown-skip-navigation error.
    pub(crate) fn unknown_skip_navigation(entity: impl Into<String>) -> Self {
        Self::UnknownSkipNavigation {
            entity: entity.into(),
        }
    }
}
