use crate::{
    annotation::{AnnotationMap, impl_annotatable},
    node::{EntityTypeId, KeyId, NavigationId, PropertyId},
    types::ConfigurationSource,
};
use serde::Serialize;

///
/// ForeignKey
///
/// Directed relationship from the declaring (dependent) entity type to a
/// principal key. Declared on the dependent side; the principal records the
/// foreign key in a non-owning referencing list.
///

#[derive(Clone, Debug, Serialize)]
pub struct ForeignKey {
    declaring_entity: EntityTypeId,
    properties: Vec<PropertyId>,
    principal_entity: EntityTypeId,
    principal_key: KeyId,
    dependent_to_principal: Option<NavigationId>,
    principal_to_dependent: Option<NavigationId>,
    source: ConfigurationSource,
    pub(crate) annotations: AnnotationMap,
}

impl ForeignKey {
    pub(crate) fn new(
        declaring_entity: EntityTypeId,
        properties: Vec<PropertyId>,
        principal_entity: EntityTypeId,
        principal_key: KeyId,
        source: ConfigurationSource,
    ) -> Self {
        Self {
            declaring_entity,
            properties,
            principal_entity,
            principal_key,
            dependent_to_principal: None,
            principal_to_dependent: None,
            source,
            annotations: AnnotationMap::new(),
        }
    }

    /// The dependent entity type the foreign key is declared on.
    #[must_use]
    pub const fn declaring_entity(&self) -> EntityTypeId {
        self.declaring_entity
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyId] {
        &self.properties
    }

    #[must_use]
    pub const fn principal_entity(&self) -> EntityTypeId {
        self.principal_entity
    }

    #[must_use]
    pub const fn principal_key(&self) -> KeyId {
        self.principal_key
    }

    #[must_use]
    pub const fn dependent_to_principal(&self) -> Option<NavigationId> {
        self.dependent_to_principal
    }

    #[must_use]
    pub const fn principal_to_dependent(&self) -> Option<NavigationId> {
        self.principal_to_dependent
    }

    #[must_use]
    pub const fn is_self_referencing(&self) -> bool {
        self.declaring_entity.0 == self.principal_entity.0
    }

    #[must_use]
    pub const fn configuration_source(&self) -> ConfigurationSource {
        self.source
    }

    pub(crate) fn set_dependent_to_principal(&mut self, navigation: NavigationId) {
        self.dependent_to_principal = Some(navigation);
    }

    pub(crate) fn set_principal_to_dependent(&mut self, navigation: NavigationId) {
        self.principal_to_dependent = Some(navigation);
    }

    // Whether this foreign key covers the same properties against the same
    // principal key.
    pub(crate) fn covers(&self, properties: &[PropertyId], principal_key: KeyId) -> bool {
        self.properties == properties && self.principal_key == principal_key
    }
}

impl_annotatable!(ForeignKey);
