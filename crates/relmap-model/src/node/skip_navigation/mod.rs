#[cfg(test)]
mod tests;

use crate::{
    access::{AccessorSlot, FieldInfo, PropertyAccessMode},
    annotation::{AnnotationMap, impl_annotatable},
    node::{EntityTypeId, ForeignKeyId, SkipNavigationId},
    types::ConfigurationSource,
};
use serde::Serialize;

///
/// SkipNavigationDef
///
/// Caller-supplied definition for a new skip navigation on a declaring
/// entity type.
///

#[derive(Clone, Debug)]
pub struct SkipNavigationDef {
    /// Navigation name, unique among the declaring type's navigations and
    /// skip navigations combined.
    pub name: String,
    /// The entity type ultimately reached.
    pub target: EntityTypeId,
    /// Foreign key of the association entity this navigation traverses.
    pub foreign_key: ForeignKeyId,
    pub is_collection: bool,
    /// Whether the declaring entity is the principal side of `foreign_key`.
    pub is_on_principal: bool,
    pub field_info: Option<FieldInfo>,
    pub source: ConfigurationSource,
}

///
/// SkipNavigation
///
/// Navigation that skips over an association entity type to reach the
/// target directly. The inverse link is weak: each side is set
/// independently and either side may be cleared on its own.
///

#[derive(Clone, Debug, Serialize)]
pub struct SkipNavigation {
    name: String,
    declaring_entity: EntityTypeId,
    target_entity: EntityTypeId,
    foreign_key: ForeignKeyId,
    is_collection: bool,
    is_on_principal: bool,
    is_eager_loaded: bool,
    inverse: Option<SkipNavigationId>,
    field_info: Option<FieldInfo>,
    access_mode: PropertyAccessMode,
    accessor: AccessorSlot,
    source: ConfigurationSource,
    inverse_source: Option<ConfigurationSource>,
    eager_source: Option<ConfigurationSource>,
    pub(crate) annotations: AnnotationMap,
}

impl SkipNavigation {
    pub(crate) fn new(declaring_entity: EntityTypeId, def: SkipNavigationDef) -> Self {
        Self {
            name: def.name,
            declaring_entity,
            target_entity: def.target,
            foreign_key: def.foreign_key,
            is_collection: def.is_collection,
            is_on_principal: def.is_on_principal,
            is_eager_loaded: false,
            inverse: None,
            field_info: def.field_info,
            access_mode: PropertyAccessMode::default(),
            accessor: AccessorSlot::new(),
            source: def.source,
            inverse_source: None,
            eager_source: None,
            annotations: AnnotationMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn declaring_entity(&self) -> EntityTypeId {
        self.declaring_entity
    }

    #[must_use]
    pub const fn target_entity(&self) -> EntityTypeId {
        self.target_entity
    }

    /// The association foreign key; its declaring entity is the association
    /// (join) entity type this navigation traverses.
    #[must_use]
    pub const fn foreign_key(&self) -> ForeignKeyId {
        self.foreign_key
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.is_collection
    }

    #[must_use]
    pub const fn is_on_principal(&self) -> bool {
        self.is_on_principal
    }

    #[must_use]
    pub const fn is_eager_loaded(&self) -> bool {
        self.is_eager_loaded
    }

    #[must_use]
    pub const fn inverse(&self) -> Option<SkipNavigationId> {
        self.inverse
    }

    #[must_use]
    pub const fn field_info(&self) -> Option<&FieldInfo> {
        self.field_info.as_ref()
    }

    #[must_use]
    pub const fn access_mode(&self) -> PropertyAccessMode {
        self.access_mode
    }

    pub fn set_access_mode(&mut self, mode: PropertyAccessMode) {
        self.access_mode = mode;
    }

    #[must_use]
    pub const fn accessor(&self) -> &AccessorSlot {
        &self.accessor
    }

    /// How the navigation itself was declared.
    #[must_use]
    pub const fn configuration_source(&self) -> ConfigurationSource {
        self.source
    }

    /// How the current inverse pointer was set; `None` whenever no inverse
    /// is set.
    #[must_use]
    pub const fn inverse_configuration_source(&self) -> Option<ConfigurationSource> {
        self.inverse_source
    }

    #[must_use]
    pub const fn eager_load_configuration_source(&self) -> Option<ConfigurationSource> {
        self.eager_source
    }

    // Record a validated inverse pointer. The declaration source is raised
    // along with the inverse source so the navigation never reads weaker
    // than its strongest configuration.
    pub(crate) fn set_inverse_link(
        &mut self,
        inverse: SkipNavigationId,
        source: ConfigurationSource,
    ) {
        self.inverse = Some(inverse);
        self.inverse_source = Some(source.max_with(self.inverse_source));
        self.source = self.source.max(source);
    }

    // Clear the inverse pointer and its source. Never fails.
    pub(crate) fn clear_inverse_link(&mut self) {
        self.inverse = None;
        self.inverse_source = None;
    }

    pub(crate) fn set_eager_loaded(&mut self, eager: bool, source: ConfigurationSource) {
        self.is_eager_loaded = eager;
        self.eager_source = Some(source.max_with(self.eager_source));
    }
}

impl_annotatable!(SkipNavigation);
