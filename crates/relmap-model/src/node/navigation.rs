use crate::{
    access::{AccessorSlot, FieldInfo, PropertyAccessMode},
    annotation::{AnnotationMap, impl_annotatable},
    node::ForeignKeyId,
    types::ConfigurationSource,
};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// NavigationDirection
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum NavigationDirection {
    /// Declared on the dependent entity, pointing at the principal.
    ToPrincipal,
    /// Declared on the principal entity, pointing at the dependent.
    ToDependent,
}

///
/// Navigation
///
/// Ordinary reference navigation over one side of a foreign key.
///

#[derive(Clone, Debug, Serialize)]
pub struct Navigation {
    name: String,
    foreign_key: ForeignKeyId,
    direction: NavigationDirection,
    is_collection: bool,
    field_info: Option<FieldInfo>,
    access_mode: PropertyAccessMode,
    accessor: AccessorSlot,
    source: ConfigurationSource,
    pub(crate) annotations: AnnotationMap,
}

impl Navigation {
    pub(crate) fn new(
        name: String,
        foreign_key: ForeignKeyId,
        direction: NavigationDirection,
        is_collection: bool,
        field_info: Option<FieldInfo>,
        source: ConfigurationSource,
    ) -> Self {
        Self {
            name,
            foreign_key,
            direction,
            is_collection,
            field_info,
            access_mode: PropertyAccessMode::default(),
            accessor: AccessorSlot::new(),
            source,
            annotations: AnnotationMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn foreign_key(&self) -> ForeignKeyId {
        self.foreign_key
    }

    #[must_use]
    pub const fn direction(&self) -> NavigationDirection {
        self.direction
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.is_collection
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

    #[must_use]
    pub const fn configuration_source(&self) -> ConfigurationSource {
        self.source
    }
}

impl_annotatable!(Navigation);
