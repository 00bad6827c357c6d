use crate::{
    access::{AccessorSlot, FieldInfo, PropertyAccessMode},
    annotation::{AnnotationMap, impl_annotatable},
    types::{ConfigurationSource, Primitive},
};
use serde::Serialize;

///
/// Property
///
/// Scalar attribute declared on exactly one entity type.
///

#[derive(Clone, Debug, Serialize)]
pub struct Property {
    name: String,
    primitive: Primitive,
    nullable: bool,
    field_info: Option<FieldInfo>,
    access_mode: PropertyAccessMode,
    accessor: AccessorSlot,
    source: ConfigurationSource,
    pub(crate) annotations: AnnotationMap,
}

impl Property {
    pub(crate) fn new(
        name: String,
        primitive: Primitive,
        nullable: bool,
        field_info: Option<FieldInfo>,
        source: ConfigurationSource,
    ) -> Self {
        Self {
            name,
            primitive,
            nullable,
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
    pub const fn primitive(&self) -> Primitive {
        self.primitive
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
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

    /// The write-once slot holding the resolved member accessor.
    #[must_use]
    pub const fn accessor(&self) -> &AccessorSlot {
        &self.accessor
    }

    #[must_use]
    pub const fn configuration_source(&self) -> ConfigurationSource {
        self.source
    }
}

impl_annotatable!(Property);
