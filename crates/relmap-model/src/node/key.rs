use crate::{
    annotation::{AnnotationMap, impl_annotatable},
    node::PropertyId,
    types::ConfigurationSource,
};
use serde::Serialize;

///
/// Key
///
/// Ordered, non-empty uniqueness constraint over properties of one entity
/// type. One key per entity type may be designated the primary key.
///

#[derive(Clone, Debug, Serialize)]
pub struct Key {
    properties: Vec<PropertyId>,
    source: ConfigurationSource,
    pub(crate) annotations: AnnotationMap,
}

impl Key {
    pub(crate) fn new(properties: Vec<PropertyId>, source: ConfigurationSource) -> Self {
        Self {
            properties,
            source,
            annotations: AnnotationMap::new(),
        }
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyId] {
        &self.properties
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub const fn configuration_source(&self) -> ConfigurationSource {
        self.source
    }

    // Whether this key covers exactly the given property list, in order.
    pub(crate) fn covers(&self, properties: &[PropertyId]) -> bool {
        self.properties == properties
    }
}

impl_annotatable!(Key);
