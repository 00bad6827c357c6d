use crate::{
    MAX_KEY_PROPERTIES, MAX_PROPERTY_NAME_LEN,
    access::FieldInfo,
    annotation::{AnnotationMap, impl_annotatable},
    node::{
        EntityTypeId, ForeignKey, ForeignKeyId, Key, KeyId, Navigation, NavigationId, NodeError,
        Property, PropertyId, SkipNavigation, SkipNavigationId, check_identifier,
    },
    types::{ConfigurationSource, Primitive},
};
use serde::Serialize;
use tracing::debug;

///
/// EntityType
///
/// One node of the model graph. Owns its properties, keys, foreign keys,
/// navigations, and skip navigations; cross-entity wiring goes through the
/// owning [`Model`](crate::node::Model).
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityType {
    id: EntityTypeId,
    name: String,
    properties: Vec<Property>,
    keys: Vec<Key>,
    primary_key: Option<KeyId>,
    foreign_keys: Vec<ForeignKey>,
    navigations: Vec<Navigation>,
    skip_navigations: Vec<SkipNavigation>,
    referencing_foreign_keys: Vec<ForeignKeyId>,
    source: ConfigurationSource,
    pub(crate) annotations: AnnotationMap,
}

impl EntityType {
    pub(crate) fn new(id: EntityTypeId, name: String, source: ConfigurationSource) -> Self {
        Self {
            id,
            name,
            properties: Vec::new(),
            keys: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            navigations: Vec::new(),
            skip_navigations: Vec::new(),
            referencing_foreign_keys: Vec::new(),
            source,
            annotations: AnnotationMap::new(),
        }
    }

    //
    // identity
    //

    #[must_use]
    pub const fn id(&self) -> EntityTypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity type. Model-wide name uniqueness cannot be checked
    /// from here; the whole-model validation pass re-checks it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub const fn configuration_source(&self) -> ConfigurationSource {
        self.source
    }

    //
    // properties
    //

    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        primitive: Primitive,
        nullable: bool,
        field_info: Option<FieldInfo>,
        source: ConfigurationSource,
    ) -> Result<PropertyId, NodeError> {
        let name = name.into();
        check_identifier("property", &name, MAX_PROPERTY_NAME_LEN)?;

        if self.find_property(&name).is_some() {
            return Err(NodeError::duplicate_property(&self.name, name));
        }

        let id = PropertyId::new(self.id, self.properties.len() as u32);
        debug!(entity = self.name.as_str(), property = name.as_str(), "added property");
        self.properties
            .push(Property::new(name, primitive, nullable, field_info, source));

        Ok(id)
    }

    #[must_use]
    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        if id.entity != self.id {
            return None;
        }

        self.properties.get(id.index as usize)
    }

    pub fn property_mut(&mut self, id: PropertyId) -> Option<&mut Property> {
        if id.entity != self.id {
            return None;
        }

        self.properties.get_mut(id.index as usize)
    }

    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<PropertyId> {
        self.properties
            .iter()
            .position(|p| p.name() == name)
            .map(|index| PropertyId::new(self.id, index as u32))
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    //
    // keys
    //

    pub fn add_key(
        &mut self,
        properties: &[PropertyId],
        source: ConfigurationSource,
    ) -> Result<KeyId, NodeError> {
        if properties.is_empty() {
            return Err(NodeError::EmptyKey {
                entity: self.name.clone(),
            });
        }

        if properties.len() > MAX_KEY_PROPERTIES {
            return Err(NodeError::KeyTooWide {
                entity: self.name.clone(),
                count: properties.len(),
                max: MAX_KEY_PROPERTIES,
            });
        }

        for property in properties {
            if self.property(*property).is_none() {
                return Err(NodeError::PropertyNotOnEntity {
                    entity: self.name.clone(),
                });
            }
        }

        if self.keys.iter().any(|k| k.covers(properties)) {
            return Err(NodeError::duplicate_key(
                &self.name,
                self.render_property_list(properties),
            ));
        }

        let id = KeyId::new(self.id, self.keys.len() as u32);
        debug!(entity = self.name.as_str(), properties = properties.len(), "added key");
        self.keys.push(Key::new(properties.to_vec(), source));

        Ok(id)
    }

    #[must_use]
    pub fn key(&self, id: KeyId) -> Option<&Key> {
        if id.entity != self.id {
            return None;
        }

        self.keys.get(id.index as usize)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    /// Designate one of this entity type's keys as the primary key.
    pub fn set_primary_key(&mut self, key: KeyId) -> Result<(), NodeError> {
        if self.key(key).is_none() {
            return Err(NodeError::UnknownKey {
                entity: self.name.clone(),
            });
        }

        self.primary_key = Some(key);

        Ok(())
    }

    #[must_use]
    pub const fn primary_key(&self) -> Option<KeyId> {
        self.primary_key
    }

    //
    // foreign keys
    //

    #[must_use]
    pub fn foreign_key(&self, id: ForeignKeyId) -> Option<&ForeignKey> {
        if id.entity != self.id {
            return None;
        }

        self.foreign_keys.get(id.index as usize)
    }

    pub(crate) fn foreign_key_mut(&mut self, id: ForeignKeyId) -> Option<&mut ForeignKey> {
        if id.entity != self.id {
            return None;
        }

        self.foreign_keys.get_mut(id.index as usize)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.foreign_keys.iter()
    }

    pub(crate) fn push_foreign_key(&mut self, foreign_key: ForeignKey) -> ForeignKeyId {
        let id = ForeignKeyId::new(self.id, self.foreign_keys.len() as u32);
        self.foreign_keys.push(foreign_key);

        id
    }

    /// Foreign keys declared on other entity types that reference this one
    /// as principal. Non-owning.
    #[must_use]
    pub fn referencing_foreign_keys(&self) -> &[ForeignKeyId] {
        &self.referencing_foreign_keys
    }

    pub(crate) fn register_referencing_foreign_key(&mut self, id: ForeignKeyId) {
        self.referencing_foreign_keys.push(id);
    }

    pub(crate) fn unregister_referencing_foreign_keys_of(&mut self, entity: EntityTypeId) {
        self.referencing_foreign_keys.retain(|fk| fk.entity != entity);
    }

    //
    // navigations
    //

    #[must_use]
    pub fn navigation(&self, id: NavigationId) -> Option<&Navigation> {
        if id.entity != self.id {
            return None;
        }

        self.navigations.get(id.index as usize)
    }

    #[must_use]
    pub fn find_navigation(&self, name: &str) -> Option<NavigationId> {
        self.navigations
            .iter()
            .position(|n| n.name() == name)
            .map(|index| NavigationId::new(self.id, index as u32))
    }

    pub fn navigations(&self) -> impl Iterator<Item = &Navigation> {
        self.navigations.iter()
    }

    pub(crate) fn push_navigation(&mut self, navigation: Navigation) -> NavigationId {
        let id = NavigationId::new(self.id, self.navigations.len() as u32);
        self.navigations.push(navigation);

        id
    }

    //
    // skip navigations
    //

    #[must_use]
    pub fn skip_navigation(&self, id: SkipNavigationId) -> Option<&SkipNavigation> {
        if id.entity != self.id {
            return None;
        }

        self.skip_navigations.get(id.index as usize)
    }

    pub(crate) fn skip_navigation_mut(
        &mut self,
        id: SkipNavigationId,
    ) -> Option<&mut SkipNavigation> {
        if id.entity != self.id {
            return None;
        }

        self.skip_navigations.get_mut(id.index as usize)
    }

    #[must_use]
    pub fn find_skip_navigation(&self, name: &str) -> Option<SkipNavigationId> {
        self.skip_navigations
            .iter()
            .position(|n| n.name() == name)
            .map(|index| SkipNavigationId::new(self.id, index as u32))
    }

    pub fn skip_navigations(&self) -> impl Iterator<Item = &SkipNavigation> {
        self.skip_navigations.iter()
    }

    pub(crate) fn push_skip_navigation(&mut self, navigation: SkipNavigation) -> SkipNavigationId {
        let id = SkipNavigationId::new(self.id, self.skip_navigations.len() as u32);
        self.skip_navigations.push(navigation);

        id
    }

    // Navigation names share one namespace across both navigation kinds.
    pub(crate) fn navigation_name_in_use(&self, name: &str) -> bool {
        self.find_navigation(name).is_some() || self.find_skip_navigation(name).is_some()
    }

    // Render a property-id list as names for error messages.
    pub(crate) fn render_property_list(&self, properties: &[PropertyId]) -> String {
        properties
            .iter()
            .map(|id| self.property(*id).map_or("?", |p| p.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl_annotatable!(EntityType);
