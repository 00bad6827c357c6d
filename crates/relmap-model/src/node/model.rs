use crate::{
    MAX_ENTITY_NAME_LEN, MAX_NAVIGATION_NAME_LEN,
    access::FieldInfo,
    annotation::{AnnotationMap, impl_annotatable},
    node::{
        EntityType, EntityTypeId, ForeignKey, ForeignKeyId, KeyId, Navigation, NavigationDirection,
        NavigationId, NodeError, PropertyId, SkipNavigation, SkipNavigationDef, SkipNavigationId,
        check_identifier,
    },
    types::ConfigurationSource,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

///
/// Model
///
/// Root container owning the entity-type arena. Cross-entity operations
/// (foreign keys, navigations, inverse resolution) live here so both ends
/// are visible for validation before anything mutates.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Model {
    entity_types: BTreeMap<EntityTypeId, EntityType>,
    next_entity_type: u32,
    pub(crate) annotations: AnnotationMap,
}

impl Model {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entity_types: BTreeMap::new(),
            next_entity_type: 0,
            annotations: AnnotationMap::new(),
        }
    }

    //
    // entity types
    //

    pub fn add_entity_type(
        &mut self,
        name: impl Into<String>,
        source: ConfigurationSource,
    ) -> Result<EntityTypeId, NodeError> {
        let name = name.into();
        check_identifier("entity type", &name, MAX_ENTITY_NAME_LEN)?;

        if self.find_entity_type(&name).is_some() {
            return Err(NodeError::duplicate_entity_type(name));
        }

        let id = EntityTypeId(self.next_entity_type);
        self.next_entity_type += 1;
        debug!(entity = name.as_str(), "added entity type");
        self.entity_types
            .insert(id, EntityType::new(id, name, source));

        Ok(id)
    }

    #[must_use]
    pub fn entity_type(&self, id: EntityTypeId) -> Option<&EntityType> {
        self.entity_types.get(&id)
    }

    pub fn entity_type_mut(&mut self, id: EntityTypeId) -> Option<&mut EntityType> {
        self.entity_types.get_mut(&id)
    }

    #[must_use]
    pub fn find_entity_type(&self, name: &str) -> Option<EntityTypeId> {
        self.entity_types
            .values()
            .find(|e| e.name() == name)
            .map(EntityType::id)
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.entity_types.values()
    }

    #[must_use]
    pub fn entity_type_count(&self) -> usize {
        self.entity_types.len()
    }

    /// Remove an entity type. Refused while any other entity type still
    /// references it through a foreign key, a navigation over one of its
    /// foreign keys, or a skip navigation targeting or traversing it.
    pub fn remove_entity_type(&mut self, id: EntityTypeId) -> Result<EntityType, NodeError> {
        let entity = self
            .entity_types
            .get(&id)
            .ok_or(NodeError::unknown_entity_type(id))?;

        if let Some(holder) = self.inbound_reference(id) {
            return Err(NodeError::EntityTypeInUse {
                name: entity.name().to_string(),
                holder,
            });
        }

        // drop this entity's outbound foreign keys from the principals'
        // referencing lists before the arena forgets it
        let principals: Vec<EntityTypeId> = entity
            .foreign_keys()
            .map(ForeignKey::principal_entity)
            .filter(|principal| *principal != id)
            .collect();
        for principal in principals {
            if let Some(principal) = self.entity_types.get_mut(&principal) {
                principal.unregister_referencing_foreign_keys_of(id);
            }
        }

        let removed = self
            .entity_types
            .remove(&id)
            .ok_or(NodeError::unknown_entity_type(id))?;
        debug!(entity = removed.name(), "removed entity type");

        Ok(removed)
    }

    // First inbound reference held by another entity type, described for
    // the refusal message.
    fn inbound_reference(&self, id: EntityTypeId) -> Option<String> {
        for entity in self.entity_types.values().filter(|e| e.id() != id) {
            if entity
                .foreign_keys()
                .any(|fk| fk.principal_entity() == id)
            {
                return Some(format!("a foreign key on '{}'", entity.name()));
            }

            if let Some(nav) = entity.navigations().find(|n| n.foreign_key().entity == id) {
                return Some(format!(
                    "navigation '{}' on '{}'",
                    nav.name(),
                    entity.name()
                ));
            }

            if let Some(nav) = entity
                .skip_navigations()
                .find(|n| n.target_entity() == id || n.foreign_key().entity == id)
            {
                return Some(format!(
                    "skip navigation '{}' on '{}'",
                    nav.name(),
                    entity.name()
                ));
            }
        }

        None
    }

    // Entity name for error messages; stale ids render as a placeholder.
    fn entity_name(&self, id: EntityTypeId) -> String {
        self.entity_types
            .get(&id)
            .map_or_else(|| format!("<entity #{}>", id.0), |e| e.name().to_string())
    }

    //
    // foreign keys
    //

    /// Declare a foreign key on `dependent` covering `properties` against
    /// `principal_key` of `principal`. The principal records the new key in
    /// its referencing list.
    pub fn add_foreign_key(
        &mut self,
        dependent: EntityTypeId,
        properties: &[PropertyId],
        principal: EntityTypeId,
        principal_key: KeyId,
        source: ConfigurationSource,
    ) -> Result<ForeignKeyId, NodeError> {
        let dependent_entity = self
            .entity_types
            .get(&dependent)
            .ok_or(NodeError::unknown_entity_type(dependent))?;
        let principal_entity = self
            .entity_types
            .get(&principal)
            .ok_or(NodeError::unknown_entity_type(principal))?;

        if properties.is_empty() {
            return Err(NodeError::EmptyForeignKey {
                entity: dependent_entity.name().to_string(),
            });
        }

        for property in properties {
            if dependent_entity.property(*property).is_none() {
                return Err(NodeError::PropertyNotOnEntity {
                    entity: dependent_entity.name().to_string(),
                });
            }
        }

        let key = principal_entity
            .key(principal_key)
            .ok_or_else(|| NodeError::UnknownKey {
                entity: principal_entity.name().to_string(),
            })?;

        if properties.len() != key.property_count() {
            return Err(NodeError::ForeignKeyCountMismatch {
                entity: dependent_entity.name().to_string(),
                principal: principal_entity.name().to_string(),
                dependent_count: properties.len(),
                principal_count: key.property_count(),
            });
        }

        for (dependent_id, principal_id) in properties.iter().zip(key.properties()) {
            let dependent_property = dependent_entity
                .property(*dependent_id)
                .ok_or_else(|| NodeError::PropertyNotOnEntity {
                    entity: dependent_entity.name().to_string(),
                })?;
            let principal_property = principal_entity
                .property(*principal_id)
                .ok_or_else(|| NodeError::PropertyNotOnEntity {
                    entity: principal_entity.name().to_string(),
                })?;

            if !dependent_property
                .primitive()
                .assignable_from(principal_property.primitive())
            {
                return Err(NodeError::ForeignKeyTypeMismatch {
                    entity: dependent_entity.name().to_string(),
                    dependent_property: dependent_property.name().to_string(),
                    dependent_primitive: dependent_property.primitive(),
                    principal_property: principal_property.name().to_string(),
                    principal_primitive: principal_property.primitive(),
                });
            }
        }

        if dependent_entity
            .foreign_keys()
            .any(|fk| fk.covers(properties, principal_key))
        {
            return Err(NodeError::DuplicateForeignKey {
                entity: dependent_entity.name().to_string(),
                principal: principal_entity.name().to_string(),
                properties: dependent_entity.render_property_list(properties),
            });
        }

        let foreign_key =
            ForeignKey::new(dependent, properties.to_vec(), principal, principal_key, source);
        let id = self
            .entity_types
            .get_mut(&dependent)
            .ok_or(NodeError::unknown_entity_type(dependent))?
            .push_foreign_key(foreign_key);
        // resolved above; cannot have vanished within this call
        if let Some(principal_entity) = self.entity_types.get_mut(&principal) {
            principal_entity.register_referencing_foreign_key(id);
        }
        debug!(
            dependent = self.entity_name(dependent).as_str(),
            principal = self.entity_name(principal).as_str(),
            "added foreign key"
        );

        Ok(id)
    }

    #[must_use]
    pub fn foreign_key(&self, id: ForeignKeyId) -> Option<&ForeignKey> {
        self.entity_types.get(&id.entity)?.foreign_key(id)
    }

    //
    // navigations
    //

    /// Declare an ordinary navigation over one side of a foreign key. The
    /// declaring entity follows from the direction: the dependent entity
    /// for [`NavigationDirection::ToPrincipal`], the principal otherwise.
    pub fn add_navigation(
        &mut self,
        foreign_key: ForeignKeyId,
        direction: NavigationDirection,
        name: impl Into<String>,
        is_collection: bool,
        field_info: Option<FieldInfo>,
        source: ConfigurationSource,
    ) -> Result<NavigationId, NodeError> {
        let name = name.into();
        check_identifier("navigation", &name, MAX_NAVIGATION_NAME_LEN)?;

        let fk = self
            .foreign_key(foreign_key)
            .ok_or_else(|| NodeError::UnknownForeignKey {
                entity: self.entity_name(foreign_key.entity),
            })?;
        let declaring = match direction {
            NavigationDirection::ToPrincipal => fk.declaring_entity(),
            NavigationDirection::ToDependent => fk.principal_entity(),
        };
        let occupied = match direction {
            NavigationDirection::ToPrincipal => fk.dependent_to_principal(),
            NavigationDirection::ToDependent => fk.principal_to_dependent(),
        };

        if direction == NavigationDirection::ToPrincipal && is_collection {
            return Err(NodeError::CollectionToPrincipal {
                entity: self.entity_name(declaring),
                name,
            });
        }

        if let Some(existing) = occupied {
            let existing = self
                .entity_type(existing.entity)
                .and_then(|e| e.navigation(existing))
                .map_or_else(|| "?".to_string(), |n| n.name().to_string());

            return Err(NodeError::ForeignKeyNavigationDefined {
                entity: self.entity_name(foreign_key.entity),
                existing,
                slot: match direction {
                    NavigationDirection::ToPrincipal => "dependent-to-principal",
                    NavigationDirection::ToDependent => "principal-to-dependent",
                },
            });
        }

        let declaring_entity = self
            .entity_types
            .get(&declaring)
            .ok_or(NodeError::unknown_entity_type(declaring))?;

        if declaring_entity.navigation_name_in_use(&name) {
            return Err(NodeError::duplicate_navigation(declaring_entity.name(), name));
        }

        let navigation = Navigation::new(
            name.clone(),
            foreign_key,
            direction,
            is_collection,
            field_info,
            source,
        );
        let id = self
            .entity_types
            .get_mut(&declaring)
            .ok_or(NodeError::unknown_entity_type(declaring))?
            .push_navigation(navigation);

        // resolved above; cannot have vanished within this call
        if let Some(fk) = self
            .entity_types
            .get_mut(&foreign_key.entity)
            .and_then(|e| e.foreign_key_mut(foreign_key))
        {
            match direction {
                NavigationDirection::ToPrincipal => fk.set_dependent_to_principal(id),
                NavigationDirection::ToDependent => fk.set_principal_to_dependent(id),
            }
        }
        debug!(
            entity = self.entity_name(declaring).as_str(),
            navigation = name.as_str(),
            "added navigation"
        );

        Ok(id)
    }

    //
    // skip navigations
    //

    /// Declare a skip navigation on `declaring`. The association foreign
    /// key must carry the declaring entity on the side named by
    /// `is_on_principal`.
    pub fn add_skip_navigation(
        &mut self,
        declaring: EntityTypeId,
        def: SkipNavigationDef,
    ) -> Result<SkipNavigationId, NodeError> {
        check_identifier("skip navigation", &def.name, MAX_NAVIGATION_NAME_LEN)?;

        let declaring_entity = self
            .entity_types
            .get(&declaring)
            .ok_or(NodeError::unknown_entity_type(declaring))?;

        if !self.entity_types.contains_key(&def.target) {
            return Err(NodeError::unknown_entity_type(def.target));
        }

        let fk = self
            .foreign_key(def.foreign_key)
            .ok_or_else(|| NodeError::UnknownForeignKey {
                entity: self.entity_name(def.foreign_key.entity),
            })?;

        let declared_side = if def.is_on_principal {
            fk.principal_entity()
        } else {
            fk.declaring_entity()
        };
        if declared_side != declaring {
            return Err(NodeError::SkipNavigationWrongSide {
                entity: declaring_entity.name().to_string(),
                name: def.name,
                side: if def.is_on_principal { "principal" } else { "dependent" },
                actual: self.entity_name(declared_side),
            });
        }

        if declaring_entity.navigation_name_in_use(&def.name) {
            return Err(NodeError::duplicate_navigation(
                declaring_entity.name(),
                def.name,
            ));
        }

        let name = def.name.clone();
        let navigation = SkipNavigation::new(declaring, def);
        let id = self
            .entity_types
            .get_mut(&declaring)
            .ok_or(NodeError::unknown_entity_type(declaring))?
            .push_skip_navigation(navigation);
        debug!(
            entity = self.entity_name(declaring).as_str(),
            navigation = name.as_str(),
            "added skip navigation"
        );

        Ok(id)
    }

    #[must_use]
    pub fn skip_navigation(&self, id: SkipNavigationId) -> Option<&SkipNavigation> {
        self.entity_types.get(&id.entity)?.skip_navigation(id)
    }

    //
    // inverse resolution
    //

    /// Set or clear a skip navigation's inverse. Clearing never fails;
    /// setting validates endpoint symmetry, then association-type match,
    /// and leaves both sides untouched on failure. Linking is one-sided:
    /// the caller wires the other direction with a second call.
    pub fn set_inverse(
        &mut self,
        navigation: SkipNavigationId,
        inverse: Option<SkipNavigationId>,
        source: ConfigurationSource,
    ) -> Result<(), NodeError> {
        match inverse {
            None => {
                let nav = self.resolve_skip_navigation_mut(navigation)?;
                nav.clear_inverse_link();
                debug!(navigation = nav.name(), "cleared skip navigation inverse");

                Ok(())
            }
            Some(inverse) => {
                self.check_inverse(navigation, inverse)?;

                let nav = self.resolve_skip_navigation_mut(navigation)?;
                nav.set_inverse_link(inverse, source);
                debug!(navigation = nav.name(), "set skip navigation inverse");

                Ok(())
            }
        }
    }

    /// Whether [`set_inverse`](Self::set_inverse) would succeed and the
    /// source wins against the recorded inverse source. No side effects.
    #[must_use]
    pub fn can_set_inverse(
        &self,
        navigation: SkipNavigationId,
        inverse: SkipNavigationId,
        source: ConfigurationSource,
    ) -> bool {
        if self.check_inverse(navigation, inverse).is_err() {
            return false;
        }

        self.skip_navigation(navigation)
            .is_some_and(|nav| source.overrides(nav.inverse_configuration_source()))
    }

    /// Mark a skip navigation as eager-loaded (or not).
    pub fn set_eager_loaded(
        &mut self,
        navigation: SkipNavigationId,
        eager: bool,
        source: ConfigurationSource,
    ) -> Result<(), NodeError> {
        let nav = self.resolve_skip_navigation_mut(navigation)?;
        nav.set_eager_loaded(eager, source);

        Ok(())
    }

    // The resolution-engine checks, in order: existence, self-inverse,
    // endpoint symmetry, association-type match. Endpoint symmetry is the
    // more fundamental violation, so it is reported before the association
    // check when both fail.
    fn check_inverse(
        &self,
        navigation: SkipNavigationId,
        inverse: SkipNavigationId,
    ) -> Result<(), NodeError> {
        let nav = self.resolve_skip_navigation(navigation)?;
        let inv = self.resolve_skip_navigation(inverse)?;

        if navigation == inverse {
            return Err(NodeError::SelfInverse {
                name: nav.name().to_string(),
            });
        }

        if inv.target_entity() != nav.declaring_entity()
            || nav.target_entity() != inv.declaring_entity()
        {
            return Err(NodeError::inverse_endpoint_mismatch(
                nav.name(),
                self.entity_name(nav.declaring_entity()),
                inv.name(),
                self.entity_name(inv.declaring_entity()),
            ));
        }

        // both navigations must traverse the same association entity type
        let association = nav.foreign_key().entity;
        let inverse_association = inv.foreign_key().entity;
        if association != inverse_association {
            return Err(NodeError::inverse_association_mismatch(
                nav.name(),
                self.entity_name(association),
                inv.name(),
                self.entity_name(inverse_association),
            ));
        }

        Ok(())
    }

    fn resolve_skip_navigation(
        &self,
        id: SkipNavigationId,
    ) -> Result<&SkipNavigation, NodeError> {
        self.skip_navigation(id)
            .ok_or_else(|| NodeError::unknown_skip_navigation(self.entity_name(id.entity)))
    }

    fn resolve_skip_navigation_mut(
        &mut self,
        id: SkipNavigationId,
    ) -> Result<&mut SkipNavigation, NodeError> {
        let entity = self.entity_name(id.entity);

        self.entity_types
            .get_mut(&id.entity)
            .and_then(|e| e.skip_navigation_mut(id))
            .ok_or_else(|| NodeError::unknown_skip_navigation(entity))
    }
}

impl_annotatable!(Model);
