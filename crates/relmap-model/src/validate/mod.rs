//! Whole-model validation orchestration and shared helpers.

pub mod naming;
pub mod relation;

#[cfg(test)]
mod tests;

use crate::{
    MAX_ENTITY_NAME_LEN, MAX_KEY_PROPERTIES, MAX_PROPERTY_NAME_LEN,
    err,
    error::ErrorTree,
    node::{EntityType, Model},
};
use tracing::debug;

/// Run full model validation in a staged, deterministic order.
pub fn validate_model(model: &Model) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    // Phase 1: validate each node (structural + local invariants).
    for entity in model.entity_types() {
        validate_entity(entity, &mut errors);
    }

    // Phase 2: enforce model-wide invariants.
    naming::validate_entity_naming(model, &mut errors);
    relation::validate_relation_graph(model, &mut errors);

    debug!(errors = errors.len(), "model validation finished");
    errors.result()
}

// Local invariants of one entity type. Constructors enforce these too, but
// nodes stay editable in place after creation, so the pass re-checks them.
fn validate_entity(entity: &EntityType, errs: &mut ErrorTree) {
    let name = entity.name();

    if name.is_empty() {
        err!(errs, "entity type #{} has an empty name", entity.id().index());
    } else if name.len() > MAX_ENTITY_NAME_LEN {
        err!(
            errs,
            "entity type name '{name}' exceeds {MAX_ENTITY_NAME_LEN} characters"
        );
    }

    for property in entity.properties() {
        if property.name().is_empty() {
            err!(errs, "entity type '{name}' declares a property with an empty name");
        } else if property.name().len() > MAX_PROPERTY_NAME_LEN {
            err!(
                errs,
                "property name '{}' on '{name}' exceeds {MAX_PROPERTY_NAME_LEN} characters",
                property.name()
            );
        }
    }

    for key in entity.keys() {
        if key.property_count() == 0 {
            err!(errs, "entity type '{name}' declares an empty key");
        } else if key.property_count() > MAX_KEY_PROPERTIES {
            err!(
                errs,
                "key on '{name}' covers {} properties (maximum {MAX_KEY_PROPERTIES})",
                key.property_count()
            );
        }

        for property in key.properties() {
            if entity.property(*property).is_none() {
                err!(errs, "key on '{name}' references a property not on the entity");
            }
        }
    }

    if let Some(primary_key) = entity.primary_key()
        && entity.key(primary_key).is_none()
    {
        err!(errs, "primary key of '{name}' is not one of its keys");
    }
}
