use crate::{
    err,
    error::ErrorTree,
    node::{EntityType, ForeignKeyId, Model, NodeError, SkipNavigation},
};

// Validate the relationship graph: foreign keys against their principal
// keys, referencing lists on both ends, and skip navigations (including
// inverse links) against the metadata they were wired to. This is where
// mutation-after-wiring staleness surfaces.
pub fn validate_relation_graph(model: &Model, errs: &mut ErrorTree) {
    for entity in model.entity_types() {
        validate_foreign_keys(model, entity, errs);
        validate_referencing_list(model, entity, errs);
        validate_skip_navigations(model, entity, errs);
    }
}

// Every declared foreign key must still line up with its principal key.
fn validate_foreign_keys(model: &Model, entity: &EntityType, errs: &mut ErrorTree) {
    for (index, fk) in entity.foreign_keys().enumerate() {
        let fk_id = ForeignKeyId::new(entity.id(), index as u32);
        let Some(principal) = model.entity_type(fk.principal_entity()) else {
            err!(
                errs,
                "foreign key on '{}' references a missing principal entity type",
                entity.name()
            );
            continue;
        };

        let Some(key) = principal.key(fk.principal_key()) else {
            err!(
                errs,
                "foreign key on '{}' references a missing key on '{}'",
                entity.name(),
                principal.name()
            );
            continue;
        };

        if fk.properties().len() != key.property_count() {
            errs.add(NodeError::ForeignKeyCountMismatch {
                entity: entity.name().to_string(),
                principal: principal.name().to_string(),
                dependent_count: fk.properties().len(),
                principal_count: key.property_count(),
            });
            continue;
        }

        for (dependent_id, principal_id) in fk.properties().iter().zip(key.properties()) {
            let (Some(dependent), Some(principal_property)) = (
                entity.property(*dependent_id),
                principal.property(*principal_id),
            ) else {
                err!(
                    errs,
                    "foreign key on '{}' references a missing property",
                    entity.name()
                );
                continue;
            };

            if !dependent
                .primitive()
                .assignable_from(principal_property.primitive())
            {
                errs.add(NodeError::ForeignKeyTypeMismatch {
                    entity: entity.name().to_string(),
                    dependent_property: dependent.name().to_string(),
                    dependent_primitive: dependent.primitive(),
                    principal_property: principal_property.name().to_string(),
                    principal_primitive: principal_property.primitive(),
                });
            }
        }

        if !principal.referencing_foreign_keys().contains(&fk_id) {
            err!(
                errs,
                "referencing list on '{}' is missing a foreign key declared on '{}'",
                principal.name(),
                entity.name()
            );
        }
    }
}

// Every referencing entry must resolve to a foreign key that points back.
fn validate_referencing_list(model: &Model, entity: &EntityType, errs: &mut ErrorTree) {
    for id in entity.referencing_foreign_keys() {
        let Some(fk) = model.foreign_key(*id) else {
            err!(
                errs,
                "referencing list on '{}' holds a stale foreign key",
                entity.name()
            );
            continue;
        };

        if fk.principal_entity() != entity.id() {
            err!(
                errs,
                "referencing list on '{}' holds a foreign key whose principal is another entity type",
                entity.name()
            );
        }
    }
}

// Skip navigations must still traverse live metadata, and set inverses must
// still satisfy the resolution-engine invariants.
fn validate_skip_navigations(model: &Model, entity: &EntityType, errs: &mut ErrorTree) {
    for nav in entity.skip_navigations() {
        if model.entity_type(nav.target_entity()).is_none() {
            err!(
                errs,
                "skip navigation '{}' on '{}' targets a missing entity type",
                nav.name(),
                entity.name()
            );
        }

        let Some(fk) = model.foreign_key(nav.foreign_key()) else {
            err!(
                errs,
                "skip navigation '{}' on '{}' traverses a missing foreign key",
                nav.name(),
                entity.name()
            );
            continue;
        };

        let declared_side = if nav.is_on_principal() {
            fk.principal_entity()
        } else {
            fk.declaring_entity()
        };
        if declared_side != entity.id() {
            err!(
                errs,
                "skip navigation '{}' on '{}' no longer sits on the declared side of its foreign key",
                nav.name(),
                entity.name()
            );
        }

        validate_inverse(model, entity, nav, errs);
    }
}

fn validate_inverse(
    model: &Model,
    entity: &EntityType,
    nav: &SkipNavigation,
    errs: &mut ErrorTree,
) {
    let Some(inverse_id) = nav.inverse() else {
        return;
    };

    let Some(inverse) = model.skip_navigation(inverse_id) else {
        err!(
            errs,
            "skip navigation '{}' on '{}' holds a stale inverse",
            nav.name(),
            entity.name()
        );
        return;
    };

    let entity_name = |id| {
        model
            .entity_type(id)
            .map_or_else(|| "<missing>".to_string(), |e| e.name().to_string())
    };

    if inverse.target_entity() != nav.declaring_entity()
        || nav.target_entity() != inverse.declaring_entity()
    {
        errs.add(NodeError::InverseEndpointMismatch {
            navigation: nav.name().to_string(),
            entity: entity_name(nav.declaring_entity()),
            inverse: inverse.name().to_string(),
            inverse_entity: entity_name(inverse.declaring_entity()),
        });
        return;
    }

    if nav.foreign_key().entity() != inverse.foreign_key().entity() {
        errs.add(NodeError::InverseAssociationMismatch {
            navigation: nav.name().to_string(),
            association: entity_name(nav.foreign_key().entity()),
            inverse: inverse.name().to_string(),
            inverse_association: entity_name(inverse.foreign_key().entity()),
        });
    }
}
