use crate::{err, error::ErrorTree, node::Model};
use std::collections::BTreeMap;

// Entity-type names must stay unique across the model. `add_entity_type`
// enforces this at creation; renames via `set_name` can only be caught here.
pub fn validate_entity_naming(model: &Model, errs: &mut ErrorTree) {
    let mut by_name: BTreeMap<&str, u32> = BTreeMap::new();

    for entity in model.entity_types() {
        if let Some(prev) = by_name.insert(entity.name(), entity.id().index()) {
            err!(
                errs,
                "duplicate entity type name '{}' for #{prev} and #{}",
                entity.name(),
                entity.id().index()
            );
        }
    }
}
