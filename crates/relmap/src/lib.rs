//! relmap — entity-graph metadata for object-relational mapping.
//!
//! This is the public meta-crate. Downstream users depend on **relmap** only.
//!
//! It re-exports the stable public API from:
//!   - `relmap-model` (metadata graph, annotations, inverse resolution)

pub use relmap_model as model;

//
// Re-exports
//

pub use relmap_model::{
    Error, MAX_ENTITY_NAME_LEN, MAX_KEY_PROPERTIES, MAX_NAVIGATION_NAME_LEN,
    MAX_PROPERTY_NAME_LEN, build, validate,
};

//
// Prelude
//

pub mod prelude {
    pub use relmap_model::prelude::*;
}
