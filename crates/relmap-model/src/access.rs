use crate::types::Value;
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::{
    any::Any,
    fmt,
    sync::{Arc, OnceLock},
};

///
/// PropertyAccessMode
///
/// How an external materializer should bind to the backing member.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum PropertyAccessMode {
    #[default]
    PreferField,
    Field,
    Property,
}

///
/// FieldInfo
///
/// Backing-member metadata for a property or navigation.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldInfo {
    pub name: String,
}

impl FieldInfo {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

///
/// Accessor
///
/// Capability object that reads and writes one member on a materialized
/// instance. Resolved by the materialization layer, never by this crate.
///

pub trait Accessor: Send + Sync {
    /// Read the member value, or `None` when `instance` is not of the
    /// owning type.
    fn get(&self, instance: &dyn Any) -> Option<Value>;

    /// Write the member value. Returns false when `instance` is not of the
    /// owning type or the value shape does not fit.
    fn set(&self, instance: &mut dyn Any, value: Value) -> bool;
}

///
/// AccessorSlot
///
/// Write-once cache for a resolved accessor, bound at model-build time so
/// consumers avoid repeated name-based resolution.
///

#[derive(Clone, Default, Serialize)]
pub struct AccessorSlot {
    #[serde(skip)]
    inner: OnceLock<Arc<dyn Accessor>>,
}

impl AccessorSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the resolved accessor. Returns false when one is already bound.
    pub fn bind(&self, accessor: Arc<dyn Accessor>) -> bool {
        self.inner.set(accessor).is_ok()
    }

    #[must_use]
    pub fn get(&self) -> Option<&Arc<dyn Accessor>> {
        self.inner.get()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl fmt::Debug for AccessorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_bound() {
            "AccessorSlot(bound)"
        } else {
            "AccessorSlot(unbound)"
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(i64);

    impl Accessor for Fixed {
        fn get(&self, _instance: &dyn Any) -> Option<Value> {
            Some(Value::Int(self.0))
        }

        fn set(&self, _instance: &mut dyn Any, _value: Value) -> bool {
            false
        }
    }

    #[test]
    fn slot_binds_exactly_once() {
        let slot = AccessorSlot::new();
        assert!(!slot.is_bound());

        assert!(slot.bind(Arc::new(Fixed(7))));
        assert!(!slot.bind(Arc::new(Fixed(9))), "second bind must be refused");

        let accessor = slot.get().expect("slot must hold the first accessor");
        assert_eq!(accessor.get(&()), Some(Value::Int(7)));
    }
}
