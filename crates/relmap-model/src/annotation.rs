use crate::types::{ConfigurationSource, Value};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Annotation
///
/// One stored key's value together with how strongly it was configured.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub value: Value,
    pub source: ConfigurationSource,
}

///
/// AnnotationMap
///
/// String-keyed annotation storage with per-key provenance. Provider
/// extension layers use this to decorate metadata nodes with options the
/// core knows nothing about.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct AnnotationMap {
    entries: BTreeMap<String, Annotation>,
}

impl AnnotationMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|a| &a.value)
    }

    #[must_use]
    pub fn get_annotation(&self, key: &str) -> Option<&Annotation> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn source(&self, key: &str) -> Option<ConfigurationSource> {
        self.entries.get(key).map(|a| a.source)
    }

    /// Whether `set` with the same arguments would apply. An unchanged value
    /// is always settable; a changed value needs a source at least as strong
    /// as the recorded one. No side effects.
    #[must_use]
    pub fn can_set(&self, key: &str, value: &Value, source: ConfigurationSource) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(existing) if existing.value == *value => true,
            Some(existing) => source.overrides(Some(existing.source)),
        }
    }

    /// Store the annotation if the source wins the precedence check.
    /// Returns whether the value was applied. Re-setting an unchanged value
    /// keeps the stronger of the two sources on record.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        source: ConfigurationSource,
    ) -> bool {
        let key = key.into();
        let value = value.into();

        if !self.can_set(&key, &value, source) {
            return false;
        }

        let source = match self.entries.get(&key) {
            Some(existing) if existing.value == value => source.max(existing.source),
            _ => source,
        };

        self.entries.insert(key, Annotation { value, source });
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<Annotation> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Annotation)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// Annotatable
///
/// Base capability of every metadata node: string-keyed annotations with
/// configuration-source arbitration.
///

pub trait Annotatable {
    fn annotations(&self) -> &AnnotationMap;

    fn annotations_mut(&mut self) -> &mut AnnotationMap;

    fn annotation(&self, key: &str) -> Option<&Value> {
        self.annotations().get(key)
    }

    fn annotation_source(&self, key: &str) -> Option<ConfigurationSource> {
        self.annotations().source(key)
    }

    fn can_set_annotation(&self, key: &str, value: &Value, source: ConfigurationSource) -> bool {
        self.annotations().can_set(key, value, source)
    }

    fn set_annotation(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        source: ConfigurationSource,
    ) -> bool {
        self.annotations_mut().set(key, value, source)
    }

    fn remove_annotation(&mut self, key: &str) -> Option<Annotation> {
        self.annotations_mut().remove(key)
    }
}

// Wire a node's `annotations` field into the Annotatable trait.
macro_rules! impl_annotatable {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::annotation::Annotatable for $ty {
            fn annotations(&self) -> &$crate::annotation::AnnotationMap {
                &self.annotations
            }

            fn annotations_mut(&mut self) -> &mut $crate::annotation::AnnotationMap {
                &mut self.annotations
            }
        })+
    };
}

pub(crate) use impl_annotatable;

///
/// TESTS
///
