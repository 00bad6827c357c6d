use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ConfigurationSource
///
/// Provenance strength of a configured value. Variant order is the override
/// order: a value recorded at a later variant supersedes an earlier one.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ConfigurationSource {
    Convention,
    DataAnnotation,
    Explicit,
}

impl ConfigurationSource {
    /// Whether a value configured at `self` may replace one recorded at
    /// `recorded`. Nothing recorded means anything may be set.
    #[must_use]
    pub fn overrides(self, recorded: Option<Self>) -> bool {
        recorded.is_none_or(|recorded| self >= recorded)
    }

    /// Merge with an already-recorded source, keeping the stronger of the two.
    #[must_use]
    pub fn max_with(self, recorded: Option<Self>) -> Self {
        recorded.map_or(self, |recorded| self.max(recorded))
    }
}

///
/// Primitive
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Bytes,
    Date,
    Decimal,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Text,
    Timestamp,
    Uuid,
}

impl Primitive {
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::Decimal)
    }

    // widening rank within the integer family
    const fn integer_width(self) -> Option<u8> {
        match self {
            Self::Int8 => Some(1),
            Self::Int16 => Some(2),
            Self::Int32 => Some(3),
            Self::Int64 => Some(4),
            _ => None,
        }
    }

    /// Whether a column of this primitive can hold every value of `source`.
    /// Identity always holds; integers additionally widen.
    #[must_use]
    pub const fn assignable_from(self, source: Self) -> bool {
        if self as u8 == source as u8 {
            return true;
        }

        match (self.integer_width(), source.integer_width()) {
            (Some(dst), Some(src)) => src <= dst,
            _ => false,
        }
    }
}

///
/// Value
///
/// Plain payload for annotations. Scalar only: provider extensions store
/// seeds, increments, names, and tier strings, not structured documents.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Float(f64),
    Int(i64),
    Text(String),
    Uint(u64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

///
/// TESTS
///
