mod compare;
mod wire;


pub use compare::{canonical_cmp, canonical_cmp_nullable};
pub use wire::{ValueDecodeError, ValueKind};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Typed scalar vocabulary for sort keys and cursor payloads.
/// Comparisons always happen on decoded values, never on raw segment bytes.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Uint(u64),
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl Value {
    /// Codec kind matching this value's variant.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Uint(_) => ValueKind::Uint,
            Self::Int(_) => ValueKind::Int,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Text(_) => ValueKind::Text,
        }
    }

    // Canonical variant rank for deterministic mixed-variant ordering.
    pub(crate) const fn rank(&self) -> u8 {
        match self {
            Self::Uint(_) => 0,
            Self::Int(_) => 1,
            Self::Decimal(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
