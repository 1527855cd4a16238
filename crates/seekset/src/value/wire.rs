use crate::value::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// ValueKind
///
/// Names the byte codec registered for one sortable property. Cursor segment
/// payloads carry no type tag; the active sort position selects the kind.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ValueKind {
    Uint,
    Int,
    Decimal,
    Text,
}

impl ValueKind {
    /// Decode one cursor segment payload into a typed value.
    pub fn decode(self, bytes: &[u8]) -> Result<Value, ValueDecodeError> {
        match self {
            Self::Uint => Ok(Value::Uint(u64::from_be_bytes(fixed_width(bytes)?))),
            Self::Int => Ok(Value::Int(i64::from_be_bytes(fixed_width(bytes)?))),
            Self::Decimal => {
                let text = std::str::from_utf8(bytes).map_err(|_| ValueDecodeError::Utf8)?;
                let value = Decimal::from_str(text).map_err(|err| ValueDecodeError::Decimal {
                    reason: err.to_string(),
                })?;

                Ok(Value::Decimal(value))
            }
            Self::Text => String::from_utf8(bytes.to_vec())
                .map(Value::Text)
                .map_err(|_| ValueDecodeError::Utf8),
        }
    }
}

impl Value {
    /// Byte encoding for cursor segments.
    ///
    /// Integers use fixed-width big-endian bytes, decimals the normalized
    /// plain-string form (trailing zeros stripped, so numerically equal
    /// values share one encoding), text its UTF-8 bytes.
    ///
    /// Byte-lexicographic order is only preserved for non-negative integers.
    /// The engine compares decoded values, so signed keys stay correct here;
    /// consumers comparing raw segments must keep `Int` keys non-negative.
    #[must_use]
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Uint(value) => value.to_be_bytes().to_vec(),
            Self::Int(value) => value.to_be_bytes().to_vec(),
            Self::Decimal(value) => value.normalize().to_string().into_bytes(),
            Self::Text(value) => value.clone().into_bytes(),
        }
    }
}

///
/// ValueDecodeError
///
/// Segment payload decode failures, reported per cursor position.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueDecodeError {
    #[error("expected {expected} payload bytes, found {found}")]
    Width { expected: usize, found: usize },

    #[error("payload is not valid UTF-8")]
    Utf8,

    #[error("payload is not a decimal: {reason}")]
    Decimal { reason: String },
}

fn fixed_width<const N: usize>(bytes: &[u8]) -> Result<[u8; N], ValueDecodeError> {
    <[u8; N]>::try_from(bytes).map_err(|_| ValueDecodeError::Width {
        expected: N,
        found: bytes.len(),
    })
}
