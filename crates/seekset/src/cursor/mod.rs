mod error;
mod token;

#[cfg(test)]
mod tests;

pub use error::CursorDecodeError;
pub(crate) use token::{decode, encode, inclusive_opposite};

use crate::{predicate::CompareOp, value::Value};

///
/// CursorDirection
///
/// Paging direction carried by a cursor token. `Before*` variants request the
/// page immediately preceding the boundary; the engine services them by
/// running the same seek with the sort order reversed and un-reversing the
/// rows before returning.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorDirection {
    After,
    AfterInclusive,
    Before,
    BeforeInclusive,
}

impl CursorDirection {
    /// Wire symbol, the first character of an encoded cursor.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::After => 'a',
            Self::AfterInclusive => 'A',
            Self::Before => 'b',
            Self::BeforeInclusive => 'B',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'a' => Some(Self::After),
            'A' => Some(Self::AfterInclusive),
            'b' => Some(Self::Before),
            'B' => Some(Self::BeforeInclusive),
            _ => None,
        }
    }

    /// Direction with the comparison sense flipped, inclusivity preserved.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::After => Self::Before,
            Self::AfterInclusive => Self::BeforeInclusive,
            Self::Before => Self::After,
            Self::BeforeInclusive => Self::AfterInclusive,
        }
    }

    /// Inclusive variant of this direction.
    #[must_use]
    pub const fn inclusive(self) -> Self {
        match self {
            Self::After | Self::AfterInclusive => Self::AfterInclusive,
            Self::Before | Self::BeforeInclusive => Self::BeforeInclusive,
        }
    }

    /// Comparator applied at an ascending sort position. Descending positions
    /// look the comparator up through [`Self::inverse`].
    #[must_use]
    pub(crate) const fn compare_op(self) -> CompareOp {
        match self {
            Self::After => CompareOp::Gt,
            Self::AfterInclusive => CompareOp::Gte,
            Self::Before => CompareOp::Lt,
            Self::BeforeInclusive => CompareOp::Lte,
        }
    }

    #[must_use]
    pub const fn is_before(self) -> bool {
        matches!(self, Self::Before | Self::BeforeInclusive)
    }

    #[must_use]
    pub const fn is_inclusive(self) -> bool {
        matches!(self, Self::AfterInclusive | Self::BeforeInclusive)
    }
}

///
/// Cursor
///
/// Decoded cursor token: direction plus one nullable value per active sort
/// key, in sort position order. A pure value; the engine keeps no pagination
/// state between requests.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cursor {
    pub direction: CursorDirection,
    pub values: Vec<Option<Value>>,
}

impl Cursor {
    #[must_use]
    pub const fn new(direction: CursorDirection, values: Vec<Option<Value>>) -> Self {
        Self { direction, values }
    }
}
