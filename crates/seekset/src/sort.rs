use serde::{Deserialize, Serialize};

///
/// SortDirection
///
/// Canonical ordering direction shared by sort resolution, seek predicate
/// construction, and the ranged-query contract.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

///
/// SortKey
///
/// One ordered column of an active sort.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortKey {
    pub property: String,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse one `"[-]property"` sort instruction; a leading `-` means
    /// descending.
    #[must_use]
    pub fn parse(instruction: &str) -> Self {
        instruction
            .strip_prefix('-')
            .map_or_else(|| Self::asc(instruction), Self::desc)
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            property: self.property.clone(),
            direction: self.direction.reversed(),
        }
    }
}

/// Property name of one `"[-]property"` sort instruction.
#[must_use]
pub fn instruction_property(instruction: &str) -> &str {
    instruction.strip_prefix('-').unwrap_or(instruction)
}

///
/// SortSpec
///
/// The active, tiebreaker-complete ordering for one fetch. One-to-one with
/// the cursor's value tuple.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortSpec {
    pub keys: Vec<SortKey>,
}

impl SortSpec {
    #[must_use]
    pub const fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Same keys with every direction flipped; backward paging runs the seek
    /// query in this order and un-reverses the rows afterwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            keys: self.keys.iter().map(SortKey::reversed).collect(),
        }
    }
}
