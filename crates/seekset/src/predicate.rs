use crate::{
    cursor::Cursor,
    registry::PropertySet,
    sort::{SortDirection, SortSpec},
    value::{Value, canonical_cmp_nullable},
};
use std::cmp::Ordering;

///
/// Seek predicate AST
///
/// Pure, provider-agnostic representation of the range filter. The engine
/// only builds and hands it over; interpretation (SQL, in-memory, key-value
/// scans) belongs to the ranged-query provider.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    /// Strict variant of this comparator. Non-final seek positions are always
    /// strict; inclusivity only ever applies at the final tuple position.
    #[must_use]
    pub const fn strict(self) -> Self {
        match self {
            Self::Lte => Self::Lt,
            Self::Gte => Self::Gt,
            other => other,
        }
    }

    pub(crate) const fn matches(self, ordering: Ordering) -> bool {
        matches!(
            (self, ordering),
            (Self::Eq, Ordering::Equal)
                | (Self::Lt, Ordering::Less)
                | (Self::Lte, Ordering::Less | Ordering::Equal)
                | (Self::Gt, Ordering::Greater)
                | (Self::Gte, Ordering::Greater | Ordering::Equal)
        )
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparePredicate {
    pub property: String,
    pub op: CompareOp,
    pub value: Option<Value>,
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    /// Matches every row (absent cursor, first page).
    True,
    Compare(ComparePredicate),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    #[must_use]
    pub fn compare(property: impl Into<String>, op: CompareOp, value: Option<Value>) -> Self {
        Self::Compare(ComparePredicate {
            property: property.into(),
            op,
            value,
        })
    }

    /// Evaluate against one row using registered accessors.
    ///
    /// Nullable values order under the engine's total comparator (null
    /// first); unregistered property names read as null.
    #[must_use]
    pub fn eval<R>(&self, row: &R, properties: &PropertySet<R>) -> bool {
        match self {
            Self::True => true,
            Self::All(parts) => parts.iter().all(|part| part.eval(row, properties)),
            Self::Any(parts) => parts.iter().any(|part| part.eval(row, properties)),
            Self::Compare(compare) => {
                let left = properties
                    .resolve(&compare.property)
                    .and_then(|property| property.value_of(row));

                compare
                    .op
                    .matches(canonical_cmp_nullable(left.as_ref(), compare.value.as_ref()))
            }
        }
    }
}

/// Build the seek-method filter for one decoded cursor.
///
/// Classic lexicographic tuple comparison as a disjunction of conjunctions:
/// `OR over i of (AND over j<i of k_j = v_j) AND (k_i CMP_i v_i)`, where
/// `CMP_i` is the cursor direction's comparator, looked up through the
/// direction's inverse at descending positions, and inclusive only at the
/// final position for `*Inclusive` tokens.
///
/// Returns the filter plus the effective sort order the provider must apply;
/// `Before*` tokens run the query with every direction flipped.
#[must_use]
pub(crate) fn build_seek(cursor: &Cursor, spec: &SortSpec) -> (Predicate, SortSpec) {
    debug_assert_eq!(
        cursor.values.len(),
        spec.len(),
        "cursor arity is validated at decode",
    );

    let last = spec.len().saturating_sub(1);
    let mut disjuncts = Vec::with_capacity(spec.len());
    let mut equals: Vec<Predicate> = Vec::new();

    for (position, key) in spec.keys.iter().enumerate() {
        let lookup = match key.direction {
            SortDirection::Asc => cursor.direction,
            SortDirection::Desc => cursor.direction.inverse(),
        };
        let mut op = lookup.compare_op();
        if position < last {
            op = op.strict();
        }

        let value = cursor.values.get(position).cloned().flatten();
        let compare = Predicate::compare(key.property.clone(), op, value.clone());

        if equals.is_empty() {
            disjuncts.push(compare);
        } else {
            let mut parts = equals.clone();
            parts.push(compare);
            disjuncts.push(Predicate::All(parts));
        }

        equals.push(Predicate::compare(key.property.clone(), CompareOp::Eq, value));
    }

    let effective = if cursor.direction.is_before() {
        spec.reversed()
    } else {
        spec.clone()
    };

    (Predicate::Any(disjuncts), effective)
}
