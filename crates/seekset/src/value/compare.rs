use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator over sort-key values.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Mixed-variant comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.rank().cmp(&right.rank());
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Total comparator over nullable sort-key values.
///
/// Null sorts before every concrete value, so ascending order lists null rows
/// first and seek predicates stay total when a boundary value is null.
#[must_use]
pub fn canonical_cmp_nullable(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => canonical_cmp(left, right),
    }
}
