//! In-memory ranged-query provider, the reference interpretation of
//! [`RangedQuery`]: filter by the seek predicate, order by the effective
//! sort, truncate to the over-fetch limit. Production callers translate the
//! same query shape into their own store instead.

use crate::{
    fetcher::RangedQuery,
    registry::PropertySet,
    sort::{SortDirection, SortSpec},
    value::canonical_cmp_nullable,
};
use std::cmp::Ordering;

/// Run one ranged query against an in-memory row set.
#[must_use]
pub fn run<R: Clone>(rows: &[R], properties: &PropertySet<R>, query: &RangedQuery) -> Vec<R> {
    let mut selected: Vec<R> = rows
        .iter()
        .filter(|row| query.predicate.eval(*row, properties))
        .cloned()
        .collect();

    sort_rows(&mut selected, properties, &query.order);
    selected.truncate(query.limit);

    selected
}

fn sort_rows<R>(rows: &mut [R], properties: &PropertySet<R>, order: &SortSpec) {
    rows.sort_by(|left, right| compare_rows(left, right, properties, order));
}

// First non-equal key ordering wins; the unique tiebreaker guarantees
// comparator equality only for the same row.
fn compare_rows<R>(
    left: &R,
    right: &R,
    properties: &PropertySet<R>,
    order: &SortSpec,
) -> Ordering {
    for key in &order.keys {
        let Some(property) = properties.resolve(&key.property) else {
            continue;
        };

        let ordering = canonical_cmp_nullable(
            property.value_of(left).as_ref(),
            property.value_of(right).as_ref(),
        );
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
