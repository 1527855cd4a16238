#[cfg(test)]
mod tests;

use crate::{
    cursor::{self, CursorDirection},
    error::{BoxedError, ConfigError, FetchError, PreconditionFailure},
    page::Page,
    predicate::{Predicate, build_seek},
    registry::{Property, PropertySet},
    request::PageRequest,
    sort::{SortDirection, SortKey, SortSpec},
    value::{Value, ValueKind},
};

/// Ranged-query provider binding. Receives the seek filter, effective sort,
/// and over-fetch limit; returns up to `limit` rows in that order.
pub type RecordsQueryFn<R> = dyn Fn(&RangedQuery) -> Result<Vec<R>, BoxedError> + Send + Sync;

/// Record mapper binding, a pure `Row -> OutputModel` function.
pub type RecordMapperFn<R, M> = dyn Fn(&R) -> M + Send + Sync;

///
/// RangedQuery
///
/// The single provider call issued per fetch. `limit` is always
/// `page_size + 1`; the extra row only proves another page exists and is
/// never returned.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangedQuery {
    pub predicate: Predicate,
    pub order: SortSpec,
    pub limit: usize,
}

///
/// CursorFetcher
///
/// Stateless keyset-pagination engine bound to one result-set type.
/// Configuration is immutable after [`CursorFetcherBuilder::build`]; each
/// fetch is one provider round-trip with no retries, so a single instance is
/// safe for unlimited concurrent callers.
///

pub struct CursorFetcher<R, M> {
    properties: PropertySet<R>,
    records_query: Box<RecordsQueryFn<R>>,
    record_mapper: Box<RecordMapperFn<R, M>>,
}

impl<R, M> std::fmt::Debug for CursorFetcher<R, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorFetcher")
            .field("properties", &self.properties.len())
            .finish_non_exhaustive()
    }
}

impl<R, M> CursorFetcher<R, M> {
    #[must_use]
    pub fn builder(properties: PropertySet<R>) -> CursorFetcherBuilder<R, M> {
        CursorFetcherBuilder {
            properties,
            records_query: None,
            record_mapper: None,
        }
    }

    /// Perform one paginated fetch.
    ///
    /// Resolves the active sort (appending the unique tiebreaker when the
    /// caller omitted it), decodes the cursor, builds the seek predicate,
    /// runs the provider once with `page_size + 1`, and re-derives edge
    /// cursors from the boundary rows.
    pub fn fetch(&self, request: &PageRequest) -> Result<Page<M>, FetchError> {
        let active = self.resolve_sort(&request.sort)?;
        let kinds = active.kinds();

        let wire = request.cursor.as_deref().unwrap_or_default();
        let decoded = cursor::decode(wire, &kinds)
            .map_err(|reason| PreconditionFailure::invalid_cursor(&reason))?;

        let mut page = Page::empty();
        let mut reversed = false;

        let (predicate, order) = match &decoded {
            None => (Predicate::True, active.spec()),
            Some(token) => {
                reversed = token.direction.is_before();

                // An exclusive token was handed out at a boundary row we
                // already returned, so the opposite neighbor is proven to
                // exist. Pre-populate that edge without an extra query; the
                // opposite cursor is the inclusive variant of the same token.
                if !token.direction.is_inclusive() {
                    let opposite = cursor::inclusive_opposite(token.direction, wire);
                    if reversed {
                        page.next_cursor = Some(opposite);
                        page.has_next = true;
                    } else {
                        page.prev_cursor = Some(opposite);
                        page.has_prev = true;
                    }
                }

                build_seek(token, &active.spec())
            }
        };

        let page_size = request.page_size as usize;
        let query = RangedQuery {
            predicate,
            order,
            limit: page_size + 1,
        };

        let mut rows = (self.records_query)(&query).map_err(FetchError::Provider)?;
        let has_more = rows.len() > page_size;
        rows.truncate(page_size);

        // Derive still-unset edge cursors from the boundary rows, always as
        // exclusive tokens: these rows are proven to exist while the adjacent
        // row is unknown. The over-fetched row resolves has-more for the
        // direction the query actually ran in.
        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            if reversed {
                if page.next_cursor.is_none() {
                    page.next_cursor = Some(cursor::encode(
                        CursorDirection::After,
                        &active.values_of(first),
                    ));
                }
                if page.prev_cursor.is_none() {
                    page.prev_cursor = Some(cursor::encode(
                        CursorDirection::Before,
                        &active.values_of(last),
                    ));
                }
                page.has_prev = has_more;
            } else {
                if page.prev_cursor.is_none() {
                    page.prev_cursor = Some(cursor::encode(
                        CursorDirection::Before,
                        &active.values_of(first),
                    ));
                }
                if page.next_cursor.is_none() {
                    page.next_cursor = Some(cursor::encode(
                        CursorDirection::After,
                        &active.values_of(last),
                    ));
                }
                page.has_next = has_more;
            }
        }

        if reversed {
            rows.reverse();
        }
        page.records = rows.iter().map(|row| (self.record_mapper)(row)).collect();

        Ok(page)
    }

    // Resolve caller sort instructions against the registry, appending the
    // registered unique property ascending when no instruction names one.
    // The tiebreaker keeps the final sort a total order so no row is skipped
    // or duplicated across pages.
    fn resolve_sort(&self, instructions: &[String]) -> Result<ActiveSort<'_, R>, FetchError> {
        let mut keys = Vec::with_capacity(instructions.len() + 1);
        let mut has_unique = false;

        for instruction in instructions {
            let sort_key = SortKey::parse(instruction);
            let property = self
                .properties
                .resolve(&sort_key.property)
                .ok_or_else(|| PreconditionFailure::unsortable_property(&sort_key.property))?;

            has_unique |= property.is_unique();
            keys.push((property, sort_key.direction));
        }

        if !has_unique {
            // Guaranteed present by the builder.
            if let Some(unique) = self.properties.first_unique() {
                keys.push((unique, SortDirection::Asc));
            }
        }

        Ok(ActiveSort { keys })
    }
}

///
/// CursorFetcherBuilder
///
/// Binds the registry, records query, and record mapper. All configuration
/// errors surface here, never per request.
///

pub struct CursorFetcherBuilder<R, M> {
    properties: PropertySet<R>,
    records_query: Option<Box<RecordsQueryFn<R>>>,
    record_mapper: Option<Box<RecordMapperFn<R, M>>>,
}

impl<R, M> CursorFetcherBuilder<R, M> {
    #[must_use]
    pub fn records_query(
        mut self,
        query: impl Fn(&RangedQuery) -> Result<Vec<R>, BoxedError> + Send + Sync + 'static,
    ) -> Self {
        self.records_query = Some(Box::new(query));
        self
    }

    #[must_use]
    pub fn record_mapper(mut self, mapper: impl Fn(&R) -> M + Send + Sync + 'static) -> Self {
        self.record_mapper = Some(Box::new(mapper));
        self
    }

    pub fn build(self) -> Result<CursorFetcher<R, M>, ConfigError> {
        if self.properties.is_empty() {
            return Err(ConfigError::NoProperties);
        }
        if self.properties.first_unique().is_none() {
            return Err(ConfigError::NoUniqueProperty);
        }

        let records_query = self.records_query.ok_or(ConfigError::MissingRecordsQuery)?;
        let record_mapper = self.record_mapper.ok_or(ConfigError::MissingRecordMapper)?;

        Ok(CursorFetcher {
            properties: self.properties,
            records_query,
            record_mapper,
        })
    }
}

///
/// ActiveSort
///
/// Resolved sort shape for one fetch: property references in instruction
/// order, tiebreaker included. One-to-one with the cursor's value tuple.
///

struct ActiveSort<'a, R> {
    keys: Vec<(&'a Property<R>, SortDirection)>,
}

impl<R> ActiveSort<'_, R> {
    fn kinds(&self) -> Vec<ValueKind> {
        self.keys.iter().map(|(property, _)| property.kind()).collect()
    }

    fn spec(&self) -> SortSpec {
        SortSpec::new(
            self.keys
                .iter()
                .map(|(property, direction)| SortKey {
                    property: property.name().to_string(),
                    direction: *direction,
                })
                .collect(),
        )
    }

    fn values_of(&self, row: &R) -> Vec<Option<Value>> {
        self.keys
            .iter()
            .map(|(property, _)| property.value_of(row))
            .collect()
    }
}
