use crate::{
    cursor::{self, CursorDirection},
    error::{ConfigError, FetchError, constraints, params},
    fetcher::{CursorFetcher, RangedQuery},
    memory,
    registry::PropertySet,
    request::PageRequest,
    sort::{SortKey, SortSpec},
    value::{Value, ValueKind},
};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
struct TransactionRow {
    id: u64,
    amount: Option<Decimal>,
}

fn row(id: u64, amount: i64) -> TransactionRow {
    TransactionRow {
        id,
        amount: Some(Decimal::from(amount)),
    }
}

// ids 1..=3 tie at amount 10, ids 4..=7 tie at amount 5
fn seven_rows() -> Vec<TransactionRow> {
    vec![
        row(4, 5),
        row(1, 10),
        row(5, 5),
        row(2, 10),
        row(6, 5),
        row(3, 10),
        row(7, 5),
    ]
}

fn properties() -> PropertySet<TransactionRow> {
    PropertySet::new()
        .unique_property("id", ValueKind::Uint, |row: &TransactionRow| {
            Some(Value::Uint(row.id))
        })
        .property("amount", ValueKind::Decimal, |row: &TransactionRow| {
            row.amount.map(Value::Decimal)
        })
}

fn fetcher(rows: Vec<TransactionRow>) -> CursorFetcher<TransactionRow, u64> {
    let provider_properties = properties();

    CursorFetcher::builder(properties())
        .records_query(move |query| Ok(memory::run(&rows, &provider_properties, query)))
        .record_mapper(|row| row.id)
        .build()
        .expect("fetcher configuration is valid")
}

fn fetcher_with_capture(
    rows: Vec<TransactionRow>,
) -> (CursorFetcher<TransactionRow, u64>, Arc<Mutex<Vec<RangedQuery>>>) {
    let provider_properties = properties();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);

    let fetcher = CursorFetcher::builder(properties())
        .records_query(move |query| {
            sink.lock().expect("capture lock").push(query.clone());
            Ok(memory::run(&rows, &provider_properties, query))
        })
        .record_mapper(|row| row.id)
        .build()
        .expect("fetcher configuration is valid");

    (fetcher, captured)
}

fn request(page_size: u32, sort: &[&str]) -> PageRequest {
    PageRequest::new(page_size, sort.iter().map(|s| (*s).to_string()).collect())
}

#[test]
fn tied_leading_column_pages_by_unique_tiebreaker() {
    let fetcher = fetcher(seven_rows());
    let page = fetcher
        .fetch(&request(3, &["-amount", "id"]))
        .expect("first page fetches");

    assert_eq!(page.records, vec![1, 2, 3]);
    assert!(page.has_next);
    assert!(!page.has_prev);

    let next = page.next_cursor.expect("first page has a next cursor");
    let decoded = cursor::decode(&next, &[ValueKind::Decimal, ValueKind::Uint])
        .expect("next cursor decodes")
        .expect("next cursor is non-empty");

    assert_eq!(decoded.direction, CursorDirection::After);
    assert_eq!(
        decoded.values,
        vec![
            Some(Value::Decimal(Decimal::from(10))),
            Some(Value::Uint(3)),
        ],
    );
}

#[test]
fn omitted_unique_property_is_appended_ascending() {
    let (fetcher, captured) = fetcher_with_capture(seven_rows());
    let page = fetcher
        .fetch(&request(3, &["-amount"]))
        .expect("first page fetches");

    assert_eq!(page.records, vec![1, 2, 3]);

    let queries = captured.lock().expect("capture lock");
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0].order,
        SortSpec::new(vec![SortKey::desc("amount"), SortKey::asc("id")]),
    );
    assert_eq!(queries[0].limit, 4);
}

#[test]
fn exclusive_next_cursor_presets_the_prev_edge() {
    let fetcher = fetcher(seven_rows());
    let first = fetcher
        .fetch(&request(3, &["-amount", "id"]))
        .expect("first page fetches");
    let next = first.next_cursor.expect("first page has a next cursor");

    let second = fetcher
        .fetch(&request(3, &["-amount", "id"]).with_cursor(next.clone()))
        .expect("second page fetches");

    assert_eq!(second.records, vec![4, 5, 6]);
    assert!(second.has_next);
    // proven without any row in the new result set: the inclusive variant of
    // the incoming token
    assert!(second.has_prev);
    assert_eq!(
        second.prev_cursor.as_deref(),
        Some(format!("B{}", &next[1..]).as_str()),
    );
}

#[test]
fn paging_back_restores_the_previous_page_in_order() {
    let fetcher = fetcher(seven_rows());
    let sort = ["-amount", "id"];

    let first = fetcher.fetch(&request(3, &sort)).expect("first page fetches");
    let second = fetcher
        .fetch(&request(3, &sort).with_cursor(first.next_cursor.expect("next cursor")))
        .expect("second page fetches");
    let back = fetcher
        .fetch(&request(3, &sort).with_cursor(second.prev_cursor.expect("prev cursor")))
        .expect("backward page fetches");

    assert_eq!(back.records, vec![1, 2, 3]);
    assert!(!back.has_prev, "first page has nothing before it");
}

#[test]
fn exact_fit_page_has_no_neighbors() {
    let fetcher = fetcher(seven_rows());
    let page = fetcher
        .fetch(&request(7, &["-amount", "id"]))
        .expect("full page fetches");

    assert_eq!(page.records, vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(!page.has_next);
    assert!(!page.has_prev);
}

#[test]
fn empty_page_after_the_last_row_keeps_the_preset_edge() {
    let fetcher = fetcher(seven_rows());
    let sort = ["-amount", "id"];

    let mut next = fetcher
        .fetch(&request(6, &sort))
        .expect("first page fetches")
        .next_cursor
        .expect("next cursor");
    next = fetcher
        .fetch(&request(6, &sort).with_cursor(next))
        .expect("last page fetches")
        .next_cursor
        .expect("last page still derives a next cursor");

    let empty = fetcher
        .fetch(&request(6, &sort).with_cursor(next.clone()))
        .expect("empty page fetches");

    assert!(empty.records.is_empty());
    assert!(!empty.has_next);
    assert_eq!(empty.next_cursor, None);
    assert!(empty.has_prev, "preset from the exclusive token");
    assert_eq!(
        empty.prev_cursor.as_deref(),
        Some(format!("B{}", &next[1..]).as_str()),
    );
}

#[test]
fn null_sort_values_page_first_and_round_trip() {
    let rows = vec![
        TransactionRow { id: 1, amount: None },
        TransactionRow { id: 2, amount: None },
        row(3, 1),
        row(4, 2),
    ];
    let fetcher = fetcher(rows);
    let sort = ["amount"];

    let first = fetcher.fetch(&request(2, &sort)).expect("first page fetches");
    assert_eq!(first.records, vec![1, 2]);

    let next = first.next_cursor.expect("next cursor");
    assert!(next.contains('$'), "null boundary value encodes as $");

    let second = fetcher
        .fetch(&request(2, &sort).with_cursor(next))
        .expect("second page fetches");
    assert_eq!(second.records, vec![3, 4]);
    assert!(!second.has_next);
}

#[test]
fn equal_decimals_yield_identical_cursors() {
    let padded = fetcher(vec![
        TransactionRow {
            id: 1,
            amount: Some(Decimal::new(1000, 2)), // 10.00
        },
    ]);
    let plain = fetcher(vec![TransactionRow {
        id: 1,
        amount: Some(Decimal::from(10)),
    }]);

    let request = request(1, &["-amount", "id"]);
    let padded_next = padded.fetch(&request).expect("page fetches").next_cursor;
    let plain_next = plain.fetch(&request).expect("page fetches").next_cursor;

    assert!(padded_next.is_some());
    assert_eq!(padded_next, plain_next);
}

#[test]
fn invalid_cursors_are_reported_not_treated_as_first_page() {
    let fetcher = fetcher(seven_rows());

    for wire in [".", "x.", "a!!.$", "aMTA", "aMTA.$.$"] {
        let err = fetcher
            .fetch(&request(3, &["-amount", "id"]).with_cursor(wire))
            .expect_err("invalid cursor must fail");

        let FetchError::Precondition(failure) = err else {
            panic!("expected a precondition failure for {wire:?}");
        };
        assert_eq!(failure.parameter, params::CURSOR);
        assert_eq!(failure.constraint, constraints::IS_CURSOR);
    }
}

#[test]
fn unknown_sort_property_is_a_client_error() {
    let fetcher = fetcher(seven_rows());
    let err = fetcher
        .fetch(&request(3, &["-secret"]))
        .expect_err("unknown property must fail");

    let FetchError::Precondition(failure) = err else {
        panic!("expected a precondition failure");
    };
    assert_eq!(failure.parameter, params::PAGE_SORT);
    assert_eq!(failure.constraint, constraints::IS_SORTABLE);
}

#[test]
fn provider_errors_propagate_unchanged() {
    let fetcher = CursorFetcher::<TransactionRow, u64>::builder(properties())
        .records_query(|_| Err("store unavailable".into()))
        .record_mapper(|row| row.id)
        .build()
        .expect("fetcher configuration is valid");

    let err = fetcher
        .fetch(&request(3, &["id"]))
        .expect_err("provider failure must surface");

    let FetchError::Provider(source) = err else {
        panic!("expected a provider error");
    };
    assert_eq!(source.to_string(), "store unavailable");
}

#[test]
fn configuration_errors_fail_at_build_time() {
    let err = CursorFetcher::<TransactionRow, u64>::builder(PropertySet::new())
        .records_query(|_| Ok(Vec::new()))
        .record_mapper(|row| row.id)
        .build()
        .expect_err("no properties must fail");
    assert_eq!(err, ConfigError::NoProperties);

    let non_unique = PropertySet::new().property("amount", ValueKind::Decimal, |row: &TransactionRow| {
        row.amount.map(Value::Decimal)
    });
    let err = CursorFetcher::<TransactionRow, u64>::builder(non_unique)
        .records_query(|_| Ok(Vec::new()))
        .record_mapper(|row| row.id)
        .build()
        .expect_err("missing unique property must fail");
    assert_eq!(err, ConfigError::NoUniqueProperty);

    let err = CursorFetcher::<TransactionRow, u64>::builder(properties())
        .record_mapper(|row| row.id)
        .build()
        .expect_err("missing records query must fail");
    assert_eq!(err, ConfigError::MissingRecordsQuery);

    let err = CursorFetcher::<TransactionRow, u64>::builder(properties())
        .records_query(|_| Ok(Vec::new()))
        .build()
        .expect_err("missing record mapper must fail");
    assert_eq!(err, ConfigError::MissingRecordMapper);
}
