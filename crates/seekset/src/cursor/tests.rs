use crate::{
    cursor::{Cursor, CursorDecodeError, CursorDirection, decode, encode, inclusive_opposite},
    value::{Value, ValueKind},
};
use rust_decimal::Decimal;

const AMOUNT_ID: [ValueKind; 2] = [ValueKind::Decimal, ValueKind::Uint];

#[test]
fn direction_symbols_round_trip() {
    for direction in [
        CursorDirection::After,
        CursorDirection::AfterInclusive,
        CursorDirection::Before,
        CursorDirection::BeforeInclusive,
    ] {
        assert_eq!(CursorDirection::from_symbol(direction.symbol()), Some(direction));
        // inverse is an involution and preserves inclusivity
        assert_eq!(direction.inverse().inverse(), direction);
        assert_eq!(direction.inverse().is_inclusive(), direction.is_inclusive());
    }

    assert_eq!(CursorDirection::from_symbol('x'), None);
}

#[test]
fn empty_cursor_means_first_page() {
    assert_eq!(decode("", &AMOUNT_ID), Ok(None));
}

#[test]
fn token_round_trips_with_null_segments() {
    let values = vec![None, Some(Value::Uint(7))];
    let wire = encode(CursorDirection::After, &values);

    assert!(wire.starts_with('a'));
    assert!(wire.contains('$'));

    let decoded = decode(&wire, &AMOUNT_ID).expect("wire token decodes");
    assert_eq!(decoded, Some(Cursor::new(CursorDirection::After, values)));
}

#[test]
fn token_round_trips_typed_values() {
    let values = vec![
        Some(Value::Decimal(Decimal::new(1050, 2))),
        Some(Value::Uint(3)),
    ];
    let wire = encode(CursorDirection::BeforeInclusive, &values);
    let decoded = decode(&wire, &AMOUNT_ID).expect("wire token decodes");

    assert_eq!(decoded, Some(Cursor::new(CursorDirection::BeforeInclusive, values)));
}

#[test]
fn unknown_direction_symbol_is_rejected() {
    assert_eq!(
        decode(".", &AMOUNT_ID),
        Err(CursorDecodeError::UnknownDirection { symbol: '.' }),
    );
    assert_eq!(
        decode("x.", &AMOUNT_ID),
        Err(CursorDecodeError::UnknownDirection { symbol: 'x' }),
    );
}

#[test]
fn segment_arity_must_match_active_sort() {
    // one segment against a two-column sort
    let err = decode("aMTA", &AMOUNT_ID).expect_err("under-length cursor must fail");
    assert_eq!(
        err,
        CursorDecodeError::SegmentArityMismatch {
            expected: 2,
            found: 1,
        },
    );

    let err = decode("aMTA.$.$", &AMOUNT_ID).expect_err("over-length cursor must fail");
    assert_eq!(
        err,
        CursorDecodeError::SegmentArityMismatch {
            expected: 2,
            found: 3,
        },
    );
}

#[test]
fn malformed_segments_are_rejected_not_coerced() {
    let err = decode("a!!.$", &AMOUNT_ID).expect_err("invalid base64 must fail");
    assert_eq!(err, CursorDecodeError::InvalidBase64 { position: 0 });

    // valid base64 but not a decimal payload at position 0
    let err = decode("a_-_.$", &AMOUNT_ID).expect_err("invalid payload must fail");
    assert!(matches!(err, CursorDecodeError::InvalidPayload { position: 0, .. }));
}

#[test]
fn inclusive_opposite_swaps_only_the_symbol() {
    let values = vec![
        Some(Value::Decimal(Decimal::from(10))),
        Some(Value::Uint(3)),
    ];
    let after = encode(CursorDirection::After, &values);
    let opposite = inclusive_opposite(CursorDirection::After, &after);

    assert_eq!(opposite, format!("B{}", &after[1..]));
    assert_eq!(
        decode(&opposite, &AMOUNT_ID).expect("opposite token decodes"),
        Some(Cursor::new(CursorDirection::BeforeInclusive, values)),
    );

    let before = encode(CursorDirection::Before, &[Some(Value::Uint(1)), None]);
    let opposite = inclusive_opposite(CursorDirection::Before, &before);
    assert!(opposite.starts_with('A'));
}
