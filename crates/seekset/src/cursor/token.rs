use crate::{
    cursor::{Cursor, CursorDecodeError, CursorDirection},
    value::{Value, ValueKind},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Wire literal standing for a null segment value.
const NULL_SEGMENT: &str = "$";

/// Decode a wire cursor against the active sort shape.
///
/// Empty input means "first page" and decodes to `None`. Segment count must
/// exactly equal the active sort length; a mismatch is an error, never a
/// silent truncation.
pub(crate) fn decode(
    text: &str,
    kinds: &[ValueKind],
) -> Result<Option<Cursor>, CursorDecodeError> {
    let Some(symbol) = text.chars().next() else {
        return Ok(None);
    };

    let direction = CursorDirection::from_symbol(symbol)
        .ok_or(CursorDecodeError::UnknownDirection { symbol })?;

    let segments: Vec<&str> = text[symbol.len_utf8()..].split('.').collect();
    if segments.len() != kinds.len() {
        return Err(CursorDecodeError::SegmentArityMismatch {
            expected: kinds.len(),
            found: segments.len(),
        });
    }

    let mut values = Vec::with_capacity(kinds.len());
    for (position, segment) in segments.into_iter().enumerate() {
        if segment == NULL_SEGMENT {
            values.push(None);
            continue;
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| CursorDecodeError::InvalidBase64 { position })?;
        let value = kinds[position]
            .decode(&bytes)
            .map_err(|reason| CursorDecodeError::InvalidPayload { position, reason })?;

        values.push(Some(value));
    }

    Ok(Some(Cursor::new(direction, values)))
}

/// Encode boundary values as a wire cursor: direction symbol, then one
/// `.`-joined padding-free base64url segment per sort position (`$` for
/// null).
pub(crate) fn encode(direction: CursorDirection, values: &[Option<Value>]) -> String {
    let mut out = String::new();
    out.push(direction.symbol());

    for (position, value) in values.iter().enumerate() {
        if position > 0 {
            out.push('.');
        }
        match value {
            None => out.push_str(NULL_SEGMENT),
            Some(value) => out.push_str(&URL_SAFE_NO_PAD.encode(value.to_bytes())),
        }
    }

    out
}

/// Inclusive token for the opposite paging direction, reusing an exclusive
/// token's payload verbatim. Only the direction symbol changes.
pub(crate) fn inclusive_opposite(direction: CursorDirection, wire: &str) -> String {
    let mut out = String::with_capacity(wire.len());
    out.push(direction.inverse().inclusive().symbol());
    out.push_str(&wire[1..]);
    out
}
