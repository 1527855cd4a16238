use crate::value::ValueDecodeError;
use thiserror::Error as ThisError;

///
/// CursorDecodeError
///
/// Cursor token decode failures. A non-empty cursor that fails to decode is
/// always reported, never coerced to "first page"; coercion would mask
/// client bugs.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorDecodeError {
    #[error("unknown cursor direction symbol '{symbol}'")]
    UnknownDirection { symbol: char },

    #[error("cursor segment {position} is not url-safe base64")]
    InvalidBase64 { position: usize },

    #[error("cursor segment {position} payload is invalid: {reason}")]
    InvalidPayload {
        position: usize,
        reason: ValueDecodeError,
    },

    #[error("cursor carries {found} segments, active sort expects {expected}")]
    SegmentArityMismatch { expected: usize, found: usize },
}
