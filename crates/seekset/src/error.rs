use crate::cursor::CursorDecodeError;
use thiserror::Error as ThisError;

/// Opaque provider failure carried through [`FetchError::Provider`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Well-known request parameter names.
pub mod params {
    pub const CURSOR: &str = "cursor";
    pub const PAGE_SIZE: &str = "pageSize";
    pub const PAGE_SORT: &str = "pageSort";
}

/// Machine-readable constraint codes for precondition failures.
pub mod constraints {
    pub const IS_CURSOR: &str = "IsCursor";
    pub const IS_IN: &str = "IsIn";
    pub const IS_NUMBER: &str = "IsNumber";
    pub const IS_SORTABLE: &str = "IsSortable";
    pub const MAX: &str = "Max";
    pub const MIN: &str = "Min";
}

///
/// ConfigError
///
/// Programmer errors in engine configuration. Raised eagerly by builders at
/// setup, never at request time.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("at least one sortable property must be registered")]
    NoProperties,

    #[error("at least one unique property is required to keep cursors consistent")]
    NoUniqueProperty,

    #[error("records query binding is missing")]
    MissingRecordsQuery,

    #[error("record mapper binding is missing")]
    MissingRecordMapper,

    #[error("min page size must be positive")]
    NonPositiveMinPageSize,

    #[error("max page size {max} must not be below min page size {min}")]
    PageSizeBoundsInverted { min: u32, max: u32 },

    #[error("default page size {default} must lie within {min}..={max}")]
    DefaultPageSizeOutOfBounds { default: u32, min: u32, max: u32 },

    #[error("default sort cannot be empty")]
    EmptyDefaultSort,
}

///
/// PreconditionFailure
///
/// Structured client validation failure: the offending parameter plus a
/// machine-readable constraint code, so HTTP layers can surface it like a
/// bean-validation error instead of a generic fault.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("parameter '{parameter}' violates constraint '{constraint}': {message}")]
pub struct PreconditionFailure {
    pub parameter: &'static str,
    pub constraint: &'static str,
    pub message: String,
}

impl PreconditionFailure {
    #[must_use]
    pub fn new(
        parameter: &'static str,
        constraint: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            parameter,
            constraint,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_cursor(reason: &CursorDecodeError) -> Self {
        Self::new(params::CURSOR, constraints::IS_CURSOR, reason.to_string())
    }

    pub(crate) fn unsortable_property(name: &str) -> Self {
        Self::new(
            params::PAGE_SORT,
            constraints::IS_SORTABLE,
            format!("'{name}' is not a sortable property"),
        )
    }
}

///
/// FetchError
///
/// Request-time failure taxonomy. Provider errors propagate unchanged; no
/// error is downgraded to "treat as first page".
///

#[derive(Debug, ThisError)]
pub enum FetchError {
    /// Client input failed validation.
    #[error(transparent)]
    Precondition(#[from] PreconditionFailure),

    /// The ranged-query provider failed.
    #[error("ranged query provider error: {0}")]
    Provider(#[source] BoxedError),
}
