//! Stateless keyset ("cursor") pagination engine: opaque cursor tokens,
//! seek-method range predicates, and page assembly over an external
//! ranged-query provider.
//!
//! The engine holds no mutable state beyond its immutable configuration, so a
//! single [`fetcher::CursorFetcher`] is safe for unlimited concurrent callers.

pub mod cursor;
pub mod error;
pub mod fetcher;
pub mod memory;
pub mod page;
pub mod predicate;
pub mod registry;
pub mod request;
pub mod sort;
pub mod value;

///
/// Prelude
///
/// Domain vocabulary only; errors and provider plumbing are imported from
/// their modules explicitly.
///

pub mod prelude {
    pub use crate::{
        cursor::CursorDirection,
        fetcher::CursorFetcher,
        page::Page,
        registry::PropertySet,
        request::{PageRequest, PageRequestParser},
        sort::{SortDirection, SortKey, SortSpec},
        value::{Value, ValueKind},
    };
}
