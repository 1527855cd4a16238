use serde::{Deserialize, Serialize};

///
/// Page
///
/// Assembled page: edge cursors, has-more flags, mapped records in the
/// caller's requested order. Cursors are opaque; callers must not construct
/// or inspect them.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<M> {
    pub prev_cursor: Option<String>,
    pub has_prev: bool,
    pub next_cursor: Option<String>,
    pub has_next: bool,
    pub records: Vec<M>,
}

impl<M> Page<M> {
    pub(crate) const fn empty() -> Self {
        Self {
            prev_cursor: None,
            has_prev: false,
            next_cursor: None,
            has_next: false,
            records: Vec::new(),
        }
    }
}
