//! Page requests and page results.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{CursorError, PaginationResult, ValidationError};

use super::cursor::{Cursor, CursorKind};
use super::query::BaseQuery;
use super::sort::SortKey;
use super::value::CursorValue;

/// Row source options forwarded unexamined by the paginator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchOptions(Map<String, Value>);

impl FetchOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Returns an option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if no options are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Options for fetching one page.
///
/// At most one of `after` / `before` may be set. Neither means the first
/// page in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    /// Requested page size. Values that are absent or not positive fall back
    /// to the configured default. Deserializes from an integer or a numeric
    /// string; anything else is treated as absent.
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub limit: Option<i64>,

    /// Fetch rows strictly after this position.
    #[serde(default)]
    pub after: Option<Vec<CursorValue>>,

    /// Fetch rows strictly before this position.
    #[serde(default)]
    pub before: Option<Vec<CursorValue>>,

    /// Pass-through options for the row source.
    #[serde(default)]
    pub fetch: FetchOptions,
}

fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

impl PageOptions {
    /// Creates options for the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Fetches rows after the given position.
    pub fn after(mut self, values: Vec<CursorValue>) -> Self {
        self.after = Some(values);
        self
    }

    /// Fetches rows before the given position.
    pub fn before(mut self, values: Vec<CursorValue>) -> Self {
        self.before = Some(values);
        self
    }

    /// Sets a pass-through row source option.
    pub fn with_fetch_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fetch = self.fetch.with(key, value);
        self
    }

    /// Positions the request using an opaque token from [`Cursor::encode`].
    ///
    /// Replaces any `after` / `before` already set.
    pub fn with_cursor_token(mut self, token: &str) -> PaginationResult<Self> {
        let cursor = Cursor::decode(token)?;
        match cursor.kind {
            CursorKind::After => {
                self.after = Some(cursor.values);
                self.before = None;
            }
            CursorKind::Before => {
                self.before = Some(cursor.values);
                self.after = None;
            }
        }
        Ok(self)
    }

    /// Returns the cursor these options describe.
    pub fn cursor(&self) -> Result<Option<Cursor>, ValidationError> {
        match (&self.after, &self.before) {
            (Some(_), Some(_)) => Err(ValidationError::ConflictingCursors),
            (Some(after), None) => Ok(Some(Cursor::after(after.clone()))),
            (None, Some(before)) => Ok(Some(Cursor::before(before.clone()))),
            (None, None) => Ok(None),
        }
    }

    /// Returns options for the page that follows in the same traversal
    /// direction, given the cursors of the page just fetched.
    pub(crate) fn continue_from(&self, cursors: &PageCursors) -> Self {
        let mut options = self.clone();
        if self.before.is_some() {
            options.before = cursors.before.clone();
        } else {
            options.after = cursors.after.clone();
        }
        options
    }
}

/// Boundary cursors of a page, in canonical order.
///
/// `before` always marks the boundary toward the start of the canonical
/// order and `after` the boundary toward its end, whichever direction the
/// page was fetched in. Both are `None` for an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageCursors {
    /// Values for a `before` request.
    pub before: Option<Vec<CursorValue>>,
    /// Values for an `after` request.
    pub after: Option<Vec<CursorValue>>,
}

impl PageCursors {
    /// Returns true if the page was empty.
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }

    /// Encodes the `after` cursor as an opaque token.
    pub fn after_token(&self) -> Result<Option<String>, CursorError> {
        self.after
            .as_ref()
            .map(|values| Cursor::after(values.clone()).encode())
            .transpose()
    }

    /// Encodes the `before` cursor as an opaque token.
    pub fn before_token(&self) -> Result<Option<String>, CursorError> {
        self.before
            .as_ref()
            .map(|values| Cursor::before(values.clone()).encode())
            .transpose()
    }
}

/// Pagination information attached to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Total rows matching the base query, ignoring pagination. `None` when
    /// the row source returned an unrecognized count shape.
    pub row_count: Option<u64>,

    /// Effective page size.
    pub limit: u32,

    /// Whether another page may follow in the traversal direction.
    ///
    /// True whenever the page is full, so a following page can be empty.
    pub has_more: bool,

    /// Boundary cursors.
    pub cursors: PageCursors,

    /// Sort keys the query was paginated by, in declared order.
    pub ordered_by: Vec<SortKey>,
}

/// A base query and the options to fetch one page of it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// The unmodified base query.
    pub query: BaseQuery,
    /// Page options.
    pub options: PageOptions,
}

/// One page of rows.
///
/// Rows of a page fetched with a `before` cursor are in reverse canonical
/// order; see [`Page::into_canonical_rows`].
#[derive(Debug, Clone)]
pub struct Page<R> {
    /// The rows, in the order they were fetched.
    pub rows: Vec<R>,

    /// Pagination information.
    pub pagination: PageMetadata,

    pub(crate) backward: bool,
    pub(crate) next: Option<PageRequest>,
}

impl<R> Page<R> {
    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if the page was fetched with a `before` cursor.
    pub fn is_backward(&self) -> bool {
        self.backward
    }

    /// Returns the request for the following page, if there may be one.
    pub fn next_request(&self) -> Option<&PageRequest> {
        self.next.as_ref()
    }

    /// Returns true if a following page may exist.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Consumes the page, returning its rows in canonical order.
    pub fn into_canonical_rows(self) -> Vec<R> {
        let mut rows = self.rows;
        if self.backward {
            rows.reverse();
        }
        rows
    }
}
