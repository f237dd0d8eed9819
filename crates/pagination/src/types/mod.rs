//! Core types for keyset pagination.
//!
//! - [`CursorValue`] - raw sort-key values
//! - [`SortKey`], [`OrderDirective`] - declared and resolved ordering
//! - [`Predicate`] - filter expressions
//! - [`BaseQuery`] - the immutable query value handed to row sources
//! - [`Cursor`] - a position in a sort order, with opaque token encoding
//! - [`Page`], [`PageOptions`] - page requests and results
//! - [`Record`] - generic result rows

mod cursor;
mod page;
mod predicate;
mod query;
mod record;
mod sort;
mod value;

pub use cursor::{Cursor, CursorKind};
pub use page::{FetchOptions, Page, PageCursors, PageMetadata, PageOptions, PageRequest};
pub use predicate::{ColumnRef, CompareOp, Predicate};
pub use query::{BaseQuery, Join, JoinKind, Selection, validate_identifier};
pub use record::Record;
pub use sort::{OrderDirective, SortDirection, SortKey};
pub use value::CursorValue;
