//! Keyset pagination.
//!
//! A page request flows through these steps:
//!
//! 1. [`resolve_sort_keys`] turns the base query's declared order into sort
//!    keys, defaulting to the primary key ascending.
//! 2. [`build_cursor_predicate`] turns the `after` / `before` cursor into a
//!    seek predicate over those keys.
//! 3. For a `before` cursor, [`reverse_sort_keys`] flips the order the page
//!    is fetched in.
//! 4. The row source runs the page query while [`count_rows`] runs the
//!    count query.
//! 5. [`extract_cursors`] reads the page's boundary cursors back out of the
//!    first and last rows.
//!
//! [`Paginator`] composes the steps and hands out continuations.

mod count;
mod extractor;
mod pager;
mod predicate;
mod resolver;
mod reverse;

pub use count::{COUNT_FIELD, count_query, count_rows, parse_count};
pub use extractor::{extract_cursors, row_cursor};
pub use pager::Paginator;
pub use predicate::{build_cursor_predicate, seek_op};
pub use resolver::resolve_sort_keys;
pub use reverse::reverse_sort_keys;
