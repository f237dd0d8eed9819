//! Helios Keyset Pagination
//!
//! This crate pages through relational query results by cursor (keyset)
//! rather than by offset. A page is located by the sort-key values of a
//! boundary row, so pages stay stable while rows are inserted or deleted
//! elsewhere in the result.
//!
//! # Features
//!
//! - **Multi-column order**: any mix of ascending and descending keys,
//!   table-qualified or not, defaulting to the primary key
//! - **Both directions**: `after` and `before` cursors, with boundary
//!   cursors always reported in canonical order
//! - **NULL-aware**: NULL sorts as the maximal value and NULL cursor values
//!   page correctly
//! - **Totals**: every page carries the total row count, computed
//!   concurrently with the page itself
//! - **Opaque tokens**: cursors encode to URL-safe tokens
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `postgres` - PostgreSQL via a deadpool connection pool
//!
//! Any other store can be paginated by implementing [`RowSource`].
//!
//! # Architecture
//!
//! - [`types`] - Queries, cursors, predicates and pages
//! - [`core`] - The [`RowSource`] and [`CursorRow`] collaborator traits
//! - [`cursor`] - Sort-key resolution, seek predicates, cursor extraction,
//!   counting and the [`Paginator`]
//! - [`backends`] - SQL rendering and the SQLite / PostgreSQL row sources
//! - [`config`] - Paginator configuration
//! - [`error`] - Error types for all operations
//!
//! # Building Queries
//!
//! ```
//! use helios_pagination::cursor::{build_cursor_predicate, resolve_sort_keys};
//! use helios_pagination::types::{BaseQuery, Cursor, CursorValue, OrderDirective};
//!
//! let query = BaseQuery::new("cars")
//!     .order_by(OrderDirective::asc("manufacturer_id"))
//!     .order_by(OrderDirective::parse("-description"));
//!
//! let keys = resolve_sort_keys(&query).unwrap();
//! assert_eq!(keys.len(), 2);
//!
//! let cursor = Cursor::after(vec![CursorValue::from(8i64), CursorValue::from("Impala")]);
//! let predicate = build_cursor_predicate(&keys, Some(&cursor)).unwrap();
//! assert!(!predicate.is_always());
//! ```
//!
//! # Paging Through a Table
//!
//! ```no_run
//! use helios_pagination::backends::sqlite::SqliteBackend;
//! use helios_pagination::types::{BaseQuery, PageOptions};
//! use helios_pagination::Paginator;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), helios_pagination::PaginationError> {
//! let backend = SqliteBackend::open("cars.db")?;
//! let paginator = Paginator::new(backend);
//! let query = BaseQuery::new("cars");
//!
//! let mut page = paginator.fetch_page(&query, PageOptions::new().with_limit(5)).await?;
//! loop {
//!     println!("{} of {:?} rows", page.len(), page.pagination.row_count);
//!     match paginator.next(&page).await? {
//!         Some(next) => page = next,
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod config;
pub mod core;
pub mod cursor;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use config::PaginationConfig;
pub use core::{CursorRow, RowSource};
pub use cursor::Paginator;
pub use error::{PaginationError, PaginationResult};
pub use types::{BaseQuery, Cursor, CursorValue, Page, PageOptions, Record};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
