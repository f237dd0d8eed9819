//! Collaborator traits consumed by the paginator.
//!
//! - [`RowSource`] - executes a [`BaseQuery`](crate::types::BaseQuery) and
//!   returns rows, plus an aggregate path used for counting
//! - [`CursorRow`] - projects sort-key values out of a fetched row
//!
//! # Example: Implementing a Row Source
//!
//! ```ignore
//! use async_trait::async_trait;
//! use helios_pagination::core::RowSource;
//! use helios_pagination::error::PaginationResult;
//! use helios_pagination::types::{BaseQuery, FetchOptions, Record};
//!
//! struct MyStore { /* ... */ }
//!
//! #[async_trait]
//! impl RowSource for MyStore {
//!     type Row = Record;
//!
//!     fn name(&self) -> &'static str {
//!         "my-store"
//!     }
//!
//!     async fn fetch_rows(
//!         &self,
//!         query: &BaseQuery,
//!         options: &FetchOptions,
//!     ) -> PaginationResult<Vec<Record>> {
//!         // Apply filters, order and limit, then return rows
//!         todo!()
//!     }
//!
//!     async fn fetch_aggregate(&self, query: &BaseQuery) -> PaginationResult<Vec<Record>> {
//!         // Evaluate the query's aggregate selection
//!         todo!()
//!     }
//! }
//! ```

mod row;
mod source;

pub use row::CursorRow;
pub use source::RowSource;
