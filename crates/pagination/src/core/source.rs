//! The row source abstraction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PaginationResult;
use crate::types::{BaseQuery, FetchOptions, Record};

use super::row::CursorRow;

/// Executes base queries.
///
/// Implementations must honor the query's filters, ordering (including the
/// NULL placement of [`SortDirection`](crate::types::SortDirection): NULLs
/// last ascending, first descending) and limit, and return rows in exactly
/// the requested order.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// The row type returned by [`fetch_rows`](RowSource::fetch_rows).
    type Row: CursorRow + Send + Sync + 'static;

    /// Returns a short name for logging and errors.
    fn name(&self) -> &'static str;

    /// Executes the query and returns its rows.
    ///
    /// `options` are caller-supplied and passed through unexamined.
    async fn fetch_rows(
        &self,
        query: &BaseQuery,
        options: &FetchOptions,
    ) -> PaginationResult<Vec<Self::Row>>;

    /// Executes an aggregate query (see
    /// [`Selection::CountDistinct`](crate::types::Selection::CountDistinct))
    /// and returns its result rows.
    async fn fetch_aggregate(&self, query: &BaseQuery) -> PaginationResult<Vec<Record>>;
}

#[async_trait]
impl<S: RowSource + ?Sized> RowSource for Arc<S> {
    type Row = S::Row;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_rows(
        &self,
        query: &BaseQuery,
        options: &FetchOptions,
    ) -> PaginationResult<Vec<Self::Row>> {
        (**self).fetch_rows(query, options).await
    }

    async fn fetch_aggregate(&self, query: &BaseQuery) -> PaginationResult<Vec<Record>> {
        (**self).fetch_aggregate(query).await
    }
}
