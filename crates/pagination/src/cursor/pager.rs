//! The page orchestrator.

use crate::config::PaginationConfig;
use crate::core::RowSource;
use crate::error::PaginationResult;
use crate::types::{BaseQuery, OrderDirective, Page, PageMetadata, PageOptions, PageRequest};

use super::count::count_rows;
use super::extractor::extract_cursors;
use super::predicate::build_cursor_predicate;
use super::resolver::resolve_sort_keys;
use super::reverse::reverse_sort_keys;

/// Fetches pages of a base query from a row source.
///
/// Each call clones the base query before adding the cursor predicate,
/// order and limit, so one `Paginator` and one base query can serve any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Paginator<S> {
    source: S,
    config: PaginationConfig,
}

impl<S: RowSource> Paginator<S> {
    /// Creates a paginator with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, PaginationConfig::default())
    }

    /// Creates a paginator with a custom configuration.
    pub fn with_config(source: S, config: PaginationConfig) -> Self {
        Self { source, config }
    }

    /// Returns the row source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Fetches one page of `query`.
    ///
    /// Rows of a page fetched with a `before` cursor are returned in reverse
    /// canonical order; the page's cursors are always canonical.
    ///
    /// # Errors
    ///
    /// Returns a validation error, before any query is issued, when both
    /// cursors are set, when a cursor's length differs from the number of
    /// sort keys, or when the query names a table or column that is not a
    /// valid identifier.
    /// Row source errors are returned unchanged.
    pub async fn fetch_page(
        &self,
        query: &BaseQuery,
        options: PageOptions,
    ) -> PaginationResult<Page<S::Row>> {
        query.validate()?;
        let cursor = options.cursor()?;
        let limit = self.config.resolve_limit(options.limit);
        let keys = resolve_sort_keys(query)?;
        let predicate = build_cursor_predicate(&keys, cursor.as_ref())?;

        let backward = cursor.as_ref().is_some_and(|c| c.is_backward());
        let execution_keys = if backward {
            reverse_sort_keys(&keys)
        } else {
            keys.clone()
        };

        let page_query = query
            .clone()
            .with_predicate(predicate)
            .with_order(execution_keys.iter().map(OrderDirective::from).collect())
            .with_limit(limit);

        let (rows, row_count) = tokio::try_join!(
            self.source.fetch_rows(&page_query, &options.fetch),
            count_rows(&self.source, query),
        )?;

        let cursors = extract_cursors(&keys, cursor.as_ref(), &rows);
        let has_more = u32::try_from(rows.len()).is_ok_and(|n| n == limit);

        tracing::debug!(
            backend = self.source.name(),
            table = query.table(),
            limit,
            backward,
            rows = rows.len(),
            row_count = ?row_count,
            has_more,
            "Fetched page"
        );

        let next = has_more.then(|| PageRequest {
            query: query.clone(),
            options: options.continue_from(&cursors),
        });

        Ok(Page {
            rows,
            pagination: PageMetadata {
                row_count,
                limit,
                has_more,
                cursors,
                ordered_by: keys,
            },
            backward,
            next,
        })
    }

    /// Fetches the page described by a request.
    pub async fn fetch_request(&self, request: &PageRequest) -> PaginationResult<Page<S::Row>> {
        self.fetch_page(&request.query, request.options.clone())
            .await
    }

    /// Fetches the page following `page` in the same traversal direction.
    ///
    /// Returns `Ok(None)` when `page` reported no more rows. A returned page
    /// may be empty when the previous page ended exactly on the last row.
    pub async fn next(&self, page: &Page<S::Row>) -> PaginationResult<Option<Page<S::Row>>> {
        match page.next_request() {
            Some(request) => self.fetch_request(request).await.map(Some),
            None => Ok(None),
        }
    }

    /// Walks every page of `query`, starting at `options`, calling `f` with
    /// each non-empty page.
    ///
    /// Returns the number of pages passed to `f`.
    pub async fn for_each<F>(
        &self,
        query: &BaseQuery,
        options: PageOptions,
        mut f: F,
    ) -> PaginationResult<usize>
    where
        F: FnMut(&Page<S::Row>),
    {
        let mut visited = 0;
        let mut page = self.fetch_page(query, options).await?;

        loop {
            if !page.is_empty() {
                f(&page);
                visited += 1;
            }
            match self.next(&page).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        tracing::debug!(
            backend = self.source.name(),
            table = query.table(),
            pages = visited,
            "Finished page iteration"
        );

        Ok(visited)
    }

    /// Counts the rows matching `query`, ignoring ordering and pagination.
    pub async fn count(&self, query: &BaseQuery) -> PaginationResult<Option<u64>> {
        count_rows(&self.source, query).await
    }
}
