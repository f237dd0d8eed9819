//! Sort specification resolution.

use crate::error::ValidationError;
use crate::types::{BaseQuery, SortDirection, SortKey, validate_identifier};

/// Resolves the query's declared ordering into sort keys.
///
/// Unqualified columns belong to the query's primary table. A query with no
/// declared order is paginated by its primary identity column, ascending.
pub fn resolve_sort_keys(query: &BaseQuery) -> Result<Vec<SortKey>, ValidationError> {
    if query.order().is_empty() {
        return Ok(vec![SortKey::new(
            query.table(),
            query.primary_key(),
            SortDirection::Ascending,
        )]);
    }

    query
        .order()
        .iter()
        .map(|directive| {
            let (table, column) = match directive.column.split_once('.') {
                Some((table, column)) => (table, column),
                None => (query.table(), directive.column.as_str()),
            };
            validate_identifier(table)?;
            validate_identifier(column)?;
            Ok(SortKey::new(
                table,
                column,
                SortDirection::parse(&directive.direction),
            ))
        })
        .collect()
}
