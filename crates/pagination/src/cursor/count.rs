//! Total row counts for paginated queries.

use crate::core::RowSource;
use crate::error::PaginationResult;
use crate::types::{BaseQuery, ColumnRef, CursorValue, Record, Selection};

/// Field name used when the single aggregate row has more than one field.
pub const COUNT_FIELD: &str = "count";

/// Derives the count query for a base query.
///
/// Ordering and grouping are dropped and the selection becomes a distinct
/// count over the primary table's identity column.
pub fn count_query(query: &BaseQuery) -> BaseQuery {
    let identity = ColumnRef::qualified(query.table(), query.primary_key());
    query
        .clone()
        .without_order()
        .without_grouping()
        .without_limit()
        .with_selection(Selection::CountDistinct(identity))
}

/// Reads the count out of an aggregate result.
///
/// Only a single-row result is read. Its only field is taken as the count
/// whatever the field is called; with several fields the [`COUNT_FIELD`] is
/// used. Returns `None` for any other shape or a value that is not a
/// non-negative integer.
pub fn parse_count(rows: &[Record]) -> Option<u64> {
    let [row] = rows else {
        return None;
    };

    if row.len() == 1 {
        return row.iter().next().and_then(|(_, value)| as_count(value));
    }

    row.get(COUNT_FIELD).and_then(as_count)
}

fn as_count(value: &CursorValue) -> Option<u64> {
    match value {
        CursorValue::Number(n) => u64::try_from(*n).ok(),
        CursorValue::String(s) => s.trim().parse().ok(),
        CursorValue::Decimal(d) if d.fract() == 0.0 && *d >= 0.0 => Some(*d as u64),
        _ => None,
    }
}

/// Counts the rows matching a base query, ignoring pagination.
pub async fn count_rows<S: RowSource + ?Sized>(
    source: &S,
    query: &BaseQuery,
) -> PaginationResult<Option<u64>> {
    let rows = source.fetch_aggregate(&count_query(query)).await?;
    let count = parse_count(&rows);

    if count.is_none() {
        tracing::warn!(
            backend = source.name(),
            rows = rows.len(),
            "Unrecognized count result shape, row count left undefined"
        );
    }

    Ok(count)
}
