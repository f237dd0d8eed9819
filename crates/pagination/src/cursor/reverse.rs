//! Order reversal for backward traversal.
//!
//! A `before` page is fetched by seeking forward through the reversed
//! order: every direction is flipped, the seek comparison is flipped by the
//! predicate builder, and the page comes back in reverse canonical order.

use crate::types::SortKey;

/// Returns the keys with every direction flipped, columns and positions
/// unchanged.
pub fn reverse_sort_keys(keys: &[SortKey]) -> Vec<SortKey> {
    keys.iter().map(SortKey::reversed).collect()
}
