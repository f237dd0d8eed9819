//! Boundary cursor extraction.

use crate::core::CursorRow;
use crate::types::{Cursor, CursorValue, PageCursors, SortKey};

/// Projects a row onto the sort keys.
pub fn row_cursor<R: CursorRow>(keys: &[SortKey], row: &R) -> Vec<CursorValue> {
    keys.iter().map(|key| row.cursor_value(key)).collect()
}

/// Returns the canonical-order boundary cursors of a fetched page.
///
/// The first and last rows give the page's `before` and `after` cursors.
/// Rows of a backward page arrive in reverse canonical order, so the two are
/// swapped. An empty page has no cursors.
pub fn extract_cursors<R: CursorRow>(
    keys: &[SortKey],
    cursor: Option<&Cursor>,
    rows: &[R],
) -> PageCursors {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return PageCursors::default();
    };

    let head = row_cursor(keys, first);
    let tail = row_cursor(keys, last);

    if cursor.is_some_and(Cursor::is_backward) {
        PageCursors {
            before: Some(tail),
            after: Some(head),
        }
    } else {
        PageCursors {
            before: Some(head),
            after: Some(tail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Record, SortDirection};

    fn keys() -> Vec<SortKey> {
        vec![
            SortKey::new("cars", "manufacturer_id", SortDirection::Ascending),
            SortKey::new("cars", "description", SortDirection::Descending),
        ]
    }

    fn car(id: i64, manufacturer_id: i64, description: &str) -> Record {
        Record::new()
            .with("id", id)
            .with("manufacturer_id", manufacturer_id)
            .with("description", description)
    }

    #[test]
    fn test_row_cursor_follows_key_order() {
        let values = row_cursor(&keys(), &car(1, 8, "Impala"));
        assert_eq!(
            values,
            vec![CursorValue::from(8i64), CursorValue::from("Impala")]
        );
    }

    #[test]
    fn test_missing_field_is_null() {
        let keys = vec![SortKey::new("cars", "year", SortDirection::Ascending)];
        assert_eq!(row_cursor(&keys, &car(1, 8, "Impala")), vec![CursorValue::Null]);
    }

    #[test]
    fn test_forward_cursors() {
        let rows = vec![car(1, 8, "Cruze"), car(2, 9, "Escalade")];
        let cursor = Cursor::after(vec![CursorValue::from(8i64), CursorValue::from("Impala")]);
        let cursors = extract_cursors(&keys(), Some(&cursor), &rows);
        assert_eq!(
            cursors.before,
            Some(vec![CursorValue::from(8i64), CursorValue::from("Cruze")])
        );
        assert_eq!(
            cursors.after,
            Some(vec![CursorValue::from(9i64), CursorValue::from("Escalade")])
        );
    }

    #[test]
    fn test_backward_cursors_are_swapped() {
        let rows = vec![car(11, 4, "Impreza"), car(2, 1, "3 Series")];
        let cursor = Cursor::before(vec![CursorValue::from(12i64), CursorValue::from("x")]);
        let cursors = extract_cursors(&keys(), Some(&cursor), &rows);
        assert_eq!(
            cursors.before,
            Some(vec![CursorValue::from(1i64), CursorValue::from("3 Series")])
        );
        assert_eq!(
            cursors.after,
            Some(vec![CursorValue::from(4i64), CursorValue::from("Impreza")])
        );
    }

    #[test]
    fn test_single_row_page() {
        let rows = vec![car(27, 12, "Yukon")];
        let cursors = extract_cursors(&keys(), None, &rows);
        assert_eq!(cursors.before, cursors.after);
        assert!(!cursors.is_empty());
    }

    #[test]
    fn test_empty_page_has_no_cursors() {
        let rows: Vec<Record> = Vec::new();
        assert!(extract_cursors(&keys(), None, &rows).is_empty());
    }
}
