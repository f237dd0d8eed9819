//! Seek predicate construction.
//!
//! For sort keys `k0..kn` and cursor values `v0..vn` the predicate is the
//! lexicographic expansion
//!
//! ```text
//!    k0 ≻ v0
//! OR (k0 ≡ v0 AND k1 ≻ v1)
//! OR ...
//! OR (k0 ≡ v0 AND ... AND kn-1 ≡ vn-1 AND kn ≻ vn)
//! ```
//!
//! where `≡` is `IS NULL` for a NULL value and `=` otherwise, and `≻` is the
//! boundary comparison for the key's direction and the cursor kind.
//!
//! NULL is the maximal value: it sorts after every non-NULL value ascending
//! and before every non-NULL value descending.

use crate::error::ValidationError;
use crate::types::{
    ColumnRef, CompareOp, Cursor, CursorKind, CursorValue, Predicate, SortDirection, SortKey,
};

/// Builds the seek predicate selecting rows strictly beyond `cursor`.
///
/// Returns [`Predicate::Always`] without a cursor. The cursor must carry one
/// value per sort key.
pub fn build_cursor_predicate(
    keys: &[SortKey],
    cursor: Option<&Cursor>,
) -> Result<Predicate, ValidationError> {
    let Some(cursor) = cursor else {
        return Ok(Predicate::Always);
    };

    if keys.len() != cursor.values.len() {
        return Err(ValidationError::CursorLengthMismatch {
            expected: keys.len(),
            actual: cursor.values.len(),
        });
    }

    let terms = (0..keys.len())
        .map(|position| {
            let mut parts = vec![boundary(
                &keys[position],
                &cursor.values[position],
                cursor.kind,
            )];
            parts.extend(
                keys[..position]
                    .iter()
                    .zip(&cursor.values[..position])
                    .map(|(key, value)| tie(key, value)),
            );
            Predicate::And(parts)
        })
        .collect();

    Ok(Predicate::Or(terms))
}

/// Returns the comparison that moves forward through the order: `>` for an
/// ascending key, `<` for a descending one, swapped for a `before` cursor.
pub fn seek_op(direction: SortDirection, kind: CursorKind) -> CompareOp {
    let op = match direction {
        SortDirection::Ascending => CompareOp::Gt,
        SortDirection::Descending => CompareOp::Lt,
    };
    match kind {
        CursorKind::After => op,
        CursorKind::Before => op.flipped(),
    }
}

fn column(key: &SortKey) -> ColumnRef {
    ColumnRef::qualified(&key.table, &key.column)
}

/// Pins a higher-priority key to the cursor value.
fn tie(key: &SortKey, value: &CursorValue) -> Predicate {
    if value.is_null() {
        Predicate::IsNull(column(key))
    } else {
        Predicate::Compare {
            column: column(key),
            op: CompareOp::Eq,
            value: value.clone(),
        }
    }
}

/// Strict comparison past the cursor value at one position.
fn boundary(key: &SortKey, value: &CursorValue, kind: CursorKind) -> Predicate {
    let op = seek_op(key.direction, kind);

    if value.is_null() {
        return match op {
            // Every non-NULL value is below NULL.
            CompareOp::Lt => Predicate::IsNotNull(column(key)),
            // Nothing is above NULL. Ties on NULL fall to the next position.
            _ => Predicate::Never,
        };
    }

    let compare = Predicate::Compare {
        column: column(key),
        op,
        value: value.clone(),
    };
    if op == CompareOp::Gt {
        // `col > v` is unknown for NULL, yet NULL sorts above every value.
        Predicate::Or(vec![compare, Predicate::IsNull(column(key))])
    } else {
        compare
    }
}
