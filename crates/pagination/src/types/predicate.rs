//! Boolean filter expressions over columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::CursorValue;

/// A reference to a column, optionally qualified by its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Owning table; `None` means the query's primary table.
    pub table: Option<String>,
    /// Column name.
    pub column: String,
}

impl ColumnRef {
    /// Creates an unqualified column reference.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    /// Creates a table-qualified column reference.
    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }

    /// Parses `column` or `table.column`.
    pub fn parse(s: &str) -> Self {
        match s.split_once('.') {
            Some((table, column)) => Self::qualified(table, column),
            None => Self::new(s),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.column),
            None => write!(f, "{}", self.column),
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Returns the SQL operator.
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Swaps the sense of an ordering comparison (`<` and `>`, `<=` and `>=`).
    pub fn flipped(self) -> Self {
        match self {
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::Le => CompareOp::Ge,
            CompareOp::Ge => CompareOp::Le,
            other => other,
        }
    }
}

/// A boolean expression over columns.
///
/// Comparisons follow SQL three-valued logic: comparing against NULL is
/// never true, which is why NULL tests have their own variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Matches every row.
    Always,
    /// Matches no row.
    Never,
    /// `column <op> value`
    Compare {
        /// Left-hand column.
        column: ColumnRef,
        /// Operator.
        op: CompareOp,
        /// Right-hand value, bound as a parameter.
        value: CursorValue,
    },
    /// `column IS NULL`
    IsNull(ColumnRef),
    /// `column IS NOT NULL`
    IsNotNull(ColumnRef),
    /// Conjunction; empty means `Always`.
    And(Vec<Predicate>),
    /// Disjunction; empty means `Never`.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Builds a comparison against a column given as `column` or `table.column`.
    pub fn compare(column: &str, op: CompareOp, value: impl Into<CursorValue>) -> Self {
        Predicate::Compare {
            column: ColumnRef::parse(column),
            op,
            value: value.into(),
        }
    }

    /// `column = value`
    pub fn eq(column: &str, value: impl Into<CursorValue>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// `column > value`
    pub fn gt(column: &str, value: impl Into<CursorValue>) -> Self {
        Self::compare(column, CompareOp::Gt, value)
    }

    /// `column < value`
    pub fn lt(column: &str, value: impl Into<CursorValue>) -> Self {
        Self::compare(column, CompareOp::Lt, value)
    }

    /// `column IS NULL`
    pub fn is_null(column: &str) -> Self {
        Predicate::IsNull(ColumnRef::parse(column))
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: &str) -> Self {
        Predicate::IsNotNull(ColumnRef::parse(column))
    }

    /// Combines two predicates with AND.
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::Always => other,
            Predicate::And(mut parts) => {
                parts.push(other);
                Predicate::And(parts)
            }
            this => Predicate::And(vec![this, other]),
        }
    }

    /// Combines two predicates with OR.
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Predicate::Never => other,
            Predicate::Or(mut parts) => {
                parts.push(other);
                Predicate::Or(parts)
            }
            this => Predicate::Or(vec![this, other]),
        }
    }

    /// Returns true for `Predicate::Always`.
    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::Always)
    }

    /// Visits every column referenced by this predicate.
    pub fn for_each_column(&self, f: &mut impl FnMut(&ColumnRef)) {
        match self {
            Predicate::Always | Predicate::Never => {}
            Predicate::Compare { column, .. }
            | Predicate::IsNull(column)
            | Predicate::IsNotNull(column) => f(column),
            Predicate::And(parts) | Predicate::Or(parts) => {
                for part in parts {
                    part.for_each_column(f);
                }
            }
        }
    }
}
