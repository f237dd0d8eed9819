//! Ordering types: declared order directives and resolved sort keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first; NULLs last.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first; NULLs first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Parses a declared direction.
    ///
    /// Only `desc` (any case) means descending. Every other value, including
    /// an empty string, is ascending.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Returns the SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// One component of the total order a query is paginated by.
///
/// The position of a key in its list is its tie-breaking priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    /// Column name, unqualified.
    pub column: String,
    /// Table that owns the column.
    pub table: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortKey {
    /// Creates a sort key.
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        Self {
            column: column.into(),
            table: table.into(),
            direction,
        }
    }

    /// Returns `table.column`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }

    /// Returns this key with its direction flipped.
    pub fn reversed(&self) -> Self {
        Self {
            column: self.column.clone(),
            table: self.table.clone(),
            direction: self.direction.reversed(),
        }
    }
}

/// An ordering directive as declared on a base query.
///
/// The column may be table-qualified (`cars.description`). The direction is
/// kept verbatim and only interpreted when sort keys are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDirective {
    /// Column name, optionally `table.column`.
    pub column: String,
    /// Direction as declared (e.g. "asc", "DESC").
    pub direction: String,
}

impl OrderDirective {
    /// Creates a directive with an explicit direction string.
    pub fn new(column: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: direction.into(),
        }
    }

    /// Creates an ascending directive.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, "asc")
    }

    /// Creates a descending directive.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, "desc")
    }

    /// Parses the `-column` shorthand.
    ///
    /// A leading `-` means descending, a leading `+` or nothing ascending.
    pub fn parse(s: &str) -> Self {
        if let Some(column) = s.strip_prefix('-') {
            Self::desc(column)
        } else {
            Self::asc(s.strip_prefix('+').unwrap_or(s))
        }
    }
}

impl From<&SortKey> for OrderDirective {
    fn from(key: &SortKey) -> Self {
        Self::new(key.qualified_name(), key.direction.to_string())
    }
}
