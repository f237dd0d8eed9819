//! The base query value handed to row sources.
//!
//! A [`BaseQuery`] describes what to fetch (table, joins, filters, order,
//! grouping, limit) without saying how. It is an immutable value: every
//! modifier consumes the query and returns a new one, so a query captured by
//! a page continuation is never affected by later modifications.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::predicate::{ColumnRef, Predicate};
use super::sort::OrderDirective;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Checks that `name` is a plain SQL identifier.
pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentifier {
            identifier: name.to_string(),
        })
    }
}

/// What a query returns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    /// Every column of the primary table.
    #[default]
    All,
    /// The listed columns.
    Columns(Vec<ColumnRef>),
    /// A single `count` field holding `COUNT(DISTINCT column)`.
    CountDistinct(ColumnRef),
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
}

/// A join onto another table using a single equality condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    /// Join type.
    pub kind: JoinKind,
    /// Joined table.
    pub table: String,
    /// Left side of the `ON` equality.
    pub left: ColumnRef,
    /// Right side of the `ON` equality.
    pub right: ColumnRef,
}

/// A filter/join/order specification over a primary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseQuery {
    table: String,
    primary_key: String,
    selection: Selection,
    joins: Vec<Join>,
    filters: Vec<Predicate>,
    order: Vec<OrderDirective>,
    group_by: Vec<ColumnRef>,
    limit: Option<u32>,
}

impl BaseQuery {
    /// Creates a query over `table` with primary identity column `id`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: "id".to_string(),
            selection: Selection::All,
            joins: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            group_by: Vec::new(),
            limit: None,
        }
    }

    /// Sets the primary identity column.
    pub fn with_primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Sets the selection.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Adds an inner join: `JOIN table ON left = right`.
    pub fn inner_join(self, table: impl Into<String>, left: &str, right: &str) -> Self {
        self.with_join(JoinKind::Inner, table, left, right)
    }

    /// Adds a left join: `LEFT JOIN table ON left = right`.
    pub fn left_join(self, table: impl Into<String>, left: &str, right: &str) -> Self {
        self.with_join(JoinKind::Left, table, left, right)
    }

    fn with_join(mut self, kind: JoinKind, table: impl Into<String>, left: &str, right: &str) -> Self {
        self.joins.push(Join {
            kind,
            table: table.into(),
            left: ColumnRef::parse(left),
            right: ColumnRef::parse(right),
        });
        self
    }

    /// Adds a filter predicate. Filters are combined with AND.
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        if !predicate.is_always() {
            self.filters.push(predicate);
        }
        self
    }

    /// Appends an ordering directive.
    pub fn order_by(mut self, directive: OrderDirective) -> Self {
        self.order.push(directive);
        self
    }

    /// Replaces all ordering directives.
    pub fn with_order(mut self, order: Vec<OrderDirective>) -> Self {
        self.order = order;
        self
    }

    /// Removes all ordering directives.
    pub fn without_order(self) -> Self {
        self.with_order(Vec::new())
    }

    /// Appends a grouping column.
    pub fn group_by(mut self, column: &str) -> Self {
        self.group_by.push(ColumnRef::parse(column));
        self
    }

    /// Removes all grouping columns.
    pub fn without_grouping(mut self) -> Self {
        self.group_by.clear();
        self
    }

    /// Sets the row limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Removes the row limit.
    pub fn without_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    /// Returns the primary table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the primary identity column.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Returns the selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the joins.
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Returns the filters.
    pub fn filters(&self) -> &[Predicate] {
        &self.filters
    }

    /// Returns the declared ordering directives.
    pub fn order(&self) -> &[OrderDirective] {
        &self.order
    }

    /// Returns the grouping columns.
    pub fn grouping(&self) -> &[ColumnRef] {
        &self.group_by
    }

    /// Returns the row limit.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Checks every identifier the query references.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_identifier(&self.table)?;
        validate_identifier(&self.primary_key)?;

        let mut result = Ok(());
        let mut check = |column: &ColumnRef| {
            if result.is_err() {
                return;
            }
            if let Some(table) = &column.table {
                result = validate_identifier(table);
            }
            if result.is_ok() {
                result = validate_identifier(&column.column);
            }
        };

        match &self.selection {
            Selection::All => {}
            Selection::Columns(columns) => columns.iter().for_each(&mut check),
            Selection::CountDistinct(column) => check(column),
        }
        for join in &self.joins {
            validate_identifier(&join.table)?;
            check(&join.left);
            check(&join.right);
        }
        for filter in &self.filters {
            filter.for_each_column(&mut check);
        }
        for directive in &self.order {
            check(&ColumnRef::parse(&directive.column));
        }
        self.group_by.iter().for_each(&mut check);

        result
    }
}
