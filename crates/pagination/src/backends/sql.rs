//! SQL rendering shared by the relational row sources.
//!
//! Renders a [`BaseQuery`] into a single `SELECT` statement with bound
//! parameters. Identifiers are validated and double-quoted; every value is
//! bound as a parameter. Ordering places NULLs last ascending and first
//! descending.
//!
//! Every ORDER BY column is also projected under its qualified
//! `table.column` name, so cursor values can be read back from rows even when
//! the sort runs across a join or two tables share a column name.

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{
    BaseQuery, ColumnRef, CursorValue, FetchOptions, JoinKind, Predicate, Selection,
    SortDirection, validate_identifier,
};

/// Fetch option naming the columns to project instead of `<table>.*`.
pub const COLUMNS_OPTION: &str = "columns";

/// Parameter placeholder syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `?1`, `?2`, ...
    Sqlite,
    /// `$1::bigint`, `$2::text`, ...
    Postgres,
}

impl Dialect {
    fn placeholder(self, position: usize, param: &SqlParam) -> String {
        match self {
            Dialect::Sqlite => format!("?{}", position),
            Dialect::Postgres => match param.pg_type() {
                Some(pg_type) => format!("${}::{}", position, pg_type),
                None => format!("${}", position),
            },
        }
    }
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// Float parameter.
    Float(f64),
    /// Boolean parameter.
    Bool(bool),
    /// Null parameter.
    Null,
}

impl SqlParam {
    /// PostgreSQL type the placeholder is cast to.
    ///
    /// The cast fixes the parameter type, so an `i64` binds against `int2` and
    /// `int4` columns as well as `int8`.
    fn pg_type(&self) -> Option<&'static str> {
        match self {
            SqlParam::String(_) => Some("text"),
            SqlParam::Integer(_) => Some("bigint"),
            SqlParam::Float(_) => Some("double precision"),
            SqlParam::Bool(_) => Some("boolean"),
            SqlParam::Null => None,
        }
    }
}

impl From<&CursorValue> for SqlParam {
    fn from(value: &CursorValue) -> Self {
        match value {
            CursorValue::String(s) => SqlParam::String(s.clone()),
            CursorValue::Number(n) => SqlParam::Integer(*n),
            CursorValue::Decimal(d) => SqlParam::Float(*d),
            CursorValue::Boolean(b) => SqlParam::Bool(*b),
            CursorValue::Null => SqlParam::Null,
        }
    }
}

/// SQL text with bound parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL text.
    pub sql: String,
    /// Bound parameter values, in placeholder order.
    pub params: Vec<SqlParam>,
    dialect: Dialect,
}

impl SqlFragment {
    /// Creates an empty fragment.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Adds a parameter and returns its placeholder.
    pub fn add_param(&mut self, param: SqlParam) -> String {
        let placeholder = self.dialect.placeholder(self.params.len() + 1, &param);
        self.params.push(param);
        placeholder
    }

    fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
}

/// Renders the statement that fetches a page of rows.
///
/// A `"columns"` fetch option (an array of `column` or `table.column`
/// names) replaces the query's projection. Other options are ignored.
/// ORDER BY columns are appended to the projection as `"table.column"`.
pub fn render_select(
    query: &BaseQuery,
    options: &FetchOptions,
    dialect: Dialect,
) -> Result<SqlFragment, ValidationError> {
    let projection = match options.get(COLUMNS_OPTION) {
        Some(columns) => Selection::Columns(parse_columns(columns)?),
        None => query.selection().clone(),
    };
    render(query, &projection, dialect)
}

/// Renders the query with its own selection, as used for aggregates.
pub fn render_aggregate(query: &BaseQuery, dialect: Dialect) -> Result<SqlFragment, ValidationError> {
    render(query, query.selection(), dialect)
}

fn parse_columns(value: &Value) -> Result<Vec<ColumnRef>, ValidationError> {
    let invalid = || ValidationError::InvalidIdentifier {
        identifier: value.to_string(),
    };
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|column| column.as_str().map(ColumnRef::parse).ok_or_else(invalid))
        .collect()
}

fn render(
    query: &BaseQuery,
    selection: &Selection,
    dialect: Dialect,
) -> Result<SqlFragment, ValidationError> {
    let renderer = Renderer {
        table: query.table(),
    };
    let mut fragment = SqlFragment::new(dialect);

    fragment.push("SELECT ");
    fragment.push(&renderer.selection(selection)?);
    if !matches!(selection, Selection::CountDistinct(_)) {
        for directive in query.order() {
            fragment.push(", ");
            fragment.push(&renderer.aliased(&ColumnRef::parse(&directive.column))?);
        }
    }
    fragment.push(" FROM ");
    fragment.push(&quote(query.table())?);

    for join in query.joins() {
        let keyword = match join.kind {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        fragment.push(&format!(
            " {} {} ON {} = {}",
            keyword,
            quote(&join.table)?,
            renderer.column(&join.left)?,
            renderer.column(&join.right)?
        ));
    }

    if !query.filters().is_empty() {
        fragment.push(" WHERE ");
        for (i, filter) in query.filters().iter().enumerate() {
            if i > 0 {
                fragment.push(" AND ");
            }
            fragment.push("(");
            renderer.predicate(filter, &mut fragment)?;
            fragment.push(")");
        }
    }

    if !query.grouping().is_empty() {
        let columns = query
            .grouping()
            .iter()
            .map(|column| renderer.column(column))
            .collect::<Result<Vec<_>, _>>()?;
        fragment.push(" GROUP BY ");
        fragment.push(&columns.join(", "));
    }

    if !query.order().is_empty() {
        let terms = query
            .order()
            .iter()
            .map(|directive| {
                let column = renderer.column(&ColumnRef::parse(&directive.column))?;
                Ok(match SortDirection::parse(&directive.direction) {
                    SortDirection::Ascending => format!("{} ASC NULLS LAST", column),
                    SortDirection::Descending => format!("{} DESC NULLS FIRST", column),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        fragment.push(" ORDER BY ");
        fragment.push(&terms.join(", "));
    }

    if let Some(limit) = query.limit() {
        fragment.push(&format!(" LIMIT {}", limit));
    }

    Ok(fragment)
}

/// Double-quotes a validated identifier.
fn quote(identifier: &str) -> Result<String, ValidationError> {
    validate_identifier(identifier)?;
    Ok(format!("\"{}\"", identifier))
}

struct Renderer<'a> {
    table: &'a str,
}

impl Renderer<'_> {
    /// Unqualified columns belong to the primary table.
    fn column(&self, column: &ColumnRef) -> Result<String, ValidationError> {
        let table = column.table.as_deref().unwrap_or(self.table);
        Ok(format!("{}.{}", quote(table)?, quote(&column.column)?))
    }

    /// Projects a column under its qualified `table.column` name.
    fn aliased(&self, column: &ColumnRef) -> Result<String, ValidationError> {
        let table = column.table.as_deref().unwrap_or(self.table);
        Ok(format!(
            "{} AS \"{}.{}\"",
            self.column(column)?,
            table,
            column.column
        ))
    }

    fn selection(&self, selection: &Selection) -> Result<String, ValidationError> {
        match selection {
            Selection::All => Ok(format!("{}.*", quote(self.table)?)),
            Selection::Columns(columns) if columns.is_empty() => {
                Ok(format!("{}.*", quote(self.table)?))
            }
            Selection::Columns(columns) => Ok(columns
                .iter()
                .map(|column| self.column(column))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ")),
            Selection::CountDistinct(column) => {
                Ok(format!("COUNT(DISTINCT {}) AS \"count\"", self.column(column)?))
            }
        }
    }

    fn predicate(
        &self,
        predicate: &Predicate,
        fragment: &mut SqlFragment,
    ) -> Result<(), ValidationError> {
        match predicate {
            Predicate::Always => fragment.push("1 = 1"),
            Predicate::Never => fragment.push("1 = 0"),
            Predicate::Compare {
                column,
                op,
                value: CursorValue::Null,
            } => {
                fragment.push(&format!("{} {} NULL", self.column(column)?, op.as_sql()));
            }
            Predicate::Compare { column, op, value } => {
                let column = self.column(column)?;
                let placeholder = fragment.add_param(SqlParam::from(value));
                fragment.push(&format!("{} {} {}", column, op.as_sql(), placeholder));
            }
            Predicate::IsNull(column) => {
                fragment.push(&format!("{} IS NULL", self.column(column)?));
            }
            Predicate::IsNotNull(column) => {
                fragment.push(&format!("{} IS NOT NULL", self.column(column)?));
            }
            Predicate::And(parts) => self.group(parts, " AND ", "1 = 1", fragment)?,
            Predicate::Or(parts) => self.group(parts, " OR ", "1 = 0", fragment)?,
        }
        Ok(())
    }

    fn group(
        &self,
        parts: &[Predicate],
        separator: &str,
        empty: &str,
        fragment: &mut SqlFragment,
    ) -> Result<(), ValidationError> {
        if parts.is_empty() {
            fragment.push(empty);
            return Ok(());
        }
        fragment.push("(");
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                fragment.push(separator);
            }
            self.predicate(part, fragment)?;
        }
        fragment.push(")");
        Ok(())
    }
}
