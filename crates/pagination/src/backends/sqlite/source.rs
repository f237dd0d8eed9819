//! [`RowSource`] implementation for SQLite.

use async_trait::async_trait;
use rusqlite::types::ValueRef;

use crate::backends::sql::{Dialect, SqlFragment, SqlParam, render_aggregate, render_select};
use crate::core::RowSource;
use crate::error::{BackendError, PaginationResult};
use crate::types::{BaseQuery, CursorValue, FetchOptions, Record};

use super::backend::{BACKEND_NAME, SqliteBackend};

fn query_error(message: String) -> BackendError {
    BackendError::QueryFailed {
        backend_name: BACKEND_NAME.to_string(),
        message,
    }
}

#[async_trait]
impl RowSource for SqliteBackend {
    type Row = Record;

    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn fetch_rows(
        &self,
        query: &BaseQuery,
        options: &FetchOptions,
    ) -> PaginationResult<Vec<Record>> {
        let fragment = render_select(query, options, Dialect::Sqlite)?;
        self.query_records(&fragment)
    }

    async fn fetch_aggregate(&self, query: &BaseQuery) -> PaginationResult<Vec<Record>> {
        let fragment = render_aggregate(query, Dialect::Sqlite)?;
        self.query_records(&fragment)
    }
}

impl SqliteBackend {
    fn query_records(&self, fragment: &SqlFragment) -> PaginationResult<Vec<Record>> {
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "Executing SQLite query");

        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(&fragment.sql)
            .map_err(|e| query_error(format!("Failed to prepare query: {}", e)))?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let params: Vec<Box<dyn rusqlite::ToSql>> = fragment
            .params
            .iter()
            .map(|param| -> Box<dyn rusqlite::ToSql> {
                match param {
                    SqlParam::String(s) => Box::new(s.clone()),
                    SqlParam::Integer(i) => Box::new(*i),
                    SqlParam::Float(f) => Box::new(*f),
                    SqlParam::Bool(b) => Box::new(*b),
                    SqlParam::Null => Box::new(Option::<String>::None),
                }
            })
            .collect();
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut rows = stmt
            .query(param_refs.as_slice())
            .map_err(|e| query_error(format!("Failed to execute query: {}", e)))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| query_error(format!("Failed to read row: {}", e)))?
        {
            let mut record = Record::new();
            for (i, column) in columns.iter().enumerate() {
                let value = row
                    .get_ref(i)
                    .map_err(|e| query_error(format!("Failed to read column {}: {}", column, e)))?;
                record.push(column.clone(), to_cursor_value(column, value)?);
            }
            records.push(record);
        }

        Ok(records)
    }
}

fn to_cursor_value(column: &str, value: ValueRef<'_>) -> Result<CursorValue, BackendError> {
    match value {
        ValueRef::Null => Ok(CursorValue::Null),
        ValueRef::Integer(i) => Ok(CursorValue::Number(i)),
        ValueRef::Real(f) => Ok(CursorValue::Decimal(f)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| CursorValue::String(s.to_string()))
            .map_err(|e| BackendError::Serialization {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Column {} is not valid UTF-8: {}", column, e),
            }),
        ValueRef::Blob(_) => Err(BackendError::Serialization {
            backend_name: BACKEND_NAME.to_string(),
            message: format!("Column {} holds a BLOB, which cannot be a cursor value", column),
        }),
    }
}
