//! [`RowSource`] implementation for PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres_types::{FromSql, Type};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tokio_postgres::Row;

use crate::backends::sql::{Dialect, SqlFragment, SqlParam, render_aggregate, render_select};
use crate::core::RowSource;
use crate::error::{BackendError, PaginationResult};
use crate::types::{BaseQuery, CursorValue, FetchOptions, Record};

use super::backend::{BACKEND_NAME, PostgresBackend};

fn serialization_error(message: String) -> BackendError {
    BackendError::Serialization {
        backend_name: BACKEND_NAME.to_string(),
        message,
    }
}

#[async_trait]
impl RowSource for PostgresBackend {
    type Row = Record;

    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn fetch_rows(
        &self,
        query: &BaseQuery,
        options: &FetchOptions,
    ) -> PaginationResult<Vec<Record>> {
        let fragment = render_select(query, options, Dialect::Postgres)?;
        self.query_records(&fragment).await
    }

    async fn fetch_aggregate(&self, query: &BaseQuery) -> PaginationResult<Vec<Record>> {
        let fragment = render_aggregate(query, Dialect::Postgres)?;
        self.query_records(&fragment).await
    }
}

impl PostgresBackend {
    async fn query_records(&self, fragment: &SqlFragment) -> PaginationResult<Vec<Record>> {
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "Executing PostgreSQL query");

        let client = self.get_client().await?;

        let params: Vec<Box<dyn tokio_postgres::types::ToSql + Sync + Send>> = fragment
            .params
            .iter()
            .map(|param| -> Box<dyn tokio_postgres::types::ToSql + Sync + Send> {
                match param {
                    SqlParam::String(s) => Box::new(s.clone()),
                    SqlParam::Integer(i) => Box::new(*i),
                    SqlParam::Float(f) => Box::new(*f),
                    SqlParam::Bool(b) => Box::new(*b),
                    SqlParam::Null => Box::new(Option::<String>::None),
                }
            })
            .collect();
        let param_refs: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect();

        let rows = client
            .query(&fragment.sql, &param_refs)
            .await
            .map_err(|e| BackendError::QueryFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })?;

        let records = rows
            .iter()
            .map(to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn to_record(row: &Row) -> Result<Record, BackendError> {
    let mut record = Record::new();
    for (i, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let value = match *column.type_() {
            Type::INT2 => get::<i16>(row, i, name)?.map(|v| CursorValue::Number(i64::from(v))),
            Type::INT4 => get::<i32>(row, i, name)?.map(|v| CursorValue::Number(i64::from(v))),
            Type::INT8 => get::<i64>(row, i, name)?.map(CursorValue::Number),
            Type::FLOAT4 => get::<f32>(row, i, name)?.map(|v| CursorValue::Decimal(f64::from(v))),
            Type::FLOAT8 => get::<f64>(row, i, name)?.map(CursorValue::Decimal),
            Type::BOOL => get::<bool>(row, i, name)?.map(CursorValue::Boolean),
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                get::<String>(row, i, name)?.map(CursorValue::String)
            }
            Type::NUMERIC => get::<Decimal>(row, i, name)?.map(numeric_value),
            Type::DATE => get::<NaiveDate>(row, i, name)?.map(text),
            Type::TIME => get::<NaiveTime>(row, i, name)?.map(text),
            Type::TIMESTAMP => get::<NaiveDateTime>(row, i, name)?
                .map(|v| CursorValue::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
            Type::TIMESTAMPTZ => {
                get::<DateTime<Utc>>(row, i, name)?.map(|v| CursorValue::String(v.to_rfc3339()))
            }
            Type::UUID => get::<uuid::Uuid>(row, i, name)?.map(text),
            Type::JSON | Type::JSONB => get::<serde_json::Value>(row, i, name)?.map(text),
            ref other => {
                return Err(serialization_error(format!(
                    "Column {} has unsupported type {}",
                    name, other
                )));
            }
        };
        record.push(name, value.unwrap_or(CursorValue::Null));
    }
    Ok(record)
}

fn text(value: impl ToString) -> CursorValue {
    CursorValue::String(value.to_string())
}

/// Whole numerics become integers; others are approximated as floats.
fn numeric_value(value: Decimal) -> CursorValue {
    let number = if value.fract().is_zero() {
        value.to_i64().map(CursorValue::Number)
    } else {
        value.to_f64().map(CursorValue::Decimal)
    };
    number.unwrap_or_else(|| CursorValue::String(value.to_string()))
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, index: usize, name: &str) -> Result<Option<T>, BackendError> {
    row.try_get::<_, Option<T>>(index)
        .map_err(|e| serialization_error(format!("Failed to read column {}: {}", name, e)))
}
