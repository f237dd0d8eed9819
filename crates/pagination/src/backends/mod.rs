//! Relational row sources.
//!
//! Both backends render queries through the shared [`sql`] module and
//! return [`Record`](crate::types::Record) rows.
//!
//! - `sqlite` (default feature): [`sqlite::SqliteBackend`]
//! - `postgres`: [`postgres::PostgresBackend`]

pub mod sql;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;
