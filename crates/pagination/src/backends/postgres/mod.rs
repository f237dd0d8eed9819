//! PostgreSQL row source.
//!
//! Uses `tokio-postgres` through a `deadpool-postgres` pool. Integer cursor
//! values are bound as `BIGINT` and decimals as `DOUBLE PRECISION`, so
//! paginated tables should use those column types for sort keys.

mod backend;
mod source;

pub use backend::{PostgresBackend, PostgresConfig, PostgresSslMode};
