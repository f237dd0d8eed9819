//! SQLite row source.
//!
//! Uses `rusqlite` with an `r2d2` connection pool. An in-memory database is
//! held in a single pooled connection, since every new connection to
//! `:memory:` opens a separate, empty database.

mod backend;
mod source;

pub use backend::{SqliteBackend, SqliteBackendConfig};
