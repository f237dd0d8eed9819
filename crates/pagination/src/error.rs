//! Error types for the pagination layer.
//!
//! Errors are organized as a small hierarchy: validation errors raised before
//! any query is issued, cursor token errors, and backend errors raised by the
//! row source while executing a query.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all pagination operations.
#[derive(Error, Debug)]
pub enum PaginationError {
    /// Caller errors detected before execution
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Opaque cursor token errors
    #[error(transparent)]
    Cursor(#[from] CursorError),

    /// Row source execution errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors caused by an invalid page request or query definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The cursor tuple does not line up with the resolved sort keys.
    #[error("sort/cursor mismatch: query is ordered by {expected} column(s), cursor has {actual} value(s)")]
    CursorLengthMismatch { expected: usize, actual: usize },

    /// Both `after` and `before` were supplied.
    #[error("only one of `after` or `before` may be supplied")]
    ConflictingCursors,

    /// A table or column name is not a plain SQL identifier.
    #[error("invalid identifier: {identifier}")]
    InvalidIdentifier { identifier: String },

    /// A configured limit is out of range.
    #[error("invalid limit: {value}")]
    InvalidLimit { value: String },
}

/// Errors encoding or decoding opaque cursor tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// The token is not valid base64 or does not contain a cursor.
    #[error("invalid pagination cursor: {token}")]
    InvalidToken { token: String },

    /// The token was produced by an incompatible cursor format.
    #[error("unsupported cursor version: {version}")]
    UnsupportedVersion { version: u8 },

    /// A cursor value has no token representation (NaN or infinite).
    #[error("cursor value at position {position} is not a finite number")]
    NonFiniteValue { position: usize },

    /// The cursor could not be serialized.
    #[error("failed to encode cursor: {message}")]
    Encoding { message: String },
}

/// Errors raised by a row source.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Failed to establish or check out a connection.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// The statement failed to prepare or execute.
    #[error("query execution failed in {backend_name}: {message}")]
    QueryFailed {
        backend_name: String,
        message: String,
    },

    /// A column value could not be converted.
    #[error("serialization error in {backend_name}: {message}")]
    Serialization {
        backend_name: String,
        message: String,
    },

    /// Other backend errors.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PaginationError {
    /// Returns true if this error was raised before any query was executed.
    pub fn is_validation(&self) -> bool {
        matches!(self, PaginationError::Validation(_))
    }
}

/// Result type for pagination operations.
pub type PaginationResult<T> = Result<T, PaginationError>;
