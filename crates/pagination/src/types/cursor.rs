//! Cursors: positions in a sort order.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::error::CursorError;

use super::value::CursorValue;

const CURSOR_VERSION: u8 = 1;

/// Which side of the cursor position a page is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorKind {
    /// Rows strictly after the position, in canonical order.
    After,
    /// Rows strictly before the position.
    Before,
}

/// A position in a sort order.
///
/// `values` holds one raw value per sort key, positionally aligned with the
/// keys the query resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Direction relative to the position.
    pub kind: CursorKind,
    /// Sort-key values at the position.
    pub values: Vec<CursorValue>,
}

#[derive(Serialize, Deserialize)]
struct CursorToken {
    version: u8,
    kind: CursorKind,
    values: Vec<CursorValue>,
}

impl Cursor {
    /// Creates an `after` cursor.
    pub fn after(values: Vec<CursorValue>) -> Self {
        Self {
            kind: CursorKind::After,
            values,
        }
    }

    /// Creates a `before` cursor.
    pub fn before(values: Vec<CursorValue>) -> Self {
        Self {
            kind: CursorKind::Before,
            values,
        }
    }

    /// Returns true if the query runs in reversed order.
    pub fn is_backward(&self) -> bool {
        self.kind == CursorKind::Before
    }

    /// Encodes the cursor to an opaque, URL-safe token.
    ///
    /// NaN and infinite decimals are rejected, since JSON cannot carry them.
    pub fn encode(&self) -> Result<String, CursorError> {
        if let Some(position) = self
            .values
            .iter()
            .position(|value| matches!(value, CursorValue::Decimal(d) if !d.is_finite()))
        {
            return Err(CursorError::NonFiniteValue { position });
        }

        let token = CursorToken {
            version: CURSOR_VERSION,
            kind: self.kind,
            values: self.values.clone(),
        };
        let json = serde_json::to_vec(&token).map_err(|e| CursorError::Encoding {
            message: e.to_string(),
        })?;
        Ok(URL_SAFE_NO_PAD.encode(&json))
    }

    /// Decodes a cursor from an opaque token.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let invalid = || CursorError::InvalidToken {
            token: token.to_string(),
        };

        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let decoded: CursorToken = serde_json::from_slice(&bytes).map_err(|_| invalid())?;

        if decoded.version != CURSOR_VERSION {
            return Err(CursorError::UnsupportedVersion {
                version: decoded.version,
            });
        }

        Ok(Self {
            kind: decoded.kind,
            values: decoded.values,
        })
    }
}
