//! Paginator configuration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Configuration for a [`Paginator`](crate::Paginator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when a request does not specify a positive limit.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Upper bound for requested page sizes. `None` means unbounded.
    #[serde(default)]
    pub max_limit: Option<u32>,
}

fn default_limit() -> u32 {
    10
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: None,
        }
    }
}

impl PaginationConfig {
    /// Sets the default page size.
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Sets the maximum page size.
    pub fn with_max_limit(mut self, limit: u32) -> Self {
        self.max_limit = Some(limit);
        self
    }

    /// Checks that the limits are usable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_limit == 0 {
            return Err(ValidationError::InvalidLimit {
                value: "default_limit must be positive".to_string(),
            });
        }
        if let Some(max) = self.max_limit {
            if max < self.default_limit {
                return Err(ValidationError::InvalidLimit {
                    value: format!(
                        "max_limit {} is smaller than default_limit {}",
                        max, self.default_limit
                    ),
                });
            }
        }
        Ok(())
    }

    /// Resolves the effective page size for a request.
    ///
    /// A positive requested value is used, capped at `max_limit`. Anything
    /// else falls back to `default_limit`.
    pub fn resolve_limit(&self, requested: Option<i64>) -> u32 {
        let limit = match requested {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => self.default_limit,
        };
        match self.max_limit {
            Some(max) => limit.min(max),
            None => limit,
        }
    }
}
