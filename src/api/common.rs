//! Common API utilities and shared types

use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{ApiError, SERVER_ERROR};

/// `?category=` on the list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: Option<String>,
}

impl CategoryQuery {
    /// The requested category, or `None` when absent or not recognised
    pub fn parse<C: FromStr>(&self) -> Option<C> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }
}

/// Parse a record id from the path.
///
/// A malformed id is treated like any other storage failure.
pub fn parse_record_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| {
        tracing::error!(id = raw, error = %e, "Malformed record id");
        ApiError::internal_error(SERVER_ERROR)
    })
}
