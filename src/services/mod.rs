use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod categories;
pub mod products;
pub mod setup;
pub mod storefront;

/// Number of records returned by "top" selections unless told otherwise.
pub const DEFAULT_TOP_LIMIT: usize = 4;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    Store(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            other => ServiceError::Store(other.to_string()),
        }
    }
}

/// Outcome of a fail-soft read.
///
/// A failed read yields no items and carries the reason in `error`, so
/// callers can tell "nothing stored" from "store unavailable".
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub error: Option<String>,
}

impl<T> Listing<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Log and swallow a repository failure.
    pub(crate) fn from_result(result: RepositoryResult<Vec<T>>, what: &str) -> Self {
        match result {
            Ok(items) => Self::ok(items),
            Err(err) => {
                log::error!("Error fetching {what}: {err}");
                Self::failed(err.to_string())
            }
        }
    }
}

/// `{success, data|error}` outcome of a write.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_error"
    )]
    pub error: Option<ServiceError>,
}

impl<T> Envelope<T> {
    /// Successful write returning `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successful write without a payload.
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn failed(error: ServiceError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Log the failure of `action` and wrap the outcome.
    pub(crate) fn from_result(result: ServiceResult<T>, action: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => {
                log::error!("Error {action}: {err}");
                Self::failed(err)
            }
        }
    }
}

fn serialize_error<S>(error: &Option<ServiceError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(error) => serializer.serialize_str(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
