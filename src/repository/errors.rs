use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Upstream responded with {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Coarse failure classes shown to operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Auth,
    Permission,
    Validation,
    NotFound,
    Server,
    Unknown,
}

impl ErrorKind {
    /// Classifies an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Auth,
            403 => Self::Permission,
            404 => Self::NotFound,
            400 | 409 | 422 => Self::Validation,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }

    /// Auth, permission and validation failures will fail the same way again.
    pub fn is_retryable(self) -> bool {
        !matches!(
            self,
            Self::Auth | Self::Permission | Self::Validation | Self::NotFound
        )
    }

    /// HTTP status used when the failure is reported to an API client.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Network => 502,
            Self::Auth => 401,
            Self::Permission => 403,
            Self::Validation => 422,
            Self::NotFound => 404,
            Self::Server | Self::Unknown => 500,
        }
    }

    /// One-line message for the toast shown on the dashboard.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Network => "Network error: the fleet service could not be reached.",
            Self::Auth => "Your session has expired. Please sign in again.",
            Self::Permission => "You do not have permission to perform this action.",
            Self::Validation => "The submitted data is invalid.",
            Self::NotFound => "The requested record was not found.",
            Self::Server => "The fleet service failed to process the request.",
            Self::Unknown => "An unexpected error occurred.",
        }
    }
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound => ErrorKind::NotFound,
            RepositoryError::ValidationError(_) | RepositoryError::ConstraintViolation(_) => {
                ErrorKind::Validation
            }
            RepositoryError::ConnectionError(_) => ErrorKind::Network,
            RepositoryError::DatabaseError(_) => ErrorKind::Server,
            RepositoryError::Upstream { status, .. } => ErrorKind::from_status(*status),
            RepositoryError::Unexpected(_) => ErrorKind::Unknown,
        }
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,

            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => RepositoryError::ConstraintViolation(
                        format!("Unique constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::ForeignKeyViolation => RepositoryError::ConstraintViolation(
                        format!("Foreign key constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::NotNullViolation => RepositoryError::ConstraintViolation(
                        format!("Not null constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::CheckViolation => RepositoryError::ConstraintViolation(
                        format!("Check constraint violation: {message}"),
                    ),
                    _ => RepositoryError::DatabaseError(message),
                }
            }

            DieselError::SerializationError(e) => {
                RepositoryError::ValidationError(format!("Serialization error: {e}"))
            }

            DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("Deserialization error: {e}"))
            }

            DieselError::QueryBuilderError(e) => {
                RepositoryError::ValidationError(format!("Query builder error: {e}"))
            }

            DieselError::RollbackTransaction => {
                RepositoryError::DatabaseError("Transaction rollback".to_string())
            }

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RepositoryError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_timeout() || err.is_connect() || err.is_request() {
            RepositoryError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            RepositoryError::Unexpected(format!("Malformed upstream response: {err}"))
        } else {
            RepositoryError::Unexpected(format!("Upstream request failed: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_kinds() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Auth);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Permission);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(418), ErrorKind::Unknown);
    }

    #[test]
    fn non_transient_kinds_are_not_retried() {
        assert!(!ErrorKind::Auth.is_retryable());
        assert!(!ErrorKind::Permission.is_retryable());
        assert!(!ErrorKind::Validation.is_retryable());
        assert!(ErrorKind::Network.is_retryable());
        assert!(ErrorKind::Server.is_retryable());
    }

    #[test]
    fn upstream_errors_classify_by_status() {
        let err = RepositoryError::Upstream {
            status: 403,
            message: "forbidden".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Permission);
        assert_eq!(
            RepositoryError::ConnectionError("refused".into()).kind(),
            ErrorKind::Network
        );
    }
}
