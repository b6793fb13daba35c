use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::{ErrorKind, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Record not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("Invalid value: {0}")]
    TypeConstraint(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            RepositoryError::ValidationError(message) => ServiceError::TypeConstraint(message),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound => ErrorKind::NotFound,
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) | ServiceError::Conflict(_) => {
                ErrorKind::Validation
            }
            ServiceError::Repository(err) => err.kind(),
            ServiceError::Internal(_) => ErrorKind::Unknown,
        }
    }

    /// Text for the toast shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Form(message) => message.clone(),
            ServiceError::TypeConstraint(message) => format!("Invalid value: {message}"),
            ServiceError::Conflict(_) => {
                "A record with the same unique value already exists or is still referenced."
                    .to_string()
            }
            other => other.kind().user_message().to_string(),
        }
    }
}
