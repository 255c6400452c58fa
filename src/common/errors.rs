use lambda_http::http::StatusCode;
use lambda_http::Error as LambdaError;

use crate::common::task::FieldError;

/// Failure reported by a [`TaskStore`](crate::common::store::TaskStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{operation} failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
    #[error("task store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bad request. {0}")]
    BadRequest(String),
    #[error("Task {0} not found")]
    NotFound(String),
    #[error("Not found")]
    UnknownRoute,
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("Internal server error. {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    LambdaError(#[from] LambdaError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) | Error::UnknownRoute => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Error::Store(_) | Error::LambdaError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_path_parameter() -> Self {
        Error::BadRequest("The path parameter 'task_id' is missing".into())
    }
}

impl From<Vec<FieldError>> for Error {
    fn from(errors: Vec<FieldError>) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        Error::BadRequest(message)
    }
}

impl From<lambda_http::http::Error> for Error {
    fn from(err: lambda_http::http::Error) -> Self {
        Error::LambdaError(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::LambdaError(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_join_into_one_message() {
        let err = Error::from(vec![
            FieldError::Empty("username"),
            FieldError::Empty("task"),
        ]);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad request. username is empty; task is empty");
    }

    #[test]
    fn store_errors_are_internal() {
        let err = Error::from(StoreError::backend("Scan", "throttled"));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error. Scan failed: throttled");
    }
}
