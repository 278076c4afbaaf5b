use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::auth::{
    dto::{ApiResponse, FieldError},
    repo::StoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation failed")]
    ValidationFailed(Vec<FieldError>),
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Registration Unsuccessful")]
    RegistrationFailed,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            StoreError::Database(e) => AuthError::Internal(e.into()),
            StoreError::Other(e) => AuthError::Internal(e),
        }
    }
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::RegistrationFailed | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AuthError::Internal(e) => {
                error!(error = ?e, "internal error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        let mut body = ApiResponse::error(status.as_u16(), message);
        if let AuthError::ValidationFailed(fields) = self {
            body.errors = Some(fields);
        }
        (status, Json(body)).into_response()
    }
}
