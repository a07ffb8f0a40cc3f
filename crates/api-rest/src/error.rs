use api_shared::auth::AuthError;
use api_shared::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use triage_core::TriageError;

/// Errors surfaced by REST handlers, rendered as `ErrorRes` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Triage(#[from] TriageError),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Triage(
                TriageError::InvalidInput(_) | TriageError::EmptyQueue | TriageError::NoPreviousCall,
            ) => StatusCode::BAD_REQUEST,
            ApiError::Triage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal error".to_string(),
            _ => self.to_string(),
        };
        (status, Json(ErrorRes::new(message))).into_response()
    }
}
