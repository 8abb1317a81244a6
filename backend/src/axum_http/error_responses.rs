use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor. Por favor, intenta más tarde.";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

pub fn json_error(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message,
    });

    (status, body).into_response()
}

/// Implemented by every use-case error so routers can answer uniformly.
pub trait UseCaseError: std::error::Error {
    fn status_code(&self) -> StatusCode;
}

pub fn usecase_error<E: UseCaseError>(err: E) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        // Don't leak internal error detail to client
        error!(error = %err, status = status.as_u16(), "request failed");
        return json_error(status, INTERNAL_ERROR_MESSAGE.to_string());
    }

    json_error(status, err.to_string())
}

/// Errors raised before a use case runs. Extractor rejections keep their
/// status but answer with the same JSON body as use-case errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Solicitud inválida: {0}")]
    BadRequest(String),

    #[error("Solicitud inválida: {message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
        };
        json_error(status, self.to_string())
    }
}
