use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::{FieldErrors, ModelError};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const PRODUTO_NAO_ENCONTRADO: &str = "Produto não encontrado";

/// Errors surfaced by HTTP handlers. Each variant owns its status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("invalid field values")]
    Coercion(FieldErrors),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn produto_nao_encontrado() -> Self {
        Self::NotFound(PRODUTO_NAO_ENCONTRADO.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Coercion(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(fields) => ApiError::Validation(fields),
            ModelError::Coercion(fields) => ApiError::Coercion(fields),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => ApiError::produto_nao_encontrado(),
            ServiceError::Db(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(fields) | ApiError::Coercion(fields) => (status, Json(fields)).into_response(),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                (status, Json(serde_json::json!({"message": msg}))).into_response()
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (status, Json(serde_json::json!({"message": "Erro interno do servidor"}))).into_response()
            }
        }
    }
}
