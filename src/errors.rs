use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::error;

use crate::JsonResponse;

#[derive(Debug)]
pub enum RequestError {
    InvalidInput(&'static str),
    Unauthorized(&'static str),
    Forbidden,
    NotFound(&'static str),
    Conflict(&'static str),
    Unavailable(anyhow::Error),
}

#[derive(serde::Serialize)]
pub struct ErrorJson {
    error: String,
}

impl ErrorJson {
    pub fn new(error: &str) -> ErrorJson {
        ErrorJson {
            error: error.to_string(),
        }
    }
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        Self::Unavailable(value.into())
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn to_json_response(&self) -> JsonResponse<ErrorJson> {
        let (status_code, json) = match self {
            RequestError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, ErrorJson::new(message))
            }
            RequestError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ErrorJson::new(message))
            }
            RequestError::Forbidden => (StatusCode::FORBIDDEN, ErrorJson::new("Forbidden")),
            RequestError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorJson::new(message)),
            RequestError::Conflict(message) => (StatusCode::CONFLICT, ErrorJson::new(message)),
            RequestError::Unavailable(e) => {
                error!("store error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorJson::new("Service unavailable"),
                )
            }
        };
        (status_code, Json(json))
    }
}
