//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// JSON error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_type: "database_error".to_string(),
                        message: "Database error".to_string(),
                        details: None,
                    },
                )
            }
            AppError::Pricing(e) => e.status_and_body(),
            AppError::Config(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_type: "internal_error".to_string(),
                        message: "Internal error".to_string(),
                        details: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_not_found_status() {
        let trip_id = uuid::Uuid::new_v4();
        let err = AppError::from(PricingError::TripNotFound { trip_id });
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error_type, "trip_not_found");
    }

    #[test]
    fn test_config_error_hides_message() {
        let (status, body) = AppError::Config("pool exhausted".to_string()).status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("pool exhausted"));
    }

    #[test]
    fn test_capacity_error_maps_to_unprocessable() {
        let err = AppError::from(PricingError::Capacity { shortfall: 2 });
        let (status, body) = err.status_and_body();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error_type, "capacity_error");
        assert_eq!(body.details, Some(serde_json::json!({"shortfall": 2})));
    }
}
