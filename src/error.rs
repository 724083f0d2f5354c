use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::{ApiError, ApiErrorResponse};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 错误类型到 HTTP 状态码与错误码的唯一映射表
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::InvalidDateFormat(_) => (StatusCode::BAD_REQUEST, "INVALID_DATE_FORMAT"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    /// 4xx 记 warn，5xx 记 error
    pub fn log_level(&self) -> log::Level {
        if self.status_and_code().0.is_server_error() {
            log::Level::Error
        } else {
            log::Level::Warn
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::InvalidDateFormat(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(_) => "Database error".to_string(),
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();
        log::log!(self.log_level(), "{self}");

        HttpResponse::build(status_code).json(ApiErrorResponse {
            success: false,
            error: ApiError {
                code: error_code.to_string(),
                message: self.public_message(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        let cases = [
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidDateFormat("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom("connection reset".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status_and_code().1, "DATABASE_ERROR");
        assert_eq!(err.public_message(), "Database error");
    }

    #[test]
    fn test_log_level_follows_status() {
        assert_eq!(AppError::ValidationError("x".into()).log_level(), log::Level::Warn);
        assert_eq!(AppError::InvalidDateFormat("x".into()).log_level(), log::Level::Warn);
        assert_eq!(AppError::NotFound("x".into()).log_level(), log::Level::Warn);
        assert_eq!(
            AppError::DatabaseError(sea_orm::DbErr::Custom("x".into())).log_level(),
            log::Level::Error
        );
        assert_eq!(AppError::InternalError("x".into()).log_level(), log::Level::Error);
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let resp = AppError::NotFound("subscription not found".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "subscription not found");
    }
}
