use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::models::{ApiError, ApiResponse};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("OTP not found or expired")]
    OtpNotFound,

    #[error("OTP has expired")]
    OtpExpired,

    #[error("Invalid OTP ({attempts_left} attempts left)")]
    InvalidOtp { attempts_left: u32 },

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::RateLimited(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.clone())
            }
            AppError::OtpNotFound => (
                StatusCode::BAD_REQUEST,
                "OTP_NOT_FOUND",
                "OTP not found or expired".to_string(),
            ),
            AppError::OtpExpired => (
                StatusCode::BAD_REQUEST,
                "OTP_EXPIRED",
                "OTP has expired".to_string(),
            ),
            AppError::InvalidOtp { .. } => (
                StatusCode::UNAUTHORIZED,
                "INVALID_OTP",
                "Invalid OTP".to_string(),
            ),
            AppError::ExternalApiError(msg) => {
                (StatusCode::BAD_GATEWAY, "EXTERNAL_API_ERROR", msg.clone())
            }
            AppError::ReqwestError(_) => (
                StatusCode::BAD_GATEWAY,
                "EXTERNAL_API_ERROR",
                "SMS gateway unreachable".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = self.parts();

        if status_code.is_server_error() {
            log::error!("{error_code}: {self}");
        } else {
            log::warn!("{error_code}: {self}");
        }

        let attempts_left = match self {
            AppError::InvalidOtp { attempts_left } => Some(*attempts_left),
            _ => None,
        };

        // 顶层 message/attemptsLeft 供前端直接读取，error 对象保留错误码
        HttpResponse::build(status_code).json(ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(message.clone()),
            attempts_left,
            error: Some(ApiError {
                code: error_code.to_string(),
                message,
                attempts_left,
            }),
        })
    }
}
