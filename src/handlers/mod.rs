pub mod health;
pub mod otp;

pub use health::health_config;
pub use otp::otp_config;

use actix_web::{ResponseError, error::InternalError, web};

use crate::error::AppError;

/// JSON extractor config: malformed bodies get the same error envelope as every other 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4096)
        .error_handler(|err, _req| {
            let app_err = AppError::ValidationError(format!("Invalid request body: {err}"));
            let response = app_err.error_response();
            InternalError::from_response(err, response).into()
        })
}
