use actix_web::{HttpResponse, Result, ResponseError, web};

use crate::models::HealthResponse;
use crate::services::OtpService;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(otp_service: web::Data<OtpService>) -> Result<HttpResponse> {
    match otp_service.outstanding().await {
        Ok(outstanding_otps) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            outstanding_otps,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
