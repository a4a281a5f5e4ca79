use actix_web::{HttpResponse, Result, ResponseError, web};

use crate::models::*;
use crate::services::OtpService;

#[utoipa::path(
    post,
    path = "/otp/send",
    tag = "otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "OTP sent", body = SendOtpApiResponse),
        (status = 400, description = "Invalid mobile number"),
        (status = 429, description = "Too many OTP requests"),
        (status = 502, description = "SMS delivery failed")
    )
)]
pub async fn send_otp(
    otp_service: web::Data<OtpService>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse> {
    let mobile = request.mobile.as_deref().unwrap_or_default();

    match otp_service.send_otp(mobile).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            response,
            "OTP sent successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/otp/verify",
    tag = "otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP verified", body = VerifyOtpApiResponse),
        (status = 400, description = "Missing fields, invalid mobile number, or OTP not found / expired"),
        (status = 401, description = "Invalid OTP, response carries attemptsLeft"),
        (status = 429, description = "Too many attempts")
    )
)]
pub async fn verify_otp(
    otp_service: web::Data<OtpService>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse> {
    let mobile = request.mobile.as_deref().unwrap_or_default();
    let otp = request.otp.as_deref().unwrap_or_default();

    match otp_service.verify_otp(mobile, otp).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            response,
            "OTP verified successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn otp_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/otp")
            .route("/send", web::post().to(send_otp))
            .route("/verify", web::post().to(verify_otp)),
    );
}
