use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::otp::send_otp,
        handlers::otp::verify_otp,
        handlers::health::health,
    ),
    components(
        schemas(
            SendOtpRequest,
            SendOtpResponse,
            VerifyOtpRequest,
            VerifyOtpResponse,
            SendOtpApiResponse,
            VerifyOtpApiResponse,
            HealthResponse,
            ApiError,
        )
    ),
    tags(
        (name = "otp", description = "Mobile OTP issuance and verification"),
        (name = "health", description = "Liveness"),
    ),
    info(
        title = "WikiKisan Backend API",
        version = "1.0.0",
        description = "WikiKisan mobile OTP authentication API"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
