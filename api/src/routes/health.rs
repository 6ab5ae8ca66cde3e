use actix_web::HttpResponse;
use vt_shared::HealthResponse;

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "vidtube-api",
        env!("CARGO_PKG_VERSION"),
    ))
}
