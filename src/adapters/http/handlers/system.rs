use actix_web::HttpResponse;
use serde_json::json;

/// Service banner shown at the root path
///
/// GET /
pub async fn banner_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "message": "Backend API",
    "status": "running",
    "version": "1.0.0",
  }))
}

/// Liveness probe
///
/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "healthy" }))
}
