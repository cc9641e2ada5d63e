// Route exports
pub mod admin;
pub mod predict;

use actix_web::{error, web, HttpRequest, HttpResponse};
use crate::core::Predictor;
use crate::models::ErrorResponse;
use crate::services::{AdminAuth, RecordStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub auth: Arc<AdminAuth>,
    pub predictor: Predictor,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(predict::configure)
            .service(web::scope("/admin").configure(admin::configure)),
    );
}

pub(crate) fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = error_response(
        actix_web::http::StatusCode::BAD_REQUEST,
        "invalid_json",
        format!("Invalid JSON: {}", err),
    );
    error::InternalError::from_response(err, response).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(
        actix_web::http::StatusCode::BAD_REQUEST,
        "invalid_query",
        format!("Invalid query: {}", err),
    );
    error::InternalError::from_response(err, response).into()
}
