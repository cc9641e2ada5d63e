use actix_web::{http::{header, StatusCode}, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::models::{AdminLoginRequest, LoginResponse, StudentSearchParams, SummaryResponse, University};
use crate::services::{import, AdminClaims, ImportReport, StoreError, StudentQuery};
use super::{error_response, AppState};

/// Configure admin routes (mounted under /admin)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/login", web::post().to(login))
        .route("/summary", web::get().to(summary))
        .route("/students", web::get().to(list_students))
        .route("/students/import", web::post().to(import_students))
        .route("/universities", web::post().to(create_university))
        .route("/universities/{id}", web::put().to(update_university));
}

/// Map a catalog write failure to its HTTP response
fn university_error_response(e: StoreError) -> HttpResponse {
    match e {
        StoreError::InvalidUniversity { .. } => {
            tracing::info!("Rejected university: {}", e);
            error_response(StatusCode::BAD_REQUEST, "Invalid university", e.to_string())
        }
        StoreError::DuplicateUniversity(_) => {
            error_response(StatusCode::CONFLICT, "University exists", e.to_string())
        }
        _ => {
            tracing::error!("Failed to save university: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save university", e.to_string())
        }
    }
}

/// Check the bearer token, producing a 401 response on failure
fn require_admin(state: &AppState, req: &HttpRequest) -> Result<AdminClaims, HttpResponse> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state.auth.authorize(header_value).map_err(|e| {
        tracing::info!("Rejected admin request to {}: {}", req.path(), e);
        error_response(StatusCode::UNAUTHORIZED, "Unauthorized", e.to_string())
    })
}

/// Admin login endpoint
///
/// POST /api/v1/admin/login
///
/// Request body:
/// ```json
/// {
///   "email": "string",
///   "password": "string"
/// }
/// ```
async fn login(
    state: web::Data<AppState>,
    req: web::Json<AdminLoginRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    if let Err(e) = state.auth.verify(&req.email, &req.password) {
        tracing::warn!("Failed admin login for {}", req.email);
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials", e.to_string());
    }

    match state.auth.issue_token(&req.email) {
        Ok(issued) => {
            tracing::info!("Admin {} logged in", req.email);
            HttpResponse::Ok().json(LoginResponse {
                status: true,
                token: issued.token,
                expires_at: issued.expires_at,
            })
        }
        Err(e) => {
            tracing::error!("Failed to issue admin token: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token", e.to_string())
        }
    }
}

/// Record counts
///
/// GET /api/v1/admin/summary
async fn summary(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    if let Err(response) = require_admin(&state, &http_req) {
        return response;
    }

    match state.store.counts() {
        Ok(counts) => HttpResponse::Ok().json(SummaryResponse {
            student_count: counts.students,
            university_count: counts.universities,
        }),
        Err(e) => {
            tracing::error!("Failed to count records: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to count records", e.to_string())
        }
    }
}

/// Paged student listing
///
/// GET /api/v1/admin/students?page=1&limit=10&search=&category=&status=&gender=
async fn list_students(
    state: web::Data<AppState>,
    query: web::Query<StudentSearchParams>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(response) = require_admin(&state, &http_req) {
        return response;
    }

    let query = StudentQuery::from(query.into_inner());

    match state.store.search_students(&query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => {
            tracing::error!("Failed to search students: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to search students", e.to_string())
        }
    }
}

/// CSV bulk import
///
/// POST /api/v1/admin/students/import
///
/// Body is raw CSV text with a header row.
async fn import_students(
    state: web::Data<AppState>,
    body: web::Bytes,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(response) = require_admin(&state, &http_req) {
        return response;
    }

    let parsed = match import::parse_students(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::info!("Rejected CSV import: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid CSV", e.to_string());
        }
    };

    let skipped = parsed.skipped;
    match state.store.insert_students(parsed.students) {
        Ok(imported) => {
            tracing::info!("Imported {} students ({} rows skipped)", imported, skipped);
            HttpResponse::Ok().json(ImportReport { imported, skipped })
        }
        Err(e) => {
            tracing::error!("Failed to save imported students: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save students", e.to_string())
        }
    }
}

/// Add a university to the catalog
///
/// POST /api/v1/admin/universities
///
/// Body is a university record; `id` is generated when absent or blank.
async fn create_university(
    state: web::Data<AppState>,
    body: web::Json<University>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(response) = require_admin(&state, &http_req) {
        return response;
    }

    match state.store.insert_university(body.into_inner()) {
        Ok(university) => {
            tracing::info!("Created university {} ({})", university.name, university.id);
            HttpResponse::Created().json(university)
        }
        Err(e) => university_error_response(e),
    }
}

/// Replace a university record
///
/// PUT /api/v1/admin/universities/{id}
async fn update_university(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<University>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(response) = require_admin(&state, &http_req) {
        return response;
    }

    let id = path.into_inner();
    match state.store.update_university(&id, body.into_inner()) {
        Ok(Some(university)) => {
            tracing::info!("Updated university {}", id);
            HttpResponse::Ok().json(university)
        }
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "Not found",
            format!("University {} not found", id),
        ),
        Err(e) => university_error_response(e),
    }
}
