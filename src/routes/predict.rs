use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::normalize_roll_number;
use crate::models::{PredictRequest, PredictResponse, StudentNotFoundResponse, HealthResponse, UniversitySearchParams};
use super::{error_response, AppState};

/// Configure public routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict))
        .route("/universities", web::get().to(list_universities))
        .route("/universities/{id}", web::get().to(get_university));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Predict admissions endpoint
///
/// POST /api/v1/predict
///
/// Request body:
/// ```json
/// {
///   "regionalCode": "string",
///   "rollNo": "၁၂၃" | 123
/// }
/// ```
///
/// An unknown student answers `{"success": false, "message": "Student not found!"}`,
/// which is distinct from a found student with an empty `predictions` list.
async fn predict(
    state: web::Data<AppState>,
    req: web::Json<PredictRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let roll_no = normalize_roll_number(&req.roll_no);
    tracing::info!("Predicting for student {}/{}", req.regional_code, roll_no);

    let student = match state.store.find_student(&req.regional_code, roll_no) {
        Ok(Some(student)) => student,
        Ok(None) => {
            tracing::info!("Student not found: {}/{}", req.regional_code, roll_no);
            return HttpResponse::Ok().json(StudentNotFoundResponse::default());
        }
        Err(e) => {
            tracing::error!("Failed to look up student {}/{}: {}", req.regional_code, roll_no, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to look up student", e.to_string());
        }
    };

    let universities = match state.store.list_universities(None) {
        Ok(universities) => universities,
        Err(e) => {
            tracing::error!("Failed to list universities: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list universities", e.to_string());
        }
    };

    let predictions = state.predictor.predict(&student, &universities);

    tracing::info!(
        "Returning {} predictions for student {}/{} (from {} universities)",
        predictions.len(),
        req.regional_code,
        roll_no,
        universities.len()
    );

    HttpResponse::Ok().json(PredictResponse {
        success: true,
        student: &student,
        predictions,
    })
}

/// List universities
///
/// GET /api/v1/universities?search={region}
async fn list_universities(
    state: web::Data<AppState>,
    query: web::Query<UniversitySearchParams>,
) -> impl Responder {
    let region = query.search.as_deref().filter(|r| !r.is_empty());

    match state.store.list_universities(region) {
        Ok(universities) => HttpResponse::Ok().json(universities),
        Err(e) => {
            tracing::error!("Failed to list universities: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list universities", e.to_string())
        }
    }
}

/// University detail
///
/// GET /api/v1/universities/{id}
async fn get_university(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.find_university(&id) {
        Ok(Some(university)) => HttpResponse::Ok().json(university),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "University not found",
            format!("No university with id {}", id),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch university {}: {}", id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch university", e.to_string())
        }
    }
}
