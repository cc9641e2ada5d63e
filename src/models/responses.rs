use serde::{Deserialize, Serialize};
use crate::models::domain::{Prediction, Student};

/// Response for a successful prediction lookup
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse<'a> {
    pub success: bool,
    pub student: &'a Student,
    pub predictions: Vec<Prediction<'a>>,
}

/// Response when the lookup key matches no student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentNotFoundResponse {
    pub success: bool,
    pub message: String,
}

impl Default for StudentNotFoundResponse {
    fn default() -> Self {
        Self {
            success: false,
            message: "Student not found!".to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Admin login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: bool,
    pub token: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Record counts for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(rename = "studentCount")]
    pub student_count: usize,
    #[serde(rename = "universityCount")]
    pub university_count: usize,
}
