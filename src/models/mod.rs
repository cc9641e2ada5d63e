// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Student, University, Prediction, ScoringBands, FAIL_STATUS, MALE};
pub use requests::{PredictRequest, AdminLoginRequest, StudentSearchParams, UniversitySearchParams};
pub use responses::{PredictResponse, StudentNotFoundResponse, HealthResponse, ErrorResponse, LoginResponse, SummaryResponse};
