use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::numeral::RollNumberInput;

/// Request to predict admissions for one student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "regional_code", rename = "regionalCode")]
    pub regional_code: String,
    #[serde(alias = "roll_no", rename = "rollNo")]
    pub roll_no: RollNumberInput,
}

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Query string for the admin student listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentSearchParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Query string for the university listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniversitySearchParams {
    /// Exact region filter
    #[serde(default)]
    pub search: Option<String>,
}
