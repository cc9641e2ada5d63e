// Core prediction engine
pub mod eligibility;
pub mod numeral;
pub mod predictor;
pub mod scoring;

pub use predictor::Predictor;
pub use numeral::{normalize_roll_number, RollNumberInput};
pub use scoring::calculate_prediction_percentage;
