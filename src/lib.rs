//! Uni Predict - University admission prediction service
//!
//! This library provides the prediction engine that matches a student's
//! matriculation results against the university catalog, plus the thin
//! service layer (record store, CSV import, admin auth, HTTP routes) around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Predictor, RollNumberInput, normalize_roll_number, calculate_prediction_percentage};
pub use crate::models::{Student, University, Prediction, ScoringBands};
