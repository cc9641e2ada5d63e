use crate::models::{Student, University, Prediction, ScoringBands};
use crate::core::scoring::calculate_prediction_percentage;

/// Admission prediction orchestrator
///
/// # Pipeline Stages
/// 1. "Fail" status short-circuit
/// 2. Per-university scoring, in catalog order
/// 3. Drop zero scores, round to 2 decimals
/// 4. Stable sort, highest percentage first
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    bands: ScoringBands,
}

impl Predictor {
    pub fn new(bands: ScoringBands) -> Self {
        Self { bands }
    }

    pub fn with_default_bands() -> Self {
        Self::default()
    }

    pub fn bands(&self) -> &ScoringBands {
        &self.bands
    }

    /// Predict admission likelihood for a student against the whole catalog
    ///
    /// # Arguments
    /// * `student` - The student being predicted
    /// * `universities` - Catalog in the order it was fetched
    ///
    /// # Returns
    /// Predictions with a positive percentage, highest first. Ties keep catalog order.
    pub fn predict<'a>(
        &self,
        student: &Student,
        universities: &'a [University],
    ) -> Vec<Prediction<'a>> {
        if student.has_failed() {
            return Vec::new();
        }

        let mut predictions: Vec<Prediction<'a>> = universities
            .iter()
            .filter_map(|university| {
                let percentage = calculate_prediction_percentage(student, university, &self.bands);
                (percentage > 0.0).then(|| Prediction {
                    university,
                    percentage: round_percentage(percentage),
                })
            })
            .collect();

        // sort_by is stable
        predictions.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        predictions
    }
}

/// Round to 2 decimal places
#[inline]
pub fn round_percentage(percentage: f64) -> f64 {
    (percentage * 100.0).round() / 100.0
}
