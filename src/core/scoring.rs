use crate::models::{Student, University, ScoringBands};
use crate::core::eligibility::{has_failing_subject, supports_category};

/// Calculate the admission likelihood (0-95 with default bands) of a student for one university
///
/// Evaluated in order:
/// 1. Category gate: unsupported category scores 0
/// 2. Gender-specific threshold; a non-positive threshold scores 0
/// 3. Failed subject or "Fail" status: total / threshold * 30
/// 4. Below threshold: total / threshold * 60
/// 5. At or above threshold: 75 + min(25, excess / 100 * 25), capped at 95
///
/// Every band is clamped to `[0, ceiling]`.
pub fn calculate_prediction_percentage(
    student: &Student,
    university: &University,
    bands: &ScoringBands,
) -> f64 {
    if !supports_category(university, student) {
        return 0.0;
    }

    let min_mark = university.min_mark_for(student);
    if min_mark <= 0 {
        return 0.0;
    }

    let ratio = student.total_mark as f64 / min_mark as f64;

    let percentage = if has_failing_subject(student, bands.pass_mark) || student.has_failed() {
        ratio * bands.failing_band
    } else if student.total_mark < min_mark {
        ratio * bands.below_threshold_band
    } else {
        let excess = (student.total_mark - min_mark) as f64;
        bands.base + calculate_bonus(excess, bands)
    };

    percentage.max(0.0).min(bands.ceiling)
}

/// Bonus for marks above the threshold, linear up to `max_bonus`
#[inline]
fn calculate_bonus(excess: f64, bands: &ScoringBands) -> f64 {
    if bands.bonus_span <= 0.0 {
        return bands.max_bonus;
    }
    bands.max_bonus.min(excess / bands.bonus_span * bands.max_bonus)
}
