//! Property tests for the prediction engine.

use proptest::prelude::*;

use uni_predict::core::{
    numeral::{normalize_roll_text, parse_int_prefix},
    scoring::calculate_prediction_percentage,
    Predictor,
};
use uni_predict::models::{Student, University, ScoringBands};

const MYANMAR_DIGITS: [char; 10] = ['၀', '၁', '၂', '၃', '၄', '၅', '၆', '၇', '၈', '၉'];

fn make_student(category: &str, gender: &str, status: &str, marks: [i32; 9], total_mark: i32) -> Student {
    Student {
        name: "Prop".to_string(),
        regional_code: "YGN".to_string(),
        roll_no: 1,
        myan: marks[0],
        eng: marks[1],
        math: marks[2],
        phy: marks[3],
        chem: marks[4],
        bio: marks[5],
        eco: marks[6],
        hist: marks[7],
        geo: marks[8],
        total_mark,
        gender: gender.to_string(),
        status: status.to_string(),
        academic_year: "2024-2025".to_string(),
        category: category.to_string(),
    }
}

fn make_university(id: usize, male: i32, female: i32, categories: Vec<String>) -> University {
    University {
        id: id.to_string(),
        name: format!("University {}", id),
        address: String::new(),
        region: "Yangon".to_string(),
        ranking: "1".to_string(),
        min_mark_male: male,
        min_mark_female: female,
        category: String::new(),
        limit_count: 0,
        supported_categories: categories,
        website_url: None,
        image: None,
    }
}

fn category() -> impl Strategy<Value = String> {
    prop_oneof![Just("A"), Just("B"), Just("C"), Just("D"), Just("a")].prop_map(String::from)
}

fn gender() -> impl Strategy<Value = String> {
    prop_oneof![Just("Male"), Just("Female")].prop_map(String::from)
}

fn status() -> impl Strategy<Value = String> {
    prop_oneof![Just("Pass"), Just("Fail")].prop_map(String::from)
}

fn categories() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(category(), 0..4)
}

fn university() -> impl Strategy<Value = (i32, i32, Vec<String>)> {
    (-50i32..700, -50i32..700, categories())
}

proptest! {
    #[test]
    fn myanmar_digits_match_ascii(n in 0u32..1_000_000_000) {
        let ascii = n.to_string();
        let myanmar: String = ascii
            .chars()
            .map(|c| MYANMAR_DIGITS[c.to_digit(10).unwrap() as usize])
            .collect();

        prop_assert_eq!(normalize_roll_text(&myanmar), n as i64);
        prop_assert_eq!(normalize_roll_text(&ascii), n as i64);
    }

    #[test]
    fn normalizer_never_panics(text in "\\PC*") {
        let _ = normalize_roll_text(&text);
        let _ = parse_int_prefix(&text);
    }

    #[test]
    fn score_is_bounded(
        cat in category(),
        g in gender(),
        st in status(),
        marks in prop::array::uniform9(-10i32..110),
        total in -100i32..1000,
        (male, female, cats) in university(),
    ) {
        let student = make_student(&cat, &g, &st, marks, total);
        let uni = make_university(0, male, female, cats);

        let score = calculate_prediction_percentage(&student, &uni, &ScoringBands::default());
        prop_assert!((0.0..=95.0).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn unsupported_category_scores_zero(
        marks in prop::array::uniform9(0i32..100),
        total in 0i32..700,
        male in 1i32..700,
        female in 1i32..700,
    ) {
        let student = make_student("D", "Male", "Pass", marks, total);
        let uni = make_university(0, male, female, vec!["A".into(), "B".into(), "C".into()]);

        prop_assert_eq!(calculate_prediction_percentage(&student, &uni, &ScoringBands::default()), 0.0);
    }

    #[test]
    fn score_monotonic_in_total_within_band(
        cat in category(),
        g in gender(),
        marks in prop::array::uniform9(0i32..100),
        a in 0i32..700,
        b in 0i32..700,
        min_mark in 1i32..600,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let uni = make_university(0, min_mark, min_mark, vec![cat.clone()]);
        let bands = ScoringBands::default();

        let low_score = calculate_prediction_percentage(&make_student(&cat, &g, "Pass", marks, low), &uni, &bands);
        let high_score = calculate_prediction_percentage(&make_student(&cat, &g, "Pass", marks, high), &uni, &bands);

        let same_band = (low < min_mark) == (high < min_mark);
        if same_band {
            prop_assert!(low_score <= high_score, "{} -> {} but {} -> {}", low, low_score, high, high_score);
        }
    }

    #[test]
    fn failing_band_monotonic_across_threshold_and_ceiling(
        cat in category(),
        g in gender(),
        st in status(),
        mut marks in prop::array::uniform9(0i32..100),
        core_subject in 0usize..3,
        failed_mark in -10i32..40,
        a in 0i32..2500,
        b in 0i32..2500,
        min_mark in 1i32..600,
    ) {
        // Myanmar, English and Math are examined in every category
        marks[core_subject] = failed_mark;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let uni = make_university(0, min_mark, min_mark, vec![cat.clone()]);
        let bands = ScoringBands::default();

        let low_score = calculate_prediction_percentage(&make_student(&cat, &g, &st, marks, low), &uni, &bands);
        let high_score = calculate_prediction_percentage(&make_student(&cat, &g, &st, marks, high), &uni, &bands);

        prop_assert!(low_score <= high_score, "{} -> {} but {} -> {}", low, low_score, high, high_score);
        prop_assert!(high_score <= bands.ceiling);

        let expected = (high as f64 / min_mark as f64 * bands.failing_band).min(bands.ceiling);
        prop_assert!((high_score - expected).abs() < 1e-9, "{} != {}", high_score, expected);
    }

    #[test]
    fn fail_status_predicts_nothing(
        cat in category(),
        marks in prop::array::uniform9(0i32..100),
        total in 0i32..700,
        unis in prop::collection::vec(university(), 0..8),
    ) {
        let student = make_student(&cat, "Male", "Fail", marks, total);
        let catalog: Vec<_> = unis
            .into_iter()
            .enumerate()
            .map(|(i, (male, female, cats))| make_university(i, male, female, cats))
            .collect();

        prop_assert!(Predictor::default().predict(&student, &catalog).is_empty());
    }

    #[test]
    fn predictions_sorted_and_stable(
        cat in category(),
        g in gender(),
        marks in prop::array::uniform9(0i32..100),
        total in 0i32..700,
        unis in prop::collection::vec(university(), 0..12),
    ) {
        let student = make_student(&cat, &g, "Pass", marks, total);
        let catalog: Vec<_> = unis
            .into_iter()
            .enumerate()
            .map(|(i, (male, female, cats))| make_university(i, male, female, cats))
            .collect();

        let predictions = Predictor::default().predict(&student, &catalog);

        for pair in predictions.windows(2) {
            prop_assert!(pair[0].percentage >= pair[1].percentage);
            if pair[0].percentage == pair[1].percentage {
                let first: usize = pair[0].university.id.parse().unwrap();
                let second: usize = pair[1].university.id.parse().unwrap();
                prop_assert!(first < second, "tie broke catalog order");
            }
        }
        for p in &predictions {
            prop_assert!(p.percentage > 0.0 && p.percentage <= 95.0);
        }
    }
}
