use crate::models::{Student, University};

/// Examination subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Myanmar,
    English,
    Math,
    Physics,
    Chemistry,
    Biology,
    Economics,
    History,
    Geography,
}

impl Subject {
    pub fn mark(self, student: &Student) -> i32 {
        match self {
            Subject::Myanmar => student.myan,
            Subject::English => student.eng,
            Subject::Math => student.math,
            Subject::Physics => student.phy,
            Subject::Chemistry => student.chem,
            Subject::Biology => student.bio,
            Subject::Economics => student.eco,
            Subject::History => student.hist,
            Subject::Geography => student.geo,
        }
    }
}

const CATEGORY_A: [Subject; 6] = [
    Subject::Myanmar, Subject::English, Subject::Math,
    Subject::Physics, Subject::Chemistry, Subject::Biology,
];

const CATEGORY_B: [Subject; 6] = [
    Subject::Myanmar, Subject::English, Subject::Math,
    Subject::Physics, Subject::Chemistry, Subject::Economics,
];

const CATEGORY_C: [Subject; 6] = [
    Subject::Myanmar, Subject::English, Subject::Math,
    Subject::History, Subject::Geography, Subject::Economics,
];

const CORE_ONLY: [Subject; 3] = [Subject::Myanmar, Subject::English, Subject::Math];

/// Subjects whose marks are checked for a category
///
/// Every category is examined on Myanmar, English and Math; A, B and C
/// add their three track subjects. Unknown categories add nothing.
pub fn examined_subjects(category: &str) -> &'static [Subject] {
    match category {
        "A" => &CATEGORY_A,
        "B" => &CATEGORY_B,
        "C" => &CATEGORY_C,
        _ => &CORE_ONLY,
    }
}

/// Check if any examined subject is below the pass mark
#[inline]
pub fn has_failing_subject(student: &Student, pass_mark: i32) -> bool {
    examined_subjects(&student.category)
        .iter()
        .any(|subject| subject.mark(student) < pass_mark)
}

/// Check if the university admits the student's category (exact, case-sensitive)
#[inline]
pub fn supports_category(university: &University, student: &Student) -> bool {
    university
        .supported_categories
        .iter()
        .any(|category| *category == student.category)
}
