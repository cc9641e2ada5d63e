use serde::{Deserialize, Serialize};

/// Status value marking a student who failed the examination overall
pub const FAIL_STATUS: &str = "Fail";

/// Gender value that selects the male admission threshold
pub const MALE: &str = "Male";

/// Matriculation exam record for a single student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "regionalCode")]
    pub regional_code: String,
    #[serde(rename = "rollNo")]
    pub roll_no: i64,
    #[serde(default)]
    pub myan: i32,
    #[serde(default)]
    pub eng: i32,
    #[serde(default)]
    pub math: i32,
    #[serde(default)]
    pub phy: i32,
    #[serde(default)]
    pub chem: i32,
    #[serde(default)]
    pub bio: i32,
    #[serde(default)]
    pub eco: i32,
    #[serde(default)]
    pub hist: i32,
    #[serde(default)]
    pub geo: i32,
    #[serde(rename = "totalMark", default)]
    pub total_mark: i32,
    pub gender: String,
    pub status: String,
    #[serde(rename = "academicYear", default)]
    pub academic_year: String,
    pub category: String,
}

impl Student {
    pub fn is_male(&self) -> bool {
        self.gender == MALE
    }

    /// True when the overall status is the "Fail" sentinel
    pub fn has_failed(&self) -> bool {
        self.status == FAIL_STATUS
    }
}

/// University admission record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    #[serde(default = "generate_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub ranking: String,
    #[serde(rename = "minMarkMale")]
    pub min_mark_male: i32,
    #[serde(rename = "minMarkFemale")]
    pub min_mark_female: i32,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "limitCount", default)]
    pub limit_count: i32,
    #[serde(rename = "supportedCategories", default)]
    pub supported_categories: Vec<String>,
    #[serde(rename = "websiteUrl", default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl University {
    /// Threshold that applies to the given student's gender
    pub fn min_mark_for(&self, student: &Student) -> i32 {
        if student.is_male() {
            self.min_mark_male
        } else {
            self.min_mark_female
        }
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Admission likelihood for one university
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction<'a> {
    pub university: &'a University,
    pub percentage: f64,
}

/// Score bands used by the prediction formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringBands {
    /// Any examined subject below this mark counts as a failed subject
    pub pass_mark: i32,
    pub failing_band: f64,
    pub below_threshold_band: f64,
    pub base: f64,
    pub max_bonus: f64,
    /// Excess marks at which the bonus reaches `max_bonus`
    pub bonus_span: f64,
    pub ceiling: f64,
}

impl Default for ScoringBands {
    fn default() -> Self {
        Self {
            pass_mark: 40,
            failing_band: 30.0,
            below_threshold_band: 60.0,
            base: 75.0,
            max_bonus: 25.0,
            bonus_span: 100.0,
            ceiling: 95.0,
        }
    }
}
