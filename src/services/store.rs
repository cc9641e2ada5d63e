use crate::core::numeral::parse_int_prefix;
use crate::models::{Student, University, StudentSearchParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

const DEFAULT_PAGE_LIMIT: usize = 10;
const MAX_PAGE_LIMIT: usize = 100;

/// Errors that can occur when reading or writing records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("University {id} rejected: {reason}")]
    InvalidUniversity { id: String, reason: String },

    #[error("University {0} already exists")]
    DuplicateUniversity(String),

    #[error("Record store lock poisoned")]
    Poisoned,
}

/// Source of student and university records
pub trait RecordStore: Send + Sync {
    /// Find a student by regional code and normalized roll number
    fn find_student(&self, regional_code: &str, roll_no: i64) -> Result<Option<Student>, StoreError>;

    /// List universities in catalog order, optionally filtered by exact region
    fn list_universities(&self, region: Option<&str>) -> Result<Vec<University>, StoreError>;

    fn find_university(&self, id: &str) -> Result<Option<University>, StoreError>;

    /// Add a university to the end of the catalog, assigning an id when it has none
    fn insert_university(&self, university: University) -> Result<University, StoreError>;

    /// Replace the university stored under `id`; `None` when no such university exists
    fn update_university(&self, id: &str, university: University) -> Result<Option<University>, StoreError>;

    /// Append students, returning how many were added
    fn insert_students(&self, students: Vec<Student>) -> Result<usize, StoreError>;

    fn search_students(&self, query: &StudentQuery) -> Result<StudentPage, StoreError>;

    fn counts(&self) -> Result<StoreCounts, StoreError>;
}

/// Filters for the admin student listing
#[derive(Debug, Clone, PartialEq)]
pub struct StudentQuery {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
}

impl Default for StudentQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            search: None,
            category: None,
            status: None,
            gender: None,
        }
    }
}

impl From<StudentSearchParams> for StudentQuery {
    fn from(params: StudentSearchParams) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        Self {
            page: params.page.filter(|&p| p > 0).unwrap_or(1),
            limit: params
                .limit
                .filter(|&l| l > 0)
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .min(MAX_PAGE_LIMIT),
            search: non_empty(params.search),
            category: non_empty(params.category),
            status: non_empty(params.status),
            gender: non_empty(params.gender),
        }
    }
}

impl StudentQuery {
    fn matches(&self, student: &Student) -> bool {
        if student.total_mark <= 0 {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let roll_no = parse_int_prefix(search);
            let found = student.name.to_lowercase().contains(&needle)
                || student.regional_code.to_lowercase().contains(&needle)
                || student.roll_no == roll_no;
            if !found {
                return false;
            }
        }

        let exact = |filter: &Option<String>, value: &str| {
            filter.as_deref().map_or(true, |f| f == value)
        };

        exact(&self.category, student.category.as_str())
            && exact(&self.status, student.status.as_str())
            && exact(&self.gender, student.gender.as_str())
    }
}

/// One page of the student listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentPage {
    pub students: Vec<Student>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: usize,
    pub total: usize,
    pub limit: usize,
    #[serde(rename = "totalStudents")]
    pub total_students: usize,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    #[serde(rename = "hasPrev")]
    pub has_prev: bool,
}

impl Pagination {
    fn new(page: usize, limit: usize, total_students: usize) -> Self {
        let total = total_students.div_ceil(limit.max(1));
        Self {
            current: page,
            total,
            limit,
            total_students,
            has_next: page < total,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub students: usize,
    pub universities: usize,
}

/// In-memory record store
///
/// Seeded from JSON files at startup. Imports live only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    students: RwLock<Vec<Student>>,
    universities: RwLock<Vec<University>>,
}

impl InMemoryStore {
    /// Create a store from records already in memory
    ///
    /// Universities with a non-positive threshold are rejected.
    pub fn new(students: Vec<Student>, universities: Vec<University>) -> Self {
        let universities = universities
            .into_iter()
            .filter(|university| match check_thresholds(university) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Skipping seed record for {}: {}", university.name, e);
                    false
                }
            })
            .collect();

        Self {
            students: RwLock::new(students),
            universities: RwLock::new(universities),
        }
    }

    /// Load records from JSON array files; a missing path yields no records
    pub fn from_files(
        students_path: Option<&Path>,
        universities_path: Option<&Path>,
    ) -> Result<Self, StoreError> {
        let students: Vec<Student> = match students_path {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        let universities: Vec<University> = match universities_path {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };

        tracing::info!(
            "Loaded {} students and {} universities",
            students.len(),
            universities.len()
        );

        Ok(Self::new(students, universities))
    }
}

fn read_json<T>(path: &Path) -> Result<Vec<T>, StoreError>
where
    T: for<'de> Deserialize<'de>,
{
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| StoreError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
        path: display,
        source,
    })
}

/// A university whose threshold is zero or negative could never be scored
fn check_thresholds(university: &University) -> Result<(), StoreError> {
    if university.min_mark_male > 0 && university.min_mark_female > 0 {
        return Ok(());
    }
    Err(StoreError::InvalidUniversity {
        id: university.id.clone(),
        reason: format!(
            "thresholds must be positive (male: {}, female: {})",
            university.min_mark_male, university.min_mark_female
        ),
    })
}

impl RecordStore for InMemoryStore {
    fn find_student(&self, regional_code: &str, roll_no: i64) -> Result<Option<Student>, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::Poisoned)?;
        Ok(students
            .iter()
            .find(|s| s.regional_code == regional_code && s.roll_no == roll_no)
            .cloned())
    }

    fn list_universities(&self, region: Option<&str>) -> Result<Vec<University>, StoreError> {
        let universities = self.universities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(universities
            .iter()
            .filter(|u| region.map_or(true, |r| u.region == r))
            .cloned()
            .collect())
    }

    fn find_university(&self, id: &str) -> Result<Option<University>, StoreError> {
        let universities = self.universities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(universities.iter().find(|u| u.id == id).cloned())
    }

    fn insert_university(&self, mut university: University) -> Result<University, StoreError> {
        university.id = university.id.trim().to_string();
        if university.id.is_empty() {
            university.id = uuid::Uuid::new_v4().to_string();
        }
        check_thresholds(&university)?;

        let mut stored = self.universities.write().map_err(|_| StoreError::Poisoned)?;
        if stored.iter().any(|u| u.id == university.id) {
            return Err(StoreError::DuplicateUniversity(university.id));
        }
        stored.push(university.clone());
        tracing::debug!("Inserted university {} ({} total)", university.id, stored.len());
        Ok(university)
    }

    fn update_university(&self, id: &str, mut university: University) -> Result<Option<University>, StoreError> {
        university.id = id.to_string();
        check_thresholds(&university)?;

        let mut stored = self.universities.write().map_err(|_| StoreError::Poisoned)?;
        let Some(existing) = stored.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        // An update without an image keeps the current one
        if university.image.is_none() {
            university.image = existing.image.take();
        }
        *existing = university.clone();
        tracing::debug!("Updated university {}", id);
        Ok(Some(university))
    }

    fn insert_students(&self, students: Vec<Student>) -> Result<usize, StoreError> {
        let count = students.len();
        let mut stored = self.students.write().map_err(|_| StoreError::Poisoned)?;
        stored.extend(students);
        tracing::debug!("Inserted {} students ({} total)", count, stored.len());
        Ok(count)
    }

    fn search_students(&self, query: &StudentQuery) -> Result<StudentPage, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::Poisoned)?;

        let mut matching: Vec<&Student> = students.iter().filter(|s| query.matches(s)).collect();
        matching.sort_by_key(|s| s.roll_no);

        let total_students = matching.len();
        let skip = query.page.saturating_sub(1).saturating_mul(query.limit);
        let page = matching
            .into_iter()
            .skip(skip)
            .take(query.limit)
            .cloned()
            .collect();

        Ok(StudentPage {
            students: page,
            pagination: Pagination::new(query.page, query.limit, total_students),
        })
    }

    fn counts(&self) -> Result<StoreCounts, StoreError> {
        let students = self.students.read().map_err(|_| StoreError::Poisoned)?;
        let universities = self.universities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(StoreCounts {
            students: students.len(),
            universities: universities.len(),
        })
    }
}
