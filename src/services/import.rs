use crate::core::numeral::{normalize_roll_text, parse_int_prefix};
use crate::models::Student;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during a CSV bulk import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV input has no header row")]
    MissingHeader,
}

/// Student field a CSV column can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    RegionalCode,
    RollNo,
    Myan,
    Eng,
    Math,
    Phy,
    Chem,
    Bio,
    Eco,
    Hist,
    Geo,
    TotalMark,
    Gender,
    Status,
    AcademicYear,
    Category,
}

/// Accepted header spellings, compared after trimming and lowercasing
const ALIASES: &[(Column, &[&str])] = &[
    (Column::Name, &["name", "student name", "student_name", "studentname"]),
    (Column::RegionalCode, &["regionalcode", "regional_code", "regional code", "region code"]),
    (Column::RollNo, &["rollno", "roll_no", "roll no", "roll number"]),
    (Column::Myan, &["myan", "myanmar"]),
    (Column::Eng, &["eng", "english"]),
    (Column::Math, &["math", "maths", "mathematics"]),
    (Column::Phy, &["phy", "physics"]),
    (Column::Chem, &["chem", "chemistry"]),
    (Column::Bio, &["bio", "biology"]),
    (Column::Eco, &["eco", "economics"]),
    (Column::Hist, &["hist", "history"]),
    (Column::Geo, &["geo", "geography"]),
    (Column::TotalMark, &["totalmark", "total_mark", "total mark", "total"]),
    (Column::Gender, &["gender", "sex"]),
    (Column::Status, &["status", "result"]),
    (Column::AcademicYear, &["academicyear", "academic_year", "academic year"]),
    (Column::Category, &["category", "track"]),
];

/// Resolved header positions for each known column
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<Column, usize>,
}

impl ColumnMap {
    /// Resolve header names to columns
    ///
    /// Exact aliases win. The name column falls back to the first header
    /// containing "name", then to the first column.
    pub fn resolve(headers: &StringRecord) -> Self {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let mut positions = HashMap::new();

        for (column, aliases) in ALIASES {
            if let Some(index) = normalized.iter().position(|h| aliases.contains(&h.as_str())) {
                positions.insert(*column, index);
            }
        }

        if !positions.contains_key(&Column::Name) && !normalized.is_empty() {
            let index = normalized
                .iter()
                .position(|h| h.contains("name"))
                .unwrap_or(0);
            positions.insert(Column::Name, index);
        }

        Self { positions }
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    fn text<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        self.position(column)
            .and_then(|index| record.get(index))
            .unwrap_or("")
    }

    fn mark(&self, record: &StringRecord, column: Column) -> i32 {
        i32::try_from(parse_int_prefix(self.text(record, column))).unwrap_or(0)
    }

    /// Build a student from one CSV record
    pub fn to_student(&self, record: &StringRecord) -> Student {
        let text = |column| self.text(record, column).trim().to_string();

        Student {
            name: text(Column::Name),
            regional_code: text(Column::RegionalCode),
            roll_no: normalize_roll_text(self.text(record, Column::RollNo)),
            myan: self.mark(record, Column::Myan),
            eng: self.mark(record, Column::Eng),
            math: self.mark(record, Column::Math),
            phy: self.mark(record, Column::Phy),
            chem: self.mark(record, Column::Chem),
            bio: self.mark(record, Column::Bio),
            eco: self.mark(record, Column::Eco),
            hist: self.mark(record, Column::Hist),
            geo: self.mark(record, Column::Geo),
            total_mark: self.mark(record, Column::TotalMark),
            gender: text(Column::Gender),
            status: text(Column::Status),
            academic_year: text(Column::AcademicYear),
            category: text(Column::Category),
        }
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Students parsed from a CSV upload
#[derive(Debug, Clone)]
pub struct ParsedImport {
    pub students: Vec<Student>,
    pub skipped: usize,
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Parse CSV text with a header row into students
///
/// Rows that cannot be tokenized are skipped and counted.
pub fn parse_students(input: &[u8]) -> Result<ParsedImport, ImportError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ImportError::MissingHeader);
    }

    let columns = ColumnMap::resolve(&headers);
    tracing::debug!("CSV headers detected: {:?}", headers);

    let mut students = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        match result {
            Ok(record) => students.push(columns.to_student(&record)),
            Err(e) => {
                tracing::warn!("Skipping unreadable CSV row: {}", e);
                skipped += 1;
            }
        }
    }

    Ok(ParsedImport { students, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
name,regionalCode,rollNo,myan,eng,math,phy,chem,bio,eco,hist,geo,totalMark,gender,status,academicYear,category
Aye Aye,YGN,၁၂၃,70,65,80,75,72,68,0,0,0,430,Female,Pass,2024-2025,A
Kyaw Kyaw, MDY ,456,55,60,45,0,0,0,50,62,58,330,Male,Pass,2024-2025,C
";

    #[test]
    fn test_parse_students() {
        let parsed = parse_students(CSV.as_bytes()).unwrap();

        assert_eq!(parsed.students.len(), 2);
        assert_eq!(parsed.skipped, 0);

        let first = &parsed.students[0];
        assert_eq!(first.name, "Aye Aye");
        assert_eq!(first.roll_no, 123);
        assert_eq!(first.total_mark, 430);
        assert_eq!(first.category, "A");

        let second = &parsed.students[1];
        assert_eq!(second.regional_code, "MDY");
        assert_eq!(second.hist, 62);
    }

    #[test]
    fn test_alias_headers() {
        let csv = "Student Name,Regional Code,Roll Number,English,Total,Sex,Result,Track\nMya,YGN,7,55,300,Female,Pass,B\n";
        let parsed = parse_students(csv.as_bytes()).unwrap();
        let student = &parsed.students[0];

        assert_eq!(student.name, "Mya");
        assert_eq!(student.regional_code, "YGN");
        assert_eq!(student.roll_no, 7);
        assert_eq!(student.eng, 55);
        assert_eq!(student.total_mark, 300);
        assert_eq!(student.gender, "Female");
        assert_eq!(student.category, "B");
    }

    #[test]
    fn test_name_column_fuzzy_fallback() {
        let headers = StringRecord::from(vec!["rollNo", "Full Name Of Student"]);
        assert_eq!(ColumnMap::resolve(&headers).position(Column::Name), Some(1));

        let headers = StringRecord::from(vec!["pupil", "rollNo"]);
        assert_eq!(ColumnMap::resolve(&headers).position(Column::Name), Some(0));
    }

    #[test]
    fn test_bad_numbers_default_to_zero() {
        let csv = "name,rollNo,math,totalMark\nA,abc,n/a,\n";
        let student = &parse_students(csv.as_bytes()).unwrap().students[0];

        assert_eq!(student.roll_no, 0);
        assert_eq!(student.math, 0);
        assert_eq!(student.total_mark, 0);
        assert_eq!(student.status, "");
    }

    #[test]
    fn test_short_rows_are_kept() {
        let csv = "name,regionalCode,rollNo,totalMark\nA,YGN\n";
        let parsed = parse_students(csv.as_bytes()).unwrap();

        assert_eq!(parsed.students.len(), 1);
        assert_eq!(parsed.students[0].roll_no, 0);
    }

    #[test]
    fn test_bom_header() {
        let csv = "\u{feff}name,rollNo\nA,12\n";
        let parsed = parse_students(csv.as_bytes()).unwrap();

        assert_eq!(parsed.students[0].name, "A");
        assert_eq!(parsed.students[0].roll_no, 12);
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(parse_students(b""), Err(ImportError::MissingHeader)));
    }
}
