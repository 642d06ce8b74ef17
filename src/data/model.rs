use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::config::ColumnMapping;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Infer the type of a raw text cell. Empty text is `Null`.
    ///
    /// A typed value is only used when it prints back as the exact source
    /// text, so "007", "2023.10" or "Nan" stay text.
    pub fn infer(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        let typed = if let Ok(i) = s.parse::<i64>() {
            CellValue::Integer(i)
        } else if let Some(f) = s.parse::<f64>().ok().filter(|f| f.is_finite()) {
            CellValue::Float(f)
        } else if s == "true" || s == "false" {
            CellValue::Bool(s == "true")
        } else {
            return CellValue::Text(s.to_string());
        };
        if typed.to_string() == s {
            typed
        } else {
            CellValue::Text(s.to_string())
        }
    }

    /// Numeric view of the cell. Numeric text counts; `NaN` and infinities do not.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Label view of the cell; `None` for null or blank text.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – what every format loader produces
// ---------------------------------------------------------------------------

/// Header plus untyped-by-schema rows, before exam fields are extracted.
/// A row may be shorter or longer than the header; that is checked later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

// ---------------------------------------------------------------------------
// ExamRecord – one row of the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ExamRecord {
    pub student_name: String,
    pub subject: String,
    pub semester: String,
    pub score: f64,
    /// Every cell of the source row, in `Dataset::columns` order.
    pub cells: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table plus the subject catalog
// ---------------------------------------------------------------------------

/// The loaded exam table. Read-only once built; never empty.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<ExamRecord>,
    subjects: Vec<String>,
    students: Vec<String>,
    skipped_rows: usize,
}

/// Positions of the mapped columns inside the header.
struct FieldIndex {
    student: usize,
    subject: usize,
    semester: usize,
    score: usize,
}

impl FieldIndex {
    fn resolve(path: &Path, columns: &[String], mapping: &ColumnMapping) -> Result<Self> {
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DashboardError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                    found: columns.to_vec(),
                })
        };
        Ok(FieldIndex {
            student: find(&mapping.student)?,
            subject: find(&mapping.subject)?,
            semester: find(&mapping.semester)?,
            score: find(&mapping.score)?,
        })
    }

    /// Extract the exam fields from one row, or explain why it is unusable.
    fn record(
        &self,
        width: usize,
        cells: Vec<CellValue>,
    ) -> std::result::Result<ExamRecord, String> {
        if cells.len() != width {
            return Err(format!("expected {width} fields, found {}", cells.len()));
        }
        let label = |idx: usize, what: &str| {
            cells[idx]
                .as_label()
                .ok_or_else(|| format!("empty {what}"))
        };
        let student_name = label(self.student, "student name")?;
        let subject = label(self.subject, "subject")?;
        let semester = label(self.semester, "semester")?;
        let score = cells[self.score]
            .as_f64()
            .ok_or_else(|| format!("score '{}' is not a number", cells[self.score]))?;

        Ok(ExamRecord {
            student_name,
            subject,
            semester,
            score,
            cells,
        })
    }
}

impl Dataset {
    /// Validate a raw table and build the dataset and catalogs.
    ///
    /// Rows that cannot be turned into an [`ExamRecord`] are skipped with a
    /// warning. `path` is only used for error messages.
    pub fn from_table(path: &Path, table: RawTable, mapping: &ColumnMapping) -> Result<Self> {
        if table.columns.is_empty() {
            return Err(DashboardError::EmptyDataset {
                path: path.to_path_buf(),
            });
        }
        let index = FieldIndex::resolve(path, &table.columns, mapping)?;
        let width = table.columns.len();

        let mut records = Vec::with_capacity(table.rows.len());
        let mut skipped_rows = 0;
        for (i, cells) in table.rows.into_iter().enumerate() {
            match index.record(width, cells) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    let err = DashboardError::MalformedRow { row: i + 1, reason };
                    log::warn!("Skipping {}: {err}", path.display());
                    skipped_rows += 1;
                }
            }
        }

        if records.is_empty() {
            return Err(DashboardError::EmptyDataset {
                path: path.to_path_buf(),
            });
        }

        let subjects = distinct_in_order(records.iter().map(|r| r.subject.as_str()));
        let students = distinct_in_order(records.iter().map(|r| r.student_name.as_str()));

        Ok(Dataset {
            columns: table.columns,
            records,
            subjects,
            students,
            skipped_rows,
        })
    }

    /// Source column names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[ExamRecord] {
        &self.records
    }

    /// Distinct subjects in first-occurrence order. Never empty.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// The subject selected at startup: the first one seen.
    pub fn default_subject(&self) -> &str {
        &self.subjects[0]
    }

    /// Distinct student names in first-occurrence order over all subjects.
    pub fn students(&self) -> &[String] {
        &self.students
    }

    /// How many source rows were dropped as malformed.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
