use std::collections::HashMap;

use super::model::{CellValue, ExamRecord};

// ---------------------------------------------------------------------------
// Chart-ready shape: grouped bars
// ---------------------------------------------------------------------------

pub const X_AXIS_TITLE: &str = "Semester";
pub const Y_AXIS_TITLE: &str = "Score Achieved (%)";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub semester: String,
    pub score: f64,
}

/// One student's bars.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub student: String,
    pub points: Vec<ChartPoint>,
}

/// A grouped bar chart: one category per semester, one series per student.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    /// Semesters in first-occurrence order; bar groups are laid out in this order.
    pub categories: Vec<String>,
    /// Students in first-occurrence order.
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Position of a semester on the category axis.
    pub fn category_index(&self, semester: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == semester)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

pub fn chart_title(subject: &str) -> String {
    format!("Individual Student Scores in {subject} by Semester")
}

/// Group the filtered records by student.
///
/// Duplicate (student, semester) pairs are passed through as separate
/// points; nothing is aggregated.
pub fn to_chart_series(subject: &str, records: &[&ExamRecord]) -> ChartSpec {
    let mut categories: Vec<String> = Vec::new();
    let mut series: Vec<ChartSeries> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for rec in records {
        if !categories.contains(&rec.semester) {
            categories.push(rec.semester.clone());
        }
        let idx = *slot.entry(rec.student_name.as_str()).or_insert_with(|| {
            series.push(ChartSeries {
                student: rec.student_name.clone(),
                points: Vec::new(),
            });
            series.len() - 1
        });
        series[idx].points.push(ChartPoint {
            semester: rec.semester.clone(),
            score: rec.score,
        });
    }

    ChartSpec {
        title: chart_title(subject),
        categories,
        series,
    }
}

// ---------------------------------------------------------------------------
// Table-ready shape
// ---------------------------------------------------------------------------

/// One table row: every source cell, in source column order.
pub type Row = Vec<CellValue>;

/// Lossless projection of each record onto its source cells.
pub fn to_table_rows(records: &[&ExamRecord]) -> Vec<Row> {
    records.iter().map(|rec| rec.cells.clone()).collect()
}
