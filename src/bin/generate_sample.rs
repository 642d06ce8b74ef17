//! Writes a deterministic sample dataset as `exam_data.csv`,
//! `exam_data.json` and `exam_data.parquet` in the current directory.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SampleRow {
    #[serde(rename = "Student_Name")]
    student_name: String,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "Semester")]
    semester: String,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Exam_ID")]
    exam_id: i64,
}

/// SplitMix64: reproducible noise for the sample scores.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [-1, 1).
    fn jitter(&mut self) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        unit * 2.0 - 1.0
    }
}

fn generate_rows(rng: &mut SplitMix64) -> Vec<SampleRow> {
    let students = [("Alice", 82.0), ("Bob", 68.0), ("Chen", 90.0), ("Dana", 74.0)];
    let subjects = [("Math", -3.0), ("Science", 2.0), ("History", 0.0)];
    let semesters = ["Sem 1", "Sem 2", "Sem 3"];

    let mut rows = Vec::new();
    let mut exam_id = 1000;
    for &(subject, difficulty) in &subjects {
        for (term, semester) in semesters.iter().enumerate() {
            for &(student, ability) in &students {
                // Mild upward trend per semester plus noise, clamped to 0..=100.
                let noise = rng.jitter() * 8.0;
                let score = (ability + difficulty + term as f64 * 2.5 + noise).clamp(0.0, 100.0);
                rows.push(SampleRow {
                    student_name: student.to_string(),
                    subject: subject.to_string(),
                    semester: semester.to_string(),
                    score: score.round(),
                    exam_id,
                });
                exam_id += 1;
            }
        }
    }
    rows
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_json(rows: &[SampleRow], path: &str) -> Result<()> {
    let file = File::create(path).context("creating JSON")?;
    serde_json::to_writer_pretty(file, rows).context("writing JSON")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Student_Name", DataType::Utf8, false),
        Field::new("Subject", DataType::Utf8, false),
        Field::new("Semester", DataType::Utf8, false),
        Field::new("Score", DataType::Float64, false),
        Field::new("Exam_ID", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.student_name.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.subject.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.semester.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.score))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.exam_id))),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix64(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "exam_data.csv")?;
    write_json(&rows, "exam_data.json")?;
    write_parquet(&rows, "exam_data.parquet")?;

    println!("Wrote {} exam results to exam_data.{{csv,json,parquet}}", rows.len());
    Ok(())
}
