use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, RawTable};
use crate::config::ColumnMapping;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the exam dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row followed by one exam result per line
/// * `.json`         – `[{ "Student_Name": "A", "Subject": "Math", ... }, ...]`
/// * `.parquet`      – flat table with one column per field
pub fn load_file(path: &Path, mapping: &ColumnMapping) -> Result<Dataset> {
    let table = read_table(path)?;
    let dataset = Dataset::from_table(path, table, mapping)?;
    log::info!(
        "Loaded {} exam rows from {} with columns {:?} ({} skipped)",
        dataset.len(),
        path.display(),
        dataset.columns(),
        dataset.skipped_rows()
    );
    log::info!("Subjects: {:?}", dataset.subjects());
    Ok(dataset)
}

/// Read a file into a [`RawTable`] without interpreting any column.
pub fn read_table(path: &Path) -> Result<RawTable> {
    std::fs::metadata(path).map_err(|e| DashboardError::unavailable(path, e))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, b','),
        "tsv" => load_csv(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DashboardError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per exam result.
/// Rows with the wrong number of fields are kept here and rejected later,
/// so every malformed row goes through the same skip path.
fn load_csv(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(record.iter().map(CellValue::infer).collect()),
            Err(e) if e.is_io_error() => return Err(csv_error(path, e)),
            Err(e) => {
                log::warn!("CSV row {}: {e}", row_no + 1);
                rows.push(Vec::new());
            }
        }
    }

    Ok(RawTable { columns, rows })
}

fn csv_error(path: &Path, err: csv::Error) -> DashboardError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => DashboardError::unavailable(path, io),
        _ => DashboardError::parse(path, message),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Student_Name": "A", "Subject": "Math", "Semester": "S1", "Score": 80 },
///   ...
/// ]
/// ```
///
/// Columns are the union of all keys in first-seen order; a key missing
/// from a record reads as null.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).map_err(|e| DashboardError::unavailable(path, e))?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| DashboardError::parse(path, e))?;

    let records = root
        .as_array()
        .ok_or_else(|| DashboardError::parse(path, "expected top-level JSON array"))?;

    let mut columns: Vec<String> = Vec::new();
    for obj in records.iter().filter_map(JsonValue::as_object) {
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<CellValue>> = records
        .iter()
        .enumerate()
        .map(|(i, rec)| match rec.as_object() {
            Some(obj) => columns
                .iter()
                .map(|c| obj.get(c).map_or(CellValue::Null, json_to_cell))
                .collect(),
            None => {
                log::warn!("JSON record {} is not an object", i + 1);
                Vec::new()
            }
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|e| DashboardError::unavailable(path, e))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| DashboardError::parse(path, e))?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let reader = builder.build().map_err(|e| DashboardError::parse(path, e))?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|e| DashboardError::parse(path, e))?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawTable { columns, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => float_cell(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => float_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => array_value_to_string(col.as_ref(), row).map_or(CellValue::Null, CellValue::Text),
    }
}

/// Pandas writes missing floats as NaN; treat them as null like a blank CSV cell.
fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;
    use crate::data::model::ExamRecord;
    use crate::data::view::{to_chart_series, to_table_rows};

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_in_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "exam_data.csv",
            "Student_Name,Subject,Semester,Score\nA,Math,S1,80\nB,Math,S1,90\nA,Science,S1,70\n",
        );
        let ds = load_file(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.subjects(), ["Math", "Science"]);
        assert_eq!(ds.records()[2].student_name, "A");
        assert_eq!(ds.records()[2].score, 70.0);
    }

    #[test]
    fn csv_labels_and_cells_keep_source_text() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "exam_data.csv",
            "Student_Name,Subject,Semester,Score\n\
             Nan,Math,2023.10,80\n\
             Infinity,Math,2023.1,90\n\
             007,Math,Fall,70\n",
        );
        let ds = load_file(&path, &ColumnMapping::default()).unwrap();

        let labels: Vec<(&str, &str)> = ds
            .records()
            .iter()
            .map(|r| (r.student_name.as_str(), r.semester.as_str()))
            .collect();
        assert_eq!(
            labels,
            [("Nan", "2023.10"), ("Infinity", "2023.1"), ("007", "Fall")]
        );

        let source = [
            ["Nan", "Math", "2023.10", "80"],
            ["Infinity", "Math", "2023.1", "90"],
            ["007", "Math", "Fall", "70"],
        ];
        for (rec, expected) in ds.records().iter().zip(source) {
            let shown: Vec<String> = rec.cells.iter().map(|c| c.to_string()).collect();
            assert_eq!(shown, expected);
        }

        let math: Vec<&ExamRecord> = ds.records().iter().collect();
        let chart = to_chart_series("Math", &math);
        assert_eq!(chart.categories, ["2023.10", "2023.1", "Fall"]);
        assert_eq!(to_table_rows(&math), to_table_rows(&math));
    }

    #[test]
    fn csv_rows_with_wrong_width_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "exam_data.csv",
            "Student_Name,Subject,Semester,Score\nA,Math,S1,80\nB,Math\nC,Math,S2,75,extra\n",
        );
        let ds = load_file(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.skipped_rows(), 2);
    }

    #[test]
    fn reads_tab_separated_files() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "scores.tsv",
            "Student_Name\tSubject\tSemester\tScore\nA\tArt\t2\t66.5\n",
        );
        let ds = load_file(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(ds.records()[0].semester, "2");
        assert_eq!(ds.records()[0].score, 66.5);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("exam_data.csv"), &ColumnMapping::default())
            .unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable { .. }));
    }

    #[test]
    fn empty_csv_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "exam_data.csv", "");
        let err = load_file(&path, &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset { .. }));

        let path = write(&dir, "header_only.csv", "Student_Name,Subject,Semester,Score\n");
        let err = load_file(&path, &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "exam_data.xlsx", "whatever");
        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn loads_json_records_with_key_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "exam_data.json",
            r#"[
                {"Student_Name": "A", "Subject": "Math", "Semester": "S1", "Score": 80},
                {"Student_Name": "B", "Subject": "Math", "Semester": "S1",
                 "Score": 90.5, "Room": 12},
                "not a record"
            ]"#,
        );
        let ds = load_file(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(ds.columns(), ["Student_Name", "Subject", "Semester", "Score", "Room"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.skipped_rows(), 1);
        assert_eq!(ds.records()[0].cells[4], CellValue::Null);
        assert_eq!(ds.records()[1].cells[4], CellValue::Integer(12));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "exam_data.json", "{\"Subject\": ");
        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[test]
    fn loads_parquet_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exam_data.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Student_Name", DataType::Utf8, false),
            Field::new("Subject", DataType::Utf8, false),
            Field::new("Semester", DataType::Int64, false),
            Field::new("Score", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(StringArray::from(vec!["Math", "Math"])),
                Arc::new(Int64Array::from(vec![1, 1])),
                Arc::new(Float64Array::from(vec![Some(80.0), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.skipped_rows(), 1);
        assert_eq!(ds.records()[0].semester, "1");
        assert_eq!(ds.records()[0].cells[3], CellValue::Float(80.0));
    }
}
