use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Dataset, LaunchRecord, Outcome};

/// Required column names, exactly as they appear in the source table.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the usual export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field
///
/// Columns other than the four required ones are ignored.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    Dataset::from_records(records)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(row: usize, column: &'static str, value: impl ToString) -> LoadError {
    LoadError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

/// Accepts `0`/`1` written as integers or as floats (`1.0`).
fn parse_class(s: &str, row: usize) -> Result<Outcome, LoadError> {
    let s = s.trim();
    let class = match s.parse::<i64>() {
        Ok(i) => Some(i),
        Err(_) => s
            .parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64),
    };
    class
        .and_then(Outcome::from_class)
        .ok_or_else(|| invalid(row, CLASS_COLUMN, s))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let payload_text = cell(payload_idx).trim();
        let payload_mass_kg = payload_text
            .parse::<f64>()
            .map_err(|_| invalid(row, PAYLOAD_COLUMN, payload_text))?;

        // An empty field is how CSV spells a null cell.
        let text = |idx: usize, column: &'static str| match cell(idx) {
            s if s.trim().is_empty() => Err(invalid(row, column, s)),
            s => Ok(s.to_string()),
        };

        records.push(LaunchRecord {
            site: text(site_idx, SITE_COLUMN)?,
            payload_mass_kg,
            outcome: parse_class(cell(class_idx), row)?,
            booster_version: text(booster_idx, BOOSTER_COLUMN)?,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version": "F9 v1.0  B0003"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let rows = root
        .as_array()
        .ok_or_else(|| invalid(0, SITE_COLUMN, "expected a top-level JSON array"))?;

    rows.iter()
        .enumerate()
        .map(|(row, rec)| -> Result<LaunchRecord, LoadError> {
            let obj = rec
                .as_object()
                .ok_or_else(|| invalid(row, SITE_COLUMN, rec))?;
            let field = |name: &'static str| obj.get(name).ok_or(LoadError::MissingColumn(name));

            let payload = field(PAYLOAD_COLUMN)?;
            let class = field(CLASS_COLUMN)?;

            Ok(LaunchRecord {
                site: json_string(field(SITE_COLUMN)?, row, SITE_COLUMN)?,
                payload_mass_kg: payload
                    .as_f64()
                    .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, payload))?,
                outcome: match class {
                    JsonValue::Bool(b) => Outcome::from_class(i64::from(*b)),
                    JsonValue::Number(n) => n
                        .as_i64()
                        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                        .and_then(Outcome::from_class),
                    _ => None,
                }
                .ok_or_else(|| invalid(row, CLASS_COLUMN, class))?,
                booster_version: json_string(field(BOOSTER_COLUMN)?, row, BOOSTER_COLUMN)?,
            })
        })
        .collect()
}

fn json_string(val: &JsonValue, row: usize, column: &'static str) -> Result<String, LoadError> {
    match val {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Null => Err(invalid(row, column, "null")),
        other => Ok(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    let schema = builder.schema().clone();
    let column = |name: &'static str| {
        schema
            .index_of(name)
            .map_err(|_| LoadError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();

        for i in 0..batch.num_rows() {
            let row = offset + i;
            let payload = extract_f64(batch.column(payload_idx), i)
                .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, cell_debug(batch.column(payload_idx), i)))?;
            let outcome = extract_class(batch.column(class_idx), i)
                .and_then(Outcome::from_class)
                .ok_or_else(|| invalid(row, CLASS_COLUMN, cell_debug(batch.column(class_idx), i)))?;

            records.push(LaunchRecord {
                site: extract_string(batch.column(site_idx), i)
                    .ok_or_else(|| invalid(row, SITE_COLUMN, cell_debug(batch.column(site_idx), i)))?,
                payload_mass_kg: payload,
                outcome,
                booster_version: extract_string(batch.column(booster_idx), i).ok_or_else(|| {
                    invalid(row, BOOSTER_COLUMN, cell_debug(batch.column(booster_idx), i))
                })?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn cell_debug(col: &ArrayRef, row: usize) -> String {
    if col.is_null(row) {
        "null".to_string()
    } else {
        format!("<{:?}>", col.data_type())
    }
}

fn extract_string(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}

fn extract_f64(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        _ => None,
    }
}

fn extract_class(col: &ArrayRef, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as i64),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| i64::from(a.value(row))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row))
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64),
        _ => None,
    }
}
