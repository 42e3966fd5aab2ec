use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{LaunchRecord, LaunchTable, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const FLIGHT_COLUMN: &str = "Flight Number";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least `Launch Site`, `Payload Mass (kg)`, `class`
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, "class": 1 }, ...]`
/// * `.parquet` – same columns as the CSV layout
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Row decoding shared by CSV and JSON
// ---------------------------------------------------------------------------

/// Raw row as it appears in the source file. Unknown columns are ignored.
///
/// Row numbers passed around the loader are 1-based data rows (the header
/// line is not counted).
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)", default, deserialize_with = "csv::invalid_option")]
    payload_mass_kg: Option<f64>,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Flight Number", default, deserialize_with = "csv::invalid_option")]
    flight_number: Option<u32>,
    #[serde(rename = "Booster Version Category", default)]
    booster_version_category: Option<String>,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        let outcome = Outcome::try_from(self.class).with_context(|| format!("Row {row}"))?;
        let mut record =
            LaunchRecord::new(self.site, sanitize_payload(self.payload_mass_kg, row), outcome);
        record.flight_number = self.flight_number;
        record.booster_version_category = self.booster_version_category.filter(|s| !s.is_empty());
        Ok(record)
    }
}

/// JSON cells can hold any value, so numeric columns are decoded as
/// [`serde_json::Value`] and anything that is not a number becomes `None`.
#[derive(Debug, Deserialize)]
struct JsonLaunchRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)", default)]
    payload_mass_kg: Option<JsonValue>,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<JsonValue>,
    #[serde(rename = "Booster Version Category", default)]
    booster_version_category: Option<JsonValue>,
}

impl From<JsonLaunchRow> for RawLaunchRow {
    fn from(row: JsonLaunchRow) -> Self {
        RawLaunchRow {
            site: row.site,
            payload_mass_kg: row.payload_mass_kg.as_ref().and_then(JsonValue::as_f64),
            class: row.class,
            flight_number: row
                .flight_number
                .as_ref()
                .and_then(JsonValue::as_u64)
                .and_then(|n| u32::try_from(n).ok()),
            booster_version_category: row
                .booster_version_category
                .as_ref()
                .and_then(JsonValue::as_str)
                .map(str::to_string),
        }
    }
}

/// Negative or non-finite masses are treated as missing.
fn sanitize_payload(value: Option<f64>, row: usize) -> Option<f64> {
    match value {
        Some(kg) if kg.is_finite() && kg >= 0.0 => Some(kg),
        Some(kg) => {
            log::warn!("Row {row}: ignoring unusable payload mass {kg}");
            None
        }
        None => None,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchTable> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<LaunchTable> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let row_no = row_no + 1;
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Flight Number": 1, "Launch Site": "CCAFS LC-40", "class": 0, "Payload Mass (kg)": 0.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<LaunchTable> {
    let rows: Vec<JsonLaunchRow> = serde_json::from_str(text).context("parsing JSON")?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| RawLaunchRow::from(row).into_record(i + 1))
        .collect::<Result<Vec<_>>>()?;
    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// `Launch Site` must be a string column, `class` an integer (or float 0/1)
/// column, `Payload Mass (kg)` any numeric column with nulls allowed.
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records: Vec<LaunchRecord> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();

        let site_col = required_column(&batch, SITE_COLUMN)?;
        let payload_col = required_column(&batch, PAYLOAD_COLUMN)?;
        let class_col = required_column(&batch, CLASS_COLUMN)?;
        let flight_col = batch.column_by_name(FLIGHT_COLUMN);
        let booster_col = batch.column_by_name(BOOSTER_COLUMN);

        for row in 0..batch.num_rows() {
            let row_no = offset + row + 1;
            let site = string_at(site_col, row)?
                .with_context(|| format!("Row {row_no}: null '{SITE_COLUMN}'"))?;
            let class = numeric_at(class_col, row)?
                .with_context(|| format!("Row {row_no}: null '{CLASS_COLUMN}'"))?;
            if class.fract() != 0.0 {
                bail!("Row {row_no}: '{CLASS_COLUMN}' value {class} is not an integer");
            }
            let outcome =
                Outcome::try_from(class as i64).with_context(|| format!("Row {row_no}"))?;
            let payload_mass_kg = sanitize_payload(numeric_at(payload_col, row)?, row_no);
            let flight_number = match flight_col {
                Some(col) => numeric_at(col, row)?
                    .filter(|n| *n >= 0.0 && n.fract() == 0.0)
                    .map(|n| n as u32),
                None => None,
            };
            let booster_version_category = match booster_col {
                Some(col) => string_at(col, row)?.filter(|s| !s.is_empty()),
                None => None,
            };

            let mut record = LaunchRecord::new(site, payload_mass_kg, outcome);
            record.flight_number = flight_number;
            record.booster_version_category = booster_version_category;
            records.push(record);
        }
    }

    Ok(LaunchTable::from_records(records))
}

// -- Parquet / Arrow helpers --

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

/// Read a string cell, `None` for null.
fn string_at(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        other => bail!("Expected string column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Read a numeric cell as `f64`, `None` for null.
fn numeric_at(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        other => bail!("Expected numeric column, got {other:?}"),
    };
    Ok(Some(value))
}
