use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{
    Dataset, DatasetKind, Record, COL_AREA, COL_DOMAIN, COL_ELEMENT, COL_VALUE, COL_YEAR,
    REQUIRED_COLUMNS,
};
use crate::error::DataLoadError;

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a trade table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least `Year, Domain, Area, Element, Value`
/// * `.json`    – `[{ "Year": 2020, "Domain": "...", ... }, ...]`
/// * `.parquet` – columns with the same names (Year integer, Value numeric)
pub fn load_file(path: &Path, kind: DatasetKind) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(DataLoadError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    let dataset = Dataset::from_records(kind, path.to_path_buf(), records);
    log::info!(
        "Loaded {kind} dataset from {}: {} rows, {} years, {} domains, {} areas",
        path.display(),
        dataset.len(),
        dataset.years.len(),
        dataset.domains.len(),
        dataset.areas.len()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    read_csv(open(path)?, path)
}

/// Parse CSV text. Extra columns are ignored; the five required ones must be
/// present with exact spelling.
pub fn read_csv<R: Read>(source: R, path: &Path) -> Result<Vec<Record>> {
    let csv_err = |source: csv::Error| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column_index = |column: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
    };
    let [year_idx, domain_idx, area_idx, element_idx, value_idx] = [
        column_index(COL_YEAR)?,
        column_index(COL_DOMAIN)?,
        column_index(COL_AREA)?,
        column_index(COL_ELEMENT)?,
        column_index(COL_VALUE)?,
    ];

    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row = result.map_err(csv_err)?;
        let row_no = idx + 1;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        records.push(Record::new(
            parse_year(cell(year_idx), row_no, path)?,
            cell(domain_idx),
            cell(area_idx),
            cell(element_idx),
            parse_value(cell(value_idx), row_no, path)?,
        ));
    }

    Ok(records)
}

fn parse_year(raw: &str, row: usize, path: &Path) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| DataLoadError::InvalidCell {
        path: path.to_path_buf(),
        row,
        column: COL_YEAR,
        raw: raw.to_string(),
    })
}

/// Empty cells are missing values (`NaN`), everything else must be numeric.
fn parse_value(raw: &str, row: usize, path: &Path) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| DataLoadError::InvalidCell {
        path: path.to_path_buf(),
        row,
        column: COL_VALUE,
        raw: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One element of the records-oriented JSON array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonRecord {
    year: i64,
    domain: String,
    area: String,
    element: String,
    value: Option<f64>,
}

fn load_json(path: &Path) -> Result<Vec<Record>> {
    let mut text = String::new();
    open(path)?
        .read_to_string(&mut text)
        .map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    read_json(&text, path)
}

/// Expected JSON schema (the default `orient='records'` export):
///
/// ```json
/// [
///   { "Year": 2020, "Domain": "Trade", "Area": "EU", "Element": "Import Value", "Value": 10.5 },
///   ...
/// ]
/// ```
pub fn read_json(text: &str, path: &Path) -> Result<Vec<Record>> {
    let rows: Vec<JsonRecord> =
        serde_json::from_str(text).map_err(|source| DataLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(rows
        .into_iter()
        .map(|r| Record {
            year: r.year,
            domain: r.domain,
            area: r.area,
            element: r.element,
            value: r.value.unwrap_or(f64::NAN),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the trade table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let parquet_err = |source: parquet::errors::ParquetError| DataLoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?).map_err(parquet_err)?;
    let reader = builder.build().map_err(parquet_err)?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|source| DataLoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;
        append_batch(&batch, path, records.len(), &mut records)?;
    }

    Ok(records)
}

fn append_batch(
    batch: &RecordBatch,
    path: &Path,
    first_row: usize,
    out: &mut Vec<Record>,
) -> Result<()> {
    let schema = batch.schema();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for column in REQUIRED_COLUMNS {
        let idx = schema
            .index_of(column)
            .map_err(|_| DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })?;
        columns.push(batch.column(idx).clone());
    }
    let arrow_err = |source: ArrowError| DataLoadError::Arrow {
        path: path.to_path_buf(),
        source,
    };
    let year_col = &columns[0];
    let domain_col = decode_dictionary(&columns[1]).map_err(arrow_err)?;
    let area_col = decode_dictionary(&columns[2]).map_err(arrow_err)?;
    let element_col = decode_dictionary(&columns[3]).map_err(arrow_err)?;
    let value_col = &columns[4];

    let invalid = |row: usize, column: &'static str, col: &ArrayRef| DataLoadError::InvalidCell {
        path: path.to_path_buf(),
        row,
        column,
        raw: format!("{:?}", col.data_type()),
    };

    for row in 0..batch.num_rows() {
        let row_no = first_row + row + 1;
        let year = extract_i64(year_col, row).ok_or_else(|| invalid(row_no, COL_YEAR, year_col))?;
        let domain = extract_string(&domain_col, row)
            .ok_or_else(|| invalid(row_no, COL_DOMAIN, &domain_col))?;
        let area =
            extract_string(&area_col, row).ok_or_else(|| invalid(row_no, COL_AREA, &area_col))?;
        let element = extract_string(&element_col, row)
            .ok_or_else(|| invalid(row_no, COL_ELEMENT, &element_col))?;
        let value =
            extract_f64(value_col, row).ok_or_else(|| invalid(row_no, COL_VALUE, value_col))?;

        out.push(Record {
            year,
            domain,
            area,
            element,
            value,
        });
    }
    Ok(())
}

// -- Arrow helpers --

/// Categorical text columns (pandas `category`) arrive dictionary-encoded;
/// decode them to plain UTF-8 once per batch.
fn decode_dictionary(col: &ArrayRef) -> std::result::Result<ArrayRef, ArrowError> {
    match col.data_type() {
        DataType::Dictionary(_, values)
            if matches!(values.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            cast(col, &DataType::Utf8)
        }
        _ => Ok(col.clone()),
    }
}

/// Integer year at `row`; `None` for nulls or non-integer columns.
fn extract_i64(col: &ArrayRef, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row)),
        _ => None,
    }
}

/// Numeric value at `row`; nulls become `NaN`, non-numeric columns `None`.
fn extract_f64(col: &ArrayRef, row: usize) -> Option<f64> {
    let numeric = matches!(
        col.data_type(),
        DataType::Float32 | DataType::Float64 | DataType::Int32 | DataType::Int64
    );
    if !numeric {
        return None;
    }
    if col.is_null(row) {
        return Some(f64::NAN);
    }
    match col.data_type() {
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        _ => extract_i64(col, row).map(|v| v as f64),
    }
}

/// Text at `row`; nulls become `""`, non-text columns `None`.
fn extract_string(col: &ArrayRef, row: usize) -> Option<String> {
    let text = matches!(
        col.data_type(),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    );
    if !text {
        return None;
    }
    if col.is_null(row) {
        return Some(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|s| s.value(row).to_string()),
        _ => Some(col.as_string_view().value(row).to_string()),
    }
}

/// Load both dashboard tables; the first failure aborts.
pub fn load_datasets(ireland: &Path, world: &Path) -> Result<(Dataset, Dataset)> {
    let ireland = load_file(ireland, DatasetKind::Ireland)?;
    let world = load_file(world, DatasetKind::World)?;
    Ok((ireland, world))
}
