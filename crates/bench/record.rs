use log::{debug, info};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Positional column layout of a benchmark result file, which has no header row.
pub const COLUMNS: [&str; 13] = [
    "id",
    "algo",
    "mode",
    "label",
    "op",
    "runs",
    "sizeBytes",
    "col7",
    "col8",
    "col9",
    "col10",
    "col11",
    "wallMs",
];

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("cannot read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV at line {line}: {message}")]
    Parse { line: u64, message: String },
}

impl BenchError {
    fn parse(line: u64, message: impl Into<String>) -> Self {
        BenchError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Parse a cell as a number, returning `None` for anything that is not one.
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    match cell.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(v),
        _ => None,
    }
}

fn deserialize_numeric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: String = Deserialize::deserialize(deserializer)?;
    Ok(coerce_numeric(&value))
}

/// One benchmark result row. Fields are assigned by position, in `COLUMNS` order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub id: String,
    pub algo: String,
    pub mode: String,
    label: String,
    pub op: String,
    #[serde(deserialize_with = "deserialize_numeric")]
    pub runs: Option<f64>,
    #[serde(deserialize_with = "deserialize_numeric")]
    pub size_bytes: Option<f64>,
    pub col7: String,
    pub col8: String,
    pub col9: String,
    pub col10: String,
    pub col11: String,
    #[serde(deserialize_with = "deserialize_numeric")]
    pub wall_ms: Option<f64>,
}

impl Record {
    /// Size tag of the row; an empty cell counts as no label at all.
    pub fn label(&self) -> Option<&str> {
        if self.label.is_empty() {
            None
        } else {
            Some(&self.label)
        }
    }
}

/// Read a whole benchmark CSV file into memory and parse it.
///
/// # Arguments
/// * `path` - file with no header row and exactly 13 fields per row
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, BenchError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| BenchError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse(bytes.as_slice())?;
    info!("loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

pub fn parse<R: io::Read>(rdr: R) -> Result<Vec<Record>, BenchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        // row length is checked below so the error can name the line
        .flexible(true)
        .from_reader(rdr);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            BenchError::parse(line, e.to_string())
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        if row.len() != COLUMNS.len() {
            return Err(BenchError::parse(
                line,
                format!("expected {} fields, found {}", COLUMNS.len(), row.len()),
            ));
        }
        let record: Record = row
            .deserialize(None)
            .map_err(|e| BenchError::parse(line, e.to_string()))?;

        for (name, value) in [
            ("runs", record.runs),
            ("sizeBytes", record.size_bytes),
            ("wallMs", record.wall_ms),
        ] {
            if value.is_none() {
                debug!("line {}: {} is not numeric, treated as missing", line, name);
            }
        }
        records.push(record);
    }
    Ok(records)
}
