use crate::error::{ClusteringError, Result};
use crate::sample::{Field, FlowerSample};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// How a column's text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// One entry of the column mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub index: usize,
    pub field: Field,
    pub kind: ColumnKind,
}

/// Column layout of the input file: four measurements followed by the label.
pub const COLUMN_MAP: [ColumnSpec; 5] = [
    ColumnSpec {
        index: 0,
        field: Field::SepalLength,
        kind: ColumnKind::Numeric,
    },
    ColumnSpec {
        index: 1,
        field: Field::SepalWidth,
        kind: ColumnKind::Numeric,
    },
    ColumnSpec {
        index: 2,
        field: Field::PetalLength,
        kind: ColumnKind::Numeric,
    },
    ColumnSpec {
        index: 3,
        field: Field::PetalWidth,
        kind: ColumnKind::Numeric,
    },
    ColumnSpec {
        index: 4,
        field: Field::Label,
        kind: ColumnKind::Text,
    },
];

/// Load flower samples from a comma-separated file without a header row.
///
/// # Errors
///
/// Returns [`ClusteringError::Io`] if the file cannot be opened and
/// [`ClusteringError::Format`] for the first malformed row.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<FlowerSample>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let samples = read_samples(BufReader::new(file))?;

    debug!("Loaded {} samples from {}", samples.len(), path.display());

    Ok(samples)
}

/// Parse flower samples from any reader, using [`COLUMN_MAP`] for the layout.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<FlowerSample>> {
    // Column count is checked per row below, so the csv reader stays flexible
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        samples.push(parse_record(&record, line)?);
    }

    Ok(samples)
}

fn parse_record(record: &StringRecord, line: u64) -> Result<FlowerSample> {
    if record.len() != COLUMN_MAP.len() {
        return Err(ClusteringError::Format(format!(
            "line {}: expected {} columns, found {}",
            line,
            COLUMN_MAP.len(),
            record.len()
        )));
    }

    let mut sample = FlowerSample::new(0.0, 0.0, 0.0, 0.0, String::new());

    for spec in COLUMN_MAP.iter() {
        // Length was checked above
        let raw = &record[spec.index];
        match spec.kind {
            ColumnKind::Numeric => {
                let value = parse_measurement(raw, spec.field, line)?;
                if let Some(slot) = sample.measurement_mut(spec.field) {
                    *slot = value;
                }
            }
            ColumnKind::Text => {
                if raw.is_empty() {
                    return Err(ClusteringError::Format(format!(
                        "line {}: empty {} column",
                        line, spec.field
                    )));
                }
                sample.label = raw.to_string();
            }
        }
    }

    Ok(sample)
}

fn parse_measurement(raw: &str, field: Field, line: u64) -> Result<f32> {
    let value: f32 = raw.parse().map_err(|_| {
        ClusteringError::Format(format!(
            "line {}: column {} is not a number: {:?}",
            line, field, raw
        ))
    })?;

    if !value.is_finite() {
        return Err(ClusteringError::Format(format!(
            "line {}: column {} is not finite: {:?}",
            line, field, raw
        )));
    }

    Ok(value)
}
