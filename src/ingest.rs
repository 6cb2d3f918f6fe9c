//! Delimited-text ingestion.
//!
//! The first record is the header and supplies the item labels. Each later
//! record is one respondent. Cells are trimmed and parsed as `f64`; anything
//! unparseable or non-finite becomes missing. Records whose fields are all
//! blank are dropped. Records may be shorter or longer than the header.
//!
//! A cell must be a complete number: a numeric prefix followed by text
//! (`3abc`) is missing, not 3.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{ReliabilityError, Result};
use crate::response::{Cell, ResponseMatrix};

/// Parses delimited text into a [`ResponseMatrix`].
///
/// # Errors
///
/// `Parse` if the text has no header, no data rows, or is malformed.
///
/// # Examples
///
/// ```
/// use u_psychometrics::ingest::parse_delimited;
///
/// let m = parse_delimited("q1,q2\n1,2\n3,NA\n\n5,6\n", b',').unwrap();
/// assert_eq!(m.labels(), ["q1", "q2"]);
/// assert_eq!(m.respondent_count(), 3);
/// assert_eq!(m.cell(1, 1), None);
/// ```
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<ResponseMatrix> {
    from_reader(text.as_bytes(), delimiter)
}

/// Reads a comma-separated file into a [`ResponseMatrix`].
pub fn read_csv(path: impl AsRef<Path>) -> Result<ResponseMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ReliabilityError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    from_reader(file, b',')
}

fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<ResponseMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let labels: Vec<String> = reader
        .headers()
        .map_err(|e| ReliabilityError::Parse(e.to_string()))?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    if labels.iter().all(String::is_empty) {
        return Err(ReliabilityError::Parse("missing header row".into()));
    }

    let mut rows = Vec::new();
    let mut blank = 0usize;
    let mut unparsed = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| ReliabilityError::Parse(e.to_string()))?;
        if is_blank(&record) {
            blank += 1;
            continue;
        }
        let row: Vec<Cell> = record
            .iter()
            .map(|field| {
                let cell = parse_cell(field);
                if cell.is_none() {
                    unparsed += 1;
                }
                cell
            })
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ReliabilityError::Parse("no data rows".into()));
    }
    debug!(
        items = labels.len(),
        respondents = rows.len(),
        blank_rows = blank,
        missing_cells = unparsed,
        "ingested response matrix"
    );

    Ok(ResponseMatrix::new(labels, rows))
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

fn parse_cell(field: &str) -> Cell {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
