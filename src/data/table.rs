//! Tabular in-memory structure built from delimited text.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};

/// Date-time formats accepted for the timestamp column, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Column payload after type inference.
///
/// Numeric columns keep blank cells as `None`; text columns keep the raw
/// string. Timestamp columns only exist after [`DataTable::promote_timestamp`].
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// Every non-blank cell parsed as a float.
    Numeric(Vec<Option<f64>>),
    /// Fallback type when at least one cell is non-numeric.
    Text(Vec<String>),
    /// Parsed date-times (blank cells stay missing).
    Timestamp(Vec<Option<NaiveDateTime>>),
}

impl ColumnData {
    /// Number of cells in the column.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Timestamp(v) => v.len(),
        }
    }

    /// Returns `true` when the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for numeric columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// Numeric cells with blanks preserved, or `None` for non-numeric columns.
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Self::Numeric(v) => Some(v),
            _ => None,
        }
    }

    /// Parsed date-times, or `None` for non-timestamp columns.
    pub fn as_timestamps(&self) -> Option<&[Option<NaiveDateTime>]> {
        match self {
            Self::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    /// Cell rendered as a display string (blank for missing values).
    pub fn display_cell(&self, row: usize) -> String {
        match self {
            Self::Numeric(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| format!("{x}"))
                .unwrap_or_default(),
            Self::Text(v) => v.get(row).cloned().unwrap_or_default(),
            Self::Timestamp(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        }
    }
}

/// An immutable table of named columns read from delimited text.
///
/// Column types are inferred per column: a column where every non-blank cell
/// parses as a float is numeric, anything else is text. No row filtering, no
/// deduplication, no other normalization.
#[derive(Debug, Clone)]
pub struct DataTable {
    names: Vec<String>,
    columns: Vec<ColumnData>,
    rows: usize,
}

impl DataTable {
    /// Parses delimited text with a header row and infers one type per column.
    ///
    /// # Errors
    ///
    /// Returns the underlying `csv::Error` when the input is not valid
    /// delimited data (bad UTF-8, ragged rows).
    pub fn from_reader(reader: impl Read) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
        let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        let mut rows = 0;
        for record in rdr.records() {
            let record = record?;
            for (i, col) in cells.iter_mut().enumerate() {
                col.push(record.get(i).unwrap_or("").to_string());
            }
            rows += 1;
        }

        let columns = cells.into_iter().map(infer_column).collect();
        Ok(Self {
            names,
            columns,
            rows,
        })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns `true` when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` when a column with this exact name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Column payload by name.
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.columns.get(idx)
    }

    /// Numeric cells of the named column, or `None` when absent or non-numeric.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column(name)?.as_numeric()
    }

    /// Names of all numeric columns, in declaration order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter(|(_, c)| c.is_numeric())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// First `n` rows rendered as display strings, one vector per row.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        let take = n.min(self.rows);
        (0..take)
            .map(|row| self.columns.iter().map(|c| c.display_cell(row)).collect())
            .collect()
    }

    /// Converts the named column to date-times, parsing each non-blank cell.
    ///
    /// Returns `Ok(false)` when no such column exists, `Ok(true)` once the
    /// column holds timestamps.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending cell when a non-blank value
    /// matches none of the accepted formats, or when the column was inferred
    /// as numeric and cannot carry date-times.
    pub fn promote_timestamp(&mut self, name: &str) -> Result<bool, String> {
        let Some(idx) = self.names.iter().position(|n| n == name) else {
            return Ok(false);
        };
        let parsed = match &self.columns[idx] {
            ColumnData::Timestamp(_) => return Ok(true),
            // An all-blank column infers as numeric; it carries no dates either way
            ColumnData::Numeric(cells) if cells.iter().all(Option::is_none) => {
                vec![None; cells.len()]
            }
            ColumnData::Numeric(_) => {
                return Err(format!("column \"{name}\" is numeric, expected date-time text"));
            }
            ColumnData::Text(cells) => {
                let mut out = Vec::with_capacity(cells.len());
                for (row, cell) in cells.iter().enumerate() {
                    let cell = cell.trim();
                    if cell.is_empty() {
                        out.push(None);
                        continue;
                    }
                    match parse_timestamp(cell) {
                        Some(t) => out.push(Some(t)),
                        None => {
                            return Err(format!(
                                "column \"{name}\" row {}: \"{cell}\" is not a valid date-time",
                                row + 1
                            ));
                        }
                    }
                }
                out
            }
        };
        self.columns[idx] = ColumnData::Timestamp(parsed);
        Ok(true)
    }
}

/// Infers a column type from its raw cells.
fn infer_column(cells: Vec<String>) -> ColumnData {
    let numeric = cells
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .all(|c| c.parse::<f64>().is_ok());
    if numeric {
        ColumnData::Numeric(
            cells
                .iter()
                .map(|c| {
                    let c = c.trim();
                    if c.is_empty() { None } else { c.parse().ok() }
                })
                .collect(),
        )
    } else {
        ColumnData::Text(cells)
    }
}

/// Parses one date-time cell against the accepted formats.
fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(cell, fmt) {
            return Some(t);
        }
    }
    // Date-only cells resolve to midnight
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
