//! Format-agnostic tables
//!
//! Workbooks and CSV files are both read into a `Table`: a header row plus
//! data rows of `Cell`s. Loaders look up columns by name and convert cells
//! with the `parse_*` helpers, which return a plain reason string on failure.

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use encoding_rs::WINDOWS_1252;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A single cell value, normalized across formats
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Error(String),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match excel_serial_to_date(dt.as_f64()) {
                Some(date) => Cell::Date(date),
                None => Cell::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Error(e.to_string()),
        }
    }
}

/// One data row with its 1-indexed line number in the source
#[derive(Debug, Clone)]
pub struct Row {
    pub line: usize,
    pub cells: Vec<Cell>,
}

impl Row {
    /// Cell at `idx`; short rows read as empty
    pub fn get(&self, idx: usize) -> &Cell {
        self.cells.get(idx).unwrap_or(&EMPTY_CELL)
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Index of a column, matched case-insensitively after trimming
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, String> {
        self.column(name).ok_or_else(|| {
            format!(
                "missing required column '{}' (found: {})",
                name,
                self.headers.join(", ")
            )
        })
    }
}

/// Read a CSV file. Invalid UTF-8 is decoded as Windows-1252.
pub fn read_csv(path: &Path) -> Result<Table, String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read file: {}", e))?;
    let content = decode_text(&bytes);

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format!("failed to read CSV headers: {}", e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err("file has no header row".to_string());
    }

    debug!("CSV headers: {:?}", headers);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("invalid CSV record: {}", e))?;
        let cells = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect::<Vec<_>>();
        if cells.iter().all(Cell::is_blank) {
            continue;
        }
        rows.push(Row {
            line: idx + 2,
            cells,
        });
    }

    Ok(Table { headers, rows })
}

/// Read the first worksheet of a workbook. The first non-empty row is the header.
pub fn read_workbook(path: &Path) -> Result<Table, String> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| format!("not a valid workbook: {}", e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| "workbook has no worksheets".to_string())?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("failed to read worksheet '{}': {}", sheet_name, e))?;

    debug!("Reading worksheet '{}' ({} rows)", sheet_name, range.height());

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut non_empty = range
        .rows()
        .enumerate()
        .filter(|(_, row)| !row.iter().all(|cell| cell.is_empty()));

    let (_, header_row) = non_empty
        .next()
        .ok_or_else(|| format!("worksheet '{}' is empty", sheet_name))?;

    let headers = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let rows = non_empty
        .map(|(idx, row)| Row {
            line: first_row + idx + 1,
            cells: row.iter().map(Cell::from).collect(),
        })
        .collect();

    Ok(Table { headers, rows })
}

fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("Source is not UTF-8; decoding as Windows-1252");
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    excel_epoch.checked_add_signed(Duration::try_days(serial.floor() as i64)?)
}

/// Parse a date cell: Excel date, ISO date (optionally with time), or MM/DD/YYYY
pub fn parse_date(cell: &Cell) -> Result<NaiveDate, String> {
    match cell {
        Cell::Date(date) => Ok(*date),
        Cell::Text(text) => parse_date_str(text.trim()),
        Cell::Empty => Err("missing date".to_string()),
        Cell::Error(e) => Err(format!("cell error {} where a date was expected", e)),
        other => Err(format!("expected a date, found {:?}", other)),
    }
}

fn parse_date_str(text: &str) -> Result<NaiveDate, String> {
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }
    Err(format!("could not parse date: {}", text))
}

/// Parse a numeric cell. Text may carry a `$` and `,` thousands separators.
pub fn parse_decimal(cell: &Cell) -> Result<Decimal, String> {
    match cell {
        Cell::Int(i) => Ok(Decimal::from(*i)),
        Cell::Float(f) => Decimal::from_f64(*f).ok_or_else(|| format!("invalid number: {}", f)),
        Cell::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
                .collect();
            Decimal::from_str(&cleaned)
                .or_else(|_| Decimal::from_scientific(&cleaned))
                .map_err(|_| format!("could not parse number: {}", text.trim()))
        }
        Cell::Empty => Err("missing number".to_string()),
        Cell::Error(e) => Err(format!("cell error {} where a number was expected", e)),
        other => Err(format!("expected a number, found {:?}", other)),
    }
}

/// Render a cell as trimmed text (numbers without a trailing `.0`)
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(text) => text.trim().to_string(),
        Cell::Int(i) => i.to_string(),
        Cell::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Cell::Float(f) => f.to_string(),
        Cell::Bool(b) => b.to_string(),
        Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        Cell::Error(e) => e.clone(),
    }
}
