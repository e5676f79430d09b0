//! In-memory worksheet grid backed by calamine.
//!
//! Every sheet is materialized into a dense grid addressed by absolute
//! 0-based `(row, column)` coordinates, so row 0 is always the sheet's first
//! row regardless of where the used range starts.

use calamine::{open_workbook_auto, Data, Range, Reader};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use crate::error::ExtractError;
use crate::normalize::format_number;

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT?(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?$").expect("valid regex")
});

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A wall-clock reading taken from a time-formatted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        ClockTime {
            hours,
            minutes,
            seconds,
        }
    }

    /// Build from the fractional part of a spreadsheet date serial.
    pub fn from_day_fraction(fraction: f64) -> Self {
        let total = (fraction * SECONDS_PER_DAY).round() as u32;
        ClockTime {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// Parse an ISO 8601 duration such as `PT1H30M0S`.
    pub fn from_iso_duration(text: &str) -> Option<Self> {
        let caps = ISO_DURATION.captures(text.trim())?;
        let part = |i: usize| -> Option<u32> {
            match caps.get(i) {
                Some(m) => m.as_str().parse::<f64>().ok().map(|v| v.round() as u32),
                None => Some(0),
            }
        };
        Some(ClockTime::new(part(1)?, part(2)?, part(3)?))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Time(ClockTime),
    Error(String),
}

impl Cell {
    /// Text rendering used for label matching and free-text fields
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(s) | Cell::Error(s) => Cow::Borrowed(s.as_str()),
            Cell::Number(n) => Cow::Owned(format_number(*n)),
            Cell::Bool(true) => Cow::Borrowed("True"),
            Cell::Bool(false) => Cow::Borrowed("False"),
            Cell::Time(t) => Cow::Owned(t.to_string()),
        }
    }

    /// True for empty cells and cells holding only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Convert a calamine cell. Date serials below one day are clock times.
    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                if (0.0..1.0).contains(&serial) {
                    Cell::Time(ClockTime::from_day_fraction(serial))
                } else {
                    Cell::Number(serial)
                }
            }
            Data::DateTimeIso(s) => Cell::Text(s.clone()),
            Data::DurationIso(s) => ClockTime::from_iso_duration(s)
                .map(Cell::Time)
                .unwrap_or_else(|| Cell::Text(s.clone())),
            Data::Error(e) => Cell::Error(e.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            other => serializer.serialize_str(&other.text()),
        }
    }
}

static EMPTY: Cell = Cell::Empty;

/// One worksheet as a dense grid
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            rows: Vec::new(),
            width: 0,
        }
    }

    /// Build a sheet from row-major cells starting at A1
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Sheet {
            name: name.into(),
            rows,
            width,
        }
    }

    /// Materialize a calamine range, honoring its start offset
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let mut sheet = Sheet::new(name);
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        for (row, col, data) in range.used_cells() {
            sheet.set(row + row_offset, col + col_offset, Cell::from_data(data));
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows up to and including the last used row
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns up to and including the last used column
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        cells[col] = cell;
        self.width = self.width.max(col + 1);
    }

    /// Cells of one row (may be shorter than `width`)
    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate every stored cell with its position
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, cells)| cells.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }
}

/// All worksheets of a spreadsheet file, in file order
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Workbook { sheets }
    }

    /// Load every worksheet from an `.xlsx`, `.xls`, `.xlsb` or `.ods` file
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        let mut workbook = open_workbook_auto(path)?;
        let mut sheets = Vec::new();

        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            sheets.push(Sheet::from_range(name, &range));
        }

        Ok(Workbook { sheets })
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
