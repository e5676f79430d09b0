//! Level keys and level-header discovery
//!
//! Row 1 of every world sheet carries headers such as `World 1.3` (or
//! `Level 1.3`) at arbitrary columns. Each header owns the two columns to its
//! right: field labels, then values.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::error::ExtractError;
use crate::sheet::Sheet;

static LEVEL_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:world|level)\s+(\d+)\.(\d+)$").expect("valid regex"));

static LEVEL_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Level_(\d+)_(\d+)$").expect("valid regex"));

/// Canonical level identifier, displayed as `Level_<world>_<index>`
///
/// Ordering is by world, then index, so `Level_1_2` sorts before `Level_1_10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelKey {
    pub world: u32,
    pub index: u32,
}

impl LevelKey {
    pub fn new(world: u32, index: u32) -> Self {
        LevelKey { world, index }
    }

    /// Parse a spreadsheet header like `World 2.3`, ignoring surrounding whitespace
    pub fn from_header(text: &str) -> Option<Self> {
        let caps = LEVEL_HEADER.captures(text.trim())?;
        Some(LevelKey {
            world: caps[1].parse().ok()?,
            index: caps[2].parse().ok()?,
        })
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level_{}_{}", self.world, self.index)
    }
}

impl FromStr for LevelKey {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExtractError::InvalidLevelKey(s.to_string());
        let caps = LEVEL_KEY.captures(s.trim()).ok_or_else(invalid)?;
        Ok(LevelKey {
            world: caps[1].parse().map_err(|_| invalid())?,
            index: caps[2].parse().map_err(|_| invalid())?,
        })
    }
}

/// Normalize a header label into a key string.
///
/// Level headers become `Level_<world>_<index>`. Any other label is trimmed
/// and has spaces and dots replaced with underscores.
pub fn normalize_key(label: &str) -> String {
    match LevelKey::from_header(label) {
        Some(key) => key.to_string(),
        None => label.trim().replace(' ', "_").replace('.', "_"),
    }
}

/// Columns owned by one level header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTriple {
    pub header: usize,
    pub label: usize,
    pub value: usize,
}

impl ColumnTriple {
    pub fn at(header: usize) -> Self {
        ColumnTriple {
            header,
            label: header + 1,
            value: header + 2,
        }
    }
}

/// Find level headers in a sheet's first row, left to right.
///
/// A key seen twice keeps its first position but takes the later columns.
pub fn scan_headers(sheet: &Sheet) -> Vec<(LevelKey, ColumnTriple)> {
    let mut levels: Vec<(LevelKey, ColumnTriple)> = Vec::new();

    for (col, cell) in sheet.row(0).iter().enumerate() {
        let Some(key) = LevelKey::from_header(&cell.text()) else {
            continue;
        };
        let triple = ColumnTriple::at(col);

        match levels.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = triple,
            None => levels.push((key, triple)),
        }
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Cell;

    #[test]
    fn test_normalize_key_world_header() {
        assert_eq!(normalize_key("World 1.1"), "Level_1_1");
        assert_eq!(normalize_key("  World 2.3 "), "Level_2_3");
        assert_eq!(normalize_key("world 4.10"), "Level_4_10");
        assert_eq!(normalize_key("World  6.2"), "Level_6_2");
    }

    #[test]
    fn test_normalize_key_level_header() {
        assert_eq!(normalize_key("Level 2.2 "), "Level_2_2");
        assert_eq!(normalize_key(" Level 3.5"), "Level_3_5");
    }

    #[test]
    fn test_normalize_key_other_labels() {
        assert_eq!(normalize_key("col_7"), "col_7");
        assert_eq!(normalize_key(" Kevin 1.a "), "Kevin_1_a");
    }

    #[test]
    fn test_from_header_rejects_non_headers() {
        assert_eq!(LevelKey::from_header("World 1"), None);
        assert_eq!(LevelKey::from_header("World 1.1.1"), None);
        assert_eq!(LevelKey::from_header("Worlds 1.1"), None);
        assert_eq!(LevelKey::from_header(""), None);
    }

    #[test]
    fn test_key_round_trip_and_order() {
        let key: LevelKey = "Level_3_4".parse().unwrap();
        assert_eq!(key, LevelKey::new(3, 4));
        assert_eq!(key.to_string(), "Level_3_4");
        assert!(LevelKey::new(1, 2) < LevelKey::new(1, 10));
        assert!(LevelKey::new(1, 10) < LevelKey::new(2, 1));
        assert!("World 1.1".parse::<LevelKey>().is_err());
    }

    #[test]
    fn test_scan_headers_positions() {
        let sheet = Sheet::from_rows(
            "World 1",
            vec![vec![
                Cell::from("World 1.1"),
                Cell::Empty,
                Cell::Empty,
                Cell::from("notes"),
                Cell::from(" World 1.2 "),
            ]],
        );

        let levels = scan_headers(&sheet);
        assert_eq!(
            levels,
            vec![
                (LevelKey::new(1, 1), ColumnTriple::at(0)),
                (LevelKey::new(1, 2), ColumnTriple::at(4)),
            ]
        );
        assert_eq!(levels[1].1.label, 5);
        assert_eq!(levels[1].1.value, 6);
    }

    #[test]
    fn test_scan_headers_duplicate_overwrites() {
        let sheet = Sheet::from_rows(
            "World 1",
            vec![vec![
                Cell::from("World 1.1"),
                Cell::from("World 1.2"),
                Cell::from("World 1.1"),
            ]],
        );

        let levels = scan_headers(&sheet);
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0], (LevelKey::new(1, 1), ColumnTriple::at(2)));
    }

    #[test]
    fn test_scan_headers_none() {
        let sheet = Sheet::from_rows("Notes", vec![vec![Cell::from("Summary")]]);
        assert!(scan_headers(&sheet).is_empty());
        assert!(scan_headers(&Sheet::new("Empty")).is_empty());
    }
}
