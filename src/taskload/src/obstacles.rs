//! Obstacle counting from marker cells
//!
//! Anywhere in any sheet, a cell reading exactly `Obstacle Type` (after
//! trimming) marks an obstacle list: the five cells below it in the same
//! column. The non-blank entries of that window are attributed to the
//! column's row-1 header, which names the level the list belongs to.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::level::normalize_key;
use crate::record::LevelSet;
use crate::sheet::{Cell, Sheet, Workbook};

/// Marker text used when none is configured
pub const DEFAULT_OBSTACLE_MARKER: &str = "Obstacle Type";

/// Number of cells read below each marker
pub const OBSTACLE_WINDOW: usize = 5;

/// One marker match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleOccurrence {
    pub sheet: String,
    /// 0-based (row, column) of the marker cell
    pub position: (usize, usize),
    /// Cells below the marker; shorter than the window at the sheet's end
    pub window: Vec<Cell>,
    pub non_empty_count: u32,
}

/// All marker matches of a workbook, grouped by column header label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObstacleScan {
    pub by_label: BTreeMap<String, Vec<ObstacleOccurrence>>,
}

impl ObstacleScan {
    /// Scan every sheet of a workbook
    pub fn scan(workbook: &Workbook, marker: &str) -> Self {
        let mut scan = ObstacleScan::default();
        for sheet in workbook.sheets() {
            scan.scan_sheet(sheet, marker);
        }
        scan
    }

    /// Scan one sheet, adding its matches to this scan
    pub fn scan_sheet(&mut self, sheet: &Sheet, marker: &str) {
        for (row, col, cell) in sheet.cells() {
            if cell.is_blank() || cell.text().trim() != marker {
                continue;
            }

            let header = sheet.cell(0, col);
            let label = if header.is_blank() {
                format!("col_{}", col)
            } else {
                header.text().into_owned()
            };

            let end = (row + 1 + OBSTACLE_WINDOW).min(sheet.height());
            let window: Vec<Cell> = (row + 1..end)
                .map(|r| sheet.cell(r, col).clone())
                .collect();
            let non_empty_count = window.iter().filter(|c| !c.is_blank()).count() as u32;

            debug!(
                sheet = sheet.name(),
                row,
                col,
                label = %label,
                non_empty_count,
                "obstacle marker"
            );

            self.by_label
                .entry(label)
                .or_default()
                .push(ObstacleOccurrence {
                    sheet: sheet.name().to_string(),
                    position: (row, col),
                    window,
                    non_empty_count,
                });
        }
    }

    /// Total occurrences across all labels
    pub fn occurrence_count(&self) -> usize {
        self.by_label.values().map(Vec::len).sum()
    }

    /// Obstacle totals per normalized label
    pub fn totals_by_key(&self) -> HashMap<String, u32> {
        let mut totals: HashMap<String, u32> = HashMap::new();
        for (label, occurrences) in &self.by_label {
            let sum: u32 = occurrences.iter().map(|o| o.non_empty_count).sum();
            *totals.entry(normalize_key(label)).or_insert(0) += sum;
        }
        totals
    }

    /// Set `num_obstacles` on every record of the set
    pub fn apply(&self, levels: &mut LevelSet) {
        let totals = self.totals_by_key();
        for (key, record) in levels.iter_mut() {
            record.num_obstacles = totals.get(&key.to_string()).copied().unwrap_or(0);
        }
    }
}
