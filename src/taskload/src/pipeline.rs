//! End-to-end extraction run
//!
//! Stages run strictly in order: world sheets → level records → equipment
//! defaults → obstacle counts → challenge scores → curated-field carry-over.

use std::ops::RangeInclusive;
use tracing::{info, warn};

use crate::extract::extract_sheet;
use crate::merge::merge_curated;
use crate::obstacles::{ObstacleScan, DEFAULT_OBSTACLE_MARKER};
use crate::record::{LevelSet, DEFAULT_MISSING_SENTINEL};
use crate::score::apply_scores;
use crate::sheet::Workbook;

/// World sheets read when none are configured
pub const DEFAULT_WORLDS: RangeInclusive<u32> = 1..=6;

/// Tunables for an extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Text of the cell that heads an obstacle list
    pub marker: String,
    /// String written in place of missing values
    pub missing_sentinel: String,
    /// World numbers whose `World <N>` sheets are read
    pub worlds: RangeInclusive<u32>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            marker: DEFAULT_OBSTACLE_MARKER.to_string(),
            missing_sentinel: DEFAULT_MISSING_SENTINEL.to_string(),
            worlds: DEFAULT_WORLDS,
        }
    }
}

/// Sheet name for a world number
pub fn world_sheet_name(world: u32) -> String {
    format!("World {}", world)
}

/// Records and obstacle scan produced by a run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub levels: LevelSet,
    pub obstacles: ObstacleScan,
    /// Curated values carried over from the prior output
    pub carried: usize,
}

/// Extract level records from every configured world sheet.
///
/// Absent world sheets are skipped. A later sheet's level replaces an
/// earlier one with the same key.
pub fn extract_levels(workbook: &Workbook, options: &ExtractOptions) -> LevelSet {
    let mut levels = LevelSet::new();

    for world in options.worlds.clone() {
        let name = world_sheet_name(world);
        let Some(sheet) = workbook.sheet(&name) else {
            warn!("Sheet '{}' not found, skipping", name);
            continue;
        };

        let records = extract_sheet(sheet);
        info!("{}: {} levels", name, records.len());

        for (key, record) in records {
            if levels.insert(key, record).is_some() {
                warn!("{} defined more than once, keeping the last", key);
            }
        }
    }

    levels
}

/// Run every stage against a loaded workbook and the previous output
pub fn run(workbook: &Workbook, prior: &LevelSet, options: &ExtractOptions) -> PipelineOutput {
    let mut levels = extract_levels(workbook, options);

    let obstacles = ObstacleScan::scan(workbook, &options.marker);
    info!(
        "Found {} obstacle markers under {} labels",
        obstacles.occurrence_count(),
        obstacles.by_label.len()
    );
    obstacles.apply(&mut levels);

    apply_scores(&mut levels);

    let carried = merge_curated(&mut levels, prior);
    if carried > 0 {
        info!("Carried {} curated values from previous output", carried);
    }

    PipelineOutput {
        levels,
        obstacles,
        carried,
    }
}
