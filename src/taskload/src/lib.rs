//! # taskload
//!
//! Overcooked 2 level task-load extraction.
//!
//! This library provides functionality to:
//! - Read the per-world level analysis workbook (`.xlsx`, `.xls`, `.ods`)
//! - Locate level blocks from `World N.M` headers and extract their fields
//! - Normalize times, yes/no flags, numbers and recipe counts
//! - Count obstacles listed under `Obstacle Type` marker cells
//! - Compute each level's challenge score
//! - Carry hand-curated fields (video links) across re-runs
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = taskload::ExtractOptions::default();
//! let output_path = Path::new("all_levels.json");
//!
//! let workbook = taskload::Workbook::open(Path::new("Overcooked 2 Full Task Analysis.xlsx"))?;
//! let prior = taskload::LevelSet::load(output_path, &options.missing_sentinel)?;
//!
//! let output = taskload::run(&workbook, &prior, &options);
//! for (key, record) in &output.levels {
//!     println!("{}: {}", key, record.challenge_score);
//! }
//!
//! output.levels.write(output_path, &options.missing_sentinel)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod field;
pub mod level;
pub mod merge;
pub mod normalize;
pub mod obstacles;
pub mod pipeline;
pub mod record;
pub mod score;
pub mod sheet;

// Re-export commonly used items
#[doc(inline)]
pub use error::ExtractError;
#[doc(inline)]
pub use extract::{apply_equipment_defaults, extract_level, extract_sheet};
#[doc(inline)]
pub use field::{
    target_for_label, Field, FieldKind, FieldLabel, FieldValue, LabelTarget, EQUIPMENT_PAIRS,
    FIELD_LABELS,
};
#[doc(inline)]
pub use level::{normalize_key, scan_headers, ColumnTriple, LevelKey};
#[doc(inline)]
pub use merge::merge_curated;
#[doc(inline)]
pub use normalize::{format_number, normalize, parse_composite, CompositeRecipe};
#[doc(inline)]
pub use obstacles::{ObstacleOccurrence, ObstacleScan, DEFAULT_OBSTACLE_MARKER, OBSTACLE_WINDOW};
#[doc(inline)]
pub use pipeline::{
    extract_levels, run, world_sheet_name, ExtractOptions, PipelineOutput, DEFAULT_WORLDS,
};
#[doc(inline)]
pub use record::{LevelRecord, LevelSet, DEFAULT_MISSING_SENTINEL};
#[doc(inline)]
pub use score::{apply_scores, challenge_score, ScoreBreakdown};
#[doc(inline)]
pub use sheet::{Cell, ClockTime, Sheet, Workbook};
