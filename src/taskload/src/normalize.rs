//! Cell value normalization
//!
//! Maps a raw cell plus the target field's kind to canonical text or
//! [`FieldValue::Missing`]. A cell that fails its field's rule is never an
//! error, it just resolves to missing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::field::{FieldKind, FieldValue};
use crate::sheet::Cell;

/// Spreadsheet encodes game time as `hh:mm:ss` where hh is minutes and mm is seconds
static SHIFTED_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d+):(\d+)$").expect("valid regex"));

static MINUTES_SECONDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+:\d{2}$").expect("valid regex"));

static RECIPE_WITH_VARIATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)\s*\((\d+)\s*variations?\)$").expect("valid regex")
});

/// Render a number canonically: integral values without a fraction,
/// everything else with the shortest exact representation.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Normalize a cell for a field kind
pub fn normalize(cell: &Cell, kind: FieldKind) -> FieldValue {
    if cell.is_blank() {
        return FieldValue::Missing;
    }

    match kind {
        FieldKind::Duration => normalize_duration(cell),
        FieldKind::YesNo => normalize_yes_no(cell),
        FieldKind::Numeric => normalize_numeric(cell),
        FieldKind::FreeText | FieldKind::Curated => normalize_text(cell),
    }
}

fn normalize_duration(cell: &Cell) -> FieldValue {
    if let Cell::Time(t) = cell {
        return FieldValue::Text(format!("{}:{:02}", t.hours, t.minutes));
    }
    if !matches!(cell, Cell::Text(_)) {
        return FieldValue::Missing;
    }

    let text = cell.text();
    let text = text.trim();

    if let Some(caps) = SHIFTED_CLOCK.captures(text) {
        let minutes = caps[1].parse::<u64>();
        let seconds = caps[2].parse::<u64>();
        return match (minutes, seconds) {
            (Ok(m), Ok(s)) => FieldValue::Text(format!("{}:{:02}", m, s)),
            _ => FieldValue::Missing,
        };
    }

    if MINUTES_SECONDS.is_match(text) {
        return FieldValue::text(text);
    }

    FieldValue::Missing
}

fn normalize_yes_no(cell: &Cell) -> FieldValue {
    match cell.text().trim().to_lowercase().as_str() {
        "yes" | "y" => FieldValue::text("yes"),
        "no" | "n" => FieldValue::text("no"),
        _ => FieldValue::Missing,
    }
}

fn normalize_numeric(cell: &Cell) -> FieldValue {
    match parse_number(cell) {
        Some(n) => FieldValue::Text(format_number(n)),
        None => FieldValue::Missing,
    }
}

fn normalize_text(cell: &Cell) -> FieldValue {
    let text = cell.text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        FieldValue::Missing
    } else {
        FieldValue::text(trimmed)
    }
}

/// Finite number from a numeric cell or numeric text; `NA` is not a number
fn parse_number(cell: &Cell) -> Option<f64> {
    let n = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("na") {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Result of parsing a `Number of Recipes` cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositeRecipe {
    /// Bare count; the variation count is left alone
    Count(String),
    /// `<count> (<variations> variations)`
    WithVariations { count: String, variations: String },
    Unparseable,
}

/// Parse a composite recipe cell
pub fn parse_composite(cell: &Cell) -> CompositeRecipe {
    if cell.is_blank() {
        return CompositeRecipe::Unparseable;
    }

    if let Cell::Text(s) = cell {
        if let Some(caps) = RECIPE_WITH_VARIATIONS.captures(s.trim()) {
            let count = caps[1].parse::<u64>();
            let variations = caps[2].parse::<u64>();
            if let (Ok(count), Ok(variations)) = (count, variations) {
                return CompositeRecipe::WithVariations {
                    count: count.to_string(),
                    variations: variations.to_string(),
                };
            }
            return CompositeRecipe::Unparseable;
        }
    }

    match parse_number(cell) {
        Some(n) => CompositeRecipe::Count(format_number(n)),
        None => CompositeRecipe::Unparseable,
    }
}
