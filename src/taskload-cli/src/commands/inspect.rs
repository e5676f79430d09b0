//! Sheet layout inspection
//!
//! Dumps the top-left corner of a sheet with 1-based row and column numbers,
//! which is how the workbook's authors refer to cells.

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;
use taskload::{Sheet, Workbook};

/// Longest cell text shown before truncation
const MAX_CELL_WIDTH: usize = 30;

/// Handle the inspect command
pub fn handle(input: Option<PathBuf>, sheet: &str, rows: usize, cols: usize) -> Result<()> {
    let config = Config::load()?;
    let input = config.input_path(input);

    let workbook = Workbook::open(&input)
        .with_context(|| format!("Failed to open workbook {}", input.display()))?;

    let Some(found) = workbook.sheet(sheet) else {
        anyhow::bail!(
            "Sheet '{}' not found. Available sheets: {}",
            sheet,
            workbook.sheet_names().join(", ")
        );
    };

    println!("Sheet name: {}", found.name());
    println!("Rows: {}", found.height());
    println!("Columns: {}", found.width());
    println!();
    println!("{}", "=".repeat(80));

    for line in render_grid(found, rows, cols) {
        println!("{}", line);
    }

    Ok(())
}

fn render_grid(sheet: &Sheet, rows: usize, cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let rows = rows.min(sheet.height());
    let cols = cols.min(sheet.width());

    for row in 0..rows {
        let cells: Vec<String> = (0..cols)
            .map(|col| {
                let text: String = sheet
                    .cell(row, col)
                    .text()
                    .chars()
                    .take(MAX_CELL_WIDTH)
                    .collect();
                format!("[{}] {}", col + 1, text)
            })
            .collect();
        lines.push(format!("Row {:3}: {}", row + 1, cells.join(" | ")));

        if (row + 1) % 10 == 0 {
            lines.push("-".repeat(80));
        }
    }

    lines
}
