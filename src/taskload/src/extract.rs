//! Field extraction from a level's column triple

use tracing::{debug, trace};

use crate::field::{target_for_label, Field, FieldValue, LabelTarget, EQUIPMENT_PAIRS};
use crate::level::{scan_headers, ColumnTriple, LevelKey};
use crate::normalize::{normalize, parse_composite, CompositeRecipe};
use crate::record::LevelRecord;
use crate::sheet::Sheet;

/// Extract one level's record by walking its label column top to bottom.
///
/// A label that appears more than once overwrites the earlier value: the
/// last occurrence in the column wins.
pub fn extract_level(sheet: &Sheet, columns: ColumnTriple) -> LevelRecord {
    let mut record = LevelRecord::new();

    for row in 0..sheet.height() {
        let label_cell = sheet.cell(row, columns.label);
        if label_cell.is_blank() {
            continue;
        }

        let label = label_cell.text();
        let Some(target) = target_for_label(label.trim()) else {
            continue;
        };
        let value_cell = sheet.cell(row, columns.value);

        match target {
            LabelTarget::CompositeRecipe => match parse_composite(value_cell) {
                CompositeRecipe::Count(count) => {
                    record.set(Field::CompositeNum, FieldValue::Text(count));
                }
                CompositeRecipe::WithVariations { count, variations } => {
                    record.set(Field::CompositeNum, FieldValue::Text(count));
                    record.set(Field::VariationNum, FieldValue::Text(variations));
                }
                CompositeRecipe::Unparseable => {
                    record.set(Field::CompositeNum, FieldValue::Missing);
                    record.set(Field::VariationNum, FieldValue::Missing);
                }
            },
            LabelTarget::Field(field) => {
                let value = normalize(value_cell, field.kind());
                trace!(row, %field, ?value, "field");
                record.set(field, value);
            }
        }
    }

    record
}

/// Backfill equipment counts to "0" where the equipment flag is "no".
pub fn apply_equipment_defaults(record: &mut LevelRecord) {
    for &(flag, count) in EQUIPMENT_PAIRS {
        if record.get(flag).as_str() == Some("no") && record.get(count).is_unset() {
            record.set(count, FieldValue::text("0"));
        }
    }
}

/// Extract every level block on a sheet, in header order
pub fn extract_sheet(sheet: &Sheet) -> Vec<(LevelKey, LevelRecord)> {
    let headers = scan_headers(sheet);
    debug!(sheet = sheet.name(), levels = headers.len(), "scanned level headers");

    headers
        .into_iter()
        .map(|(key, columns)| {
            let mut record = extract_level(sheet, columns);
            apply_equipment_defaults(&mut record);
            debug!(
                level = %key,
                missing = record.missing_fields().len(),
                "extracted level"
            );
            (key, record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Cell, ClockTime};

    /// Build a sheet with one level header in column A and labels/values in B/C
    fn level_sheet(rows: &[(&str, Cell)]) -> Sheet {
        let mut sheet = Sheet::new("World 1");
        sheet.set(0, 0, Cell::from("World 1.1"));
        for (i, (label, value)) in rows.iter().enumerate() {
            sheet.set(i + 1, 1, Cell::from(*label));
            sheet.set(i + 1, 2, value.clone());
        }
        sheet
    }

    #[test]
    fn test_extract_basic_fields() {
        let sheet = level_sheet(&[
            ("Level Time (mm:ss)", Cell::Time(ClockTime::new(3, 0, 0))),
            ("Does Clock start at \"Go\" ?", Cell::from("Yes")),
            ("Dish Washer?", Cell::from("n")),
            ("Score for 1 Star (2 Players)", Cell::Number(240.0)),
            ("Notes", Cell::from("  conveyor belts  ")),
        ]);

        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert_eq!(record.get(Field::TimeToComplete), &FieldValue::text("3:00"));
        assert_eq!(record.get(Field::StartAtGo), &FieldValue::text("yes"));
        assert_eq!(record.get(Field::DishWasher), &FieldValue::text("no"));
        assert_eq!(record.get(Field::OneStarScore), &FieldValue::text("240"));
        assert_eq!(record.get(Field::Notes), &FieldValue::text("conveyor belts"));
        assert!(record.get(Field::FixedEnvironment).is_missing());
    }

    #[test]
    fn test_labels_are_trimmed_but_case_sensitive() {
        let sheet = level_sheet(&[
            ("  Dish Washer?  ", Cell::from("yes")),
            ("is environment fixed?", Cell::from("yes")),
        ]);

        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert_eq!(record.get(Field::DishWasher), &FieldValue::text("yes"));
        assert!(record.get(Field::FixedEnvironment).is_missing());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let sheet = level_sheet(&[
            ("Score for 1 Star (2 Players)", Cell::Number(100.0)),
            ("Score for 1 Star (2 Players)", Cell::from("NA")),
        ]);

        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert!(record.get(Field::OneStarScore).is_missing());

        let sheet = level_sheet(&[
            ("Dish Washer?", Cell::from("maybe")),
            ("Dish Washer?", Cell::from("yes")),
        ]);
        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert_eq!(record.get(Field::DishWasher), &FieldValue::text("yes"));
    }

    #[test]
    fn test_composite_recipe_split() {
        let sheet = level_sheet(&[("Number of Recipes", Cell::from("2 (3 variations)"))]);
        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert_eq!(record.get(Field::CompositeNum), &FieldValue::text("2"));
        assert_eq!(record.get(Field::VariationNum), &FieldValue::text("3"));

        let sheet = level_sheet(&[("Number of Recipes", Cell::Number(4.0))]);
        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert_eq!(record.get(Field::CompositeNum), &FieldValue::text("4"));
        assert!(record.get(Field::VariationNum).is_missing());

        let sheet = level_sheet(&[("Number of Recipes", Cell::from("four"))]);
        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert!(record.get(Field::CompositeNum).is_missing());
        assert!(record.get(Field::VariationNum).is_missing());
    }

    #[test]
    fn test_bare_count_keeps_earlier_variations() {
        let sheet = level_sheet(&[
            ("Number of Recipes", Cell::from("1 (2 variations)")),
            ("Number of Recipes", Cell::from("3")),
        ]);
        let record = extract_level(&sheet, ColumnTriple::at(0));
        assert_eq!(record.get(Field::CompositeNum), &FieldValue::text("3"));
        assert_eq!(record.get(Field::VariationNum), &FieldValue::text("2"));
    }

    #[test]
    fn test_equipment_backfill() {
        let mut record = LevelRecord::new();
        record.set(Field::HasMixer, FieldValue::text("no"));
        record.set(Field::HasOven, FieldValue::text("yes"));
        record.set(Field::HasFryer, FieldValue::text("no"));
        record.set(Field::NumFryers, FieldValue::text("2"));

        apply_equipment_defaults(&mut record);

        assert_eq!(record.get(Field::NumMixers), &FieldValue::text("0"));
        assert!(record.get(Field::NumOvens).is_missing());
        assert_eq!(record.get(Field::NumFryers), &FieldValue::text("2"));
        assert!(record.get(Field::NumFireExtinguishers).is_missing());
    }

    #[test]
    fn test_equipment_backfill_replaces_empty() {
        let mut record = LevelRecord::new();
        record.set(Field::HasFireExtinguisher, FieldValue::text("no"));
        record.set(Field::NumFireExtinguishers, FieldValue::text(""));

        apply_equipment_defaults(&mut record);
        assert_eq!(record.get(Field::NumFireExtinguishers), &FieldValue::text("0"));
    }

    #[test]
    fn test_extract_sheet_multiple_levels() {
        let mut sheet = Sheet::new("World 2");
        sheet.set(0, 0, Cell::from("World 2.1"));
        sheet.set(0, 4, Cell::from("World 2.2"));
        sheet.set(1, 1, Cell::from("Dish Washer?"));
        sheet.set(1, 2, Cell::from("yes"));
        sheet.set(1, 5, Cell::from("Mixer?"));
        sheet.set(1, 6, Cell::from("no"));

        let levels = extract_sheet(&sheet);
        assert_eq!(levels.len(), 2);

        let (key, first) = &levels[0];
        assert_eq!(*key, LevelKey::new(2, 1));
        assert_eq!(first.get(Field::DishWasher), &FieldValue::text("yes"));
        assert!(first.get(Field::NumMixers).is_missing());

        let (key, second) = &levels[1];
        assert_eq!(*key, LevelKey::new(2, 2));
        assert!(second.get(Field::DishWasher).is_missing());
        assert_eq!(second.get(Field::NumMixers), &FieldValue::text("0"));
    }
}
