//! Carry curated fields forward from a previous output

use crate::field::{Field, FieldKind};
use crate::record::LevelSet;

/// Copy curated values (e.g. `video_link`) from `prior` into `fresh`.
///
/// A fresh record only takes the prior value when its own value is missing
/// or empty. Levels that exist only in `prior` are not added.
/// Returns the number of values carried over.
pub fn merge_curated(fresh: &mut LevelSet, prior: &LevelSet) -> usize {
    let curated: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|f| f.kind() == FieldKind::Curated)
        .collect();

    let mut carried = 0;
    for (key, record) in fresh.iter_mut() {
        let Some(previous) = prior.get(key) else {
            continue;
        };

        for &field in &curated {
            if record.get(field).is_unset() && !previous.get(field).is_unset() {
                record.set(field, previous.get(field).clone());
                carried += 1;
            }
        }
    }
    carried
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use crate::level::LevelKey;
    use crate::record::LevelRecord;

    fn with_link(link: &str) -> LevelRecord {
        let mut record = LevelRecord::new();
        record.set(Field::VideoLink, FieldValue::text(link));
        record
    }

    #[test]
    fn test_empty_fresh_takes_prior() {
        let key = LevelKey::new(1, 1);
        let mut fresh = LevelSet::new();
        fresh.insert(key, LevelRecord::new());
        let mut prior = LevelSet::new();
        prior.insert(key, with_link("https://example.com/1-1"));

        assert_eq!(merge_curated(&mut fresh, &prior), 1);
        assert_eq!(
            fresh.get(&key).unwrap().get(Field::VideoLink),
            &FieldValue::text("https://example.com/1-1")
        );
    }

    #[test]
    fn test_non_empty_fresh_wins() {
        let key = LevelKey::new(1, 1);
        let mut fresh = LevelSet::new();
        fresh.insert(key, with_link("https://example.com/new"));
        let mut prior = LevelSet::new();
        prior.insert(key, with_link("https://example.com/old"));

        assert_eq!(merge_curated(&mut fresh, &prior), 0);
        assert_eq!(
            fresh.get(&key).unwrap().get(Field::VideoLink),
            &FieldValue::text("https://example.com/new")
        );
    }

    #[test]
    fn test_only_curated_fields_are_taken() {
        let key = LevelKey::new(2, 4);
        let mut fresh = LevelSet::new();
        fresh.insert(key, LevelRecord::new());

        let mut old = with_link("https://example.com/2-4");
        old.set(Field::Notes, FieldValue::text("stale note"));
        old.num_obstacles = 9;
        let mut prior = LevelSet::new();
        prior.insert(key, old);

        merge_curated(&mut fresh, &prior);
        let merged = fresh.get(&key).unwrap();
        assert!(merged.get(Field::Notes).is_missing());
        assert_eq!(merged.num_obstacles, 0);
    }

    #[test]
    fn test_prior_only_levels_dropped() {
        let mut fresh = LevelSet::new();
        fresh.insert(LevelKey::new(1, 1), LevelRecord::new());
        let mut prior = LevelSet::new();
        prior.insert(LevelKey::new(5, 5), with_link("https://example.com/5-5"));

        merge_curated(&mut fresh, &prior);
        assert_eq!(fresh.len(), 1);
        assert!(!fresh.contains(&LevelKey::new(5, 5)));
    }
}
