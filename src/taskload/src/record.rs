//! Level records and their JSON form
//!
//! Output files are a JSON object keyed by level key in `(world, index)`
//! order. Each record lists every declared field, then `num_obstacles` and
//! `challenge_score`. Missing values are written as a configurable sentinel
//! string (`manual-input-needed` by default).

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::ExtractError;
use crate::field::{Field, FieldKind, FieldValue};
use crate::level::LevelKey;

/// Missing sentinel used when none is configured
pub const DEFAULT_MISSING_SENTINEL: &str = "manual-input-needed";

pub const NUM_OBSTACLES_KEY: &str = "num_obstacles";
pub const CHALLENGE_SCORE_KEY: &str = "challenge_score";

/// One level's normalized fields plus its derived values
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRecord {
    values: [FieldValue; Field::COUNT],
    pub num_obstacles: u32,
    pub challenge_score: f64,
}

impl Default for LevelRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelRecord {
    /// Fresh record: every field missing, curated fields empty
    pub fn new() -> Self {
        let values = std::array::from_fn(|i| match Field::ALL[i].kind() {
            FieldKind::Curated => FieldValue::text(""),
            _ => FieldValue::Missing,
        });
        LevelRecord {
            values,
            num_obstacles: 0,
            challenge_score: 0.0,
        }
    }

    pub fn get(&self, field: Field) -> &FieldValue {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: FieldValue) {
        self.values[field.index()] = value;
    }

    /// Iterate fields in output order
    pub fn fields(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        Field::ALL.iter().map(move |f| (*f, &self.values[f.index()]))
    }

    /// Spreadsheet-sourced fields that still need manual input
    pub fn missing_fields(&self) -> Vec<Field> {
        self.fields()
            .filter(|(f, v)| f.kind() != FieldKind::Curated && v.is_missing())
            .map(|(f, _)| f)
            .collect()
    }

    fn from_json(object: &Map<String, Value>, sentinel: &str) -> Self {
        let mut record = LevelRecord::new();

        for field in Field::ALL {
            let value = match object.get(field.name()) {
                None | Some(Value::Null) => continue,
                Some(Value::String(s)) if s == sentinel => FieldValue::Missing,
                Some(Value::String(s)) => FieldValue::text(s.as_str()),
                Some(other) => FieldValue::Text(other.to_string()),
            };
            record.set(field, value);
        }

        record.num_obstacles = object
            .get(NUM_OBSTACLES_KEY)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        record.challenge_score = object
            .get(CHALLENGE_SCORE_KEY)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        record
    }
}

/// All level records of a run, keyed and ordered by level key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSet {
    levels: BTreeMap<LevelKey, LevelRecord>,
}

impl LevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; an existing record under the same key is replaced
    pub fn insert(&mut self, key: LevelKey, record: LevelRecord) -> Option<LevelRecord> {
        self.levels.insert(key, record)
    }

    pub fn get(&self, key: &LevelKey) -> Option<&LevelRecord> {
        self.levels.get(key)
    }

    pub fn contains(&self, key: &LevelKey) -> bool {
        self.levels.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &LevelKey> {
        self.levels.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, LevelKey, LevelRecord> {
        self.levels.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, LevelKey, LevelRecord> {
        self.levels.iter_mut()
    }

    /// Pretty JSON (two-space indent, trailing newline)
    pub fn to_json_string(&self, sentinel: &str) -> Result<String, ExtractError> {
        let view = SetView {
            set: self,
            sentinel,
        };
        let mut json = serde_json::to_string_pretty(&view)?;
        json.push('\n');
        Ok(json)
    }

    /// Parse a previously written output file.
    ///
    /// Keys that are not level keys are skipped with a warning.
    pub fn from_json_str(json: &str, sentinel: &str) -> Result<Self, ExtractError> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let mut set = LevelSet::new();

        for (key, value) in &root {
            let level_key = match key.parse::<LevelKey>() {
                Ok(k) => k,
                Err(e) => {
                    warn!("Skipping entry: {}", e);
                    continue;
                }
            };
            let Value::Object(object) = value else {
                warn!("Skipping {}: not an object", key);
                continue;
            };
            for unknown in unknown_record_keys(object) {
                warn!("Dropping unknown key '{}' from {}", unknown, key);
            }
            set.insert(level_key, LevelRecord::from_json(object, sentinel));
        }

        Ok(set)
    }

    /// Load an output file; a file that does not exist yet is an empty set
    pub fn load(path: &Path, sentinel: &str) -> Result<Self, ExtractError> {
        if !path.exists() {
            return Ok(LevelSet::new());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json, sentinel)
    }

    /// Write an output file atomically (temp file, then rename)
    pub fn write(&self, path: &Path, sentinel: &str) -> Result<(), ExtractError> {
        let json = self.to_json_string(sentinel)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Keys of a stored record that are neither fields nor derived values
fn unknown_record_keys(object: &Map<String, Value>) -> Vec<&str> {
    object
        .keys()
        .map(String::as_str)
        .filter(|k| {
            *k != NUM_OBSTACLES_KEY
                && *k != CHALLENGE_SCORE_KEY
                && !Field::ALL.iter().any(|f| f.name() == *k)
        })
        .collect()
}

impl<'a> IntoIterator for &'a LevelSet {
    type Item = (&'a LevelKey, &'a LevelRecord);
    type IntoIter = btree_map::Iter<'a, LevelKey, LevelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

struct SetView<'a> {
    set: &'a LevelSet,
    sentinel: &'a str,
}

struct RecordView<'a> {
    record: &'a LevelRecord,
    sentinel: &'a str,
}

impl Serialize for SetView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.set.len()))?;
        for (key, record) in self.set {
            map.serialize_entry(
                &key.to_string(),
                &RecordView {
                    record,
                    sentinel: self.sentinel,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT + 2))?;
        for (field, value) in self.record.fields() {
            map.serialize_entry(field.name(), value.as_str().unwrap_or(self.sentinel))?;
        }
        map.serialize_entry(NUM_OBSTACLES_KEY, &self.record.num_obstacles)?;

        let score = self.record.challenge_score;
        if score.fract() == 0.0 && score.abs() < 1e15 {
            map.serialize_entry(CHALLENGE_SCORE_KEY, &(score as i64))?;
        } else {
            map.serialize_entry(CHALLENGE_SCORE_KEY, &score)?;
        }
        map.end()
    }
}
