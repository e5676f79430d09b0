//! Challenge score
//!
//! ```text
//! score = start_at_go
//!       + round_half_even(one_star_score / 100)
//!       + dish_washer
//!       + 2 * composite_num
//!       + variation_num
//!       + variation_extra        (variation_num when variations change atomic challenges)
//!       + num_obstacles
//!       + fixed_environment
//!       + fixed_env_extra        (1 when both environment and recipe order are fixed)
//! ```
//!
//! Missing numbers count as 0 and yes/no flags count as 1/0 with missing
//! treated as "no". The star-score term rounds half to even, so 250 points
//! contribute 2 and 350 points contribute 4.

use serde::Serialize;

use crate::field::Field;
use crate::record::{LevelRecord, LevelSet};

/// Each term of a level's challenge score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub start_at_go: f64,
    pub one_star: f64,
    pub dish_washer: f64,
    pub composite: f64,
    pub variations: f64,
    pub variation_extra: f64,
    pub obstacles: f64,
    pub fixed_environment: f64,
    pub fixed_env_extra: f64,
}

impl ScoreBreakdown {
    pub fn for_record(record: &LevelRecord) -> Self {
        let fixed_environment = flag(record, Field::FixedEnvironment);
        let variations = number(record, Field::VariationNum);

        let variation_extra = if flag(record, Field::VariationChangesAtomic) == 1.0 {
            variations
        } else {
            0.0
        };
        let fixed_env_extra =
            if fixed_environment == 1.0 && flag(record, Field::RecipeOrderFixed) == 1.0 {
                1.0
            } else {
                0.0
            };

        ScoreBreakdown {
            start_at_go: flag(record, Field::StartAtGo),
            one_star: (number(record, Field::OneStarScore) / 100.0).round_ties_even(),
            dish_washer: flag(record, Field::DishWasher),
            composite: 2.0 * number(record, Field::CompositeNum),
            variations,
            variation_extra,
            obstacles: f64::from(record.num_obstacles),
            fixed_environment,
            fixed_env_extra,
        }
    }

    pub fn total(&self) -> f64 {
        self.start_at_go
            + self.one_star
            + self.dish_washer
            + self.composite
            + self.variations
            + self.variation_extra
            + self.obstacles
            + self.fixed_environment
            + self.fixed_env_extra
    }

    /// (label, points) pairs for display
    pub fn terms(&self) -> [(&'static str, f64); 9] {
        [
            ("Clock starts at \"Go\"", self.start_at_go),
            ("Score for one star / 100", self.one_star),
            ("Dish washer", self.dish_washer),
            ("Composite challenges x2", self.composite),
            ("Composite variations", self.variations),
            ("Variations changing atomic challenges", self.variation_extra),
            ("Obstacles", self.obstacles),
            ("Fixed environment", self.fixed_environment),
            ("Fixed environment and recipe order", self.fixed_env_extra),
        ]
    }
}

fn flag(record: &LevelRecord, field: Field) -> f64 {
    match record.get(field).as_str() {
        Some(v) if v.eq_ignore_ascii_case("yes") => 1.0,
        _ => 0.0,
    }
}

fn number(record: &LevelRecord, field: Field) -> f64 {
    record
        .get(field)
        .as_str()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Challenge score of one record
pub fn challenge_score(record: &LevelRecord) -> f64 {
    ScoreBreakdown::for_record(record).total()
}

/// Recompute `challenge_score` on every record
pub fn apply_scores(levels: &mut LevelSet) {
    for (_, record) in levels.iter_mut() {
        record.challenge_score = challenge_score(record);
    }
}
