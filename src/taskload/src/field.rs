//! Level record fields and the spreadsheet label table
//!
//! The label table is the contract with the source workbook: each label in
//! a level's field-label column maps to exactly one canonical output field.

use std::fmt;

/// How a raw cell is normalized for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Game time stored as `h:mm:ss` where hours are minutes
    Duration,
    YesNo,
    Numeric,
    FreeText,
    /// Never read from the spreadsheet; carried across runs
    Curated,
}

/// Every field of a level record, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    TimeToComplete,
    StartAtGo,
    FixedEnvironment,
    RecipeOrderFixed,
    VariationChangesAtomic,
    CompositeNum,
    VariationNum,
    DishWasher,
    OneStarScore,
    TwoStarScore,
    ThreeStarScore,
    NumDishes,
    HasFireExtinguisher,
    NumFireExtinguishers,
    HasMixer,
    NumMixers,
    HasOven,
    NumOvens,
    HasFryer,
    NumFryers,
    TipMultiplier,
    MaxTipMultiplier,
    FailedOrderPenalty,
    Notes,
    VideoLink,
}

impl Field {
    pub const COUNT: usize = 25;

    pub const ALL: [Field; Field::COUNT] = [
        Field::TimeToComplete,
        Field::StartAtGo,
        Field::FixedEnvironment,
        Field::RecipeOrderFixed,
        Field::VariationChangesAtomic,
        Field::CompositeNum,
        Field::VariationNum,
        Field::DishWasher,
        Field::OneStarScore,
        Field::TwoStarScore,
        Field::ThreeStarScore,
        Field::NumDishes,
        Field::HasFireExtinguisher,
        Field::NumFireExtinguishers,
        Field::HasMixer,
        Field::NumMixers,
        Field::HasOven,
        Field::NumOvens,
        Field::HasFryer,
        Field::NumFryers,
        Field::TipMultiplier,
        Field::MaxTipMultiplier,
        Field::FailedOrderPenalty,
        Field::Notes,
        Field::VideoLink,
    ];

    /// Output key
    pub fn name(self) -> &'static str {
        match self {
            Field::TimeToComplete => "time_to_complete",
            Field::StartAtGo => "start_at_go",
            Field::FixedEnvironment => "fixed_environment",
            Field::RecipeOrderFixed => "recipe_order_fixed",
            Field::VariationChangesAtomic => "variation_changes_atomic",
            Field::CompositeNum => "composite_num",
            Field::VariationNum => "variation_num",
            Field::DishWasher => "dish_washer",
            Field::OneStarScore => "one_star_score",
            Field::TwoStarScore => "two_star_score",
            Field::ThreeStarScore => "three_star_score",
            Field::NumDishes => "num_dishes",
            Field::HasFireExtinguisher => "has_fire_extinguisher",
            Field::NumFireExtinguishers => "num_fire_extinguishers",
            Field::HasMixer => "has_mixer",
            Field::NumMixers => "num_mixers",
            Field::HasOven => "has_oven",
            Field::NumOvens => "num_ovens",
            Field::HasFryer => "has_fryer",
            Field::NumFryers => "num_fryers",
            Field::TipMultiplier => "tip_multiplier",
            Field::MaxTipMultiplier => "max_tip_multiplier",
            Field::FailedOrderPenalty => "failed_order_penalty",
            Field::Notes => "notes",
            Field::VideoLink => "video_link",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::TimeToComplete => FieldKind::Duration,
            Field::StartAtGo
            | Field::FixedEnvironment
            | Field::RecipeOrderFixed
            | Field::VariationChangesAtomic
            | Field::DishWasher
            | Field::HasFireExtinguisher
            | Field::HasMixer
            | Field::HasOven
            | Field::HasFryer => FieldKind::YesNo,
            Field::CompositeNum
            | Field::VariationNum
            | Field::OneStarScore
            | Field::TwoStarScore
            | Field::ThreeStarScore
            | Field::NumDishes
            | Field::NumFireExtinguishers
            | Field::NumMixers
            | Field::NumOvens
            | Field::NumFryers
            | Field::TipMultiplier
            | Field::MaxTipMultiplier => FieldKind::Numeric,
            Field::FailedOrderPenalty | Field::Notes => FieldKind::FreeText,
            Field::VideoLink => FieldKind::Curated,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a recognized label feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTarget {
    Field(Field),
    /// `Number of Recipes`: composite count plus optional variation count
    CompositeRecipe,
}

/// One row of the label table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabel {
    pub label: &'static str,
    pub target: LabelTarget,
}

/// Recognized field labels, matched exactly after trimming
pub const FIELD_LABELS: &[FieldLabel] = &[
    FieldLabel {
        label: "Level Time (mm:ss)",
        target: LabelTarget::Field(Field::TimeToComplete),
    },
    FieldLabel {
        label: "Does Clock start at \"Go\" ?",
        target: LabelTarget::Field(Field::StartAtGo),
    },
    FieldLabel {
        label: "Is Environment Fixed?",
        target: LabelTarget::Field(Field::FixedEnvironment),
    },
    FieldLabel {
        label: "Is Recipe Order Fixed?",
        target: LabelTarget::Field(Field::RecipeOrderFixed),
    },
    FieldLabel {
        label: "Do Variations Change Atomic Challenges?",
        target: LabelTarget::Field(Field::VariationChangesAtomic),
    },
    FieldLabel {
        label: "Number of Recipes",
        target: LabelTarget::CompositeRecipe,
    },
    FieldLabel {
        label: "Dish Washer?",
        target: LabelTarget::Field(Field::DishWasher),
    },
    FieldLabel {
        label: "Score for 1 Star (2 Players)",
        target: LabelTarget::Field(Field::OneStarScore),
    },
    FieldLabel {
        label: "Score for 2 Stars (2 Players)",
        target: LabelTarget::Field(Field::TwoStarScore),
    },
    FieldLabel {
        label: "Score for 3 Stars (2 Players)",
        target: LabelTarget::Field(Field::ThreeStarScore),
    },
    FieldLabel {
        label: "Number of Dishes",
        target: LabelTarget::Field(Field::NumDishes),
    },
    FieldLabel {
        label: "Fire Extinguisher?",
        target: LabelTarget::Field(Field::HasFireExtinguisher),
    },
    FieldLabel {
        label: "Number of Fire Extinguishers",
        target: LabelTarget::Field(Field::NumFireExtinguishers),
    },
    FieldLabel {
        label: "Mixer?",
        target: LabelTarget::Field(Field::HasMixer),
    },
    FieldLabel {
        label: "Number of Mixers",
        target: LabelTarget::Field(Field::NumMixers),
    },
    FieldLabel {
        label: "Oven?",
        target: LabelTarget::Field(Field::HasOven),
    },
    FieldLabel {
        label: "Number of Ovens",
        target: LabelTarget::Field(Field::NumOvens),
    },
    FieldLabel {
        label: "Fryer?",
        target: LabelTarget::Field(Field::HasFryer),
    },
    FieldLabel {
        label: "Number of Fryers",
        target: LabelTarget::Field(Field::NumFryers),
    },
    FieldLabel {
        label: "Tip Multiplier",
        target: LabelTarget::Field(Field::TipMultiplier),
    },
    FieldLabel {
        label: "Max Tip Multiplier",
        target: LabelTarget::Field(Field::MaxTipMultiplier),
    },
    FieldLabel {
        label: "Failed Order Penalty",
        target: LabelTarget::Field(Field::FailedOrderPenalty),
    },
    FieldLabel {
        label: "Notes",
        target: LabelTarget::Field(Field::Notes),
    },
];

/// Equipment flag → count pairs backfilled to zero when the flag is "no"
pub const EQUIPMENT_PAIRS: &[(Field, Field)] = &[
    (Field::HasFireExtinguisher, Field::NumFireExtinguishers),
    (Field::HasMixer, Field::NumMixers),
    (Field::HasOven, Field::NumOvens),
    (Field::HasFryer, Field::NumFryers),
];

/// Find the target for a (trimmed) label
pub fn target_for_label(label: &str) -> Option<LabelTarget> {
    FIELD_LABELS
        .iter()
        .find(|l| l.label == label)
        .map(|l| l.target)
}

/// A field's value: absent, or present as canonical text
///
/// `Missing`, `Text("")` and `Text("0")` are three different states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Missing,
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Missing or present-but-empty
    pub fn is_unset(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Text(s) => s.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Missing => None,
            FieldValue::Text(s) => Some(s),
        }
    }
}
