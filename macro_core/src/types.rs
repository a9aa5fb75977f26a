//! Core domain types for macro allocation.
//!
//! This module defines:
//! - The three macro-nutrients and their energy density
//! - Percentage targets and the allocation inputs
//! - Calorie target resolution (direct figure or TDEE minus a deficit)
//! - Allocation results

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Macro-nutrients
// ============================================================================

/// Energy density of fat (kcal per gram)
pub const FAT_CALORIES_PER_GRAM: i64 = 9;

/// Energy density of protein (kcal per gram)
pub const PROTEIN_CALORIES_PER_GRAM: i64 = 4;

/// Energy density of carbohydrate (kcal per gram)
pub const CARB_CALORIES_PER_GRAM: i64 = 4;

/// Calorie figure allocated against when only a non-positive TDEE was given
pub const UNSET_CALORIES: i64 = -1;

/// One of the three macro-nutrients
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Macro {
    Fat,
    Protein,
    Carbs,
}

impl Macro {
    /// Display order used by every report format
    pub const ALL: [Macro; 3] = [Macro::Fat, Macro::Protein, Macro::Carbs];

    pub fn calories_per_gram(self) -> i64 {
        match self {
            Macro::Fat => FAT_CALORIES_PER_GRAM,
            Macro::Protein => PROTEIN_CALORIES_PER_GRAM,
            Macro::Carbs => CARB_CALORIES_PER_GRAM,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Macro::Fat => "Fat",
            Macro::Protein => "Protein",
            Macro::Carbs => "Carbs",
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Percentage split between the macros.
///
/// The values are intended to sum to 100 but nothing enforces it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroPercentages {
    pub carbs: i64,
    pub protein: i64,
    pub fat: i64,
}

impl MacroPercentages {
    pub fn new(carbs: i64, protein: i64, fat: i64) -> Self {
        Self {
            carbs,
            protein,
            fat,
        }
    }

    pub fn total(&self) -> i64 {
        self.carbs.wrapping_add(self.protein).wrapping_add(self.fat)
    }
}

impl Default for MacroPercentages {
    fn default() -> Self {
        Self::new(10, 30, 60)
    }
}

/// Inputs to a single macro calculation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroConfig {
    pub percentages: MacroPercentages,

    /// Absolute gram ceiling on carbohydrates; only values > 0 take effect
    pub hard_carb_limit: Option<i64>,

    pub percent_deficit: i64,
    pub calories: Option<i64>,
    pub tdee: Option<i64>,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            percentages: MacroPercentages::default(),
            hard_carb_limit: None,
            percent_deficit: 20,
            calories: None,
            tdee: None,
        }
    }
}

impl MacroConfig {
    /// Resolve the calorie figure this configuration allocates against
    pub fn calorie_target(&self) -> Result<CalorieTarget> {
        CalorieTarget::resolve(self.calories, self.tdee, self.percent_deficit)
    }

    /// Carb limit that actually applies, if any
    pub fn effective_carb_limit(&self) -> Option<i64> {
        self.hard_carb_limit.filter(|limit| *limit > 0)
    }
}

/// Where the daily calorie figure came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalorieTarget {
    /// Calories supplied directly
    Direct(i64),

    /// Calories derived from TDEE minus a percentage deficit
    FromTdee {
        tdee: i64,
        percent_deficit: i64,
        calories: i64,
    },
}

impl CalorieTarget {
    /// Pick the calorie target from the optional inputs.
    ///
    /// A positive TDEE takes precedence over a direct calorie figure. A TDEE
    /// that is set but not positive is ignored, leaving the calorie figure
    /// (or [`UNSET_CALORIES`]) in place. Only both inputs missing is an error.
    pub fn resolve(calories: Option<i64>, tdee: Option<i64>, percent_deficit: i64) -> Result<Self> {
        match (calories, tdee) {
            (None, None) => Err(Error::MissingCalorieTarget),
            (_, Some(tdee)) if tdee > 0 => Ok(CalorieTarget::FromTdee {
                tdee,
                percent_deficit,
                calories: calories_from_tdee(tdee, percent_deficit),
            }),
            (calories, _) => Ok(CalorieTarget::Direct(calories.unwrap_or(UNSET_CALORIES))),
        }
    }

    pub fn calories(&self) -> i64 {
        match *self {
            CalorieTarget::Direct(calories) => calories,
            CalorieTarget::FromTdee { calories, .. } => calories,
        }
    }
}

/// Apply a percentage deficit to a TDEE.
///
/// Out-of-range inputs wrap rather than panic.
pub fn calories_from_tdee(tdee: i64, percent_deficit: i64) -> i64 {
    tdee.wrapping_mul(100i64.wrapping_sub(percent_deficit)) / 100
}

// ============================================================================
// Results
// ============================================================================

/// Grams and calories allotted to one macro
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MacroAmount {
    pub grams: i64,
    pub calories: i64,
}

/// Grams and calories for every macro
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MacroResult {
    pub fat: MacroAmount,
    pub protein: MacroAmount,
    pub carbs: MacroAmount,
}

impl MacroResult {
    pub fn get(&self, kind: Macro) -> MacroAmount {
        match kind {
            Macro::Fat => self.fat,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
        }
    }

    pub fn total_calories(&self) -> i64 {
        self.fat
            .calories
            .wrapping_add(self.protein.calories)
            .wrapping_add(self.carbs.calories)
    }
}

/// Outcome of allocating a calorie target across the macros
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub calories: i64,
    pub macros: MacroResult,

    /// Percentages after any carb-limit rebalancing
    pub percentages: MacroPercentages,

    pub carb_limit_applied: bool,
}

impl Allocation {
    /// Share of the calorie target actually delivered by a macro
    pub fn calorie_share(&self, kind: Macro) -> f64 {
        self.macros.get(kind).calories.wrapping_mul(100) as f64 / self.calories as f64
    }
}
