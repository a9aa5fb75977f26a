//! Macro allocation.
//!
//! Splits a daily calorie target into fat, protein and carbohydrate grams:
//! - Carbs and protein come from their percentage of the target
//! - A hard carb limit clamps carb grams and moves the surplus percentage to protein
//! - Fat is the residual, so calories always add up to the target
//!
//! Products wrap on overflow instead of panicking, so any integer input
//! yields a result.

use crate::{
    Allocation, Macro, MacroAmount, MacroConfig, MacroPercentages, MacroResult,
    CARB_CALORIES_PER_GRAM, FAT_CALORIES_PER_GRAM, PROTEIN_CALORIES_PER_GRAM,
};

/// Grams of a macro that `percent` of `calories` buys
fn grams_for_percent(kind: Macro, percent: i64, calories: i64) -> i64 {
    percent.wrapping_mul(calories) / (100 * kind.calories_per_gram())
}

/// Allocate `calories` across the macros.
///
/// ## Carb limit
///
/// When the configured limit is positive and the percentage-derived carb grams
/// exceed it, carbs are clamped to the limit. The percentage the clamped grams
/// represent replaces the carb percentage and the difference is added to the
/// protein percentage. The fat percentage is never reconciled.
///
/// The input is not modified; the adjusted percentages are returned in the
/// [`Allocation`].
pub fn allocate(config: &MacroConfig, calories: i64) -> Allocation {
    let mut percentages = config.percentages;
    let mut carb_limit_applied = false;

    let mut carb_grams = grams_for_percent(Macro::Carbs, percentages.carbs, calories);

    if let Some(limit) = config.effective_carb_limit() {
        if carb_grams > limit {
            carb_grams = limit;
            percentages = rebalance_for_carb_limit(percentages, limit, calories);
            carb_limit_applied = true;

            tracing::info!(
                "Carb limit of {}g applied: carbs {}% -> {}%, protein {}% -> {}%",
                limit,
                config.percentages.carbs,
                percentages.carbs,
                config.percentages.protein,
                percentages.protein
            );
        }
    }

    let carb_calories = carb_grams.wrapping_mul(CARB_CALORIES_PER_GRAM);

    let protein_grams =
        grams_for_percent(Macro::Protein, percentages.protein, calories);
    let protein_calories = protein_grams.wrapping_mul(PROTEIN_CALORIES_PER_GRAM);

    let fat_calories = calories
        .wrapping_sub(carb_calories)
        .wrapping_sub(protein_calories);
    let fat_grams = fat_calories / FAT_CALORIES_PER_GRAM;

    let macros = MacroResult {
        fat: MacroAmount {
            grams: fat_grams,
            calories: fat_calories,
        },
        protein: MacroAmount {
            grams: protein_grams,
            calories: protein_calories,
        },
        carbs: MacroAmount {
            grams: carb_grams,
            calories: carb_calories,
        },
    };

    tracing::debug!("Allocated {} kcal: {:?}", calories, macros);

    Allocation {
        calories,
        macros,
        percentages,
        carb_limit_applied,
    }
}

/// Move the carb percentage freed by a clamp over to protein.
///
/// Only called with a non-zero `calories`: the clamp requires carb grams above
/// a positive limit, which a zero target never produces.
fn rebalance_for_carb_limit(
    percentages: MacroPercentages,
    limit_grams: i64,
    calories: i64,
) -> MacroPercentages {
    let new_carb_pct = limit_grams
        .wrapping_mul(CARB_CALORIES_PER_GRAM * 100)
        .wrapping_div(calories);
    let diff = percentages.carbs.wrapping_sub(new_carb_pct);

    MacroPercentages {
        carbs: new_carb_pct,
        protein: percentages.protein.wrapping_add(diff),
        fat: percentages.fat,
    }
}
