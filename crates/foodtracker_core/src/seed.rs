//! Default meals for a first launch.

use crate::model::meal::{Meal, MealPhoto, MealValidationError};

/// Source of the meals shown when no saved list exists.
pub trait SeedProvider {
    fn seed_meals(&self) -> Vec<Meal>;
}

/// Seeds nothing; the store starts empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeed;

impl SeedProvider for NoSeed {
    fn seed_meals(&self) -> Vec<Meal> {
        Vec::new()
    }
}

/// The three bundled sample meals. Photos are named UI assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleMeals;

const SAMPLE_MEALS: &[(&str, &str, i64)] = &[
    ("Caprese Salad", "meal1", 4),
    ("Chicken and Potatoes", "meal2", 5),
    ("Pasta with Meatballs", "meal3", 3),
];

impl SampleMeals {
    /// Builds the sample list, surfacing any entry that fails validation.
    pub fn try_build() -> Result<Vec<Meal>, MealValidationError> {
        SAMPLE_MEALS
            .iter()
            .map(|(name, photo, rating)| {
                Meal::new(*name, Some(MealPhoto::resource(*photo)), *rating)
            })
            .collect()
    }
}

impl SeedProvider for SampleMeals {
    fn seed_meals(&self) -> Vec<Meal> {
        match Self::try_build() {
            Ok(meals) => meals,
            Err(err) => {
                log::error!(
                    "event=store_seed module=seed status=error error_code=invalid_sample error={err}"
                );
                Vec::new()
            }
        }
    }
}
