//! Core domain logic for FoodTracker.
//! This crate is the single source of truth for meal invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod rating;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::meal::{Meal, MealId, MealPhoto, MealValidationError, MAX_RATING, MIN_RATING};
pub use rating::{RatingControl, RatingError, DEFAULT_STAR_COUNT};
pub use repo::meal_archive::{
    ArchiveError, ArchiveResult, FileMealArchive, InMemoryMealArchive, MealArchive,
};
pub use seed::{NoSeed, SampleMeals, SeedProvider};
pub use service::meal_store::{MealStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
