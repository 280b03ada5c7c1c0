//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `foodtracker_core` linkage.
//! - Print the meal list from the configured data directory.

use foodtracker_core::rating::is_star_filled;
use foodtracker_core::{MealStore, SampleMeals, StoreConfig, DEFAULT_STAR_COUNT};

fn main() {
    println!("foodtracker_core ping={}", foodtracker_core::ping());
    println!("foodtracker_core version={}", foodtracker_core::core_version());

    // Read-only probe: seeds are shown but never written from here.
    let config = StoreConfig::from_env();
    let store = MealStore::open_file(&config, &SampleMeals);
    println!(
        "meals path={} count={}",
        config.archive_path().display(),
        store.len()
    );
    for (index, meal) in store.list().iter().enumerate() {
        println!("{index:>3} {} {}", stars(meal.rating()), meal.name());
    }
}

fn stars(rating: u8) -> String {
    (0..DEFAULT_STAR_COUNT)
        .map(|index| if is_star_filled(index, rating) { '*' } else { '.' })
        .collect()
}
