use foodtracker_core::{
    FileMealArchive, InMemoryMealArchive, Meal, MealArchive, MealPhoto, MealStore, NoSeed,
    SampleMeals, SeedProvider, StoreConfig, StoreError,
};
use std::fs;

fn meal(name: &str, rating: i64) -> Meal {
    Meal::new(name, None, rating).unwrap()
}

fn names(meals: &[Meal]) -> Vec<&str> {
    meals.iter().map(|meal| meal.name()).collect()
}

#[test]
fn appended_meals_reload_in_order_from_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());

    let mut store = MealStore::open_file(&config, &NoSeed);
    assert_eq!(store.append(meal("Waffles", 4)), 0);
    assert_eq!(
        store.append(Meal::new("Curry", Some(MealPhoto::bytes(vec![9, 8, 7])), 5).unwrap()),
        1
    );
    assert_eq!(store.append(meal("Salad", 0)), 2);
    let written = store.list().to_vec();

    let reopened = MealStore::open_file(&config, &SampleMeals);
    assert_eq!(reopened.list(), written.as_slice());
    assert_eq!(names(reopened.list()), vec!["Waffles", "Curry", "Salad"]);
    assert!(config.archive_path().exists());
}

#[test]
fn save_then_load_round_trips_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let archive = FileMealArchive::new(dir.path().join("meals"));

    let mut store = MealStore::new(&archive);
    store.save().unwrap();

    assert_eq!(archive.read_meals().unwrap(), Some(Vec::new()));
    assert!(store.load().is_empty());
}

#[test]
fn saving_twice_loads_same_content() {
    let archive = InMemoryMealArchive::new();
    let mut store = MealStore::new(&archive);
    store.append(meal("Pho", 5));
    store.append(meal("Tacos", 3));

    store.save().unwrap();
    let first = store.load();
    store.save().unwrap();
    let second = store.load();

    assert_eq!(first, second);
    assert_eq!(first, store.list());
}

#[test]
fn remove_at_shifts_later_meals_down_by_one() {
    let archive = InMemoryMealArchive::new();
    let mut store = MealStore::new(&archive);
    for (index, name) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
        store.append(meal(name, index as i64));
    }
    let before = store.list().to_vec();

    let removed = store.remove_at(1).unwrap();
    assert_eq!(removed, before[1]);
    assert_eq!(store.len(), before.len() - 1);
    assert_eq!(store.list()[0], before[0]);
    for original in 2..before.len() {
        assert_eq!(store.list()[original - 1], before[original]);
    }
    assert_eq!(store.load(), store.list());
}

#[test]
fn out_of_bounds_mutations_fail_without_side_effects() {
    let archive = InMemoryMealArchive::new();
    let mut store = MealStore::new(&archive);
    store.append(meal("Only", 2));
    let artifact = archive.artifact();

    assert_eq!(
        store.remove_at(1).unwrap_err(),
        StoreError::IndexOutOfBounds { index: 1, len: 1 }
    );
    assert_eq!(
        store.replace_at(5, meal("Other", 1)).unwrap_err(),
        StoreError::IndexOutOfBounds { index: 5, len: 1 }
    );
    assert_eq!(names(store.list()), vec!["Only"]);
    assert_eq!(archive.artifact(), artifact);
}

#[test]
fn replace_at_persists_edited_meal() {
    let archive = InMemoryMealArchive::new();
    let mut store = MealStore::new(&archive);
    store.append(meal("Burger", 2));
    store.append(meal("Fries", 1));

    let edited = store.list()[0].edited("Cheeseburger", None, 4).unwrap();
    store.replace_at(0, edited.clone()).unwrap();

    let reloaded = MealStore::open(&archive, &NoSeed);
    assert_eq!(reloaded.list()[0], edited);
    assert_eq!(names(reloaded.list()), vec!["Cheeseburger", "Fries"]);
}

#[test]
fn replace_by_id_follows_meal_after_reordering() {
    let archive = InMemoryMealArchive::new();
    let mut store = MealStore::new(&archive);
    store.append(meal("First", 1));
    let target = meal("Second", 2);
    store.append(target.clone());
    store.append(meal("Third", 3));

    // Selected at index 1, then an earlier row is deleted before commit.
    store.remove_at(0).unwrap();
    let index = store
        .replace(target.edited("Second (edited)", None, 5).unwrap())
        .unwrap();

    assert_eq!(index, 0);
    assert_eq!(names(store.list()), vec!["Second (edited)", "Third"]);
    assert_eq!(store.position_of(target.id()), Some(0));

    let target_id = target.id();
    store.remove(target_id).unwrap();
    assert_eq!(names(store.list()), vec!["Third"]);
    assert_eq!(
        store.replace(target).unwrap_err(),
        StoreError::NotFound(target_id)
    );
}

#[test]
fn missing_artifact_falls_back_to_seed_meals() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("fresh"));

    let store = MealStore::open_file(&config, &SampleMeals);
    assert_eq!(store.len(), SampleMeals.seed_meals().len());
    assert_eq!(
        names(store.list()),
        vec!["Caprese Salad", "Chicken and Potatoes", "Pasta with Meatballs"]
    );
    assert!(!config.archive_path().exists());
}

#[test]
fn corrupted_artifact_loads_empty_and_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    fs::write(config.archive_path(), b"{not json").unwrap();

    let probe = MealStore::new(FileMealArchive::new(config.archive_path()));
    assert!(probe.try_load().is_err());
    assert!(probe.load().is_empty());

    let store = MealStore::open_file(&config, &SampleMeals);
    assert_eq!(store.len(), 3);
}

#[test]
fn artifact_with_invalid_entry_is_treated_as_no_data() {
    let artifact = serde_json::json!({
        "version": 1,
        "meals": [
            {"id": "11111111-2222-4333-8444-555555555555", "name": "Fine", "photo": null, "rating": 3},
            {"id": "22222222-2222-4333-8444-555555555555", "name": "Broken", "photo": null, "rating": -1}
        ]
    });
    let archive = InMemoryMealArchive::with_artifact(artifact.to_string());

    let store = MealStore::open(&archive, &NoSeed);
    assert!(store.is_empty());
}

#[test]
fn unsupported_version_is_treated_as_no_data() {
    let archive = InMemoryMealArchive::with_artifact(r#"{"version": 2, "meals": []}"#);

    let store = MealStore::open(&archive, &SampleMeals);
    assert_eq!(store.len(), 3);
}

#[test]
fn failed_write_keeps_memory_state_and_marks_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"file in the way").unwrap();
    let archive = FileMealArchive::new(blocker.join("meals"));

    let mut store = MealStore::new(archive);
    let index = store.append(meal("Unsaved", 3));

    assert_eq!(index, 0);
    assert_eq!(names(store.list()), vec!["Unsaved"]);
    assert!(store.is_dirty());
    assert!(store.save().is_err());
    assert!(store.is_dirty());
}

#[test]
fn successful_save_clears_dirty_flag() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("later");
    fs::write(&data_dir, b"temporarily a file").unwrap();
    let mut store = MealStore::new(FileMealArchive::new(data_dir.join("meals")));

    store.append(meal("Pending", 2));
    assert!(store.is_dirty());

    fs::remove_file(&data_dir).unwrap();
    store.save().unwrap();
    assert!(!store.is_dirty());
    assert_eq!(names(&store.load()), vec!["Pending"]);
}

#[test]
fn seeded_store_writes_seeds_on_first_mutation() {
    let archive = InMemoryMealArchive::new();
    let mut store = MealStore::open(&archive, &SampleMeals);
    assert!(archive.artifact().is_none());

    store.append(meal("Dessert", 5));

    let reloaded = MealStore::open(&archive, &NoSeed);
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded.list()[3].name(), "Dessert");
}
