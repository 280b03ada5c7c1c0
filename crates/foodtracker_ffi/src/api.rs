//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level meal functions to Dart via FRB.
//! - Own the single process-wide meal store behind a lock.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Meals are addressed by stable ID strings, never by list position.
//! - Storage location is fixed at first store access.

use foodtracker_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FileMealArchive, Meal, MealId, MealPhoto, MealStore, RatingControl, SampleMeals, StoreConfig,
};
use log::error;
use once_cell::sync::OnceCell;
use std::sync::Mutex;
use uuid::Uuid;

static STORE_CONFIG: OnceCell<StoreConfig> = OnceCell::new();
static MEAL_STORE: OnceCell<Mutex<MealStore<FileMealArchive>>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Points the meal store at the app documents directory.
///
/// # FFI contract
/// - Must be called before the first meal call to take effect.
/// - Repeating the same directory is a no-op.
/// - Returns empty string on success and error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_storage(data_dir: String) -> String {
    let trimmed = data_dir.trim();
    if trimmed.is_empty() {
        return "data_dir cannot be empty".to_string();
    }
    let requested = StoreConfig::new(trimmed);
    let active = STORE_CONFIG.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "storage already configured at `{}`; refusing to switch to `{}`",
            active.data_dir().display(),
            requested.data_dir().display()
        );
    }
    String::new()
}

/// One meal row for list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealItem {
    /// Stable meal ID in string form.
    pub meal_id: String,
    pub name: String,
    /// Inline photo bytes picked by the user.
    pub photo_bytes: Option<Vec<u8>>,
    /// Bundled asset name (sample meals).
    pub photo_resource: Option<String>,
    /// Star count in `0..=5`.
    pub rating: u8,
}

/// Meal list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealListResponse {
    /// Meals in display order.
    pub items: Vec<MealItem>,
    /// Whether in-memory meals are ahead of storage after a failed write.
    pub unsaved: bool,
    pub message: String,
}

/// Generic action response envelope for meal mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected meal ID.
    pub meal_id: Option<String>,
    /// Row index of the affected meal after the operation, when it is still listed.
    pub index: Option<u32>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl MealActionResponse {
    fn success(message: impl Into<String>, meal_id: MealId, index: Option<usize>) -> Self {
        Self {
            ok: true,
            meal_id: Some(meal_id.to_string()),
            index: index.and_then(|value| u32::try_from(value).ok()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            meal_id: None,
            index: None,
            message: message.into(),
        }
    }
}

/// Result of a star tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingTapResponse {
    pub ok: bool,
    /// Rating after the tap (unchanged on failure).
    pub rating: u8,
    /// Filled flag per star, left to right.
    pub star_states: Vec<bool>,
    pub message: String,
}

/// Lists all meals, hydrating the store on first use.
///
/// # FFI contract
/// - Sync call, file-backed on first use.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn meals_list() -> MealListResponse {
    let snapshot = with_store(|store| {
        let items = store.list().iter().map(to_meal_item).collect::<Vec<_>>();
        (items, store.is_dirty())
    });
    match snapshot {
        Ok((items, unsaved)) => MealListResponse {
            message: format!("{} meal(s).", items.len()),
            items,
            unsaved,
        },
        Err(err) => MealListResponse {
            items: Vec::new(),
            unsaved: false,
            message: format!("meals_list failed: {err}"),
        },
    }
}

/// Validates and appends a new meal.
///
/// # FFI contract
/// - Rejects empty names and ratings outside `0..=5` without touching storage.
/// - Returns created meal ID and its row index on success.
#[flutter_rust_bridge::frb(sync)]
pub fn meal_add(name: String, photo: Option<Vec<u8>>, rating: i64) -> MealActionResponse {
    let meal = match Meal::new(name, photo.map(MealPhoto::bytes), rating) {
        Ok(meal) => meal,
        Err(err) => return MealActionResponse::failure(format!("meal_add failed: {err}")),
    };
    let meal_id = meal.id();
    match with_store(|store| store.append(meal)) {
        Ok(index) => MealActionResponse::success("Meal added.", meal_id, Some(index)),
        Err(err) => MealActionResponse::failure(format!("meal_add failed: {err}")),
    }
}

/// Replaces an existing meal's fields.
///
/// `photo = None` keeps the current photo.
#[flutter_rust_bridge::frb(sync)]
pub fn meal_update(
    meal_id: String,
    name: String,
    photo: Option<Vec<u8>>,
    rating: i64,
) -> MealActionResponse {
    let id = match parse_meal_id(&meal_id) {
        Ok(id) => id,
        Err(err) => return MealActionResponse::failure(format!("meal_update failed: {err}")),
    };
    let result = with_store(|store| -> Result<usize, String> {
        let index = store
            .position_of(id)
            .ok_or_else(|| format!("meal not found: {id}"))?;
        let current = &store.list()[index];
        let photo = match photo {
            Some(bytes) => Some(MealPhoto::bytes(bytes)),
            None => current.photo().cloned(),
        };
        let edited = current
            .edited(name, photo, rating)
            .map_err(|err| err.to_string())?;
        store.replace(edited).map_err(|err| err.to_string())
    });
    match result.and_then(|inner| inner) {
        Ok(index) => MealActionResponse::success("Meal updated.", id, Some(index)),
        Err(err) => MealActionResponse::failure(format!("meal_update failed: {err}")),
    }
}

/// Deletes a meal by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn meal_delete(meal_id: String) -> MealActionResponse {
    let id = match parse_meal_id(&meal_id) {
        Ok(id) => id,
        Err(err) => return MealActionResponse::failure(format!("meal_delete failed: {err}")),
    };
    match with_store(|store| store.remove(id).map_err(|err| err.to_string())).and_then(|inner| inner)
    {
        Ok(_) => MealActionResponse::success("Meal deleted.", id, None),
        Err(err) => MealActionResponse::failure(format!("meal_delete failed: {err}")),
    }
}

/// Applies a star tap (1-based `position`) to `current` rating.
#[flutter_rust_bridge::frb(sync)]
pub fn rating_tap(star_count: u8, current: u8, position: u8) -> RatingTapResponse {
    let mut control = RatingControl::new(star_count);
    control.set_rating(current);
    match control.tap(position) {
        Ok(rating) => RatingTapResponse {
            ok: true,
            rating,
            star_states: control.star_states(),
            message: String::new(),
        },
        Err(err) => RatingTapResponse {
            ok: false,
            rating: control.rating(),
            star_states: control.star_states(),
            message: format!("rating_tap failed: {err}"),
        },
    }
}

fn store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(StoreConfig::from_env)
}

fn with_store<T>(f: impl FnOnce(&mut MealStore<FileMealArchive>) -> T) -> Result<T, String> {
    let store = MEAL_STORE
        .get_or_init(|| Mutex::new(MealStore::open_file(store_config(), &SampleMeals)));
    let mut guard = store.lock().map_err(|_| {
        error!("event=ffi_store module=ffi status=error error_code=lock_poisoned");
        "meal store lock poisoned".to_string()
    })?;
    Ok(f(&mut guard))
}

fn parse_meal_id(raw: &str) -> Result<MealId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid meal id `{raw}`"))
}

fn to_meal_item(meal: &Meal) -> MealItem {
    MealItem {
        meal_id: meal.id().to_string(),
        name: meal.name().to_string(),
        photo_bytes: meal.photo().and_then(|photo| photo.as_bytes()).map(<[u8]>::to_vec),
        photo_resource: meal
            .photo()
            .and_then(|photo| photo.resource_name())
            .map(str::to_string),
        rating: meal.rating(),
    }
}
