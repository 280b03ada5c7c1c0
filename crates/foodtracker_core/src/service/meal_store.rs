//! Meal list use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory meal list for one controlling context.
//! - Write the full list through the archive after every mutation.
//! - Bootstrap from the archive, falling back to seed meals.
//!
//! # Invariants
//! - List order is insertion order and survives save/load unchanged.
//! - A failed write never rolls back in-memory state; it marks the store dirty
//!   until the next successful save.
//! - Loading never fails: unreadable artifacts degrade to an empty list.

use crate::config::StoreConfig;
use crate::model::meal::{Meal, MealId};
use crate::repo::meal_archive::{ArchiveResult, FileMealArchive, MealArchive};
use crate::seed::SeedProvider;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for list mutations addressing a missing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfBounds { index: usize, len: usize },
    NotFound(MealId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "meal index {index} is out of bounds for {len} meal(s)")
            }
            Self::NotFound(id) => write!(f, "meal not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Ordered, persisted collection of meals.
pub struct MealStore<A: MealArchive> {
    archive: A,
    meals: Vec<Meal>,
    dirty: bool,
}

impl MealStore<FileMealArchive> {
    /// Opens the file-backed store at the configured location.
    pub fn open_file(config: &StoreConfig, seeds: &impl SeedProvider) -> Self {
        Self::open(FileMealArchive::new(config.archive_path()), seeds)
    }
}

impl<A: MealArchive> MealStore<A> {
    /// Creates an empty store without reading the archive.
    pub fn new(archive: A) -> Self {
        Self {
            archive,
            meals: Vec::new(),
            dirty: false,
        }
    }

    /// Hydrates a store from `archive`, seeding when nothing usable was saved.
    ///
    /// Seed meals stay in memory only until the first mutation writes the
    /// list.
    pub fn open(archive: A, seeds: &impl SeedProvider) -> Self {
        let mut store = Self::new(archive);
        store.meals = store.load();
        if store.meals.is_empty() {
            store.meals = seeds.seed_meals();
            info!(
                "event=store_seed module=store status=ok count={}",
                store.meals.len()
            );
        }
        store
    }

    /// Current meals in display order.
    pub fn list(&self) -> &[Meal] {
        &self.meals
    }

    pub fn get(&self, index: usize) -> Option<&Meal> {
        self.meals.get(index)
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Current position of the meal with `id`.
    pub fn position_of(&self, id: MealId) -> Option<usize> {
        self.meals.iter().position(|meal| meal.id() == id)
    }

    /// Whether the last write attempt failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    /// Appends `meal` and returns its index.
    pub fn append(&mut self, meal: Meal) -> usize {
        self.meals.push(meal);
        self.persist_after("append");
        self.meals.len() - 1
    }

    /// Replaces the meal at `index`.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` when `index >= len()`; nothing is written.
    pub fn replace_at(&mut self, index: usize, meal: Meal) -> StoreResult<()> {
        let len = self.meals.len();
        let slot = self
            .meals
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;
        *slot = meal;
        self.persist_after("replace_at");
        Ok(())
    }

    /// Removes and returns the meal at `index`, shifting later meals down.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` when `index >= len()`; nothing is written.
    pub fn remove_at(&mut self, index: usize) -> StoreResult<Meal> {
        let len = self.meals.len();
        if index >= len {
            return Err(StoreError::IndexOutOfBounds { index, len });
        }
        let removed = self.meals.remove(index);
        self.persist_after("remove_at");
        Ok(removed)
    }

    /// Replaces the meal sharing `meal.id()` and returns its index.
    ///
    /// Unaffected by index shifts between selecting and committing an edit.
    pub fn replace(&mut self, meal: Meal) -> StoreResult<usize> {
        let index = self
            .position_of(meal.id())
            .ok_or(StoreError::NotFound(meal.id()))?;
        self.replace_at(index, meal)?;
        Ok(index)
    }

    /// Removes and returns the meal with `id`.
    pub fn remove(&mut self, id: MealId) -> StoreResult<Meal> {
        let index = self.position_of(id).ok_or(StoreError::NotFound(id))?;
        self.remove_at(index)
    }

    /// Writes the whole list to the archive.
    ///
    /// # Errors
    /// - Returns the archive error; in-memory meals are left untouched and the
    ///   store is marked dirty.
    pub fn save(&mut self) -> ArchiveResult<()> {
        let started_at = Instant::now();
        match self.archive.write_meals(&self.meals) {
            Ok(()) => {
                self.dirty = false;
                debug!(
                    "event=store_save module=store status=ok count={} duration_ms={}",
                    self.meals.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                error!(
                    "event=store_save module=store status=error count={} duration_ms={} error_code=archive_write_failed error={}",
                    self.meals.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Reads the archive, returning an empty list when it cannot be used.
    pub fn load(&self) -> Vec<Meal> {
        let started_at = Instant::now();
        match self.try_load() {
            Ok(meals) => {
                info!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    meals.len(),
                    started_at.elapsed().as_millis()
                );
                meals
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback duration_ms={} error_code=archive_unreadable error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Reads the archive and surfaces why it is unusable.
    ///
    /// A missing artifact is an empty list, not an error.
    pub fn try_load(&self) -> ArchiveResult<Vec<Meal>> {
        Ok(self.archive.read_meals()?.unwrap_or_default())
    }

    fn persist_after(&mut self, op: &'static str) {
        if self.save().is_err() {
            warn!(
                "event=store_mutation module=store status=unsaved op={} count={}",
                op,
                self.meals.len()
            );
        }
    }
}
