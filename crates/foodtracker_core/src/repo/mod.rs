//! Persistence layer for the meal list.
//!
//! # Responsibility
//! - Define the storage contract used by the meal store.
//! - Isolate artifact layout and file-system details from use-case code.
//!
//! # Invariants
//! - Decoded meals pass the same validation as freshly constructed ones.
//! - Archive APIs return typed errors; fail-open policy lives above this layer.

pub mod meal_archive;
