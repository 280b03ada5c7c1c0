//! Domain model for recorded meals.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every domain value is validated when constructed, including on decode.
//! - Every meal is identified by a stable `MealId`.

pub mod meal;
