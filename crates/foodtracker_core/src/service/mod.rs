//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate archive calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod meal_store;
