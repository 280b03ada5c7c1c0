//! Star rating control model.
//!
//! # Responsibility
//! - Map a tapped star position to the next rating value.
//! - Derive per-star filled state for rendering.
//!
//! # Invariants
//! - Tapping the star equal to the current rating clears it to `0`.
//! - Star `i` (0-based) is filled iff `i < rating`.
//! - `RatingControl::rating` never exceeds `star_count`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Star count used by the meal editor and list cells.
pub const DEFAULT_STAR_COUNT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// Tap position is not one of the rendered stars (`1..=star_count`).
    PositionOutOfRange { position: u8, star_count: u8 },
}

impl Display for RatingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionOutOfRange {
                position,
                star_count,
            } => write!(
                f,
                "star position {position} is outside 1..={star_count}"
            ),
        }
    }
}

impl Error for RatingError {}

/// Returns the rating that results from tapping star `position` (1-based).
pub fn next_rating(current: u8, position: u8) -> u8 {
    if current == position {
        0
    } else {
        position
    }
}

/// Returns whether the star at 0-based `index` renders as filled.
pub fn is_star_filled(index: u8, rating: u8) -> bool {
    index < rating
}

/// Rating state for one row of stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingControl {
    star_count: u8,
    rating: u8,
}

impl Default for RatingControl {
    fn default() -> Self {
        Self::new(DEFAULT_STAR_COUNT)
    }
}

impl RatingControl {
    /// Creates an empty control (`rating = 0`) with `star_count` stars.
    pub fn new(star_count: u8) -> Self {
        Self {
            star_count,
            rating: 0,
        }
    }

    pub fn star_count(&self) -> u8 {
        self.star_count
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Sets the rating directly, e.g. when showing an existing meal.
    ///
    /// Values above `star_count` are clamped.
    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating.min(self.star_count);
    }

    /// Rebuilds the control for a new star count, clamping the rating.
    pub fn set_star_count(&mut self, star_count: u8) {
        self.star_count = star_count;
        self.rating = self.rating.min(star_count);
    }

    /// Applies a tap on star `position` (1-based) and returns the new rating.
    ///
    /// # Errors
    /// - `PositionOutOfRange` when `position` is `0` or above `star_count`.
    pub fn tap(&mut self, position: u8) -> Result<u8, RatingError> {
        if position == 0 || position > self.star_count {
            return Err(RatingError::PositionOutOfRange {
                position,
                star_count: self.star_count,
            });
        }
        self.rating = next_rating(self.rating, position);
        Ok(self.rating)
    }

    /// Filled flag for every star, left to right.
    pub fn star_states(&self) -> Vec<bool> {
        (0..self.star_count)
            .map(|index| is_star_filled(index, self.rating))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{is_star_filled, next_rating};

    #[test]
    fn tapping_current_rating_clears_it() {
        assert_eq!(next_rating(3, 3), 0);
    }

    #[test]
    fn tapping_other_star_sets_that_position() {
        assert_eq!(next_rating(3, 2), 2);
        assert_eq!(next_rating(0, 5), 5);
    }

    #[test]
    fn star_filled_below_rating_only() {
        assert!(is_star_filled(0, 1));
        assert!(!is_star_filled(1, 1));
        assert!(!is_star_filled(0, 0));
    }
}
