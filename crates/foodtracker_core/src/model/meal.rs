//! Meal domain model.
//!
//! # Responsibility
//! - Define the validated record for one meal entry.
//! - Keep the photo payload opaque to core logic.
//!
//! # Invariants
//! - `name` is never empty.
//! - `rating` is always within `MIN_RATING..=MAX_RATING`.
//! - `id` is stable for the record lifetime and is never the nil UUID.
//! - A `Meal` value is never mutated; edits build a replacement via `Meal::edited`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier carried by every meal across edits and restarts.
pub type MealId = Uuid;

/// Lowest accepted rating (no stars).
pub const MIN_RATING: i64 = 0;
/// Highest accepted rating (all stars filled).
pub const MAX_RATING: i64 = 5;

/// Opaque photo payload attached to a meal.
///
/// Core never decodes image data; it only stores and restores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MealPhoto {
    /// Raw image bytes picked by the user. Base64 in the persisted artifact.
    Bytes(#[serde(with = "photo_bytes")] Vec<u8>),
    /// Named asset resolved by the UI layer (used by bundled sample meals).
    Resource(String),
}

impl MealPhoto {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    pub fn resource(name: impl Into<String>) -> Self {
        Self::Resource(name.into())
    }

    /// Returns raw bytes when this photo is an inline blob.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(data) => Some(data.as_slice()),
            Self::Resource(_) => None,
        }
    }

    /// Returns the asset name when this photo is a named resource.
    pub fn resource_name(&self) -> Option<&str> {
        match self {
            Self::Bytes(_) => None,
            Self::Resource(name) => Some(name.as_str()),
        }
    }
}

/// Validation failure raised while constructing a meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealValidationError {
    EmptyName,
    RatingOutOfRange { rating: i64 },
    NilId,
}

impl Display for MealValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "meal name cannot be empty"),
            Self::RatingOutOfRange { rating } => write!(
                f,
                "meal rating {rating} is outside {MIN_RATING}..={MAX_RATING}"
            ),
            Self::NilId => write!(f, "meal id cannot be the nil uuid"),
        }
    }
}

impl Error for MealValidationError {}

/// One recorded meal.
///
/// Fields are private so that a constructed value can only be observed in
/// its validated state. Deserialization goes through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MealWire")]
pub struct Meal {
    id: MealId,
    name: String,
    photo: Option<MealPhoto>,
    rating: u8,
}

impl Meal {
    /// Creates a meal with a freshly generated stable ID.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is the empty string.
    /// - `RatingOutOfRange` when `rating` is outside `0..=5`.
    pub fn new(
        name: impl Into<String>,
        photo: Option<MealPhoto>,
        rating: i64,
    ) -> Result<Self, MealValidationError> {
        Self::with_id(Uuid::new_v4(), name, photo, rating)
    }

    /// Creates a meal with a caller-provided stable ID.
    ///
    /// Used by decode/import paths where identity already exists.
    ///
    /// # Errors
    /// - Same as [`Meal::new`], checked first.
    /// - `NilId` when `id` is the nil UUID.
    pub fn with_id(
        id: MealId,
        name: impl Into<String>,
        photo: Option<MealPhoto>,
        rating: i64,
    ) -> Result<Self, MealValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MealValidationError::EmptyName);
        }
        let rating = checked_rating(rating)?;
        if id.is_nil() {
            return Err(MealValidationError::NilId);
        }

        Ok(Self {
            id,
            name,
            photo,
            rating,
        })
    }

    /// Builds the replacement record for an edit of this meal.
    ///
    /// The result keeps `self.id`, so collections can match it back to the
    /// entry being edited.
    pub fn edited(
        &self,
        name: impl Into<String>,
        photo: Option<MealPhoto>,
        rating: i64,
    ) -> Result<Self, MealValidationError> {
        Self::with_id(self.id, name, photo, rating)
    }

    pub fn id(&self) -> MealId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn photo(&self) -> Option<&MealPhoto> {
        self.photo.as_ref()
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }
}

fn checked_rating(rating: i64) -> Result<u8, MealValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(MealValidationError::RatingOutOfRange { rating });
    }
    u8::try_from(rating).map_err(|_| MealValidationError::RatingOutOfRange { rating })
}

/// Unvalidated shape used only as the deserialization source for `Meal`.
#[derive(Deserialize)]
struct MealWire {
    id: MealId,
    name: String,
    #[serde(default)]
    photo: Option<MealPhoto>,
    rating: i64,
}

impl TryFrom<MealWire> for Meal {
    type Error = MealValidationError;

    fn try_from(wire: MealWire) -> Result<Self, Self::Error> {
        Meal::with_id(wire.id, wire.name, wire.photo, wire.rating)
    }
}

mod photo_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(data: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(data).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(&encoded).map_err(serde::de::Error::custom)
    }
}
