//! Meal archive contracts and storage implementations.
//!
//! # Responsibility
//! - Serialize the whole ordered meal list into one artifact and back.
//! - Keep file-system and encoding details inside the persistence boundary.
//!
//! # Invariants
//! - Writes replace the artifact atomically: readers see the old list or the
//!   new list, never a partial one.
//! - Reads reject malformed artifacts (bad JSON, unknown version, invalid
//!   meal entries) instead of masking them. Masking is the store's decision.
//! - Meal order is preserved exactly.

use crate::model::meal::Meal;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Current artifact layout version.
pub const ARCHIVE_FORMAT_VERSION: u32 = 1;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Persistence failure while reading or writing the meal artifact.
#[derive(Debug)]
pub enum ArchiveError {
    Io(io::Error),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    UnsupportedVersion { found: u32, supported: u32 },
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "meal archive io failed: {err}"),
            Self::Encode(err) => write!(f, "meal archive encode failed: {err}"),
            Self::Decode(err) => write!(f, "meal archive decode failed: {err}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "meal archive version {found} is not supported (expected {supported})"
            ),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<io::Error> for ArchiveError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Storage interface for the persisted meal list.
pub trait MealArchive {
    /// Reads the persisted list.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn read_meals(&self) -> ArchiveResult<Option<Vec<Meal>>>;

    /// Replaces the persisted list with `meals`.
    fn write_meals(&self, meals: &[Meal]) -> ArchiveResult<()>;
}

impl<A: MealArchive + ?Sized> MealArchive for &A {
    fn read_meals(&self) -> ArchiveResult<Option<Vec<Meal>>> {
        (**self).read_meals()
    }

    fn write_meals(&self, meals: &[Meal]) -> ArchiveResult<()> {
        (**self).write_meals(meals)
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    meals: &'a [Meal],
}

#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    meals: serde_json::Value,
}

/// Encodes `meals` into the artifact byte layout.
pub fn encode_meals(meals: &[Meal]) -> ArchiveResult<Vec<u8>> {
    serde_json::to_vec(&EnvelopeOut {
        version: ARCHIVE_FORMAT_VERSION,
        meals,
    })
    .map_err(ArchiveError::Encode)
}

/// Decodes artifact bytes, validating every meal entry.
///
/// The version is checked before entries are decoded so that a future layout
/// reports `UnsupportedVersion` rather than a field mismatch.
pub fn decode_meals(bytes: &[u8]) -> ArchiveResult<Vec<Meal>> {
    let envelope: EnvelopeIn = serde_json::from_slice(bytes).map_err(ArchiveError::Decode)?;
    if envelope.version != ARCHIVE_FORMAT_VERSION {
        return Err(ArchiveError::UnsupportedVersion {
            found: envelope.version,
            supported: ARCHIVE_FORMAT_VERSION,
        });
    }
    Vec::<Meal>::deserialize(envelope.meals).map_err(ArchiveError::Decode)
}

/// File-backed archive writing one JSON artifact.
#[derive(Debug, Clone)]
pub struct FileMealArchive {
    path: PathBuf,
}

impl FileMealArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl MealArchive for FileMealArchive {
    fn read_meals(&self) -> ArchiveResult<Option<Vec<Meal>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode_meals(&bytes).map(Some)
    }

    fn write_meals(&self, meals: &[Meal]) -> ArchiveResult<()> {
        let bytes = encode_meals(meals)?;
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        // Temp file must live in the target directory so `persist` is a rename
        // on the same file system.
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|err| ArchiveError::Io(err.error))?;
        Ok(())
    }
}

/// In-process archive holding the encoded artifact in memory.
///
/// Goes through the same encode/decode path as `FileMealArchive`.
#[derive(Debug, Default)]
pub struct InMemoryMealArchive {
    artifact: RefCell<Option<Vec<u8>>>,
}

impl InMemoryMealArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `bytes` as the stored artifact, valid or not.
    pub fn with_artifact(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            artifact: RefCell::new(Some(bytes.into())),
        }
    }

    /// Returns a copy of the stored artifact bytes.
    pub fn artifact(&self) -> Option<Vec<u8>> {
        self.artifact.borrow().clone()
    }
}

impl MealArchive for InMemoryMealArchive {
    fn read_meals(&self) -> ArchiveResult<Option<Vec<Meal>>> {
        match self.artifact.borrow().as_deref() {
            Some(bytes) => decode_meals(bytes).map(Some),
            None => Ok(None),
        }
    }

    fn write_meals(&self, meals: &[Meal]) -> ArchiveResult<()> {
        let bytes = encode_meals(meals)?;
        *self.artifact.borrow_mut() = Some(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_meals, encode_meals, ArchiveError, ARCHIVE_FORMAT_VERSION};
    use crate::model::meal::{Meal, MealPhoto};

    #[test]
    fn encoded_artifact_carries_version_and_base64_photo() {
        let meal = Meal::new("Toast", Some(MealPhoto::bytes(vec![0xff, 0x00])), 2).unwrap();
        let bytes = encode_meals(&[meal]).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], ARCHIVE_FORMAT_VERSION);
        assert_eq!(json["meals"][0]["photo"]["kind"], "bytes");
        assert_eq!(json["meals"][0]["photo"]["value"], "/wA=");
    }

    #[test]
    fn decode_rejects_unknown_version_before_entries() {
        let err = decode_meals(br#"{"version": 99, "meals": "not a list"}"#).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::UnsupportedVersion {
                found: 99,
                supported: 1
            }
        ));
    }

    #[test]
    fn decode_rejects_entry_failing_validation() {
        let artifact = serde_json::json!({
            "version": 1,
            "meals": [{
                "id": "11111111-2222-4333-8444-555555555555",
                "name": "Too good",
                "photo": null,
                "rating": 6
            }]
        });
        let err = decode_meals(artifact.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, ArchiveError::Decode(_)));
        assert!(err.to_string().contains("outside 0..=5"), "{err}");
    }
}
