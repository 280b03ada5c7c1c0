//! Storage location configuration.
//!
//! # Responsibility
//! - Name the directory and file that hold the persisted meal list.
//! - Resolve the default location from the process environment.
//!
//! # Invariants
//! - The artifact file name is always `meals`.
//! - Nothing here touches the file system.

use std::path::{Path, PathBuf};

/// File name of the persisted meal list inside the data directory.
pub const ARCHIVE_FILE_NAME: &str = "meals";
/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "FOODTRACKER_DATA_DIR";

const DEFAULT_DATA_DIR_NAME: &str = "foodtracker";

/// Where the meal store keeps its durable artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_dir: PathBuf,
}

impl StoreConfig {
    /// Uses `data_dir` as the application-private documents directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the data directory from `FOODTRACKER_DATA_DIR`.
    ///
    /// Falls back to `<system temp>/foodtracker` when the variable is unset
    /// or blank.
    pub fn from_env() -> Self {
        if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Self::new(trimmed);
            }
        }
        Self::new(std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the persisted meal list.
    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(ARCHIVE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;
    use std::path::Path;

    #[test]
    fn archive_path_uses_fixed_file_name() {
        let config = StoreConfig::new("/var/app/documents");
        assert_eq!(
            config.archive_path(),
            Path::new("/var/app/documents").join("meals")
        );
    }
}
