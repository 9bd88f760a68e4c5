//! File-based ProfileStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use game_core::{ImagePool, LeaderboardEntry};

use crate::repository::error::{RepositoryError, Result};
use crate::repository::traits::ProfileStore;

const LEADERBOARD_FILE: &str = "leaderboard.json";
const IMAGE_POOL_FILE: &str = "image_pool.json";

/// File-based implementation of [`ProfileStore`].
///
/// Each blob is one JSON file under the base directory, written atomically
/// (temp file + rename) so a crash mid-save never leaves a torn blob.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Creates a file store rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Platform data directory for this application, if one can be derived.
    pub fn default_data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "memory-match")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn save_blob<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.blob_path(name);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(target: "runtime::repository", "saved {}", path.display());

        Ok(())
    }

    fn load_blob<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.blob_path(name);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!(target: "runtime::repository", "loaded {}", path.display());

        Ok(Some(value))
    }
}

impl ProfileStore for FileStore {
    fn load_leaderboard(&self) -> Result<Option<Vec<LeaderboardEntry>>> {
        self.load_blob(LEADERBOARD_FILE)
    }

    fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        self.save_blob(LEADERBOARD_FILE, &entries)
    }

    fn load_image_pool(&self) -> Result<Option<ImagePool>> {
        self.load_blob(IMAGE_POOL_FILE)
    }

    fn save_image_pool(&self, pool: &ImagePool) -> Result<()> {
        self.save_blob(IMAGE_POOL_FILE, pool)
    }
}
