use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use uuid::Uuid;

use super::backend::StorageBackend;
use crate::error::{NovelcraftError, Result};

/// Filesystem backend: the whole store as a single JSON file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform-conventional location for the store file
    /// (e.g. `~/.local/share/novelcraft/novelcraft.json` on Linux).
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "novelcraft").ok_or_else(|| {
            NovelcraftError::Store("no home directory available".to_string())
        })?;
        Ok(dirs.data_dir().join("novelcraft.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(NovelcraftError::Io)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(&self.path).map_err(NovelcraftError::Io)?;
        Ok(Some(blob))
    }

    fn save(&self, blob: &str) -> Result<()> {
        self.ensure_parent()?;

        // Atomic replace: write to a sibling temp file, then rename over.
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let tmp_file = parent.join(format!(".novelcraft-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, blob).map_err(NovelcraftError::Io)?;
        if let Err(err) = fs::rename(&tmp_file, &self.path) {
            // Best effort: don't leak the temp file on a failed replace.
            let _ = fs::remove_file(&tmp_file);
            return Err(NovelcraftError::Io(err));
        }

        Ok(())
    }
}
