//! Backup Facility: whole-store export and validated import.
//!
//! Export hands out the persisted blob verbatim, so an exported artifact
//! is byte-for-byte what a later import will persist — the round trip is
//! lossless by construction. Import is a destructive whole-store replace,
//! never a merge; callers must warn the user that unexported local changes
//! are discarded.

use log::warn;

use super::Database;
use crate::error::Result;
use crate::model::Store;
use crate::store::StorageBackend;

impl<B: StorageBackend> Database<B> {
    /// The current persisted blob verbatim, or the canonical empty-store
    /// blob when nothing has been persisted yet.
    pub fn export_all(&self) -> Result<String> {
        match self.backend.load()? {
            Some(blob) => Ok(blob),
            None => Ok(serde_json::to_string(&Store::default())?),
        }
    }

    /// Validate and persist `blob`, replacing all existing state.
    ///
    /// Returns `Ok(false)` — leaving existing state untouched — when the
    /// blob is not JSON, not an object, lacks a `novels` field, or does
    /// not deserialize as a [`Store`]. On success the caller's blob is
    /// persisted verbatim and the result is `Ok(true)`. Only storage
    /// failures surface as `Err`.
    pub fn import_all(&self, blob: &str) -> Result<bool> {
        let value: serde_json::Value = match serde_json::from_str(blob) {
            Ok(value) => value,
            Err(err) => {
                warn!("import rejected, blob is not valid JSON: {err}");
                return Ok(false);
            }
        };

        if !value.is_object() || value.get("novels").is_none() {
            warn!("import rejected, blob is not a store (no novels field)");
            return Ok(false);
        }

        if let Err(err) = serde_json::from_value::<Store>(value) {
            warn!("import rejected, blob does not match the store schema: {err}");
            return Ok(false);
        }

        self.backend.save(blob)?;
        Ok(true)
    }
}
