//! Novel Lifecycle Manager: create, list, soft-delete, restore, and purge
//! whole novels.
//!
//! Novel-level soft delete is just a `deleted_at` stamp on the novel
//! record — the per-novel collections stay in place so restore is free.
//! Purge is the one cascading operation: it drops the novel record and all
//! seven per-novel buckets in a single persisted write, leaving no
//! orphaned data behind.

use serde_json::{Map, Value};

use super::{merge_fields, Database};
use crate::error::Result;
use crate::model::{now_ms, Novel};
use crate::store::StorageBackend;

impl<B: StorageBackend> Database<B> {
    /// Create a novel with a fresh id and both timestamps set to now.
    pub fn create_novel(&self, title: &str) -> Result<Novel> {
        let mut store = self.read()?;
        let now = now_ms();
        let novel = Novel {
            id: crate::model::new_id(),
            title: title.to_string(),
            created_at: now,
            last_modified: now,
            deleted_at: None,
        };
        store.novels.push(novel.clone());
        self.write(&store)?;
        Ok(novel)
    }

    /// Novels without a `deleted_at` stamp.
    pub fn list_active_novels(&self) -> Result<Vec<Novel>> {
        let store = self.read()?;
        Ok(store
            .novels
            .into_iter()
            .filter(|n| n.deleted_at.is_none())
            .collect())
    }

    /// Novels sitting in the novel-level trash view.
    pub fn list_trashed_novels(&self) -> Result<Vec<Novel>> {
        let store = self.read()?;
        Ok(store
            .novels
            .into_iter()
            .filter(|n| n.deleted_at.is_some())
            .collect())
    }

    /// Stamp `deleted_at` on the matching novel. Silent no-op if unknown.
    pub fn soft_delete_novel(&self, id: &str) -> Result<()> {
        let mut store = self.read()?;
        if let Some(novel) = store.novels.iter_mut().find(|n| n.id == id) {
            novel.deleted_at = Some(now_ms());
        }
        self.write(&store)
    }

    /// Clear `deleted_at` on the matching novel. Silent no-op if unknown.
    pub fn restore_novel(&self, id: &str) -> Result<()> {
        let mut store = self.read()?;
        if let Some(novel) = store.novels.iter_mut().find(|n| n.id == id) {
            novel.deleted_at = None;
        }
        self.write(&store)
    }

    /// Remove the novel record and every per-novel bucket keyed to it —
    /// all six collections plus trash — in one persisted write.
    pub fn purge_novel(&self, id: &str) -> Result<()> {
        let mut store = self.read()?;
        store.novels.retain(|n| n.id != id);
        store.parts.remove(id);
        store.chapters.remove(id);
        store.characters.remove(id);
        store.world.remove(id);
        store.relations.remove(id);
        store.ideas.remove(id);
        store.trash.remove(id);
        self.write(&store)
    }

    /// Shallow-merge `patch` into the novel's metadata (title rename,
    /// `lastModified` bump). Same merge semantics as collection `update`;
    /// silent no-op when the id is unknown.
    pub fn touch_novel(&self, id: &str, patch: &Map<String, Value>) -> Result<()> {
        let mut store = self.read()?;
        if let Some(novel) = store.novels.iter_mut().find(|n| n.id == id) {
            *novel = merge_fields(novel, patch)?;
        }
        self.write(&store)
    }
}
