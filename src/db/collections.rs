//! Collection Repository: CRUD and ordering over the six per-novel
//! collections, generic over [`Record`].
//!
//! Callers pick the collection with a type parameter:
//! `db.list::<Chapter>(novel_id)`. Unknown novel or record ids are silent
//! no-ops throughout — clients stay idempotent against double-clicks and
//! stale views.

use serde_json::{Map, Value};

use super::{merge_fields, to_wire_precision, Database};
use crate::error::Result;
use crate::model::{new_id, Record};
use crate::store::StorageBackend;

impl<B: StorageBackend> Database<B> {
    /// The stored sequence for a novel, or empty if the novel has no
    /// entries yet. Never a not-found error.
    pub fn list<T: Record>(&self, novel_id: &str) -> Result<Vec<T>> {
        let store = self.read()?;
        Ok(T::bucket(&store).get(novel_id).cloned().unwrap_or_default())
    }

    /// Append a record, minting a fresh id (any id on the draft is
    /// replaced). The bucket is created lazily. Returns the stored record,
    /// clamped to wire precision so it is exactly what a later read
    /// observes.
    pub fn add<T: Record>(&self, novel_id: &str, mut record: T) -> Result<T> {
        let mut store = self.read()?;
        record.set_id(new_id());
        let record = to_wire_precision(&record)?;
        T::bucket_mut(&mut store)
            .entry(novel_id.to_string())
            .or_default()
            .push(record.clone());
        self.write(&store)?;
        Ok(record)
    }

    /// Shallow-merge `patch` into the record with the given id. Silent
    /// no-op when the novel or id is unknown; the store is persisted
    /// either way. A patch that breaks the record's schema is an error
    /// and nothing is persisted.
    pub fn update<T: Record>(
        &self,
        novel_id: &str,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<()> {
        let mut store = self.read()?;
        if let Some(bucket) = T::bucket_mut(&mut store).get_mut(novel_id) {
            if let Some(slot) = bucket.iter_mut().find(|r| r.id() == id) {
                *slot = merge_fields(slot, patch)?;
            }
        }
        self.write(&store)
    }

    /// Wholesale-replace a novel's bucket with a caller-ordered list. Used
    /// when the manuscript structure is rearranged (reordering parts,
    /// moving chapters between parts). The caller renumbers `order`
    /// densely before calling; the repository never recomputes it.
    pub fn replace_all<T: Record>(&self, novel_id: &str, items: Vec<T>) -> Result<()> {
        let mut store = self.read()?;
        T::bucket_mut(&mut store).insert(novel_id.to_string(), items);
        self.write(&store)
    }

    /// Delete a record with no trash staging. Used where there is no undo
    /// path (relation deletion). Silent no-op when missing.
    pub fn remove<T: Record>(&self, novel_id: &str, id: &str) -> Result<()> {
        let mut store = self.read()?;
        if let Some(bucket) = T::bucket_mut(&mut store).get_mut(novel_id) {
            bucket.retain(|r| r.id() != id);
        }
        self.write(&store)
    }
}
