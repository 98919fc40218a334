//! # Database Layer
//!
//! [`Database`] is the single entry point for every operation: novel
//! lifecycle, the per-novel collection repository, the trash bin, and
//! whole-store backup. It is generic over [`StorageBackend`]:
//!
//! - Production: `Database<FsBackend>` ([`FileDb`])
//! - Testing: `Database<MemBackend>` ([`InMemoryDb`])
//!
//! ## The Read-Modify-Write Cycle
//!
//! Every mutating operation loads the whole [`Store`], mutates it in
//! memory, and writes the whole store back. There is no partial
//! persistence and no locking: the design assumes exactly one active
//! caller (single user, single process). A caller extending this to
//! concurrent writers must make the cycle atomic — naive concurrent
//! read-modify-write loses updates, last-write-wins on the whole blob.
//!
//! ## Codec Behavior
//!
//! Reading defaults to the empty store when no blob exists or the blob
//! fails to parse (logged at `warn`); only real storage failures surface
//! as errors. Writing serializes the full store and hands it to the
//! backend, which guarantees blob-level atomicity.
//!
//! ## Operation Modules
//!
//! - [`novels`]: create / list / soft-delete / restore / purge novels
//! - [`collections`]: generic CRUD and reordering over the six collections
//! - [`trash`]: soft-delete staging, restore-to-slot, permanent purge
//! - [`backup`]: whole-store export and validated import

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::model::Store;
use crate::store::{FsBackend, MemBackend, StorageBackend};

pub mod backup;
pub mod collections;
pub mod novels;
pub mod trash;

pub struct Database<B: StorageBackend> {
    pub(crate) backend: B,
}

pub type FileDb = Database<FsBackend>;
pub type InMemoryDb = Database<MemBackend>;

impl Default for InMemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDb {
    pub fn new() -> Self {
        Database::with_backend(MemBackend::new())
    }
}

impl FileDb {
    /// Open a database over a JSON file. The file need not exist yet; it is
    /// created on the first write.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        Database::with_backend(FsBackend::new(path))
    }

    /// Open the database at the platform-conventional location.
    pub fn open_default() -> Result<Self> {
        Ok(Database::with_backend(FsBackend::new(
            FsBackend::default_path()?,
        )))
    }
}

impl<B: StorageBackend> Database<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Deserialize the persisted store. Missing or unparseable blobs yield
    /// the empty store; storage failures propagate.
    pub(crate) fn read(&self) -> Result<Store> {
        match self.backend.load()? {
            None => Ok(Store::default()),
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(store) => Ok(store),
                Err(err) => {
                    warn!("persisted store failed to parse, starting empty: {err}");
                    Ok(Store::default())
                }
            },
        }
    }

    /// Serialize and persist the full store.
    pub(crate) fn write(&self, store: &Store) -> Result<()> {
        let blob = serde_json::to_string(store)?;
        debug!("persisting store ({} bytes)", blob.len());
        self.backend.save(&blob)
    }
}

/// Round-trip a record through its wire representation. Caller-supplied
/// values may carry detail the wire cannot (nanosecond timestamps); a
/// record that is handed back after a write must already be clamped to
/// what a later read will observe.
pub(crate) fn to_wire_precision<T>(record: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    Ok(serde_json::from_value(serde_json::to_value(record)?)?)
}

/// Shallow-merge a bag of JSON fields into a record, object-spread style:
/// every patch key replaces the corresponding field wholesale. The merged
/// value must still deserialize as `T`; a patch that breaks the schema is
/// a `Serialization` error and nothing is persisted.
pub(crate) fn merge_fields<T>(
    current: &T,
    patch: &serde_json::Map<String, serde_json::Value>,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(current)?;
    if let serde_json::Value::Object(fields) = &mut value {
        for (key, patch_value) in patch {
            fields.insert(key.clone(), patch_value.clone());
        }
    }
    Ok(serde_json::from_value(value)?)
}
