use crate::error::Result;

/// Abstract interface for raw blob storage.
///
/// This trait handles the "where" of storage (filesystem vs memory), while
/// the `db` module handles the "what" (codec, collections, invariants).
/// Methods take `&self`: backends are either stateless I/O or use interior
/// mutability, and the crate assumes a single active caller.
pub trait StorageBackend {
    /// Load the persisted blob.
    /// Returns `Ok(None)` when nothing has been persisted yet.
    /// Returns `Err` only on actual I/O failures (permissions, disk).
    fn load(&self) -> Result<Option<String>>;

    /// Persist the blob, replacing any prior one.
    /// MUST be atomic at the blob granularity (e.g. write to a temp file
    /// then rename) so a crash never leaves a torn state.
    fn save(&self, blob: &str) -> Result<()>;
}
