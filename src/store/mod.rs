//! # Storage Layer
//!
//! The persisted state is one textual JSON blob. The [`StorageBackend`]
//! trait abstracts where that blob lives; everything above it (the `db`
//! module) only ever loads and saves the whole blob.
//!
//! ## Atomicity Contract
//!
//! `save` must be atomic at the blob granularity: after a crash mid-write,
//! a subsequent `load` must observe either the previous blob or the new
//! one, never a torn mix. [`fs_backend::FsBackend`] obtains this with a
//! temp-file-and-rename; a backend over a transactional key-value store
//! would get it from a transactional put.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production backend, a single JSON file.
//! - [`mem_backend::MemBackend`]: in-memory backend for testing logic
//!   without filesystem I/O, with a write-error simulation hook.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
