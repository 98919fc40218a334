//! # Novelcraft Architecture
//!
//! Novelcraft is a **UI-agnostic persistence core** for a creative-writing
//! workspace: novels composed of parts and chapters, character sheets, world
//! locations, character relations, freeform ideas, and a soft-delete trash
//! bin. The editor UI, manuscript rendering, and everything visual live in
//! clients of this crate; this crate owns the data and its invariants.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Database Layer (db/)                                       │
//! │  - Novel lifecycle, collection repository, trash, backup    │
//! │  - Every operation is one read-modify-write cycle           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract StorageBackend trait over one textual blob      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Single-Blob Model
//!
//! The entire workspace persists as one JSON blob (the [`model::Store`]).
//! Every mutating operation reads the whole store, mutates it in memory,
//! and writes the whole store back. This trades efficiency for simplicity
//! and is deliberate: the working set is a single user's manuscript, not a
//! large dataset. The filesystem backend makes each write atomic at the
//! blob granularity (temp file + rename), so a crash mid-write leaves
//! either the old or the new state, never a mix.
//!
//! ## Referential Tolerance
//!
//! Records reference each other by id (`part_id` on chapters, linked
//! character/location ids, relation endpoints). These are weak references:
//! they are never validated at write time, and dangling ids simply fail to
//! resolve at read time. A chapter whose part was deleted renders as
//! unsectioned; a relation to a purged character renders as unknown. Do not
//! "fix" this with foreign-key checks — clients rely on the graceful
//! degradation.
//!
//! ## Key Principle: No I/O Assumptions
//!
//! The crate never writes to stdout/stderr, never prompts, never assumes a
//! terminal. Not-found conditions are silent no-ops so that client
//! interactions (double-clicks, stale views) stay idempotent. The only
//! errors that surface are real storage failures and malformed data.
//!
//! ## Module Overview
//!
//! - [`db`]: The database handle — novels, collections, trash, backup
//! - [`model`]: Domain types and the persisted wire format
//! - [`store`]: Storage abstraction and implementations
//! - [`error`]: Error types

pub mod db;
pub mod error;
pub mod model;
pub mod store;
