use std::cell::RefCell;

use super::backend::StorageBackend;
use crate::error::{NovelcraftError, Result};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the core is
/// single-threaded. This avoids the overhead of a lock while still letting
/// the `StorageBackend` trait use `&self` for all methods.
pub struct MemBackend {
    blob: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            blob: RefCell::new(None),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with a pre-existing blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.blob.borrow_mut() = Some(blob.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.blob.borrow().clone())
    }

    fn save(&self, blob: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NovelcraftError::Store("Simulated write error".to_string()));
        }
        *self.blob.borrow_mut() = Some(blob.to_string());
        Ok(())
    }
}
