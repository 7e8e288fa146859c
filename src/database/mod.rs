mod db;
mod error;
#[cfg(test)]
mod memory;
mod models;

pub use self::db::SqliteRunStore;
pub use self::error::{StoreError, ValidationErrors};
#[cfg(test)]
pub use self::memory::MemoryRunStore;
pub use self::models::{Run, RunFields, TEST_NAME_MAX_LENGTH};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage of runs with generated ids
pub trait RunStore: Send {
    /// Validate and persist a new run, returning it with its assigned id
    fn create(&mut self, fields: RunFields) -> StoreResult<Run>;

    fn get(&mut self, id: i32) -> StoreResult<Run>;

    /// Return every run, ordered by id
    fn list(&mut self) -> StoreResult<Vec<Run>>;

    /// Replace every field of an existing run
    /// A missing run is reported before any validation errors.
    fn update(&mut self, id: i32, fields: RunFields) -> StoreResult<Run>;

    fn delete(&mut self, id: i32) -> StoreResult<()>;
}

/// A run store shared between HTTP workers
#[derive(Clone)]
pub struct StoreHandle(Arc<Mutex<Box<dyn RunStore>>>);

impl StoreHandle {
    pub fn new(store: impl RunStore + 'static) -> Self {
        Self(Arc::new(Mutex::new(Box::new(store))))
    }

    /// Lock the store for a single operation, clearing any poison left by a panicked worker
    pub fn lock(&self) -> MutexGuard<Box<dyn RunStore>> {
        self.0.lock().unwrap_or_else(|err| {
            self.0.clear_poison();
            PoisonError::into_inner(err)
        })
    }
}
