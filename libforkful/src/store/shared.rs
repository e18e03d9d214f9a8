//! Thread-safe handle to a store
//!
//! A host serving one store to several threads wraps it in a
//! `SharedStore`. Every mutation runs under the write lock, so concurrent
//! likes on the same recipe are applied one at a time and the counter
//! always agrees with the liked set.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::command::{Command, Outcome};
use crate::error::Result;
use crate::events::EventReceiver;

use super::Store;

#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` against a consistent view of the store
    pub fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        f(&self.read_guard())
    }

    /// Run `f` with exclusive access to the store
    pub fn write<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        f(&mut self.write_guard())
    }

    pub fn apply(&self, command: Command) -> Result<Outcome> {
        self.write(|store| store.apply(command))
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.read(|store| store.subscribe())
    }

    // Poisoning is ignored; store mutations validate before they write.
    fn read_guard(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Store> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
