//! Database sessions.
//!
//! A [`Session`] owns a storage backend together with the per-file caches
//! that sit in front of it. All lookups, counters and size estimates go
//! through a session, and [`Session::close`] is the one place where a file's
//! cached state is discarded before its handle can be reused.
//!
//! Sessions are single-owner: every mutating call takes `&mut self`. Wrap
//! one in a [`SharedSession`] when several threads need it; access is then
//! serialized by a mutex.

pub mod header;
pub mod lookup;
pub mod props;
pub mod query;

pub use lookup::IdLookup;
pub use query::{BlockParams, SetParams};

use crate::cache::counters::CounterKind;
use crate::cache::{FileItemCounters, InvalidateFile, ObjectStatsCache};
use crate::exodus_error::ExodusError;
use crate::storage::{FileHandle, Storage};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Storage backend plus the caches keyed by its file handles.
#[derive(Debug, Default)]
pub struct Session<S> {
    storage: S,
    stats: ObjectStatsCache,
    counters: FileItemCounters,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            stats: ObjectStatsCache::new(),
            counters: FileItemCounters::new(),
        }
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backend, e.g. to write tables between lookups.
    #[inline]
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    #[inline]
    pub fn stats(&self) -> &ObjectStatsCache {
        &self.stats
    }

    #[inline]
    pub fn stats_mut(&mut self) -> &mut ObjectStatsCache {
        &mut self.stats
    }

    #[inline]
    pub fn counters(&self) -> &FileItemCounters {
        &self.counters
    }

    /// Next sequence number for `kind` in `file` (0 for the first item).
    pub fn increment_item(&mut self, file: FileHandle, kind: CounterKind) -> usize {
        self.counters.increment_and_fetch(file, kind)
    }

    /// Number most recently handed out for `kind` in `file`.
    pub fn item(&self, file: FileHandle, kind: CounterKind) -> Option<usize> {
        self.counters.fetch(file, kind)
    }

    pub fn remove_item(&mut self, file: FileHandle, kind: CounterKind) {
        self.counters.remove(file, kind);
    }

    /// Forget everything cached for `file` without closing it.
    pub fn invalidate(&mut self, file: FileHandle) {
        self.stats.invalidate_file(file);
        self.counters.invalidate_file(file);
    }

    /// Drop cached state for `file`, then close it in the backend.
    pub fn close(&mut self, file: FileHandle) -> Result<(), ExodusError> {
        self.invalidate(file);
        self.storage
            .close(file)
            .map_err(|e| ExodusError::io(file, "failed to close file", e))
    }
}

/// A [`Session`] behind a mutex, shareable across threads.
#[derive(Debug)]
pub struct SharedSession<S> {
    inner: Arc<Mutex<Session<S>>>,
}

impl<S> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Storage> SharedSession<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Exclusive access for the duration of the guard.
    pub fn lock(&self) -> MutexGuard<'_, Session<S>> {
        self.inner.lock()
    }

    /// Resolve an id while holding the lock for just this call.
    pub fn lookup(
        &self,
        file: FileHandle,
        id_type: &str,
        id: i32,
    ) -> Result<IdLookup, ExodusError> {
        self.inner.lock().lookup(file, id_type, id)
    }

    pub fn close(&self, file: FileHandle) -> Result<(), ExodusError> {
        self.inner.lock().close(file)
    }
}

static_assertions::assert_impl_all!(
    SharedSession<crate::storage::MemoryStorage>: Send, Sync, Clone
);
