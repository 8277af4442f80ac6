//! Per-file item counters.
//!
//! Write routines number blocks and sets sequentially as they are defined.
//! Each (file, category) pair gets a counter that hands out 0, 1, 2, … and
//! can be inspected without advancing it. Only counters that have issued at
//! least one value exist.

use super::InvalidateFile;
use crate::object_type::ObjectType;
use crate::storage::FileHandle;
use hashbrown::HashMap;

/// Counter kinds are the object categories that get numbered on write.
pub type CounterKind = ObjectType;

/// Post-increment counters keyed by (file handle, kind).
///
/// Each entry stores the next value to hand out.
#[derive(Debug, Default, Clone)]
pub struct FileItemCounters {
    items: HashMap<(FileHandle, CounterKind), usize>,
}

impl FileItemCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current value, then advance it. A fresh counter starts at 0.
    pub fn increment_and_fetch(&mut self, file: FileHandle, kind: CounterKind) -> usize {
        let value = self.items.entry((file, kind)).or_insert(0);
        let current = *value;
        *value += 1;
        current
    }

    /// The value most recently returned by
    /// [`increment_and_fetch`](Self::increment_and_fetch), without advancing.
    pub fn fetch(&self, file: FileHandle, kind: CounterKind) -> Option<usize> {
        self.issued(file, kind).and_then(|n| n.checked_sub(1))
    }

    /// How many values the counter has handed out.
    pub fn issued(&self, file: FileHandle, kind: CounterKind) -> Option<usize> {
        self.items.get(&(file, kind)).copied()
    }

    /// Drop a counter, returning how many values it had issued. No-op if absent.
    pub fn remove(&mut self, file: FileHandle, kind: CounterKind) -> Option<usize> {
        self.items.remove(&(file, kind))
    }

    /// Drop every counter of `file`.
    pub fn remove_file(&mut self, file: FileHandle) -> usize {
        let before = self.items.len();
        self.items.retain(|&(f, _), _| f != file);
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl InvalidateFile for FileItemCounters {
    fn invalidate_file(&mut self, file: FileHandle) {
        self.remove_file(file);
    }
}
