//! Per-open-file caches and their invalidation.
//!
//! Storage backends recycle file handles once a file is closed. Anything
//! keyed by a handle must therefore be dropped when that file closes, or a
//! newly opened file with the same handle would be served stale data.

pub mod counters;
pub mod stats;

pub use counters::FileItemCounters;
pub use stats::{ObjectStats, ObjectStatsCache};

use crate::storage::FileHandle;

/// Anything that caches state keyed by a file handle should implement this.
pub trait InvalidateFile {
    /// Drop *all* entries belonging to `file` so a recycled handle starts clean.
    fn invalidate_file(&mut self, file: FileHandle);
}

// Blanket impl for Box<T>
impl<T: InvalidateFile + ?Sized> InvalidateFile for Box<T> {
    #[inline]
    fn invalidate_file(&mut self, file: FileHandle) {
        (**self).invalidate_file(file);
    }
}
