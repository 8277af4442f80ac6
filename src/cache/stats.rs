//! Object statistics cache.
//!
//! One [`ObjectStats`] per (file handle, object category) remembers the id
//! table and status table of that category once they are known to be
//! complete. Tables that still contain placeholder slots are never cached:
//! a later write will change them.

use super::InvalidateFile;
use crate::debug_invariants::DebugInvariants;
use crate::exodus_error::ExodusError;
use crate::names::is_placeholder;
use crate::object_type::ObjectType;
use crate::storage::FileHandle;
use hashbrown::HashMap;

/// Cached id/status tables for one category of one open file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStats {
    file: FileHandle,
    id_values: Option<Vec<i32>>,
    status_values: Option<Vec<i32>>,
    count: usize,
    ids_valid: bool,
    status_valid: bool,
}

impl ObjectStats {
    /// A zero-initialized entry: nothing cached, nothing valid.
    pub fn new(file: FileHandle) -> Self {
        Self {
            file,
            id_values: None,
            status_values: None,
            count: 0,
            ids_valid: false,
            status_valid: false,
        }
    }

    #[inline]
    pub fn file(&self) -> FileHandle {
        self.file
    }

    /// Number of cached entries; 0 until the ids are valid.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// `true` once a complete, placeholder-free id table is cached.
    #[inline]
    pub fn ids_valid(&self) -> bool {
        self.ids_valid
    }

    /// `true` once the status table is cached. Implies [`ids_valid`](Self::ids_valid).
    #[inline]
    pub fn status_valid(&self) -> bool {
        self.status_valid
    }

    /// Cached ids, or an empty slice.
    pub fn id_values(&self) -> &[i32] {
        self.id_values.as_deref().unwrap_or(&[])
    }

    /// Cached status flags, or an empty slice.
    pub fn status_values(&self) -> &[i32] {
        self.status_values.as_deref().unwrap_or(&[])
    }

    /// `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.id_values.is_none() && self.status_values.is_none() && !self.ids_valid
    }

    /// Take ownership of a complete id table.
    pub(crate) fn adopt_ids(&mut self, ids: Vec<i32>) {
        debug_assert!(is_filled(&ids));
        self.count = ids.len();
        self.id_values = Some(ids);
        self.ids_valid = true;
    }

    /// Take ownership of a status table. Refused, handing the buffer back,
    /// unless the ids are valid and the lengths agree.
    pub(crate) fn adopt_status(&mut self, status: Vec<i32>) -> Result<(), Vec<i32>> {
        if !self.ids_valid || status.len() != self.count {
            return Err(status);
        }
        self.status_values = Some(status);
        self.status_valid = true;
        Ok(())
    }

    fn check(&self, object: ObjectType) -> Result<(), ExodusError> {
        let violation = |reason| ExodusError::CacheInvariant {
            file: self.file,
            object,
            reason,
        };
        if self.status_valid && !self.ids_valid {
            return Err(violation("status marked valid without valid ids"));
        }
        if self.ids_valid {
            let ids = self
                .id_values
                .as_deref()
                .ok_or_else(|| violation("ids marked valid but not cached"))?;
            if ids.len() != self.count {
                return Err(violation("cached id count mismatch"));
            }
            if !is_filled(ids) {
                return Err(violation("cached ids contain placeholders"));
            }
        } else if self.id_values.is_some() {
            return Err(violation("ids cached but not marked valid"));
        }
        if self.status_valid {
            let status = self
                .status_values
                .as_deref()
                .ok_or_else(|| violation("status marked valid but not cached"))?;
            if status.len() != self.count {
                return Err(violation("cached status count mismatch"));
            }
        } else if self.status_values.is_some() {
            return Err(violation("status cached but not marked valid"));
        }
        Ok(())
    }
}

/// `true` if no slot of `ids` still holds a placeholder (0 or the fill value).
pub fn is_filled(ids: &[i32]) -> bool {
    !ids.iter().any(|&id| is_placeholder(id))
}

/// Per (file, category) statistics, created lazily and removed on close.
#[derive(Debug, Default, Clone)]
pub struct ObjectStatsCache {
    entries: HashMap<(FileHandle, ObjectType), ObjectStats>,
}

impl ObjectStatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing entry for `(file, object)`, or a fresh zero-initialized one.
    pub fn get_or_create(&mut self, file: FileHandle, object: ObjectType) -> &mut ObjectStats {
        self.entries
            .entry((file, object))
            .or_insert_with(|| ObjectStats::new(file))
    }

    /// Peek at an entry without creating it.
    pub fn get(&self, file: FileHandle, object: ObjectType) -> Option<&ObjectStats> {
        self.entries.get(&(file, object))
    }

    pub fn contains(&self, file: FileHandle, object: ObjectType) -> bool {
        self.entries.contains_key(&(file, object))
    }

    /// Drop the entry for `(file, object)` and its buffers. No-op if absent.
    pub fn remove(&mut self, file: FileHandle, object: ObjectType) -> Option<ObjectStats> {
        self.entries.remove(&(file, object))
    }

    /// Drop every category for `file`; returns how many entries went away.
    pub fn remove_file(&mut self, file: FileHandle) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&(f, _), _| f != file);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InvalidateFile for ObjectStatsCache {
    fn invalidate_file(&mut self, file: FileHandle) {
        let removed = self.remove_file(file);
        if removed > 0 {
            log::trace!("dropped {removed} cached object tables for file id {file}");
        }
    }
}

impl DebugInvariants for ObjectStatsCache {
    fn validate_invariants(&self) -> Result<(), ExodusError> {
        for (&(file, object), stats) in &self.entries {
            if stats.file != file {
                return Err(ExodusError::CacheInvariant {
                    file,
                    object,
                    reason: "entry keyed under a different file handle",
                });
            }
            stats.check(object)?;
        }
        Ok(())
    }
}
