//! Id lookup.
//!
//! Resolves an object id to its 1-based position in the category's id table.
//! The id and status tables are read from storage on first use and cached
//! once complete; tables that still hold placeholder slots are read again on
//! every call until they are filled in.
//!
//! A found id whose status flag is 0 is an administratively *null* entity.
//! That is a normal outcome, reported as [`IdLookup::Null`], not an error.

use super::Session;
use crate::cache::ObjectStatsCache;
use crate::cache::stats::is_filled;
use crate::debug_invariants::DebugInvariants;
use crate::exodus_error::ExodusError;
use crate::object_type::ObjectType;
use crate::storage::{FileHandle, Storage, VarId};
use std::borrow::Cow;

/// Outcome of a successful lookup. Positions are 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdLookup {
    /// The id is present and the entity is live.
    Found(usize),
    /// The id is present but the entity's status flag is 0.
    Null(usize),
}

impl IdLookup {
    /// 1-based position in the id table.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            IdLookup::Found(i) | IdLookup::Null(i) => i,
        }
    }

    /// 0-based offset, for indexing arrays that parallel the id table.
    #[inline]
    pub fn offset(self) -> usize {
        self.index() - 1
    }

    /// Position with the sign convention of the file format: `+n` live, `-n` null.
    pub fn signed_index(self) -> i64 {
        match self {
            IdLookup::Found(i) => i as i64,
            IdLookup::Null(i) => -(i as i64),
        }
    }

    #[inline]
    pub fn is_null(self) -> bool {
        matches!(self, IdLookup::Null(_))
    }
}

/// Look up `id` in the id table named `id_type` (e.g. `"eb_prop1"`).
pub fn id_lookup<S>(
    storage: &S,
    cache: &mut ObjectStatsCache,
    file: FileHandle,
    id_type: &str,
    id: i32,
) -> Result<IdLookup, ExodusError>
where
    S: Storage + ?Sized,
{
    let object = ObjectType::from_id_table(id_type).ok_or_else(|| {
        ExodusError::BadParam(format!("unsupported id array type {id_type} for file id {file}"))
    })?;
    lookup_object(storage, cache, file, object, id)
}

/// Look up `id` among the objects of category `object`.
pub fn lookup_object<S>(
    storage: &S,
    cache: &mut ObjectStatsCache,
    file: FileHandle,
    object: ObjectType,
    id: i32,
) -> Result<IdLookup, ExodusError>
where
    S: Storage + ?Sized,
{
    let tables = object.tables().ok_or_else(|| {
        ExodusError::BadParam(format!("{object} has no id array in file id {file}"))
    })?;
    let stats = cache.get_or_create(file, object);

    let mut transient = None;
    if !stats.ids_valid() {
        let (_, len) = storage.dimension(file, tables.count_dim).map_err(|e| {
            ExodusError::io(file, "failed to locate id array dimension", e)
        })?;
        let var = storage.variable(file, tables.id_table).map_err(|e| {
            ExodusError::io(file, format!("failed to locate {} array", tables.id_table), e)
        })?;
        let ids = read_table(storage, file, var, tables.id_table, len)?;
        if is_filled(&ids) {
            log::debug!(
                "caching {len} {object} ids (`{}`) for file id {file}",
                tables.id_table
            );
            stats.adopt_ids(ids);
        } else {
            log::trace!("{object} id table of file id {file} is incomplete; not cached");
            transient = Some(ids);
        }
    }

    let ids: Cow<'_, [i32]> = match transient {
        Some(ids) => Cow::Owned(ids),
        None => Cow::Borrowed(stats.id_values()),
    };
    let count = ids.len();
    let Some(position) = ids.iter().position(|&v| v == id) else {
        return Err(ExodusError::LookupFail {
            file,
            table: tables.id_table,
            id,
        });
    };
    drop(ids);

    let Some(status_table) = tables.status_table else {
        return Ok(IdLookup::Found(position + 1));
    };
    let var = match storage.variable(file, status_table) {
        Ok(var) => var,
        // Files written before status tables existed: every entity is live.
        Err(e) if e.is_undefined() => return Ok(IdLookup::Found(position + 1)),
        Err(e) => {
            return Err(ExodusError::io(
                file,
                format!("failed to locate {status_table} array"),
                e,
            ));
        }
    };

    let status: Cow<'_, [i32]> = if stats.status_valid() {
        Cow::Borrowed(stats.status_values())
    } else {
        let fresh = read_table(storage, file, var, status_table, count)?;
        match stats.adopt_status(fresh) {
            Ok(()) => Cow::Borrowed(stats.status_values()),
            Err(fresh) => Cow::Owned(fresh),
        }
    };
    let null = status.get(position) == Some(&0);
    drop(status);

    cache.debug_assert_invariants();

    Ok(if null {
        IdLookup::Null(position + 1)
    } else {
        IdLookup::Found(position + 1)
    })
}

/// Allocate and fill a `len`-entry buffer from `var`.
fn read_table<S>(
    storage: &S,
    file: FileHandle,
    var: VarId,
    table: &'static str,
    len: usize,
) -> Result<Vec<i32>, ExodusError>
where
    S: Storage + ?Sized,
{
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| ExodusError::MemFail { file, table, len })?;
    buf.resize(len, 0);
    storage
        .read_ints(file, var, &mut buf)
        .map_err(|e| ExodusError::io(file, format!("failed to get {table} array"), e))?;
    Ok(buf)
}

impl<S: Storage> Session<S> {
    /// Resolve `id` in the id table named `id_type` (e.g. `"ns_prop1"`).
    pub fn lookup(
        &mut self,
        file: FileHandle,
        id_type: &str,
        id: i32,
    ) -> Result<IdLookup, ExodusError> {
        id_lookup(&self.storage, &mut self.stats, file, id_type, id)
    }

    /// Resolve `id` among the objects of category `object`.
    pub fn lookup_object(
        &mut self,
        file: FileHandle,
        object: ObjectType,
        id: i32,
    ) -> Result<IdLookup, ExodusError> {
        lookup_object(&self.storage, &mut self.stats, file, object, id)
    }
}
