//! ExodusError: Unified error type for exodus-lookup public APIs
//!
//! Every fallible operation in the crate returns this type. A "null" entity
//! (id present, status 0) is *not* an error; see
//! [`IdLookup::Null`](crate::database::lookup::IdLookup::Null).

use crate::object_type::ObjectType;
use crate::storage::{FileHandle, StorageError};
use thiserror::Error;

/// Unified error type for exodus-lookup operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExodusError {
    /// An unrecognized id-array name or an unsupported object type was requested.
    #[error("bad parameter: {0}")]
    BadParam(String),
    /// The id is not present in the (possibly just loaded) id table.
    #[error("id {id} not found in `{table}` array of file id {file}")]
    LookupFail {
        file: FileHandle,
        table: &'static str,
        id: i32,
    },
    /// A working buffer for a table read could not be allocated.
    #[error("failed to allocate memory for {len} entries of `{table}` array for file id {file}")]
    MemFail {
        file: FileHandle,
        table: &'static str,
        len: usize,
    },
    /// The underlying storage layer failed.
    #[error("{context} in file id {file}: {source}")]
    Io {
        file: FileHandle,
        context: String,
        source: StorageError,
    },
    /// No property variable carries the requested name.
    #[error("{object} property `{name}` not defined in file id {file}")]
    PropertyNotFound {
        file: FileHandle,
        object: ObjectType,
        name: String,
    },
    /// A cached entry violates its validity invariants.
    #[error("cache invariant violated for {object} of file id {file}: {reason}")]
    CacheInvariant {
        file: FileHandle,
        object: ObjectType,
        reason: &'static str,
    },
}

impl ExodusError {
    /// Wrap a storage failure with a human-readable context.
    pub fn io(file: FileHandle, context: impl Into<String>, source: StorageError) -> Self {
        ExodusError::Io {
            file,
            context: context.into(),
            source,
        }
    }

    /// `true` if this is a plain "id not present" failure.
    pub fn is_lookup_fail(&self) -> bool {
        matches!(self, ExodusError::LookupFail { .. })
    }
}
