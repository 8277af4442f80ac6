#![cfg_attr(docsrs, feature(doc_cfg))]
//! # exodus-lookup
//!
//! exodus-lookup is the id-lookup and caching core of an Exodus II style
//! mesh database layer. It sits between a read/write API and a netCDF-like
//! storage backend and provides:
//!
//! - Id lookup: resolve a block/set/map id to its 1-based table position,
//!   distinguishing live entities from administratively null ones
//! - A per-file object statistics cache that keeps complete id and status
//!   tables in memory and re-reads tables that are still being filled in
//! - Per-file item counters used to number blocks and sets as they are written
//! - An indexed quicksort that permutes an index array over shared values
//! - A storage-size estimate for the bulk header data of a database
//!
//! ## Handles and invalidation
//!
//! Storage backends recycle file handles after a file is closed. Everything
//! cached here is keyed by handle, so a file's cached state must be dropped
//! before its handle can come back. [`Session::close`](database::Session::close)
//! does both steps in order; callers managing their own caches must call
//! [`InvalidateFile::invalidate_file`](cache::InvalidateFile::invalidate_file)
//! themselves.
//!
//! ## Null entities
//!
//! A lookup of an id whose status flag is 0 succeeds with
//! [`IdLookup::Null`](database::IdLookup::Null). Callers that follow the file
//! format's sign convention can use
//! [`IdLookup::signed_index`](database::IdLookup::signed_index).
//!
//! ## Usage
//!
//! ```rust
//! use exodus_lookup::prelude::*;
//!
//! let mut storage = MemoryStorage::new();
//! let file = storage.create(&CreateOptions::default());
//! storage
//!     .put_object_ids(file, ObjectType::ElemBlock, &[10, 20, 30], Some(&[1, 0, 1]))
//!     .unwrap();
//!
//! let mut session = Session::new(storage);
//! assert_eq!(session.lookup(file, "eb_prop1", 30).unwrap(), IdLookup::Found(3));
//! assert_eq!(session.lookup(file, "eb_prop1", 20).unwrap().signed_index(), -2);
//! assert!(session.lookup(file, "eb_prop1", 99).unwrap_err().is_lookup_fail());
//! session.close(file).unwrap();
//! ```

pub mod algs;
pub mod cache;
pub mod config;
pub mod database;
pub mod debug_invariants;
pub mod exodus_error;
pub mod names;
pub mod object_type;
pub mod storage;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::iqsort::{search_sorted, sort_indices, sorted_permutation};
    pub use crate::cache::{FileItemCounters, InvalidateFile, ObjectStats, ObjectStatsCache};
    pub use crate::config::CreateOptions;
    pub use crate::database::{BlockParams, IdLookup, Session, SetParams, SharedSession};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::exodus_error::ExodusError;
    pub use crate::object_type::ObjectType;
    pub use crate::storage::{FileHandle, MemoryStorage, Storage, StorageError};
}
