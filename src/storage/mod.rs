//! Variable/dimension storage consumed by the lookup layer.
//!
//! The lookup and caching code never touches a file format directly. It asks
//! a [`Storage`] backend (netCDF-like: named dimensions, named integer
//! variables, attributes) for the handful of things it needs. Backends hand
//! out [`FileHandle`]s and are free to recycle them after a file is closed;
//! that recycling is what makes explicit cache invalidation mandatory.

pub mod memory;

pub use memory::MemoryStorage;

use std::fmt;
use thiserror::Error;

/// Identifies an open database within one storage backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FileHandle(pub i32);

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a dimension within one open file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DimId(pub usize);

/// Identifies a variable within one open file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// Failures reported by a storage backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("file id {0} is not open")]
    BadFile(FileHandle),
    #[error("dimension `{0}` is not defined")]
    UndefinedDimension(String),
    #[error("variable `{0}` is not defined")]
    UndefinedVariable(String),
    #[error("variable id {0:?} is not defined")]
    BadVariable(VarId),
    #[error("attribute `{0}` is not defined")]
    UndefinedAttribute(String),
    #[error("`{0}` is already defined")]
    AlreadyDefined(String),
    #[error("access to {requested} values of `{name}` exceeds its length {len}")]
    OutOfRange {
        name: String,
        requested: usize,
        len: usize,
    },
}

impl StorageError {
    /// `true` if the error only says a named dimension or variable is absent.
    pub fn is_undefined(&self) -> bool {
        matches!(
            self,
            StorageError::UndefinedDimension(_) | StorageError::UndefinedVariable(_)
        )
    }
}

/// Read-side storage interface required by the lookup layer.
pub trait Storage {
    /// Resolve a dimension by name, returning its id and length.
    fn dimension(&self, file: FileHandle, name: &str) -> Result<(DimId, usize), StorageError>;

    /// Resolve a variable by name.
    fn variable(&self, file: FileHandle, name: &str) -> Result<VarId, StorageError>;

    /// Read the first `out.len()` values of a 1-d integer variable.
    fn read_ints(&self, file: FileHandle, var: VarId, out: &mut [i32]) -> Result<(), StorageError>;

    /// Read a single value of a 1-d integer variable.
    fn read_int(&self, file: FileHandle, var: VarId, index: usize) -> Result<i32, StorageError>;

    /// Global integer attribute, if defined.
    fn global_int_attribute(&self, file: FileHandle, name: &str) -> Option<i32>;

    /// Text attribute attached to a variable.
    fn text_attribute(
        &self,
        file: FileHandle,
        var: VarId,
        name: &str,
    ) -> Result<String, StorageError>;

    /// Close a file. The backend may hand its handle out again afterwards.
    fn close(&mut self, file: FileHandle) -> Result<(), StorageError>;
}

// Blanket impl for Box<T>
impl<T: Storage + ?Sized> Storage for Box<T> {
    #[inline]
    fn dimension(&self, file: FileHandle, name: &str) -> Result<(DimId, usize), StorageError> {
        (**self).dimension(file, name)
    }

    #[inline]
    fn variable(&self, file: FileHandle, name: &str) -> Result<VarId, StorageError> {
        (**self).variable(file, name)
    }

    #[inline]
    fn read_ints(&self, file: FileHandle, var: VarId, out: &mut [i32]) -> Result<(), StorageError> {
        (**self).read_ints(file, var, out)
    }

    #[inline]
    fn read_int(&self, file: FileHandle, var: VarId, index: usize) -> Result<i32, StorageError> {
        (**self).read_int(file, var, index)
    }

    #[inline]
    fn global_int_attribute(&self, file: FileHandle, name: &str) -> Option<i32> {
        (**self).global_int_attribute(file, name)
    }

    #[inline]
    fn text_attribute(
        &self,
        file: FileHandle,
        var: VarId,
        name: &str,
    ) -> Result<String, StorageError> {
        (**self).text_attribute(file, var, name)
    }

    #[inline]
    fn close(&mut self, file: FileHandle) -> Result<(), StorageError> {
        (**self).close(file)
    }
}
