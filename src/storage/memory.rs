//! In-process storage backend.
//!
//! `MemoryStorage` models the parts of a netCDF file the lookup layer relies
//! on: named dimensions, 1-d integer variables pre-filled with
//! [`FILL_INT`], global integer attributes and per-variable text attributes.
//! Closed handles are reused by the next `create`, lowest slot first, exactly
//! like the storage libraries this crate sits on top of.

use super::{DimId, FileHandle, Storage, StorageError, VarId};
use crate::config::CreateOptions;
use crate::names::{ATT_FILESIZE, ATT_FLT_WORDSIZE, ATT_PROP_NAME, FILL_INT, ID_PROP_NAME};
use crate::object_type::ObjectType;
use hashbrown::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory, handle-recycling storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Vec<Option<MemoryFile>>,
    reads: AtomicUsize,
}

#[derive(Debug, Default)]
struct MemoryFile {
    dims: Vec<(String, usize)>,
    vars: Vec<MemoryVar>,
    globals: HashMap<String, i32>,
}

#[derive(Debug)]
struct MemoryVar {
    name: String,
    data: Vec<i32>,
    text: HashMap<String, String>,
}

impl MemoryFile {
    fn dim(&self, name: &str) -> Option<usize> {
        self.dims.iter().position(|(n, _)| n == name)
    }

    fn var(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|v| v.name == name)
    }

    fn var_mut(&mut self, name: &str) -> Result<&mut MemoryVar, StorageError> {
        self.vars
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| StorageError::UndefinedVariable(name.to_string()))
    }

    fn var_by_id(&self, var: VarId) -> Result<&MemoryVar, StorageError> {
        self.vars.get(var.0).ok_or(StorageError::BadVariable(var))
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty database and return its handle.
    ///
    /// The `file_size` and `floating_point_word_size` global attributes are
    /// written from `options`.
    pub fn create(&mut self, options: &CreateOptions) -> FileHandle {
        let mut file = MemoryFile::default();
        file.globals
            .insert(ATT_FILESIZE.to_string(), i32::from(options.resolve_large_model()));
        file.globals
            .insert(ATT_FLT_WORDSIZE.to_string(), options.float_word_size());

        let slot = match self.files.iter().position(Option::is_none) {
            Some(slot) => {
                self.files[slot] = Some(file);
                slot
            }
            None => {
                self.files.push(Some(file));
                self.files.len() - 1
            }
        };
        let handle = FileHandle(slot as i32);
        log::debug!("memory storage: created file id {handle}");
        handle
    }

    /// `true` while `file` refers to an open database.
    pub fn is_open(&self, file: FileHandle) -> bool {
        self.file(file).is_ok()
    }

    fn file(&self, file: FileHandle) -> Result<&MemoryFile, StorageError> {
        usize::try_from(file.0)
            .ok()
            .and_then(|slot| self.files.get(slot))
            .and_then(Option::as_ref)
            .ok_or(StorageError::BadFile(file))
    }

    fn file_mut(&mut self, file: FileHandle) -> Result<&mut MemoryFile, StorageError> {
        usize::try_from(file.0)
            .ok()
            .and_then(|slot| self.files.get_mut(slot))
            .and_then(Option::as_mut)
            .ok_or(StorageError::BadFile(file))
    }

    /// Define a fixed-length dimension.
    pub fn define_dimension(
        &mut self,
        file: FileHandle,
        name: &str,
        len: usize,
    ) -> Result<DimId, StorageError> {
        let f = self.file_mut(file)?;
        if f.dim(name).is_some() {
            return Err(StorageError::AlreadyDefined(name.to_string()));
        }
        f.dims.push((name.to_string(), len));
        Ok(DimId(f.dims.len() - 1))
    }

    /// Define a 1-d integer variable over dimension `dim`, filled with [`FILL_INT`].
    pub fn define_variable(
        &mut self,
        file: FileHandle,
        name: &str,
        dim: &str,
    ) -> Result<VarId, StorageError> {
        let f = self.file_mut(file)?;
        if f.var(name).is_some() {
            return Err(StorageError::AlreadyDefined(name.to_string()));
        }
        let len = f
            .dim(dim)
            .map(|d| f.dims[d].1)
            .ok_or_else(|| StorageError::UndefinedDimension(dim.to_string()))?;
        f.vars.push(MemoryVar {
            name: name.to_string(),
            data: vec![FILL_INT; len],
            text: HashMap::new(),
        });
        Ok(VarId(f.vars.len() - 1))
    }

    /// Overwrite `values.len()` entries of a variable starting at `start`.
    pub fn put_ints(
        &mut self,
        file: FileHandle,
        name: &str,
        start: usize,
        values: &[i32],
    ) -> Result<(), StorageError> {
        let var = self.file_mut(file)?.var_mut(name)?;
        let end = start + values.len();
        if end > var.data.len() {
            return Err(StorageError::OutOfRange {
                name: name.to_string(),
                requested: end,
                len: var.data.len(),
            });
        }
        var.data[start..end].copy_from_slice(values);
        Ok(())
    }

    pub fn set_global_int_attribute(
        &mut self,
        file: FileHandle,
        name: &str,
        value: i32,
    ) -> Result<(), StorageError> {
        self.file_mut(file)?
            .globals
            .insert(name.to_string(), value);
        Ok(())
    }

    pub fn set_text_attribute(
        &mut self,
        file: FileHandle,
        var: &str,
        name: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        self.file_mut(file)?
            .var_mut(var)?
            .text
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Define the count dimension, id table and (optionally) status table of a
    /// category, all left unfilled.
    pub fn define_object_table(
        &mut self,
        file: FileHandle,
        object: ObjectType,
        count: usize,
        with_status: bool,
    ) -> Result<(), StorageError> {
        let Some(tables) = object.tables() else {
            return Err(StorageError::UndefinedVariable(format!("{object} id table")));
        };
        self.define_dimension(file, tables.count_dim, count)?;
        self.define_variable(file, tables.id_table, tables.count_dim)?;
        self.set_text_attribute(file, tables.id_table, ATT_PROP_NAME, ID_PROP_NAME)?;
        if let (true, Some(status)) = (with_status, tables.status_table) {
            self.define_variable(file, status, tables.count_dim)?;
        }
        Ok(())
    }

    /// Write a complete id table (and status table, if given), defining the
    /// table first when needed.
    pub fn put_object_ids(
        &mut self,
        file: FileHandle,
        object: ObjectType,
        ids: &[i32],
        status: Option<&[i32]>,
    ) -> Result<(), StorageError> {
        let Some(tables) = object.tables() else {
            return Err(StorageError::UndefinedVariable(format!("{object} id table")));
        };
        if self.file(file)?.dim(tables.count_dim).is_none() {
            self.define_object_table(file, object, ids.len(), status.is_some())?;
        }
        self.put_ints(file, tables.id_table, 0, ids)?;
        if let (Some(values), Some(name)) = (status, tables.status_table) {
            self.put_ints(file, name, 0, values)?;
        }
        Ok(())
    }

    /// Number of variable reads served since creation or the last reset.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    pub fn reset_read_count(&self) {
        self.reads.store(0, Ordering::Relaxed);
    }
}

impl Storage for MemoryStorage {
    fn dimension(&self, file: FileHandle, name: &str) -> Result<(DimId, usize), StorageError> {
        let f = self.file(file)?;
        f.dim(name)
            .map(|d| (DimId(d), f.dims[d].1))
            .ok_or_else(|| StorageError::UndefinedDimension(name.to_string()))
    }

    fn variable(&self, file: FileHandle, name: &str) -> Result<VarId, StorageError> {
        self.file(file)?
            .var(name)
            .map(VarId)
            .ok_or_else(|| StorageError::UndefinedVariable(name.to_string()))
    }

    fn read_ints(&self, file: FileHandle, var: VarId, out: &mut [i32]) -> Result<(), StorageError> {
        let v = self.file(file)?.var_by_id(var)?;
        let src = v.data.get(..out.len()).ok_or_else(|| StorageError::OutOfRange {
            name: v.name.clone(),
            requested: out.len(),
            len: v.data.len(),
        })?;
        out.copy_from_slice(src);
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn read_int(&self, file: FileHandle, var: VarId, index: usize) -> Result<i32, StorageError> {
        let v = self.file(file)?.var_by_id(var)?;
        let value = v.data.get(index).copied().ok_or_else(|| StorageError::OutOfRange {
            name: v.name.clone(),
            requested: index + 1,
            len: v.data.len(),
        })?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    fn global_int_attribute(&self, file: FileHandle, name: &str) -> Option<i32> {
        self.file(file).ok()?.globals.get(name).copied()
    }

    fn text_attribute(
        &self,
        file: FileHandle,
        var: VarId,
        name: &str,
    ) -> Result<String, StorageError> {
        self.file(file)?
            .var_by_id(var)?
            .text
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::UndefinedAttribute(name.to_string()))
    }

    fn close(&mut self, file: FileHandle) -> Result<(), StorageError> {
        self.file(file)?;
        self.files[file.0 as usize] = None;
        log::debug!("memory storage: closed file id {file}");
        Ok(())
    }
}

static_assertions::assert_impl_all!(MemoryStorage: Send, Sync);
