//! Parameter queries built on the id lookup.
//!
//! These read the per-file and per-object sizes the header estimator (and
//! any writer numbering blocks and sets) needs. Null objects report all-zero
//! parameters.

use super::Session;
use super::lookup::IdLookup;
use crate::exodus_error::ExodusError;
use crate::names::{ATT_FILESIZE, ATT_FLT_WORDSIZE};
use crate::object_type::{DistFactorSource, ObjectType};
use crate::storage::{FileHandle, Storage};
use serde::{Deserialize, Serialize};

/// Sizes describing one element, edge or face block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockParams {
    /// Number of elements (edges, faces) in the block.
    pub entries: usize,
    /// Nodes per entry.
    pub nodes_per_entry: usize,
    /// Attributes per entry.
    pub attributes: usize,
}

/// Sizes describing one node, edge, face, side or element set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetParams {
    /// Number of entries (nodes, sides, …) in the set.
    pub entries: usize,
    /// Number of distribution factors stored with the set.
    pub dist_factors: usize,
}

/// Length of dimension `name`, or 0 if it is not defined.
pub fn dimension_or_zero<S>(storage: &S, file: FileHandle, name: &str) -> Result<usize, ExodusError>
where
    S: Storage + ?Sized,
{
    match storage.dimension(file, name) {
        Ok((_, len)) => Ok(len),
        Err(e) if e.is_undefined() => Ok(0),
        Err(e) => Err(ExodusError::io(file, format!("failed to get dimension `{name}`"), e)),
    }
}

fn required_dimension<S>(storage: &S, file: FileHandle, name: &str) -> Result<usize, ExodusError>
where
    S: Storage + ?Sized,
{
    storage
        .dimension(file, name)
        .map(|(_, len)| len)
        .map_err(|e| ExodusError::io(file, format!("failed to locate dimension `{name}`"), e))
}

impl<S: Storage> Session<S> {
    /// `true` if the file was created with large-model storage.
    pub fn large_model(&self, file: FileHandle) -> bool {
        self.storage.global_int_attribute(file, ATT_FILESIZE) == Some(1)
    }

    /// Storage words per floating point value: 2 for 8-byte reals, else 1.
    pub fn float_word_size(&self, file: FileHandle) -> usize {
        if self.storage.global_int_attribute(file, ATT_FLT_WORDSIZE) == Some(8) {
            2
        } else {
            1
        }
    }

    /// Length of dimension `name`, or 0 if it is not defined.
    pub fn dimension_or_zero(&self, file: FileHandle, name: &str) -> Result<usize, ExodusError> {
        dimension_or_zero(&self.storage, file, name)
    }

    /// Read the full id table of `object`, straight from storage.
    pub fn get_ids(&self, file: FileHandle, object: ObjectType) -> Result<Vec<i32>, ExodusError> {
        let tables = object.tables().ok_or_else(|| {
            ExodusError::BadParam(format!("{object} has no id array in file id {file}"))
        })?;
        let count = dimension_or_zero(&self.storage, file, tables.count_dim)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let var = self.storage.variable(file, tables.id_table).map_err(|e| {
            ExodusError::io(file, format!("failed to locate {object} ids array"), e)
        })?;
        let mut ids = vec![0; count];
        self.storage
            .read_ints(file, var, &mut ids)
            .map_err(|e| ExodusError::io(file, format!("failed to read {object} ids array"), e))?;
        Ok(ids)
    }

    /// Entry, node and attribute counts of the block with id `id`.
    pub fn block_params(
        &mut self,
        file: FileHandle,
        object: ObjectType,
        id: i32,
    ) -> Result<BlockParams, ExodusError> {
        if !object.is_block() {
            return Err(ExodusError::BadParam(format!(
                "{object} is not a block type; file id {file}"
            )));
        }
        let index = match self.lookup_object(file, object, id)? {
            IdLookup::Found(index) => index,
            IdLookup::Null(_) => return Ok(BlockParams::default()),
        };
        let Some(dims) = object.block_dims(index) else {
            return Err(ExodusError::BadParam(format!("{object} has no block dimensions")));
        };
        Ok(BlockParams {
            entries: required_dimension(&self.storage, file, &dims.entries)?,
            nodes_per_entry: required_dimension(&self.storage, file, &dims.nodes_per_entry)?,
            attributes: dimension_or_zero(&self.storage, file, &dims.attributes)?,
        })
    }

    /// Entry and distribution-factor counts of the set with id `id`.
    pub fn set_params(
        &mut self,
        file: FileHandle,
        object: ObjectType,
        id: i32,
    ) -> Result<SetParams, ExodusError> {
        if !object.is_set() {
            return Err(ExodusError::BadParam(format!(
                "{object} is not a set type; file id {file}"
            )));
        }
        let index = match self.lookup_object(file, object, id)? {
            IdLookup::Found(index) => index,
            IdLookup::Null(_) => return Ok(SetParams::default()),
        };
        let Some(dims) = object.set_dims(index) else {
            return Err(ExodusError::BadParam(format!("{object} has no set dimensions")));
        };
        let entries = dimension_or_zero(&self.storage, file, &dims.entries)?;
        let dist_factors = match dims.dist_factors {
            DistFactorSource::Variable(name) => match self.storage.variable(file, &name) {
                Ok(_) => entries,
                Err(e) if e.is_undefined() => 0,
                Err(e) => {
                    return Err(ExodusError::io(
                        file,
                        format!("failed to locate `{name}`"),
                        e,
                    ));
                }
            },
            DistFactorSource::Dimension(name) => dimension_or_zero(&self.storage, file, &name)?,
        };
        Ok(SetParams {
            entries,
            dist_factors,
        })
    }
}
