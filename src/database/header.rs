//! Header storage-size estimate.
//!
//! Counts the 4-byte words needed for the bulk "header" data of a database:
//! coordinates, maps, block connectivity and attributes, and set contents.
//! Floating point data counts double when the file stores 8-byte reals.
//! Result variables are not included, so the figure is a lower bound.

use super::Session;
use crate::exodus_error::ExodusError;
use crate::names::{
    DIM_NUM_DIM, DIM_NUM_ELEM, DIM_NUM_NODES, VAR_ELEM_NUM_MAP, VAR_MAP, VAR_NODE_NUM_MAP,
    is_placeholder,
};
use crate::object_type::ObjectType;
use crate::storage::{FileHandle, Storage};

/// Above this many words a normal-model file has probably overflowed.
pub const NORMAL_MODEL_WORD_LIMIT: usize = 1 << 29;

impl<S: Storage> Session<S> {
    /// Estimated number of storage words for the header data of `file`.
    ///
    /// Missing dimensions count as zero, including the sizes of a block or set
    /// whose id is written but whose dimensions are not. The total saturates
    /// at `usize::MAX`. A normal-model file whose estimate
    /// exceeds [`NORMAL_MODEL_WORD_LIMIT`] gets a warning logged; the value
    /// returned is the same either way.
    pub fn header_size(&mut self, file: FileHandle) -> Result<usize, ExodusError> {
        let iows = self.float_word_size(file);
        let mut size = Words::default();

        // coordinates
        let ndim = self.dimension_or_zero(file, DIM_NUM_DIM)?;
        let num_nodes = self.dimension_or_zero(file, DIM_NUM_NODES)?;
        size.add3(iows, ndim, num_nodes);

        // node maps
        if self.has_variable(file, VAR_NODE_NUM_MAP)? {
            size.add(num_nodes);
        }
        let num_node_maps = self.dimension_or_zero(file, object_count_dim(ObjectType::NodeMap))?;
        size.add2(num_node_maps, num_nodes);

        // element order and number maps
        let num_elem = self.dimension_or_zero(file, DIM_NUM_ELEM)?;
        if self.has_variable(file, VAR_MAP)? {
            size.add(num_elem);
        }
        if self.has_variable(file, VAR_ELEM_NUM_MAP)? {
            size.add(num_elem);
        }

        let num_elem_maps = self.dimension_or_zero(file, object_count_dim(ObjectType::ElemMap))?;
        size.add2(num_elem_maps, num_elem);

        let num_eblk = self.dimension_or_zero(file, object_count_dim(ObjectType::ElemBlock))?;
        if num_eblk > 0 {
            size.add2(2, num_eblk); // status + ids
            for id in self.live_ids(file, ObjectType::ElemBlock)? {
                // a block whose sizes are not defined yet adds nothing
                let blk = or_default(self.block_params(file, ObjectType::ElemBlock, id))?;
                size.add2(blk.entries, blk.nodes_per_entry);
                size.add3(blk.entries, blk.attributes, iows);
            }
        }

        let num_nset = self.dimension_or_zero(file, object_count_dim(ObjectType::NodeSet))?;
        if num_nset > 0 {
            size.add2(2, num_nset);
            for id in self.live_ids(file, ObjectType::NodeSet)? {
                let set = or_default(self.set_params(file, ObjectType::NodeSet, id))?;
                size.add(set.entries);
                size.add2(set.dist_factors, iows);
            }
        }

        let num_sset = self.dimension_or_zero(file, object_count_dim(ObjectType::SideSet))?;
        if num_sset > 0 {
            size.add2(2, num_sset);
            for id in self.live_ids(file, ObjectType::SideSet)? {
                let set = or_default(self.set_params(file, ObjectType::SideSet, id))?;
                size.add2(set.entries, 2); // element + side
                size.add2(set.dist_factors, iows);
            }
        }

        let size = size.0;
        if !self.large_model(file) && size > NORMAL_MODEL_WORD_LIMIT {
            log::warn!(
                "size to store header information exceeds 2GB in file id {file} ({size} words); \
                 file is probably corrupt, rerun with the large model selected"
            );
        }
        Ok(size)
    }

    fn has_variable(&self, file: FileHandle, name: &str) -> Result<bool, ExodusError> {
        match self.storage.variable(file, name) {
            Ok(_) => Ok(true),
            Err(e) if e.is_undefined() => Ok(false),
            Err(e) => Err(ExodusError::io(file, format!("failed to locate `{name}`"), e)),
        }
    }

    /// Ids that have actually been written; placeholder slots are skipped.
    fn live_ids(&self, file: FileHandle, object: ObjectType) -> Result<Vec<i32>, ExodusError> {
        let mut ids = self.get_ids(file, object)?;
        ids.retain(|&id| !is_placeholder(id));
        Ok(ids)
    }
}

fn object_count_dim(object: ObjectType) -> &'static str {
    object.tables().map_or("", |t| t.count_dim)
}

/// Treat "not defined yet" from a parameter query as all-zero parameters.
fn or_default<T: Default>(params: Result<T, ExodusError>) -> Result<T, ExodusError> {
    match params {
        Err(ExodusError::Io { source, .. }) if source.is_undefined() => Ok(T::default()),
        other => other,
    }
}

/// Word total that sticks at `usize::MAX` instead of overflowing.
#[derive(Debug, Default, Clone, Copy)]
struct Words(usize);

impl Words {
    fn add(&mut self, n: usize) {
        self.0 = self.0.saturating_add(n);
    }

    fn add2(&mut self, a: usize, b: usize) {
        self.add(a.saturating_mul(b));
    }

    fn add3(&mut self, a: usize, b: usize, c: usize) {
        self.add(a.saturating_mul(b).saturating_mul(c));
    }
}
