#![allow(dead_code)]

use exodus_lookup::config::CreateOptions;
use exodus_lookup::names::{ATT_PROP_NAME, DIM_NUM_DIM, DIM_NUM_ELEM, DIM_NUM_NODES};
use exodus_lookup::object_type::ObjectType;
use exodus_lookup::storage::{FileHandle, MemoryStorage, StorageError};

/// Normal-model, single precision options that ignore the environment.
pub fn normal_options() -> CreateOptions {
    CreateOptions {
        normal_model: true,
        ..Default::default()
    }
}

pub fn new_file(storage: &mut MemoryStorage) -> FileHandle {
    storage.create(&normal_options())
}

/// Element block parameters: (elements, nodes per element, attributes).
#[derive(Clone, Copy, Debug)]
pub struct Block(pub usize, pub usize, pub usize);

/// Node set: (nodes, has distribution factors).
#[derive(Clone, Copy, Debug)]
pub struct NodeSet(pub usize, pub bool);

/// Side set: (sides, distribution factors).
#[derive(Clone, Copy, Debug)]
pub struct SideSet(pub usize, pub usize);

/// Small mesh description used to populate a [`MemoryStorage`] file.
#[derive(Clone, Debug, Default)]
pub struct MeshLayout {
    pub num_dim: usize,
    pub num_nodes: usize,
    pub num_elem: usize,
    pub node_num_map: bool,
    pub elem_num_map: bool,
    pub node_maps: usize,
    pub elem_maps: usize,
    pub blocks: Vec<Block>,
    pub node_sets: Vec<NodeSet>,
    pub side_sets: Vec<SideSet>,
    /// Status flags per object kind; `None` means every object is live.
    pub block_status: Option<Vec<i32>>,
    pub side_set_status: Option<Vec<i32>>,
}

fn dim(st: &mut MemoryStorage, f: FileHandle, name: &str, len: usize) -> Result<(), StorageError> {
    if len > 0 {
        st.define_dimension(f, name, len)?;
    }
    Ok(())
}

impl MeshLayout {
    pub fn write(&self, st: &mut MemoryStorage, f: FileHandle) -> Result<(), StorageError> {
        dim(st, f, DIM_NUM_DIM, self.num_dim)?;
        dim(st, f, DIM_NUM_NODES, self.num_nodes)?;
        dim(st, f, DIM_NUM_ELEM, self.num_elem)?;
        if self.node_num_map {
            st.define_variable(f, "node_num_map", DIM_NUM_NODES)?;
        }
        if self.elem_num_map {
            st.define_variable(f, "elem_num_map", DIM_NUM_ELEM)?;
        }
        dim(st, f, "num_node_maps", self.node_maps)?;
        dim(st, f, "num_elem_maps", self.elem_maps)?;

        if !self.blocks.is_empty() {
            let ids: Vec<i32> = (1..=self.blocks.len() as i32).map(|i| i * 10).collect();
            let status = self.block_status.clone().unwrap_or(vec![1; ids.len()]);
            st.put_object_ids(f, ObjectType::ElemBlock, &ids, Some(&status))?;
            for (k, blk) in self.blocks.iter().enumerate() {
                let i = k + 1;
                st.define_dimension(f, &format!("num_el_in_blk{i}"), blk.0)?;
                st.define_dimension(f, &format!("num_nod_per_el{i}"), blk.1)?;
                dim(st, f, &format!("num_att_in_blk{i}"), blk.2)?;
            }
        }

        if !self.node_sets.is_empty() {
            let ids: Vec<i32> = (1..=self.node_sets.len() as i32).map(|i| i * 100).collect();
            st.put_object_ids(f, ObjectType::NodeSet, &ids, Some(&vec![1; ids.len()]))?;
            for (k, ns) in self.node_sets.iter().enumerate() {
                let i = k + 1;
                let name = format!("num_nod_ns{i}");
                st.define_dimension(f, &name, ns.0)?;
                if ns.1 {
                    st.define_variable(f, &format!("dist_fact_ns{i}"), &name)?;
                }
            }
        }

        if !self.side_sets.is_empty() {
            let ids: Vec<i32> = (1..=self.side_sets.len() as i32).map(|i| i * 1000).collect();
            let status = self
                .side_set_status
                .clone()
                .unwrap_or(vec![1; ids.len()]);
            st.put_object_ids(f, ObjectType::SideSet, &ids, Some(&status))?;
            for (k, ss) in self.side_sets.iter().enumerate() {
                let i = k + 1;
                st.define_dimension(f, &format!("num_side_ss{i}"), ss.0)?;
                dim(st, f, &format!("num_df_ss{i}"), ss.1)?;
            }
        }
        Ok(())
    }
}

/// Add an integer property named `name` to every object of `object`.
pub fn add_property(
    st: &mut MemoryStorage,
    f: FileHandle,
    object: ObjectType,
    n: usize,
    name: &str,
    values: &[i32],
) -> Result<(), StorageError> {
    let tables = object.tables().expect("category with an id table");
    let var = object.prop_var(n).expect("category with properties");
    st.define_variable(f, &var, tables.count_dim)?;
    st.set_text_attribute(f, &var, ATT_PROP_NAME, name)?;
    st.put_ints(f, &var, 0, values)
}
