//! `ObjectType`: the closed set of mesh object categories
//!
//! Every category the lookup and caching layer understands is listed here,
//! together with the storage names of its id table, count dimension and
//! status table. Nothing outside this enumeration can be looked up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A mesh object category.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ObjectType {
    ElemBlock,
    EdgeBlock,
    FaceBlock,
    NodeSet,
    EdgeSet,
    FaceSet,
    SideSet,
    ElemSet,
    ElemMap,
    NodeMap,
    EdgeMap,
    FaceMap,
    /// Pseudo-category for per-node data; has no id table.
    Nodal,
}

/// Storage names backing a category's id table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableNames {
    /// Variable holding the ids (property 1 of the category).
    pub id_table: &'static str,
    /// Dimension holding the number of objects.
    pub count_dim: &'static str,
    /// Variable holding live (nonzero) / null (zero) flags, if the category has one.
    pub status_table: Option<&'static str>,
}

/// Where a set stores its distribution-factor count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DistFactorSource {
    /// One factor per entry whenever this variable exists.
    Variable(String),
    /// A dimension holding the factor count; absent means zero.
    Dimension(String),
}

/// Dimension names describing one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockDims {
    pub entries: String,
    pub nodes_per_entry: String,
    pub attributes: String,
}

/// Dimension/variable names describing one set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDims {
    pub entries: String,
    pub dist_factors: DistFactorSource,
}

impl ObjectType {
    /// All categories, in declaration order.
    pub const ALL: [ObjectType; 13] = [
        ObjectType::ElemBlock,
        ObjectType::EdgeBlock,
        ObjectType::FaceBlock,
        ObjectType::NodeSet,
        ObjectType::EdgeSet,
        ObjectType::FaceSet,
        ObjectType::SideSet,
        ObjectType::ElemSet,
        ObjectType::ElemMap,
        ObjectType::NodeMap,
        ObjectType::EdgeMap,
        ObjectType::FaceMap,
        ObjectType::Nodal,
    ];

    /// Id-table, count-dimension and status-table names, or `None` for [`ObjectType::Nodal`].
    pub const fn tables(self) -> Option<TableNames> {
        let (id_table, count_dim, status_table) = match self {
            ObjectType::ElemBlock => ("eb_prop1", "num_el_blk", Some("eb_status")),
            ObjectType::EdgeBlock => ("ed_prop1", "num_ed_blk", Some("ed_status")),
            ObjectType::FaceBlock => ("fa_prop1", "num_fa_blk", Some("fa_status")),
            ObjectType::NodeSet => ("ns_prop1", "num_node_sets", Some("ns_status")),
            ObjectType::EdgeSet => ("es_prop1", "num_edge_sets", Some("es_status")),
            ObjectType::FaceSet => ("fs_prop1", "num_face_sets", Some("fs_status")),
            ObjectType::SideSet => ("ss_prop1", "num_side_sets", Some("ss_status")),
            ObjectType::ElemSet => ("els_prop1", "num_elem_sets", Some("els_status")),
            ObjectType::ElemMap => ("em_prop1", "num_elem_maps", None),
            ObjectType::NodeMap => ("nm_prop1", "num_node_maps", None),
            ObjectType::EdgeMap => ("edm_prop1", "num_edge_maps", None),
            ObjectType::FaceMap => ("fam_prop1", "num_face_maps", None),
            ObjectType::Nodal => return None,
        };
        Some(TableNames {
            id_table,
            count_dim,
            status_table,
        })
    }

    /// Resolve an id-table variable name (e.g. `"eb_prop1"`) to its category.
    pub fn from_id_table(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.tables().is_some_and(|t| t.id_table == name))
    }

    /// Prefix of the category's property variables (`"eb_prop"` → `eb_prop1`, `eb_prop2`, …).
    pub const fn prop_prefix(self) -> Option<&'static str> {
        match self {
            ObjectType::ElemBlock => Some("eb_prop"),
            ObjectType::EdgeBlock => Some("ed_prop"),
            ObjectType::FaceBlock => Some("fa_prop"),
            ObjectType::NodeSet => Some("ns_prop"),
            ObjectType::EdgeSet => Some("es_prop"),
            ObjectType::FaceSet => Some("fs_prop"),
            ObjectType::SideSet => Some("ss_prop"),
            ObjectType::ElemSet => Some("els_prop"),
            ObjectType::ElemMap => Some("em_prop"),
            ObjectType::NodeMap => Some("nm_prop"),
            ObjectType::EdgeMap => Some("edm_prop"),
            ObjectType::FaceMap => Some("fam_prop"),
            ObjectType::Nodal => None,
        }
    }

    /// Name of the `n`-th (1-based) property variable.
    pub fn prop_var(self, n: usize) -> Option<String> {
        self.prop_prefix().map(|prefix| format!("{prefix}{n}"))
    }

    /// Dimension holding the number of entries in the object at 1-based `index`.
    pub fn entry_count_dim(self, index: usize) -> Option<String> {
        let name = match self {
            ObjectType::EdgeBlock => format!("num_ed_in_blk{index}"),
            ObjectType::FaceBlock => format!("num_fa_in_blk{index}"),
            ObjectType::ElemBlock => format!("num_el_in_blk{index}"),
            ObjectType::NodeSet => format!("num_nod_ns{index}"),
            ObjectType::EdgeSet => format!("num_edge_es{index}"),
            ObjectType::FaceSet => format!("num_face_fs{index}"),
            ObjectType::SideSet => format!("num_side_ss{index}"),
            ObjectType::ElemSet => format!("num_ele_els{index}"),
            _ => return None,
        };
        Some(name)
    }

    /// Per-block dimension names for the block at 1-based `index`.
    pub fn block_dims(self, index: usize) -> Option<BlockDims> {
        let (entries, nodes, attributes) = match self {
            ObjectType::ElemBlock => ("num_el_in_blk", "num_nod_per_el", "num_att_in_blk"),
            ObjectType::EdgeBlock => ("num_ed_in_blk", "num_nod_per_ed", "num_att_in_eblk"),
            ObjectType::FaceBlock => ("num_fa_in_blk", "num_nod_per_fa", "num_att_in_fblk"),
            _ => return None,
        };
        Some(BlockDims {
            entries: format!("{entries}{index}"),
            nodes_per_entry: format!("{nodes}{index}"),
            attributes: format!("{attributes}{index}"),
        })
    }

    /// Per-set dimension names for the set at 1-based `index`.
    pub fn set_dims(self, index: usize) -> Option<SetDims> {
        let entries = self.entry_count_dim(index)?;
        let dist_factors = match self {
            ObjectType::NodeSet => DistFactorSource::Variable(format!("dist_fact_ns{index}")),
            ObjectType::EdgeSet => DistFactorSource::Dimension(format!("num_df_es{index}")),
            ObjectType::FaceSet => DistFactorSource::Dimension(format!("num_df_fs{index}")),
            ObjectType::SideSet => DistFactorSource::Dimension(format!("num_df_ss{index}")),
            ObjectType::ElemSet => DistFactorSource::Dimension(format!("num_df_els{index}")),
            _ => return None,
        };
        Some(SetDims {
            entries,
            dist_factors,
        })
    }

    pub const fn is_block(self) -> bool {
        matches!(
            self,
            ObjectType::ElemBlock | ObjectType::EdgeBlock | ObjectType::FaceBlock
        )
    }

    pub const fn is_set(self) -> bool {
        matches!(
            self,
            ObjectType::NodeSet
                | ObjectType::EdgeSet
                | ObjectType::FaceSet
                | ObjectType::SideSet
                | ObjectType::ElemSet
        )
    }

    pub const fn is_map(self) -> bool {
        matches!(
            self,
            ObjectType::ElemMap | ObjectType::NodeMap | ObjectType::EdgeMap | ObjectType::FaceMap
        )
    }

    /// Human-readable name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            ObjectType::ElemBlock => "element block",
            ObjectType::EdgeBlock => "edge block",
            ObjectType::FaceBlock => "face block",
            ObjectType::NodeSet => "node set",
            ObjectType::EdgeSet => "edge set",
            ObjectType::FaceSet => "face set",
            ObjectType::SideSet => "side set",
            ObjectType::ElemSet => "element set",
            ObjectType::ElemMap => "element map",
            ObjectType::NodeMap => "node map",
            ObjectType::EdgeMap => "edge map",
            ObjectType::FaceMap => "face map",
            ObjectType::Nodal => "nodal",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
