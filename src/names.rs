//! Symbolic storage names shared by every Exodus II database.
//!
//! Per-object names (id tables, status tables, property variables) live on
//! [`ObjectType`](crate::object_type::ObjectType); this module holds the
//! global ones.

/// Number of spatial dimensions.
pub const DIM_NUM_DIM: &str = "num_dim";
/// Number of nodes.
pub const DIM_NUM_NODES: &str = "num_nodes";
/// Number of elements.
pub const DIM_NUM_ELEM: &str = "num_elem";

/// Node number map.
pub const VAR_NODE_NUM_MAP: &str = "node_num_map";
/// Element order map.
pub const VAR_MAP: &str = "elem_map";
/// Element number map.
pub const VAR_ELEM_NUM_MAP: &str = "elem_num_map";

/// Global attribute: 1 for large-model files, 0 (or absent) for normal.
pub const ATT_FILESIZE: &str = "file_size";
/// Global attribute: floating point word size in bytes (4 or 8).
pub const ATT_FLT_WORDSIZE: &str = "floating_point_word_size";
/// Variable attribute holding a property's name.
pub const ATT_PROP_NAME: &str = "name";
/// Property name of the first property variable, which is the id table.
pub const ID_PROP_NAME: &str = "ID";

/// Value the storage layer writes into integer slots that were never set.
pub const FILL_INT: i32 = -2_147_483_647;

/// `true` if `value` marks a slot that has not been written with a real id yet.
#[inline]
pub fn is_placeholder(value: i32) -> bool {
    value == 0 || value == FILL_INT
}

static_assertions::const_assert_eq!(FILL_INT, -i32::MAX);
