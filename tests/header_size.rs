mod common;

use common::{Block, MeshLayout, NodeSet, SideSet};
use exodus_lookup::config::CreateOptions;
use exodus_lookup::database::header::NORMAL_MODEL_WORD_LIMIT;
use exodus_lookup::exodus_error::ExodusError;
use exodus_lookup::prelude::*;
use proptest::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn sample_mesh() -> MeshLayout {
    MeshLayout {
        num_dim: 3,
        num_nodes: 100,
        num_elem: 50,
        node_num_map: true,
        elem_num_map: true,
        node_maps: 2,
        elem_maps: 1,
        blocks: vec![Block(30, 8, 2), Block(20, 4, 0)],
        node_sets: vec![NodeSet(10, true)],
        side_sets: vec![SideSet(6, 24), SideSet(9, 36)],
        block_status: None,
        side_set_status: Some(vec![1, 0]),
    }
}

fn size_of(mesh: &MeshLayout, options: &CreateOptions) -> Result<usize, Box<dyn std::error::Error>> {
    let mut st = MemoryStorage::new();
    let f = st.create(options);
    mesh.write(&mut st, f)?;
    Ok(Session::new(st).header_size(f)?)
}

#[test]
fn single_precision_sample() -> TestResult {
    // coords 300, node maps 100 + 200, elem maps 50 + 50,
    // blocks 4 + (240 + 60) + 80, node sets 2 + 20, side sets 4 + 36 (+ null)
    assert_eq!(size_of(&sample_mesh(), &common::normal_options())?, 1146);
    Ok(())
}

#[test]
fn double_precision_doubles_real_data() -> TestResult {
    let options = CreateOptions {
        normal_model: true,
        double_precision: true,
        ..Default::default()
    };
    // coords 600, block attributes 120, node set factors 20, side set factors 48
    assert_eq!(size_of(&sample_mesh(), &options)?, 1540);
    Ok(())
}

#[test]
fn empty_file_is_zero() -> TestResult {
    assert_eq!(size_of(&MeshLayout::default(), &common::normal_options())?, 0);
    Ok(())
}

#[test]
fn null_and_unwritten_objects_add_only_their_table_slots() -> TestResult {
    let mesh = MeshLayout {
        blocks: vec![Block(10, 4, 0), Block(10, 4, 0)],
        block_status: Some(vec![0, 0]),
        ..Default::default()
    };
    assert_eq!(size_of(&mesh, &common::normal_options())?, 4);

    // a block count with no ids written yet
    let mut st = MemoryStorage::new();
    let f = common::new_file(&mut st);
    st.define_object_table(f, ObjectType::ElemBlock, 3, true)?;
    assert_eq!(Session::new(st).header_size(f)?, 6);
    Ok(())
}

#[test]
fn header_size_populates_the_lookup_cache() -> TestResult {
    let mut st = MemoryStorage::new();
    let f = common::new_file(&mut st);
    sample_mesh().write(&mut st, f)?;
    let mut s = Session::new(st);
    s.header_size(f)?;
    for object in [ObjectType::ElemBlock, ObjectType::NodeSet, ObjectType::SideSet] {
        assert!(s.stats().get(f, object).is_some_and(|e| e.ids_valid()), "{object}");
    }
    Ok(())
}

#[test]
fn oversized_normal_model_still_reports_its_size() -> TestResult {
    let nodes = NORMAL_MODEL_WORD_LIMIT / 3 + 1;
    let mesh = MeshLayout {
        num_dim: 3,
        num_nodes: nodes,
        ..Default::default()
    };
    assert_eq!(size_of(&mesh, &common::normal_options())?, 3 * nodes);
    let large = CreateOptions {
        large_model: true,
        ..Default::default()
    };
    assert_eq!(size_of(&mesh, &large)?, 3 * nodes);
    Ok(())
}

#[test]
fn block_without_dimensions_counts_as_empty() -> TestResult {
    let mut st = MemoryStorage::new();
    let f = common::new_file(&mut st);
    MeshLayout {
        num_dim: 2,
        num_nodes: 10,
        ..Default::default()
    }
    .write(&mut st, f)?;
    st.put_object_ids(f, ObjectType::ElemBlock, &[10, 20], Some(&[1, 1]))?;
    st.define_dimension(f, "num_el_in_blk1", 4)?;
    st.define_dimension(f, "num_nod_per_el1", 4)?;

    let mut s = Session::new(st);
    assert_eq!(s.header_size(f)?, 20 + 4 + 16);
    // the direct query still reports the gap
    assert!(matches!(
        s.block_params(f, ObjectType::ElemBlock, 20),
        Err(ExodusError::Io { .. })
    ));
    Ok(())
}

#[test]
fn huge_dimensions_saturate() -> TestResult {
    let mesh = MeshLayout {
        num_dim: 3,
        num_nodes: usize::MAX / 2,
        node_maps: 4,
        ..Default::default()
    };
    assert_eq!(size_of(&mesh, &common::normal_options())?, usize::MAX);
    Ok(())
}

#[test]
fn model_and_word_size_attributes() {
    let mut st = MemoryStorage::new();
    let normal = st.create(&common::normal_options());
    let large = st.create(&CreateOptions {
        large_model: true,
        double_precision: true,
        ..Default::default()
    });
    let s = Session::new(st);
    assert!(!s.large_model(normal));
    assert_eq!(s.float_word_size(normal), 1);
    assert!(s.large_model(large));
    assert_eq!(s.float_word_size(large), 2);
}

fn block() -> impl Strategy<Value = Block> {
    (0usize..40, 1usize..9, 0usize..4).prop_map(|(e, n, a)| Block(e, n, a))
}

fn node_set() -> impl Strategy<Value = NodeSet> {
    (0usize..40, any::<bool>()).prop_map(|(n, df)| NodeSet(n, df))
}

fn side_set() -> impl Strategy<Value = SideSet> {
    (0usize..40, 0usize..80).prop_map(|(s, df)| SideSet(s, df))
}

#[derive(Clone, Debug)]
enum Extra {
    Block(Block),
    NodeSet(NodeSet),
    SideSet(SideSet),
}

fn extra() -> impl Strategy<Value = Extra> {
    prop_oneof![
        block().prop_map(Extra::Block),
        node_set().prop_map(Extra::NodeSet),
        side_set().prop_map(Extra::SideSet),
    ]
}

proptest! {
    #[test]
    fn adding_an_object_never_shrinks_the_estimate(
        blocks in prop::collection::vec(block(), 0..5),
        node_sets in prop::collection::vec(node_set(), 0..5),
        side_sets in prop::collection::vec(side_set(), 0..5),
        extra in extra(),
        double in any::<bool>(),
    ) {
        let options = CreateOptions { normal_model: true, double_precision: double, ..Default::default() };
        let mut mesh = MeshLayout {
            num_dim: 2,
            num_nodes: 16,
            num_elem: 9,
            blocks,
            node_sets,
            side_sets,
            ..Default::default()
        };
        let before = size_of(&mesh, &options).unwrap();
        match extra {
            Extra::Block(b) => mesh.blocks.push(b),
            Extra::NodeSet(ns) => mesh.node_sets.push(ns),
            Extra::SideSet(ss) => mesh.side_sets.push(ss),
        }
        let after = size_of(&mesh, &options).unwrap();
        prop_assert!(after >= before + 2);
    }
}
