mod common;

use common::new_file;
use exodus_lookup::prelude::*;

#[test]
fn counters_number_items_per_file_and_kind() {
    let mut st = MemoryStorage::new();
    let a = new_file(&mut st);
    let b = new_file(&mut st);
    let mut s = Session::new(st);

    let issued: Vec<_> = (0..3)
        .map(|_| s.increment_item(a, ObjectType::ElemBlock))
        .collect();
    assert_eq!(issued, [0, 1, 2]);
    assert_eq!(s.item(a, ObjectType::ElemBlock), Some(2));
    assert_eq!(s.item(a, ObjectType::ElemBlock), Some(2));
    assert_eq!(s.counters().issued(a, ObjectType::ElemBlock), Some(3));

    assert_eq!(s.increment_item(a, ObjectType::NodeSet), 0);
    assert_eq!(s.increment_item(b, ObjectType::ElemBlock), 0);
    assert_eq!(s.item(b, ObjectType::SideSet), None);
    assert_eq!(s.counters().len(), 3);

    s.remove_item(a, ObjectType::NodeSet);
    assert_eq!(s.item(a, ObjectType::NodeSet), None);
    assert_eq!(s.increment_item(a, ObjectType::NodeSet), 0);
}

#[test]
fn closing_a_file_resets_its_counters() -> Result<(), Box<dyn std::error::Error>> {
    let mut st = MemoryStorage::new();
    let a = new_file(&mut st);
    let b = new_file(&mut st);
    let mut s = Session::new(st);
    s.increment_item(a, ObjectType::ElemBlock);
    s.increment_item(a, ObjectType::ElemBlock);
    s.increment_item(b, ObjectType::ElemBlock);

    s.close(a)?;
    assert_eq!(s.item(a, ObjectType::ElemBlock), None);
    assert_eq!(s.item(b, ObjectType::ElemBlock), Some(0));

    let reused = new_file(s.storage_mut());
    assert_eq!(reused, a);
    assert_eq!(s.increment_item(reused, ObjectType::ElemBlock), 0);
    Ok(())
}
