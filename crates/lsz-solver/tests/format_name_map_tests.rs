use super::*;

#[test]
fn test_merge_prefers_canonical() {
    let canonical = ToStringNameMap::new().with_type(TypeId(10), "T");
    let legacy = ToStringNameMap::new()
        .with_type(TypeId(10), "Old")
        .with_type(TypeId(11), "U")
        .with_pack(TypePackId(5), "P");

    let merged = merge_seeds(&canonical, &legacy);
    assert_eq!(merged.type_name(TypeId(10)), Some("T"));
    assert_eq!(merged.type_name(TypeId(11)), Some("U"));
    assert_eq!(merged.pack_name(TypePackId(5)), Some("P"));
    assert_eq!(merged.len(), 3);
}

#[test]
fn test_merge_of_empty_maps() {
    let merged = merge_seeds(&ToStringNameMap::new(), &ToStringNameMap::new());
    assert!(merged.is_empty());
}

#[test]
fn test_publish_duplicates() {
    let names = ToStringNameMap::new().with_type(TypeId(10), "a");
    let (canonical, legacy) = publish(names.clone());
    assert_eq!(canonical, names);
    assert_eq!(legacy, names);
}
