use super::*;

#[test]
fn test_generate_name_sequence() {
    assert_eq!(generate_name(0), "a");
    assert_eq!(generate_name(1), "b");
    assert_eq!(generate_name(25), "z");
    assert_eq!(generate_name(26), "a1");
    assert_eq!(generate_name(27), "b1");
    assert_eq!(generate_name(51), "z1");
    assert_eq!(generate_name(52), "a2");
}

#[test]
fn test_generate_name_deterministic_and_unique() {
    let mut seen = FxHashSet::default();
    for n in 0..10_000 {
        let name = generate_name(n);
        assert_eq!(name, generate_name(n));
        assert!(seen.insert(name), "duplicate name for {n}");
    }
}

#[test]
fn test_type_name_is_cached() {
    let mut names = NameAllocator::new();
    let first = names.type_name(TypeId(10));
    let second = names.type_name(TypeId(11));
    assert_eq!(first, "a");
    assert_eq!(second, "b");
    assert_eq!(names.type_name(TypeId(10)), "a");
}

#[test]
fn test_types_and_packs_share_the_sequence() {
    let mut names = NameAllocator::new();
    assert_eq!(names.type_name(TypeId(10)), "a");
    assert_eq!(names.pack_name(TypePackId(4)), "b");
    assert_eq!(names.pack_name(TypePackId(4)), "b");
}

#[test]
fn test_seeded_names_are_reused_and_skipped() {
    let seed = ToStringNameMap::new()
        .with_type(TypeId(10), "a")
        .with_pack(TypePackId(3), "b");
    let mut names = NameAllocator::seeded(seed);

    assert_eq!(names.type_name(TypeId(10)), "a");
    assert_eq!(names.type_name(TypeId(11)), "c");
    assert_eq!(names.pack_name(TypePackId(3)), "b");
}

#[test]
fn test_reserved_names_are_skipped() {
    let mut names = NameAllocator::new();
    names.reserve("a");
    names.reserve("t1");
    names.reserve("a");

    assert_eq!(names.type_name(TypeId(10)), "b");
    assert_eq!(names.pack_name(TypePackId(2)), "c");
    assert_eq!(names.cycle_name(TypeId(11)), "t2");
    assert_eq!(names.into_name_map().len(), 2);
}

#[test]
fn test_cycle_names() {
    let seed = ToStringNameMap::new().with_type(TypeId(20), "t2");
    let mut names = NameAllocator::seeded(seed);

    assert_eq!(names.cycle_name(TypeId(10)), "t1");
    assert_eq!(names.cycle_name(TypeId(11)), "t3");
    assert_eq!(names.cycle_name(TypeId(10)), "t1");
    assert_eq!(names.cycle_name(TypeId(20)), "t2");
    assert_eq!(names.cycle_name_of(TypeId(11)), Some("t3"));
    assert_eq!(names.cycle_name_of(TypeId(12)), None);
}

#[test]
fn test_into_name_map_keeps_seed_and_allocations() {
    let seed = ToStringNameMap::new().with_type(TypeId(10), "T");
    let mut names = NameAllocator::seeded(seed);
    names.type_name(TypeId(11));

    let map = names.into_name_map();
    assert_eq!(map.type_name(TypeId(10)), Some("T"));
    assert_eq!(map.type_name(TypeId(11)), Some("a"));
    assert_eq!(map.len(), 2);
}
