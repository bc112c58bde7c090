use super::*;
use crate::arena::TypeArena;
use crate::types::TypeData;

fn instance_hierarchy(arena: &mut TypeArena) -> (TypeId, TypeId, TypeId) {
    let instance = arena.class(
        ClassType::new("Instance")
            .with_prop("Name", TypeId::STRING)
            .with_prop("ClassName", TypeId::STRING),
    );
    let base_part = arena.class(
        ClassType::new("BasePart")
            .with_prop("Anchored", TypeId::BOOLEAN)
            .with_parent(instance),
    );
    let part = arena.class(
        ClassType::new("Part")
            .with_prop("Name", TypeId::NUMBER)
            .with_parent(base_part),
    );
    (instance, base_part, part)
}

#[test]
fn test_ancestors_nearest_first() {
    let mut arena = TypeArena::new();
    let (instance, base_part, part) = instance_hierarchy(&mut arena);

    let chain: Vec<TypeId> = ancestors(&arena, part).map(|(id, _)| id).collect();
    assert_eq!(chain, vec![part, base_part, instance]);
}

#[test]
fn test_lookup_inherited_prop() {
    let mut arena = TypeArena::new();
    let (_, _, part) = instance_hierarchy(&mut arena);

    assert_eq!(lookup_class_prop(&arena, part, "Anchored"), Some(TypeId::BOOLEAN));
    assert_eq!(lookup_class_prop(&arena, part, "ClassName"), Some(TypeId::STRING));
    assert_eq!(lookup_class_prop(&arena, part, "Missing"), None);
}

#[test]
fn test_own_prop_shadows_inherited() {
    let mut arena = TypeArena::new();
    let (instance, _, part) = instance_hierarchy(&mut arena);

    assert_eq!(lookup_class_prop(&arena, part, "Name"), Some(TypeId::NUMBER));
    assert_eq!(lookup_class_prop(&arena, instance, "Name"), Some(TypeId::STRING));
}

#[test]
fn test_cyclic_parents_terminate() {
    let mut arena = TypeArena::new();
    let a = arena.free();
    let b = arena.class(ClassType::new("B").with_parent(a));
    arena.replace_type(a, TypeData::Class(ClassType::new("A").with_parent(b)));

    assert_eq!(ancestors(&arena, a).count(), 2);
    assert_eq!(lookup_class_prop(&arena, a, "nope"), None);
}

#[test]
fn test_non_class_has_no_ancestors() {
    let arena = TypeArena::new();
    assert_eq!(ancestors(&arena, TypeId::NUMBER).count(), 0);
}
