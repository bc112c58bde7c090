use super::*;
use lsz_common::Position;

fn loc() -> Location {
    Location::with_length(Position::new(0, 0), 1)
}

#[test]
fn test_lookup_binding_walks_parents() {
    let mut global = Scope::new();
    global.add_binding("print", TypeId(10), loc());
    let global: ScopePtr = Arc::new(global);

    let mut inner = Scope::child(global.clone());
    inner.add_binding("x", TypeId::NUMBER, loc());

    assert_eq!(inner.lookup_binding("x").map(|b| b.ty), Some(TypeId::NUMBER));
    assert_eq!(inner.lookup_binding("print").map(|b| b.ty), Some(TypeId(10)));
    assert!(inner.lookup_binding("missing").is_none());
    assert!(global.lookup_binding("x").is_none());
}

#[test]
fn test_inner_binding_shadows_outer() {
    let mut outer = Scope::new();
    outer.add_binding("x", TypeId::STRING, loc());
    let mut inner = Scope::child(Arc::new(outer));
    inner.add_binding("x", TypeId::NUMBER, loc());

    assert_eq!(inner.lookup_binding("x").map(|b| b.ty), Some(TypeId::NUMBER));
}

#[test]
fn test_type_visibility_local_and_parent() {
    let mut global = Scope::new();
    global.add_exported_type("Point", TypeFun::new(TypeId(20)));
    let global = Arc::new(global);

    let mut inner = Scope::child(global);
    inner.add_private_type("Secret", TypeFun::new(TypeId(21)));

    assert_eq!(inner.type_name_visibility("Point"), TypeNameVisibility::Local);
    assert_eq!(inner.type_name_visibility("Secret"), TypeNameVisibility::Local);
    assert_eq!(inner.type_name_visibility("Nope"), TypeNameVisibility::NotVisible);
    assert!(!inner.is_type_name_visible("Nope"));
}

#[test]
fn test_type_visibility_through_import() {
    let mut scope = Scope::new();
    scope.add_imported_type("Shapes", "Circle", TypeFun::new(TypeId(30)));

    assert_eq!(
        scope.type_name_visibility("Circle"),
        TypeNameVisibility::Imported("Shapes")
    );
    assert!(scope.is_type_name_visible("Circle"));
}

#[test]
fn test_local_declaration_shadows_import() {
    let mut scope = Scope::new();
    scope.add_imported_type("Shapes", "Circle", TypeFun::new(TypeId(30)));
    scope.add_exported_type("Circle", TypeFun::new(TypeId(31)));

    assert_eq!(scope.type_name_visibility("Circle"), TypeNameVisibility::Local);
}

#[test]
fn test_ancestry_order() {
    let root = Arc::new(Scope::new());
    let middle = Arc::new(Scope::child(root));
    let leaf = Scope::child(middle);
    assert_eq!(leaf.ancestry().count(), 3);
}
