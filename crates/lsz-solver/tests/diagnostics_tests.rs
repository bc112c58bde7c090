use super::*;
use crate::arena::TypeArena;
use crate::types::{ClassType, TableType};
use lsz_common::Position;

fn loc() -> Location {
    Location::with_length(Position::new(3, 4), 6)
}

#[test]
fn test_unknown_property_on_table() {
    let mut arena = TypeArena::new();
    let ty = arena.table(TableType::new().with_prop("x", TypeId::NUMBER));
    let error = TypeError::new(
        loc(),
        TypeErrorData::UnknownProperty {
            ty,
            key: "y".to_string(),
        },
    );

    assert_eq!(error.message(&arena), "Key 'y' not found in table '{ x: number }'");
}

#[test]
fn test_unknown_property_on_class() {
    let mut arena = TypeArena::new();
    let ty = arena.class(ClassType::new("Part"));
    let error = TypeError::new(
        loc(),
        TypeErrorData::UnknownProperty {
            ty,
            key: "Foo".to_string(),
        },
    );

    assert_eq!(error.message(&arena), "Key 'Foo' not found in class 'Part'");
}

#[test]
fn test_unknown_property_on_other_types() {
    let arena = TypeArena::new();
    let error = TypeError::new(
        loc(),
        TypeErrorData::UnknownProperty {
            ty: TypeId::NUMBER,
            key: "x".to_string(),
        },
    );

    assert_eq!(error.message(&arena), "Type 'number' does not have key 'x'");
}

#[test]
fn test_missing_union_property() {
    let mut arena = TypeArena::new();
    let has_x = arena.table(TableType::new().with_prop("x", TypeId::NUMBER));
    let union = arena.union(vec![has_x, TypeId::NUMBER]);
    let error = TypeError::new(
        loc(),
        TypeErrorData::MissingUnionProperty {
            ty: union,
            missing: vec![TypeId::NUMBER],
            key: "x".to_string(),
        },
    );

    assert_eq!(
        error.message(&arena),
        "Key 'x' is missing from 'number' in the type 'number | { x: number }'"
    );
}

#[test]
fn test_generic_and_too_complex_messages() {
    let arena = TypeArena::new();
    let generic = TypeError::new(
        loc(),
        TypeErrorData::GenericError {
            message: "something odd".to_string(),
        },
    );
    assert_eq!(generic.message(&arena), "something odd");

    let complex = TypeError::new(loc(), TypeErrorData::CodeTooComplex);
    assert!(complex.message(&arena).starts_with("Code is too complex"));
}

#[test]
fn test_internal_error_reporter_collects_reports() {
    let mut handle = InternalErrorReporter::for_module("Main");
    assert!(!handle.has_reports());
    assert_eq!(handle.module_name.as_deref(), Some("Main"));

    handle.ice("lost track of a type", loc());
    handle.ice("again", Location::default());

    assert!(handle.has_reports());
    assert_eq!(handle.reports().len(), 2);
    assert_eq!(handle.reports()[0], (loc(), "lost track of a type".to_string()));
}

#[test]
fn test_internal_error_reporter_without_module() {
    let mut handle = InternalErrorReporter::new();
    assert!(handle.module_name.is_none());
    handle.ice("unnamed", loc());
    assert_eq!(handle.reports()[0].1, "unnamed");
}
