//! Lexical scopes, as far as the introspection layer needs them.
//!
//! Scopes are built by the inference subsystem and shared as [`ScopePtr`].
//! This module only answers lookups along the parent chain:
//! - value bindings (`local x = ...`), used by the debug dump and by string
//!   method resolution through the `string` library table
//! - type bindings, used to decide whether a named type can be printed as
//!   written from a given scope, and through which module import

use crate::types::{Name, TypeId, TypePackId};
use indexmap::IndexMap;
use lsz_common::Location;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::Arc;

pub type ScopePtr = Arc<Scope>;

/// A type alias or class declaration bound to a name.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeFun {
    pub type_params: Vec<TypeId>,
    pub type_pack_params: Vec<TypePackId>,
    pub ty: TypeId,
}

impl TypeFun {
    pub fn new(ty: TypeId) -> Self {
        Self {
            type_params: Vec::new(),
            type_pack_params: Vec::new(),
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub ty: TypeId,
    pub location: Location,
}

/// How a type name can be referred to from a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeNameVisibility<'a> {
    /// Declared in this scope or an enclosing one.
    Local,
    /// Reachable only as `module.Name` through an import.
    Imported(&'a str),
    NotVisible,
}

impl TypeNameVisibility<'_> {
    pub fn is_visible(self) -> bool {
        !matches!(self, TypeNameVisibility::NotVisible)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopePtr>,
    pub bindings: IndexMap<Name, Binding, FxBuildHasher>,
    pub exported_type_bindings: FxHashMap<Name, TypeFun>,
    pub private_type_bindings: FxHashMap<Name, TypeFun>,
    /// Module alias -> types exported by that module.
    pub imported_type_bindings: IndexMap<Name, FxHashMap<Name, TypeFun>, FxBuildHasher>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(parent: ScopePtr) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    pub fn add_binding(&mut self, name: impl Into<Name>, ty: TypeId, location: Location) {
        self.bindings.insert(name.into(), Binding { ty, location });
    }

    pub fn add_exported_type(&mut self, name: impl Into<Name>, fun: TypeFun) {
        self.exported_type_bindings.insert(name.into(), fun);
    }

    pub fn add_private_type(&mut self, name: impl Into<Name>, fun: TypeFun) {
        self.private_type_bindings.insert(name.into(), fun);
    }

    pub fn add_imported_type(&mut self, module: impl Into<Name>, name: impl Into<Name>, fun: TypeFun) {
        self.imported_type_bindings
            .entry(module.into())
            .or_default()
            .insert(name.into(), fun);
    }

    /// This scope followed by its ancestors, innermost first.
    pub fn ancestry(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self), |scope| scope.parent.as_deref())
    }

    /// Innermost value binding named `name`.
    pub fn lookup_binding(&self, name: &str) -> Option<&Binding> {
        self.ancestry().find_map(|scope| scope.bindings.get(name))
    }

    /// Decide how the type name `name` may be printed from this scope.
    ///
    /// Scopes are searched innermost first; within one scope a local
    /// declaration shadows an import of the same name.
    pub fn type_name_visibility(&self, name: &str) -> TypeNameVisibility<'_> {
        for scope in self.ancestry() {
            if scope.private_type_bindings.contains_key(name)
                || scope.exported_type_bindings.contains_key(name)
            {
                return TypeNameVisibility::Local;
            }
            for (module, types) in &scope.imported_type_bindings {
                if types.contains_key(name) {
                    return TypeNameVisibility::Imported(module.as_str());
                }
            }
        }
        TypeNameVisibility::NotVisible
    }

    pub fn is_type_name_visible(&self, name: &str) -> bool {
        self.type_name_visibility(name).is_visible()
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod tests;
