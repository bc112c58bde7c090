//! Console dump helpers for debugging sessions.
//!
//! Each helper prints an exhaustive rendering (argument names shown, no
//! budgets) to stdout and returns the printed text.

use crate::arena::TypeDatabase;
use crate::format::{ToStringOptions, to_string, to_string_pack};
use crate::scope::Scope;
use crate::types::{TypeId, TypePackId};

pub fn dump(db: &dyn TypeDatabase, ty: TypeId) -> String {
    let text = to_string(db, ty, &ToStringOptions::for_dump());
    println!("{text}");
    text
}

pub fn dump_pack(db: &dyn TypeDatabase, tp: TypePackId) -> String {
    let text = to_string_pack(db, tp, &ToStringOptions::for_dump());
    println!("{text}");
    text
}

/// Print the type of the binding `name` visible from `scope`.
pub fn dump_scope(db: &dyn TypeDatabase, scope: &Scope, name: &str) -> Option<String> {
    let Some(binding) = scope.lookup_binding(name) else {
        println!("No binding {name}");
        return None;
    };
    Some(dump(db, binding.ty))
}

#[cfg(test)]
#[path = "../tests/dump_tests.rs"]
mod tests;
