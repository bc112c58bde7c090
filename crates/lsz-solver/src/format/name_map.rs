//! Name maps passed into and returned from the stringifier.
//!
//! Callers seed a map so that repeated renderings (e.g. several types in one
//! error message) agree on generated names. Older callers still pass and read
//! `deprecated_name_map`; both are accepted on the way in, and the way out
//! fills both with the same contents.

use crate::types::{TypeId, TypePackId};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToStringNameMap {
    pub types: FxHashMap<TypeId, String>,
    pub packs: FxHashMap<TypePackId, String>,
}

impl ToStringNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, ty: TypeId, name: impl Into<String>) -> Self {
        self.types.insert(ty, name.into());
        self
    }

    pub fn with_pack(mut self, tp: TypePackId, name: impl Into<String>) -> Self {
        self.packs.insert(tp, name.into());
        self
    }

    pub fn type_name(&self, ty: TypeId) -> Option<&str> {
        self.types.get(&ty).map(String::as_str)
    }

    pub fn pack_name(&self, tp: TypePackId) -> Option<&str> {
        self.packs.get(&tp).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.packs.is_empty()
    }
}

/// Combine the caller's seeds. Entries of `canonical` win over `legacy`
/// entries for the same handle.
pub fn merge_seeds(canonical: &ToStringNameMap, legacy: &ToStringNameMap) -> ToStringNameMap {
    let mut merged = legacy.clone();
    merged
        .types
        .extend(canonical.types.iter().map(|(ty, name)| (*ty, name.clone())));
    merged
        .packs
        .extend(canonical.packs.iter().map(|(tp, name)| (*tp, name.clone())));
    merged
}

/// Split the final names into the canonical map and its legacy duplicate.
pub fn publish(names: ToStringNameMap) -> (ToStringNameMap, ToStringNameMap) {
    let legacy = names.clone();
    (names, legacy)
}

#[cfg(test)]
#[path = "../../tests/format_name_map_tests.rs"]
mod tests;
