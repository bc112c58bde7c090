//! Display names for anonymous generics, free types and cyclic types.

use super::name_map::ToStringNameMap;
use crate::types::{TypeId, TypePackId};
use rustc_hash::{FxHashMap, FxHashSet};

/// The `n`th name of the sequence `a, b, ..., z, a1, b1, ..., z1, a2, ...`.
///
/// The letter is `n % 26` and, from `n = 26` on, the quotient `n / 26` is
/// appended in decimal, so distinct `n` always give distinct names.
pub fn generate_name(n: usize) -> String {
    let letter = char::from(b'a' + (n % 26) as u8);
    if n < 26 {
        letter.to_string()
    } else {
        format!("{letter}{}", n / 26)
    }
}

/// Per-call name state. A fresh allocator is built for every stringifier call.
#[derive(Debug, Default)]
pub struct NameAllocator {
    next_index: usize,
    next_cycle: usize,
    used: FxHashSet<String>,
    names: ToStringNameMap,
    cycle_names: FxHashMap<TypeId, String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose caches start out as `seed`. Seeded names are never
    /// handed out again for other handles.
    pub fn seeded(seed: ToStringNameMap) -> Self {
        let used = seed
            .types
            .values()
            .chain(seed.packs.values())
            .cloned()
            .collect();
        Self {
            used,
            names: seed,
            ..Self::default()
        }
    }

    /// Keep `name` out of the fresh and cycle name sequences, for names
    /// the rendering shows verbatim.
    pub fn reserve(&mut self, name: &str) {
        if !self.used.contains(name) {
            self.used.insert(name.to_string());
        }
    }

    fn fresh(&mut self) -> String {
        loop {
            let name = generate_name(self.next_index);
            self.next_index += 1;
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Name of the type `ty`, allocating one on first request.
    pub fn type_name(&mut self, ty: TypeId) -> String {
        if let Some(name) = self.names.types.get(&ty) {
            return name.clone();
        }
        let name = self.fresh();
        self.names.types.insert(ty, name.clone());
        name
    }

    /// Name of the pack `tp`, allocating one on first request.
    pub fn pack_name(&mut self, tp: TypePackId) -> String {
        if let Some(name) = self.names.packs.get(&tp) {
            return name.clone();
        }
        let name = self.fresh();
        self.names.packs.insert(tp, name.clone());
        name
    }

    /// Name used for back-references to the cyclic type `ty`.
    ///
    /// A seeded name for `ty` wins; otherwise the next free `tN`.
    pub fn cycle_name(&mut self, ty: TypeId) -> String {
        if let Some(name) = self.cycle_names.get(&ty) {
            return name.clone();
        }
        let name = match self.names.types.get(&ty) {
            Some(seeded) => seeded.clone(),
            None => loop {
                self.next_cycle += 1;
                let candidate = format!("t{}", self.next_cycle);
                if self.used.insert(candidate.clone()) {
                    break candidate;
                }
            },
        };
        self.cycle_names.insert(ty, name.clone());
        name
    }

    /// The back-reference name of `ty`, if it was found to be cyclic.
    pub fn cycle_name_of(&self, ty: TypeId) -> Option<&str> {
        self.cycle_names.get(&ty).map(String::as_str)
    }

    /// Seeded and allocated names, for the result of the call.
    pub fn into_name_map(self) -> ToStringNameMap {
        self.names
    }
}

#[cfg(test)]
#[path = "../../tests/format_names_tests.rs"]
mod tests;
