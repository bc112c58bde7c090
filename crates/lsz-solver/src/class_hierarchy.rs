//! Class ancestry queries.
//!
//! Class types come from host bindings and form single-inheritance chains
//! (`Part` -> `BasePart` -> `Instance`). Own members shadow inherited ones.
//! Declarations are not validated for cycles upstream, so every walk here
//! tracks the classes it has already seen.

use crate::arena::TypeDatabase;
use crate::types::{ClassType, TypeId};
use rustc_hash::FxHashSet;

/// Iterator over a class and its ancestors, nearest first.
///
/// Stops at the first parent that is not a class or was already yielded.
pub struct Ancestors<'a> {
    db: &'a dyn TypeDatabase,
    next: Option<TypeId>,
    seen: FxHashSet<TypeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (TypeId, &'a ClassType);

    fn next(&mut self) -> Option<Self::Item> {
        let db = self.db;
        let id = db.follow(self.next.take()?);
        if !self.seen.insert(id) {
            return None;
        }
        let class = db.lookup(id).as_class()?;
        self.next = class.parent;
        Some((id, class))
    }
}

/// `class` followed by its ancestors. Yields nothing if `class` is not a class.
pub fn ancestors(db: &dyn TypeDatabase, class: TypeId) -> Ancestors<'_> {
    Ancestors {
        db,
        next: Some(class),
        seen: FxHashSet::default(),
    }
}

/// Find `name` on `class` or the nearest ancestor declaring it.
pub fn lookup_class_prop(db: &dyn TypeDatabase, class: TypeId, name: &str) -> Option<TypeId> {
    ancestors(db, class).find_map(|(_, class)| class.props.get(name).copied())
}

#[cfg(test)]
#[path = "../tests/class_hierarchy_tests.rs"]
mod tests;
