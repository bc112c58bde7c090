//! Property Access Resolution
//!
//! Answers "what type does indexing this type by this name produce":
//! - [`find_metatable_entry`]: a raw entry of a type's metatable chain
//! - [`find_table_property_respecting_meta`]: a table field, falling back to
//!   the `__index` chain of its metatables
//! - [`get_index_type_from_type`]: general indexing over tables, classes,
//!   unions, intersections, strings and unresolved types
//!
//! Every chain walk tracks the handles it has visited, so metatable loops and
//! cyclic class hierarchies end in an absent result instead of a hang.

use crate::arena::{TypeArena, TypeDatabase};
use crate::class_hierarchy::lookup_class_prop;
use crate::diagnostics::{ErrorVec, InternalErrorReporter, TypeError, TypeErrorData};
use crate::format::{ToStringOptions, to_string};
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::scope::Scope;
use crate::types::{PrimitiveKind, TypeData, TypeId};
use lsz_common::Location;
use lsz_common::limits::{MAX_INDEX_CHAIN_LENGTH, MAX_METATABLE_CHAIN_LENGTH};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

// =============================================================================
// Metatable lookups
// =============================================================================

/// Look up `entry` in the metatable of `ty`, continuing into the metatable's
/// own metatable on a miss.
///
/// An `any` metatable answers `any`. Nothing is appended to `errors`; absence
/// is for the caller to judge.
pub fn find_metatable_entry(
    db: &dyn TypeDatabase,
    _errors: &mut ErrorVec,
    ty: TypeId,
    entry: &str,
    location: Location,
) -> Option<TypeId> {
    let mut metatable = db.lookup(db.follow(ty)).metatable()?;
    let mut seen = FxHashSet::default();

    for _ in 0..MAX_METATABLE_CHAIN_LENGTH {
        let current = db.follow(metatable);
        if !seen.insert(current) {
            trace!(%location, entry, "metatable chain revisits a metatable");
            return None;
        }
        match db.lookup(current) {
            TypeData::Any => return Some(TypeId::ANY),
            TypeData::Table(table) => {
                if let Some(&found) = table.props.get(entry) {
                    return Some(found);
                }
                metatable = table.metatable?;
            }
            TypeData::Class(class) => {
                if let Some(found) = lookup_class_prop(db, current, entry) {
                    return Some(found);
                }
                metatable = class.metatable?;
            }
            _ => return None,
        }
    }

    debug!(%location, entry, "metatable chain too long");
    None
}

/// Look up `name` on `ty`: its own field first, then each `__index` table
/// along the metatable chain.
///
/// An `__index` that is a function or `any` computes fields dynamically and
/// answers `any`. `__index` values of any other kind are collected into
/// `invalid_index` and skipped.
fn lookup_respecting_meta(
    db: &dyn TypeDatabase,
    errors: &mut ErrorVec,
    ty: TypeId,
    name: &str,
    location: Location,
    invalid_index: &mut SmallVec<[TypeId; 1]>,
) -> Option<TypeId> {
    let root = db.follow(ty);
    if let Some(table) = db.lookup(root).as_table() {
        if let Some(&found) = table.props.get(name) {
            return Some(found);
        }
    }

    let mut seen = FxHashSet::default();
    seen.insert(root);
    let mut index = find_metatable_entry(db, errors, root, "__index", location);
    let mut hops = 0;

    while let Some(next) = index {
        let next = db.follow(next);
        if hops >= MAX_INDEX_CHAIN_LENGTH || !seen.insert(next) {
            trace!(%location, name, hops, "__index chain stops at a repeated table");
            return None;
        }
        hops += 1;

        match db.lookup(next) {
            TypeData::Table(table) => {
                if let Some(&found) = table.props.get(name) {
                    return Some(found);
                }
            }
            TypeData::Function(_) | TypeData::Any => return Some(TypeId::ANY),
            TypeData::Error => return None,
            _ => invalid_index.push(next),
        }
        index = find_metatable_entry(db, errors, next, "__index", location);
    }

    None
}

fn report_invalid_index(
    db: &dyn TypeDatabase,
    errors: &mut ErrorVec,
    invalid_index: &[TypeId],
    location: Location,
) {
    for &index in invalid_index {
        let message = format!(
            "__index should either be a function or table. Got {}",
            to_string(db, index, &ToStringOptions::default())
        );
        errors.push(TypeError::new(location, TypeErrorData::GenericError { message }));
    }
}

/// Find `name` on the table `ty`, respecting the `__index` chain of its
/// metatables. A direct field wins over any metatable entry.
///
/// On failure an `UnknownProperty` error is appended, unless `ty` is itself
/// `error` or `any`.
pub fn find_table_property_respecting_meta(
    db: &dyn TypeDatabase,
    errors: &mut ErrorVec,
    ty: TypeId,
    name: &str,
    location: Location,
) -> Option<TypeId> {
    let root = db.follow(ty);
    let mut invalid_index = SmallVec::new();
    let found = lookup_respecting_meta(db, errors, root, name, location, &mut invalid_index);
    report_invalid_index(db, errors, &invalid_index, location);

    if found.is_none() {
        let data = db.lookup(root);
        if !data.is_error() && !data.is_any() {
            errors.push(TypeError::new(
                location,
                TypeErrorData::UnknownProperty {
                    ty: root,
                    key: name.to_string(),
                },
            ));
        }
    }
    found
}

// =============================================================================
// General indexing
// =============================================================================

/// Type produced by indexing `ty` with `prop`.
///
/// With `add_errors`, failures are reported to `errors`; union and
/// intersection members are always resolved without reporting. Results of
/// several members that differ are combined into a new union or intersection
/// allocated in `arena`. Hitting the recursion limits reports
/// `CodeTooComplex` (with `add_errors`) and an internal error to `handle`.
pub fn get_index_type_from_type(
    scope: &Scope,
    errors: &mut ErrorVec,
    arena: &mut TypeArena,
    ty: TypeId,
    prop: &str,
    location: Location,
    add_errors: bool,
    handle: &mut InternalErrorReporter,
) -> Option<TypeId> {
    let mut evaluator = IndexEvaluator {
        scope,
        errors,
        arena,
        location,
        guard: RecursionGuard::with_profile(RecursionProfile::PropertyAccess),
    };
    let result = evaluator.index(ty, prop, add_errors);

    if evaluator.guard.is_exceeded() {
        debug!(%location, prop, "property resolution hit the recursion limit");
        if add_errors {
            evaluator
                .errors
                .push(TypeError::new(location, TypeErrorData::CodeTooComplex));
        }
        handle.ice(
            format!("recursion limit reached while indexing with '{prop}'"),
            location,
        );
        return None;
    }
    result
}

/// How a followed type is indexed.
enum IndexTarget {
    /// `any` and `error` index to themselves.
    Itself,
    /// Not yet known: resolves optimistically.
    Unknown,
    String,
    Table,
    Class,
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    Unindexable,
}

impl IndexTarget {
    fn classify(db: &dyn TypeDatabase, ty: TypeId) -> Self {
        match db.lookup(ty) {
            TypeData::Any | TypeData::Error => IndexTarget::Itself,
            TypeData::Free | TypeData::Generic(_) => IndexTarget::Unknown,
            TypeData::Primitive(PrimitiveKind::String) => IndexTarget::String,
            TypeData::Table(_) => IndexTarget::Table,
            TypeData::Class(_) => IndexTarget::Class,
            TypeData::Union(members) => IndexTarget::Union(members.clone()),
            TypeData::Intersection(members) => IndexTarget::Intersection(members.clone()),
            TypeData::Primitive(_) | TypeData::Function(_) | TypeData::Bound(_) => {
                IndexTarget::Unindexable
            }
        }
    }
}

struct IndexEvaluator<'a> {
    scope: &'a Scope,
    errors: &'a mut ErrorVec,
    arena: &'a mut TypeArena,
    location: Location,
    guard: RecursionGuard<TypeId>,
}

impl IndexEvaluator<'_> {
    fn report(&mut self, data: TypeErrorData) {
        self.errors.push(TypeError::new(self.location, data));
    }

    fn report_unknown(&mut self, ty: TypeId, prop: &str) {
        self.report(TypeErrorData::UnknownProperty {
            ty,
            key: prop.to_string(),
        });
    }

    fn index(&mut self, ty: TypeId, prop: &str, add_errors: bool) -> Option<TypeId> {
        let ty = self.arena.follow(ty);
        match self.guard.enter(ty) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => {
                trace!(type_id = ty.0, prop, "indexing re-entered a type");
                return None;
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => return None,
        }

        let result = self.index_entered(ty, prop, add_errors);
        self.guard.leave(ty);
        result
    }

    fn index_entered(&mut self, ty: TypeId, prop: &str, add_errors: bool) -> Option<TypeId> {
        let found = match IndexTarget::classify(&*self.arena, ty) {
            IndexTarget::Itself => return Some(ty),
            IndexTarget::Unknown => return Some(TypeId::ANY),
            IndexTarget::String => return self.index_string(prop, add_errors),
            IndexTarget::Union(members) => return self.index_union(ty, &members, prop, add_errors),
            IndexTarget::Intersection(members) => {
                return self.index_intersection(ty, &members, prop, add_errors);
            }
            IndexTarget::Table => self.index_table(ty, prop, add_errors),
            IndexTarget::Class => lookup_class_prop(&*self.arena, ty, prop),
            IndexTarget::Unindexable => None,
        };

        if found.is_none() && add_errors {
            self.report_unknown(ty, prop);
        }
        found
    }

    fn index_table(&mut self, ty: TypeId, prop: &str, add_errors: bool) -> Option<TypeId> {
        let db: &dyn TypeDatabase = &*self.arena;
        if let Some(table) = db.lookup(ty).as_table() {
            if let Some(&found) = table.props.get(prop) {
                return Some(found);
            }
            if let Some(indexer) = table.indexer {
                if db.follow(indexer.key) == TypeId::STRING {
                    return Some(indexer.value);
                }
            }
        }

        let mut invalid_index = SmallVec::new();
        let found = lookup_respecting_meta(db, self.errors, ty, prop, self.location, &mut invalid_index);
        if add_errors {
            report_invalid_index(db, self.errors, &invalid_index, self.location);
        }
        found
    }

    /// Strings are indexed through the `string` library table in scope.
    fn index_string(&mut self, prop: &str, add_errors: bool) -> Option<TypeId> {
        let library = self.scope.lookup_binding("string").map(|binding| binding.ty);
        match library {
            Some(library) => self.index(library, prop, add_errors),
            None => {
                if add_errors {
                    self.report_unknown(TypeId::STRING, prop);
                }
                None
            }
        }
    }

    fn index_union(
        &mut self,
        ty: TypeId,
        members: &[TypeId],
        prop: &str,
        add_errors: bool,
    ) -> Option<TypeId> {
        let mut good: SmallVec<[TypeId; 4]> = SmallVec::new();
        let mut bad = Vec::new();

        for &member in members {
            let member = self.arena.follow(member);
            if self.arena.lookup(member).is_any() {
                return Some(TypeId::ANY);
            }
            match self.index(member, prop, false) {
                Some(found) => good.push(found),
                None => bad.push(member),
            }
        }

        if !bad.is_empty() {
            if add_errors {
                if good.is_empty() {
                    self.report_unknown(ty, prop);
                } else {
                    self.report(TypeErrorData::MissingUnionProperty {
                        ty,
                        missing: bad,
                        key: prop.to_string(),
                    });
                }
            }
            return None;
        }

        let results = self.distinct(good);
        if results.iter().any(|&found| self.arena.lookup(found).is_any()) {
            return Some(TypeId::ANY);
        }
        match results.as_slice() {
            [] => {
                if add_errors {
                    self.report_unknown(ty, prop);
                }
                None
            }
            [only] => Some(*only),
            _ => Some(self.arena.union(results.into_vec())),
        }
    }

    fn index_intersection(
        &mut self,
        ty: TypeId,
        members: &[TypeId],
        prop: &str,
        add_errors: bool,
    ) -> Option<TypeId> {
        let mut found: SmallVec<[TypeId; 4]> = SmallVec::new();
        for &member in members {
            if let Some(part) = self.index(member, prop, false) {
                found.push(part);
            }
        }

        let parts = self.distinct(found);
        match parts.as_slice() {
            [] => {
                if add_errors {
                    self.report_unknown(ty, prop);
                }
                None
            }
            [only] => Some(*only),
            _ => Some(self.arena.intersection(parts.into_vec())),
        }
    }

    /// Follow every result and drop repeats, keeping first occurrences.
    fn distinct(&self, results: SmallVec<[TypeId; 4]>) -> SmallVec<[TypeId; 4]> {
        let mut distinct: SmallVec<[TypeId; 4]> = SmallVec::new();
        for found in results {
            let found = self.arena.follow(found);
            if !distinct.contains(&found) {
                distinct.push(found);
            }
        }
        distinct
    }
}

#[cfg(test)]
#[path = "../tests/operations_property_tests.rs"]
mod tests;
