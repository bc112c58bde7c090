//! Type arena and the read-only database view over it.
//!
//! [`TypeDatabase`] is the graph provider consumed by the stringifier and
//! the property resolver: lookups by handle, plus `follow` helpers that
//! collapse `Bound` indirections. [`TypeArena`] implements it and is the
//! only place nodes are allocated. Inference builds the graph through the
//! factory methods below; the property resolver allocates synthetic
//! recovery nodes through [`TypeArena::add_type`].

use crate::types::*;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

static MISSING_TYPE: TypeData = TypeData::Error;
static MISSING_PACK: TypePackData = TypePackData::Error;

/// Read-only access to the type graph.
pub trait TypeDatabase {
    /// Payload of `id`. Handles outside the arena read as `Error`.
    fn lookup(&self, id: TypeId) -> &TypeData;

    /// Payload of `id`. Handles outside the arena read as `Error`.
    fn lookup_pack(&self, id: TypePackId) -> &TypePackData;

    /// Follow `Bound` links to the first non-bound node.
    ///
    /// A malformed `Bound` loop stops at a node on the loop, which still
    /// reads as `Bound`.
    fn follow(&self, id: TypeId) -> TypeId {
        let step = |ty: TypeId| match self.lookup(ty) {
            TypeData::Bound(next) => Some(*next),
            _ => None,
        };

        // Tortoise and hare: the hare moves two links per round.
        let mut slow = id;
        let mut fast = id;
        loop {
            match step(fast) {
                Some(next) => fast = next,
                None => return fast,
            }
            match step(fast) {
                Some(next) => fast = next,
                None => return fast,
            }
            slow = step(slow).unwrap_or(slow);
            if slow == fast {
                return fast;
            }
        }
    }

    /// Pack counterpart of [`follow`](Self::follow).
    fn follow_pack(&self, id: TypePackId) -> TypePackId {
        let step = |tp: TypePackId| match self.lookup_pack(tp) {
            TypePackData::Bound(next) => Some(*next),
            _ => None,
        };

        let mut slow = id;
        let mut fast = id;
        loop {
            match step(fast) {
                Some(next) => fast = next,
                None => return fast,
            }
            match step(fast) {
                Some(next) => fast = next,
                None => return fast,
            }
            slow = step(slow).unwrap_or(slow);
            if slow == fast {
                return fast;
            }
        }
    }
}

/// A pack flattened into its head types plus whatever tail ends it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatPack {
    pub head: SmallVec<[TypeId; 4]>,
    /// The first tail that is not a `List` (or a list seen before).
    pub tail: Option<TypePackId>,
}

impl FlatPack {
    /// `true` if the pack has a fixed number of values.
    pub fn is_finite(&self) -> bool {
        self.tail.is_none()
    }
}

/// Flatten nested `List` tails of `tp` into one head.
pub fn flatten_pack(db: &dyn TypeDatabase, tp: TypePackId) -> FlatPack {
    let mut flat = FlatPack::default();
    let mut seen = FxHashSet::default();
    let mut current = db.follow_pack(tp);

    loop {
        if !seen.insert(current) {
            flat.tail = Some(current);
            return flat;
        }
        match db.lookup_pack(current) {
            TypePackData::List { head, tail } => {
                flat.head.extend(head.iter().copied());
                match tail {
                    Some(next) => current = db.follow_pack(*next),
                    None => return flat,
                }
            }
            _ => {
                flat.tail = Some(current);
                return flat;
            }
        }
    }
}

/// Owner of all type and pack nodes of an analysis pass.
#[derive(Clone, Debug)]
pub struct TypeArena {
    types: Vec<TypeData>,
    packs: Vec<TypePackData>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    /// Create an arena with the builtin singletons at their reserved handles.
    pub fn new() -> Self {
        let types = vec![
            TypeData::Primitive(PrimitiveKind::Nil),
            TypeData::Primitive(PrimitiveKind::Boolean),
            TypeData::Primitive(PrimitiveKind::Number),
            TypeData::Primitive(PrimitiveKind::String),
            TypeData::Primitive(PrimitiveKind::Thread),
            TypeData::Any,
            TypeData::Error,
        ];
        debug_assert_eq!(types.len(), TypeId::FIRST_DYNAMIC as usize);

        let packs = vec![
            TypePackData::List {
                head: Vec::new(),
                tail: None,
            },
            TypePackData::Error,
        ];
        debug_assert_eq!(packs.len(), TypePackId::FIRST_DYNAMIC as usize);

        Self { types, packs }
    }

    pub fn add_type(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        id
    }

    pub fn add_type_pack(&mut self, data: TypePackData) -> TypePackId {
        let id = TypePackId(self.packs.len() as u32);
        self.packs.push(data);
        id
    }

    /// Overwrite the payload of `id`.
    ///
    /// Graph construction uses this to tie recursive knots: allocate a
    /// placeholder with [`free`](Self::free), build the nodes that refer to
    /// it, then replace it. Builtin singletons are never replaced.
    pub fn replace_type(&mut self, id: TypeId, data: TypeData) {
        if id.is_builtin() {
            return;
        }
        if let Some(slot) = self.types.get_mut(id.index()) {
            *slot = data;
        }
    }

    /// Pack counterpart of [`replace_type`](Self::replace_type).
    pub fn replace_type_pack(&mut self, id: TypePackId, data: TypePackData) {
        if id.0 < TypePackId::FIRST_DYNAMIC {
            return;
        }
        if let Some(slot) = self.packs.get_mut(id.index()) {
            *slot = data;
        }
    }

    /// Number of type nodes, builtins included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // -------------------------------------------------------------------------
    // Factories
    // -------------------------------------------------------------------------

    pub fn table(&mut self, table: TableType) -> TypeId {
        self.add_type(TypeData::Table(table))
    }

    pub fn function(&mut self, function: FunctionType) -> TypeId {
        self.add_type(TypeData::Function(function))
    }

    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.add_type(TypeData::Union(members))
    }

    pub fn intersection(&mut self, members: Vec<TypeId>) -> TypeId {
        self.add_type(TypeData::Intersection(members))
    }

    pub fn class(&mut self, class: ClassType) -> TypeId {
        self.add_type(TypeData::Class(class))
    }

    pub fn generic(&mut self, name: Option<&str>) -> TypeId {
        self.add_type(TypeData::Generic(GenericType {
            name: name.map(str::to_string),
        }))
    }

    pub fn free(&mut self) -> TypeId {
        self.add_type(TypeData::Free)
    }

    pub fn bound(&mut self, target: TypeId) -> TypeId {
        self.add_type(TypeData::Bound(target))
    }

    /// A finite pack `(T1, T2, ...)`.
    pub fn pack(&mut self, head: Vec<TypeId>) -> TypePackId {
        if head.is_empty() {
            return TypePackId::EMPTY;
        }
        self.add_type_pack(TypePackData::List { head, tail: None })
    }

    pub fn pack_with_tail(&mut self, head: Vec<TypeId>, tail: TypePackId) -> TypePackId {
        self.add_type_pack(TypePackData::List {
            head,
            tail: Some(tail),
        })
    }

    pub fn variadic_pack(&mut self, ty: TypeId) -> TypePackId {
        self.add_type_pack(TypePackData::Variadic(ty))
    }

    pub fn generic_pack(&mut self, name: Option<&str>) -> TypePackId {
        self.add_type_pack(TypePackData::Generic {
            name: name.map(str::to_string),
        })
    }

    pub fn free_pack(&mut self) -> TypePackId {
        self.add_type_pack(TypePackData::Free)
    }

    pub fn bound_pack(&mut self, target: TypePackId) -> TypePackId {
        self.add_type_pack(TypePackData::Bound(target))
    }

    /// Convenience for `(params) -> (returns)` with no generics.
    pub fn function_of(&mut self, params: Vec<TypeId>, returns: Vec<TypeId>) -> TypeId {
        let params = self.pack(params);
        let returns = self.pack(returns);
        self.function(FunctionType::new(params, returns))
    }
}

impl TypeDatabase for TypeArena {
    fn lookup(&self, id: TypeId) -> &TypeData {
        self.types.get(id.index()).unwrap_or(&MISSING_TYPE)
    }

    fn lookup_pack(&self, id: TypePackId) -> &TypePackData {
        self.packs.get(id.index()).unwrap_or(&MISSING_PACK)
    }
}

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod tests;
