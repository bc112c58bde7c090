//! Type graph representation.
//!
//! Types and type packs are nodes in an arena owned by the inference
//! subsystem and addressed by small `Copy` handles ([`TypeId`],
//! [`TypePackId`]). Handles, not owning references, are what make cyclic
//! graphs (self-referential tables, recursive signatures, metatable loops)
//! representable: every traversal in this crate takes handles by value and
//! tracks the handles it is currently visiting.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub type Name = String;

/// Ordered property map. Iteration order is declaration order.
pub type PropMap = IndexMap<Name, TypeId, FxBuildHasher>;

// =============================================================================
// Handles
// =============================================================================

/// Handle to a type node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    // Builtin singletons, interned at these indices by `TypeArena::new()`.
    pub const NIL: TypeId = TypeId(0);
    pub const BOOLEAN: TypeId = TypeId(1);
    pub const NUMBER: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const THREAD: TypeId = TypeId(4);
    pub const ANY: TypeId = TypeId(5);
    pub const ERROR: TypeId = TypeId(6);

    /// First index handed out for non-builtin types.
    pub const FIRST_DYNAMIC: u32 = 7;

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

/// Handle to a type pack node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePackId(pub u32);

impl TypePackId {
    /// The empty pack `()`.
    pub const EMPTY: TypePackId = TypePackId(0);
    pub const ERROR: TypePackId = TypePackId(1);

    pub const FIRST_DYNAMIC: u32 = 2;

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Type payloads
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Nil,
    Boolean,
    Number,
    String,
    Thread,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Nil => "nil",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Thread => "thread",
        }
    }
}

/// Structural subkind of a table, reflected in its brackets when rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TableState {
    /// Closed to new properties: `{| x: number |}`.
    Sealed,
    /// A table literal still open to extension: `{ x: number }`.
    #[default]
    Unsealed,
    /// Shape being inferred from usage: `{- x: number -}`.
    Free,
    /// Quantified over in a generic function: `{+ x: number +}`.
    Generic,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableIndexer {
    pub key: TypeId,
    pub value: TypeId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableType {
    pub props: PropMap,
    pub indexer: Option<TableIndexer>,
    pub metatable: Option<TypeId>,
    pub state: TableState,
    /// Alias name the table was declared under (`type Point = {...}`).
    pub name: Option<Name>,
    /// Display name synthesized by inference, e.g. for `setmetatable` results.
    pub synthetic_name: Option<Name>,
    pub instantiated_type_params: Vec<TypeId>,
    pub instantiated_type_pack_params: Vec<TypePackId>,
}

impl TableType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prop(mut self, name: impl Into<Name>, ty: TypeId) -> Self {
        self.props.insert(name.into(), ty);
        self
    }

    pub fn with_indexer(mut self, key: TypeId, value: TypeId) -> Self {
        self.indexer = Some(TableIndexer { key, value });
        self
    }

    pub fn with_metatable(mut self, metatable: TypeId) -> Self {
        self.metatable = Some(metatable);
        self
    }

    pub fn with_state(mut self, state: TableState) -> Self {
        self.state = state;
        self
    }

    pub fn with_name(mut self, name: impl Into<Name>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_synthetic_name(mut self, name: impl Into<Name>) -> Self {
        self.synthetic_name = Some(name.into());
        self
    }

    pub fn with_type_params(mut self, params: Vec<TypeId>, packs: Vec<TypePackId>) -> Self {
        self.instantiated_type_params = params;
        self.instantiated_type_pack_params = packs;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionType {
    pub params: TypePackId,
    pub returns: TypePackId,
    pub generics: Vec<TypeId>,
    pub generic_packs: Vec<TypePackId>,
    /// Positional parameter names; `None` where the source gave none.
    pub arg_names: Vec<Option<Name>>,
    /// The first parameter is an implicit `self` (method declared with `:`).
    pub has_self: bool,
}

impl FunctionType {
    pub fn new(params: TypePackId, returns: TypePackId) -> Self {
        Self {
            params,
            returns,
            generics: Vec::new(),
            generic_packs: Vec::new(),
            arg_names: Vec::new(),
            has_self: false,
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeId>, generic_packs: Vec<TypePackId>) -> Self {
        self.generics = generics;
        self.generic_packs = generic_packs;
        self
    }

    pub fn with_arg_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<Name>,
    {
        self.arg_names = names.into_iter().map(|n| n.map(Into::into)).collect();
        self
    }

    pub fn with_self(mut self) -> Self {
        self.has_self = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassType {
    pub name: Name,
    pub props: PropMap,
    pub parent: Option<TypeId>,
    pub metatable: Option<TypeId>,
}

impl ClassType {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            props: PropMap::default(),
            parent: None,
            metatable: None,
        }
    }

    pub fn with_prop(mut self, name: impl Into<Name>, ty: TypeId) -> Self {
        self.props.insert(name.into(), ty);
        self
    }

    pub fn with_parent(mut self, parent: TypeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_metatable(mut self, metatable: TypeId) -> Self {
        self.metatable = Some(metatable);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericType {
    /// Name written in source (`<T>`); anonymous generics get an allocated name.
    pub name: Option<Name>,
}

/// Payload of a type node.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeData {
    Primitive(PrimitiveKind),
    Table(TableType),
    Function(FunctionType),
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    Generic(GenericType),
    /// Unbound inference placeholder.
    Free,
    /// Alias to another node; always followed before inspection.
    Bound(TypeId),
    Class(ClassType),
    Any,
    Error,
}

impl TypeData {
    pub fn as_table(&self) -> Option<&TableType> {
        match self {
            TypeData::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            TypeData::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            TypeData::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Metatable carried by a table or class node.
    pub fn metatable(&self) -> Option<TypeId> {
        match self {
            TypeData::Table(table) => table.metatable,
            TypeData::Class(class) => class.metatable,
            _ => None,
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, TypeData::Any)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, TypeData::Error)
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, TypeData::Primitive(PrimitiveKind::Nil))
    }
}

/// Payload of a type pack node.
#[derive(Clone, Debug, PartialEq)]
pub enum TypePackData {
    /// A finite head followed by an optional tail pack.
    List {
        head: Vec<TypeId>,
        tail: Option<TypePackId>,
    },
    /// `...T`: any number of values of one type.
    Variadic(TypeId),
    /// `T...`: a generic pack parameter.
    Generic { name: Option<Name> },
    Free,
    Bound(TypePackId),
    Error,
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
