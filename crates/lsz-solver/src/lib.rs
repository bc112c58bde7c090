//! Type introspection for Luau analysis.
//!
//! Two consumers walk the same, possibly cyclic, type graph:
//! - the stringifier ([`format`]) renders types for diagnostics and hovers
//! - the property resolver ([`operations_property`]) answers indexing
//!   queries for the checker, following metatables and class ancestry

pub mod arena;
mod class_hierarchy;
pub mod diagnostics;
pub mod dump;
pub mod format;
pub mod operations_property;
pub mod recursion;
pub mod scope;
pub mod types;

pub use arena::{FlatPack, TypeArena, TypeDatabase, flatten_pack};
pub use class_hierarchy::*;
pub use diagnostics::{ErrorVec, InternalErrorReporter, TypeError, TypeErrorData};
pub use dump::{dump, dump_pack, dump_scope};
pub use format::{
    ToStringNameMap, ToStringOptions, ToStringResult, generate_name, to_string, to_string_detailed,
    to_string_named_function, to_string_named_function_detailed, to_string_pack,
    to_string_pack_detailed,
};
pub use operations_property::{
    find_metatable_entry, find_table_property_respecting_meta, get_index_type_from_type,
};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use scope::{Binding, Scope, ScopePtr, TypeFun, TypeNameVisibility};
pub use types::*;
