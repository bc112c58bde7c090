//! Type stringification for diagnostics, hovers and debugging.
//!
//! Every entry point renders one node (type, pack, or a function under a
//! display name) with a fresh [`Stringifier`](stringifier::Stringifier) and
//! reports anomalies through the flags on [`ToStringResult`] instead of
//! failing: rendering is total over any graph, including cyclic and
//! malformed ones.

mod name_map;
mod names;
mod stringifier;

pub use name_map::{ToStringNameMap, merge_seeds, publish};
pub use names::{NameAllocator, generate_name};

use crate::arena::TypeDatabase;
use crate::scope::ScopePtr;
use crate::types::{FunctionType, TypeId, TypePackId};
use lsz_common::limits;
use stringifier::Stringifier;
use tracing::debug;

/// Per-call rendering configuration.
#[derive(Clone, Debug)]
pub struct ToStringOptions {
    /// Expand everything: disables both budgets, named-table shorthand and
    /// every `hide_*` option.
    pub exhaustive: bool,
    pub use_line_breaks: bool,
    /// Show parameter names in function types.
    pub function_type_arguments: bool,
    /// Render every table with plain `{ }` brackets.
    pub hide_table_kind: bool,
    /// Hide the generic list of the outermost function.
    pub hide_named_function_type_parameters: bool,
    /// Drop the implicit `self` parameter of methods.
    pub hide_function_self_argument: bool,
    /// Indent nested table entries when `use_line_breaks` is set.
    pub indent: bool,
    /// Fields shown per table; `0` is unlimited.
    pub max_table_length: usize,
    /// Characters emitted before rendering is cut short; `0` is unlimited.
    pub max_type_length: usize,
    pub name_map: ToStringNameMap,
    /// Seed accepted from callers not yet migrated to `name_map`.
    pub deprecated_name_map: ToStringNameMap,
    /// Scope named types are checked against.
    pub scope: Option<ScopePtr>,
    /// Argument names for [`to_string_named_function`], by position.
    pub named_function_override_arg_names: Vec<String>,
}

impl Default for ToStringOptions {
    fn default() -> Self {
        Self {
            exhaustive: false,
            use_line_breaks: false,
            function_type_arguments: false,
            hide_table_kind: false,
            hide_named_function_type_parameters: false,
            hide_function_self_argument: false,
            indent: false,
            max_table_length: limits::TABLE_TYPE_MAX_STRINGIFIER_LENGTH,
            max_type_length: limits::TYPE_MAX_STRINGIFIER_LENGTH,
            name_map: ToStringNameMap::default(),
            deprecated_name_map: ToStringNameMap::default(),
            scope: None,
            named_function_override_arg_names: Vec::new(),
        }
    }
}

impl ToStringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options used by the debug dump: everything expanded, argument names shown.
    pub fn for_dump() -> Self {
        Self::default()
            .with_exhaustive(true)
            .with_function_type_arguments(true)
            .with_max_type_length(0)
    }

    pub fn with_exhaustive(mut self, exhaustive: bool) -> Self {
        self.exhaustive = exhaustive;
        self
    }

    pub fn with_line_breaks(mut self, use_line_breaks: bool) -> Self {
        self.use_line_breaks = use_line_breaks;
        self
    }

    pub fn with_function_type_arguments(mut self, show: bool) -> Self {
        self.function_type_arguments = show;
        self
    }

    pub fn with_hide_table_kind(mut self, hide: bool) -> Self {
        self.hide_table_kind = hide;
        self
    }

    pub fn with_hide_named_function_type_parameters(mut self, hide: bool) -> Self {
        self.hide_named_function_type_parameters = hide;
        self
    }

    pub fn with_hide_function_self_argument(mut self, hide: bool) -> Self {
        self.hide_function_self_argument = hide;
        self
    }

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_max_table_length(mut self, max: usize) -> Self {
        self.max_table_length = max;
        self
    }

    pub fn with_max_type_length(mut self, max: usize) -> Self {
        self.max_type_length = max;
        self
    }

    pub fn with_name_map(mut self, names: ToStringNameMap) -> Self {
        self.name_map = names;
        self
    }

    pub fn with_deprecated_name_map(mut self, names: ToStringNameMap) -> Self {
        self.deprecated_name_map = names;
        self
    }

    pub fn with_scope(mut self, scope: ScopePtr) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_override_arg_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.named_function_override_arg_names = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Rendered text plus what happened while producing it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToStringResult {
    pub name: String,
    pub name_map: ToStringNameMap,
    /// Same contents as `name_map`.
    pub deprecated_name_map: ToStringNameMap,
    /// A named type was not visible from the supplied scope.
    pub invalid: bool,
    /// An error type or pack was rendered.
    pub error: bool,
    /// A back-reference to an enclosing type was emitted.
    pub cycle: bool,
    /// A length or table budget was hit.
    pub truncated: bool,
}

pub fn to_string_detailed(db: &dyn TypeDatabase, ty: TypeId, opts: &ToStringOptions) -> ToStringResult {
    let render = |opts: &ToStringOptions| {
        let mut stringifier = Stringifier::new(db, opts);
        stringifier.stringify_type(ty);
        stringifier.finish()
    };
    no_longer_than_exhaustive(render(opts), opts, render)
}

pub fn to_string_pack_detailed(
    db: &dyn TypeDatabase,
    tp: TypePackId,
    opts: &ToStringOptions,
) -> ToStringResult {
    let render = |opts: &ToStringOptions| {
        let mut stringifier = Stringifier::new(db, opts);
        stringifier.stringify_pack(tp);
        stringifier.finish()
    };
    no_longer_than_exhaustive(render(opts), opts, render)
}

/// A truncated rendering can come out longer than the full text, e.g. a
/// long alias name clamped in place of an empty body. The exhaustive
/// rendering is returned instead whenever it is shorter.
fn no_longer_than_exhaustive(
    result: ToStringResult,
    opts: &ToStringOptions,
    render: impl FnOnce(&ToStringOptions) -> ToStringResult,
) -> ToStringResult {
    if opts.exhaustive || !result.truncated {
        return result;
    }
    let expanded = render(&opts.clone().with_exhaustive(true));
    if expanded.name.chars().count() < result.name.chars().count() {
        debug!(
            truncated = %result.name,
            expanded = %expanded.name,
            "stringify: exhaustive rendering is shorter"
        );
        expanded
    } else {
        result
    }
}

pub fn to_string(db: &dyn TypeDatabase, ty: TypeId, opts: &ToStringOptions) -> String {
    to_string_detailed(db, ty, opts).name
}

pub fn to_string_pack(db: &dyn TypeDatabase, tp: TypePackId, opts: &ToStringOptions) -> String {
    to_string_pack_detailed(db, tp, opts).name
}

/// Render `function` as a declaration named `name`:
/// `name<T>(a: T, b: number): string`.
///
/// Argument names come from `opts.named_function_override_arg_names` by
/// position (the `self` slot included), then from the function's own
/// argument names, then `_`.
pub fn to_string_named_function_detailed(
    db: &dyn TypeDatabase,
    name: &str,
    function: &FunctionType,
    opts: &ToStringOptions,
) -> ToStringResult {
    let render = |opts: &ToStringOptions| {
        let mut stringifier = Stringifier::new(db, opts);
        stringifier.visit_named_function(name, function);
        stringifier.finish()
    };
    no_longer_than_exhaustive(render(opts), opts, render)
}

pub fn to_string_named_function(
    db: &dyn TypeDatabase,
    name: &str,
    function: &FunctionType,
    opts: &ToStringOptions,
) -> String {
    to_string_named_function_detailed(db, name, function, opts).name
}

#[cfg(test)]
#[path = "../../tests/format_tests.rs"]
mod tests;
