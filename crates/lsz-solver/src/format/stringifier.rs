//! Recursive-descent renderer behind the `to_string*` entry points.
//!
//! The walk writes into one output buffer. Nested parts that must be
//! reordered (union and intersection members) are captured by splitting the
//! buffer after rendering them.
//!
//! Cycles: re-entering a type that is still being rendered emits its cycle
//! name (`t1`, ...). When the outer frame of that type finishes, its text is
//! moved into a definition and replaced by the name, so the result reads
//! `t1 where t1 = { next: t1 }`.
//!
//! Budgets: `emitted` counts every character written and never goes down,
//! so text captured and discarded still counts against `max_type_length`.

use super::name_map::{merge_seeds, publish};
use super::names::NameAllocator;
use super::{ToStringOptions, ToStringResult};
use crate::arena::{TypeDatabase, flatten_pack};
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::scope::TypeNameVisibility;
use crate::types::{
    FunctionType, Name, TableState, TableType, TypeData, TypeId, TypePackData, TypePackId,
};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

const TRUNCATION_MARKER: &str = "...";
const CYCLE_PACK_MARKER: &str = "*CYCLETP*";
const ERROR_MARKER: &str = "*error-type*";
const INVALID_MARKER: &str = "*invalid*";
const INDENT: &str = "    ";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Node {
    Type(TypeId),
    Pack(TypePackId),
}

pub(crate) struct Stringifier<'a> {
    db: &'a dyn TypeDatabase,
    opts: &'a ToStringOptions,
    names: NameAllocator,
    guard: RecursionGuard<Node>,
    out: String,
    emitted: usize,
    indent_level: usize,
    /// Cyclic types whose text already became a definition.
    defined: FxHashMap<TypeId, String>,
    definitions: Vec<(String, String)>,
    invalid: bool,
    error: bool,
    cycle: bool,
    truncated: bool,
}

impl<'a> Stringifier<'a> {
    pub(crate) fn new(db: &'a dyn TypeDatabase, opts: &'a ToStringOptions) -> Self {
        let seed = merge_seeds(&opts.name_map, &opts.deprecated_name_map);
        Self {
            db,
            opts,
            names: NameAllocator::seeded(seed),
            guard: RecursionGuard::with_profile(RecursionProfile::Stringify),
            out: String::new(),
            emitted: 0,
            indent_level: 0,
            defined: FxHashMap::default(),
            definitions: Vec::new(),
            invalid: false,
            error: false,
            cycle: false,
            truncated: false,
        }
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    fn emit(&mut self, text: &str) {
        self.emitted += text.chars().count();
        self.out.push_str(text);
    }

    /// Append text produced by [`capture`](Self::capture); already counted.
    fn emit_captured(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn capture(&mut self, render: impl FnOnce(&mut Self)) -> String {
        let start = self.out.len();
        render(self);
        self.out.split_off(start)
    }

    /// Separator between table entries: a space, or a line break plus indentation.
    fn newline(&mut self) {
        if !self.opts.use_line_breaks {
            self.emit(" ");
            return;
        }
        self.emit("\n");
        if self.opts.indent {
            for _ in 0..self.indent_level {
                self.emit(INDENT);
            }
        }
    }

    fn type_budget(&self) -> usize {
        if self.opts.exhaustive { 0 } else { self.opts.max_type_length }
    }

    fn table_budget(&self) -> usize {
        if self.opts.exhaustive { 0 } else { self.opts.max_table_length }
    }

    fn over_budget(&self) -> bool {
        let budget = self.type_budget();
        budget > 0 && self.emitted >= budget
    }

    /// Emit the truncation marker and return `true` if the length budget is spent.
    fn stop_if_over_budget(&mut self) -> bool {
        if !self.over_budget() {
            return false;
        }
        self.truncated = true;
        self.emit(TRUNCATION_MARKER);
        true
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    pub(crate) fn stringify_type(&mut self, ty: TypeId) {
        self.reserve_explicit_names([Node::Type(ty)]);
        self.visit_type(ty);
    }

    pub(crate) fn stringify_pack(&mut self, tp: TypePackId) {
        self.reserve_explicit_names([Node::Pack(tp)]);
        self.visit_pack(tp);
    }

    /// Reserve every generic name written in source that is reachable from
    /// `roots`, so allocated names never collide with them.
    fn reserve_explicit_names(&mut self, roots: impl IntoIterator<Item = Node>) {
        let db = self.db;
        let mut seen: FxHashSet<Node> = FxHashSet::default();
        let mut stack: Vec<Node> = roots.into_iter().collect();
        while let Some(node) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            match node {
                Node::Type(ty) => match db.lookup(ty) {
                    TypeData::Generic(generic) => {
                        if let Some(name) = &generic.name {
                            self.names.reserve(name);
                        }
                    }
                    TypeData::Bound(target) => stack.push(Node::Type(*target)),
                    TypeData::Table(table) => {
                        stack.extend(table.props.values().map(|&ty| Node::Type(ty)));
                        if let Some(indexer) = table.indexer {
                            stack.push(Node::Type(indexer.key));
                            stack.push(Node::Type(indexer.value));
                        }
                        stack.extend(table.metatable.map(Node::Type));
                        stack.extend(table.instantiated_type_params.iter().map(|&ty| Node::Type(ty)));
                        stack.extend(table.instantiated_type_pack_params.iter().map(|&tp| Node::Pack(tp)));
                    }
                    TypeData::Function(function) => stack.extend(function_nodes(function)),
                    TypeData::Union(members) | TypeData::Intersection(members) => {
                        stack.extend(members.iter().map(|&ty| Node::Type(ty)));
                    }
                    _ => {}
                },
                Node::Pack(tp) => match db.lookup_pack(tp) {
                    TypePackData::List { head, tail } => {
                        stack.extend(head.iter().map(|&ty| Node::Type(ty)));
                        stack.extend(tail.map(Node::Pack));
                    }
                    TypePackData::Variadic(ty) => stack.push(Node::Type(*ty)),
                    TypePackData::Generic { name: Some(name) } => self.names.reserve(name),
                    TypePackData::Bound(target) => stack.push(Node::Pack(*target)),
                    _ => {}
                },
            }
        }
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn visit_type(&mut self, ty: TypeId) {
        let ty = self.db.follow(ty);
        if self.over_budget() {
            self.truncated = true;
            return;
        }
        if let Some(name) = self.defined.get(&ty).cloned() {
            self.emit(&name);
            return;
        }

        match self.guard.enter(Node::Type(ty)) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => {
                let name = self.names.cycle_name(ty);
                trace!(type_id = ty.0, %name, "stringify: back-reference");
                self.cycle = true;
                self.emit(&name);
                return;
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                debug!(type_id = ty.0, "stringify: recursion limit reached");
                self.truncated = true;
                self.emit(TRUNCATION_MARKER);
                return;
            }
        }

        let start = self.out.len();
        self.render_type(ty);
        self.guard.leave(Node::Type(ty));

        if let Some(name) = self.names.cycle_name_of(ty).map(str::to_string) {
            let body = self.out.split_off(start);
            self.definitions.push((name.clone(), body));
            self.defined.insert(ty, name.clone());
            self.emit(&name);
        }
    }

    fn render_type(&mut self, ty: TypeId) {
        let db = self.db;
        match db.lookup(ty) {
            TypeData::Primitive(kind) => self.emit(kind.name()),
            TypeData::Any => self.emit("any"),
            // A `Bound` left after following is a malformed alias loop.
            TypeData::Error | TypeData::Bound(_) => {
                self.error = true;
                self.emit(ERROR_MARKER);
            }
            TypeData::Free => {
                let name = self.names.type_name(ty);
                self.emit("'");
                self.emit(&name);
            }
            TypeData::Generic(generic) => match &generic.name {
                Some(name) => self.emit(name),
                None => {
                    let name = self.names.type_name(ty);
                    self.emit(&name);
                }
            },
            TypeData::Table(table) => self.render_table(table),
            TypeData::Function(function) => self.render_function(function),
            TypeData::Union(members) => self.render_union(members),
            TypeData::Intersection(members) => self.render_intersection(members),
            TypeData::Class(class) => {
                self.emit_type_name(&class.name);
            }
        }
    }

    /// Emit a declared type name as written from the configured scope.
    ///
    /// Returns `false` if the name is not visible and `*invalid*` was emitted.
    fn emit_type_name(&mut self, name: &str) -> bool {
        let opts = self.opts;
        let Some(scope) = opts.scope.as_deref() else {
            self.emit(name);
            return true;
        };
        match scope.type_name_visibility(name) {
            TypeNameVisibility::Local => self.emit(name),
            TypeNameVisibility::Imported(module) => {
                self.emit(module);
                self.emit(".");
                self.emit(name);
            }
            TypeNameVisibility::NotVisible => {
                trace!(%name, "stringify: type name not visible from scope");
                self.invalid = true;
                self.emit(INVALID_MARKER);
                return false;
            }
        }
        true
    }

    // =========================================================================
    // Tables
    // =========================================================================

    fn render_table(&mut self, table: &TableType) {
        if !self.opts.exhaustive {
            if let Some(name) = &table.name {
                if self.emit_type_name(name) {
                    self.render_type_arguments(
                        &table.instantiated_type_params,
                        &table.instantiated_type_pack_params,
                    );
                }
                return;
            }
            if let Some(name) = &table.synthetic_name {
                self.emit(name);
                return;
            }
        }

        match table.metatable {
            Some(metatable) => {
                self.emit("{");
                self.indent_level += 1;
                self.newline();
                self.emit("@metatable ");
                self.visit_type(metatable);
                self.emit(",");
                self.newline();
                self.render_table_body(table);
                self.indent_level -= 1;
                self.newline();
                self.emit("}");
            }
            None => self.render_table_body(table),
        }
    }

    fn table_brackets(&self, state: TableState) -> (&'static str, &'static str) {
        if self.opts.hide_table_kind && !self.opts.exhaustive {
            return ("{", "}");
        }
        match state {
            TableState::Sealed => ("{|", "|}"),
            TableState::Unsealed => ("{", "}"),
            TableState::Free => ("{-", "-}"),
            TableState::Generic => ("{+", "+}"),
        }
    }

    fn render_table_body(&mut self, table: &TableType) {
        let db = self.db;

        // Array-like: `{T}`.
        if table.props.is_empty() {
            if let Some(indexer) = table.indexer {
                if db.follow(indexer.key) == TypeId::NUMBER {
                    self.emit("{");
                    self.visit_type(indexer.value);
                    self.emit("}");
                    return;
                }
            }
        }

        let (open, close) = self.table_brackets(table.state);
        if table.props.is_empty() && table.indexer.is_none() {
            self.emit(open);
            self.emit(close);
            return;
        }

        self.emit(open);
        self.indent_level += 1;
        self.newline();

        let mut first = true;
        if let Some(indexer) = table.indexer {
            self.emit("[");
            self.visit_type(indexer.key);
            self.emit("]: ");
            self.visit_type(indexer.value);
            first = false;
        }

        let table_budget = self.table_budget();
        for (index, (name, &ty)) in table.props.iter().enumerate() {
            if !first {
                self.emit(",");
                self.newline();
            }
            first = false;
            if table_budget > 0 && index >= table_budget {
                trace!(fields = table.props.len(), table_budget, "stringify: table fields elided");
                self.truncated = true;
                self.emit(TRUNCATION_MARKER);
                break;
            }
            if self.stop_if_over_budget() {
                break;
            }
            self.emit_prop_key(name);
            self.emit(": ");
            self.visit_type(ty);
        }

        self.indent_level -= 1;
        self.newline();
        self.emit(close);
    }

    fn emit_prop_key(&mut self, name: &str) {
        if is_identifier(name) {
            self.emit(name);
        } else {
            self.emit(&format!("[{name:?}]"));
        }
    }

    /// `<A, B, (C, D)>` after a named table.
    fn render_type_arguments(&mut self, types: &[TypeId], packs: &[TypePackId]) {
        if types.is_empty() && packs.is_empty() {
            return;
        }
        let db = self.db;
        self.emit("<");
        let mut first = true;
        for &ty in types {
            if !first {
                self.emit(", ");
            }
            first = false;
            self.visit_type(ty);
        }
        for &tp in packs {
            if !first {
                self.emit(", ");
            }
            first = false;
            if flatten_pack(db, tp).is_finite() {
                self.emit("(");
                self.visit_pack(tp);
                self.emit(")");
            } else {
                self.visit_pack(tp);
            }
        }
        self.emit(">");
    }

    // =========================================================================
    // Unions and intersections
    // =========================================================================

    fn render_union(&mut self, members: &[TypeId]) {
        let db = self.db;
        let mut parts: SmallVec<[String; 4]> = SmallVec::new();
        let mut has_nil = false;
        let mut elided = false;

        for &member in members {
            let member = db.follow(member);
            if self.over_budget() {
                self.truncated = true;
                elided = true;
                break;
            }
            let data = db.lookup(member);
            if data.is_nil() {
                has_nil = true;
                continue;
            }
            let parens = matches!(data, TypeData::Intersection(_) | TypeData::Function(_));
            parts.push(self.capture(|this| this.visit_grouped(member, parens)));
        }

        parts.sort();
        parts.dedup();
        if elided {
            parts.push(TRUNCATION_MARKER.to_string());
        }

        match (parts.as_slice(), has_nil) {
            ([], true) => self.emit("nil"),
            ([], false) => self.emit("never"),
            ([only], true) => {
                let only = only.clone();
                self.emit_captured(&only);
                self.emit("?");
            }
            (_, true) => {
                self.emit("(");
                self.emit_joined(&parts, " | ");
                self.emit(")?");
            }
            (_, false) => self.emit_joined(&parts, " | "),
        }
    }

    fn render_intersection(&mut self, members: &[TypeId]) {
        let db = self.db;
        let mut parts: SmallVec<[String; 4]> = SmallVec::new();
        let mut elided = false;

        for &member in members {
            let member = db.follow(member);
            if self.over_budget() {
                self.truncated = true;
                elided = true;
                break;
            }
            let parens = matches!(db.lookup(member), TypeData::Union(_) | TypeData::Function(_));
            parts.push(self.capture(|this| this.visit_grouped(member, parens)));
        }

        parts.sort();
        parts.dedup();
        if elided {
            parts.push(TRUNCATION_MARKER.to_string());
        }
        self.emit_joined(&parts, " & ");
    }

    fn visit_grouped(&mut self, ty: TypeId, parens: bool) {
        if parens {
            self.emit("(");
        }
        self.visit_type(ty);
        if parens {
            self.emit(")");
        }
    }

    fn emit_joined(&mut self, parts: &[String], separator: &str) {
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                self.emit(separator);
            }
            self.emit_captured(part);
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn render_function(&mut self, function: &FunctionType) {
        let opts = self.opts;
        let top_level = self.guard.depth() == 1;
        let hide_generics = !opts.exhaustive
            && top_level
            && opts.hide_named_function_type_parameters
            && !opts.function_type_arguments;
        if !hide_generics {
            self.render_generic_list(function);
        }

        self.emit("(");
        self.render_pack(
            function.params,
            &function.arg_names,
            self.self_params_to_skip(function),
            opts.function_type_arguments,
        );
        self.emit(") -> ");
        self.render_returns(function.returns);
    }

    fn self_params_to_skip(&self, function: &FunctionType) -> usize {
        let opts = self.opts;
        usize::from(!opts.exhaustive && opts.hide_function_self_argument && function.has_self)
    }

    fn render_generic_list(&mut self, function: &FunctionType) {
        if function.generics.is_empty() && function.generic_packs.is_empty() {
            return;
        }
        self.emit("<");
        let mut first = true;
        for &ty in &function.generics {
            if !first {
                self.emit(", ");
            }
            first = false;
            self.visit_type(ty);
        }
        for &tp in &function.generic_packs {
            if !first {
                self.emit(", ");
            }
            first = false;
            self.visit_pack(tp);
        }
        self.emit(">");
    }

    /// A single return type is written bare; anything else in parens.
    fn render_returns(&mut self, returns: TypePackId) {
        let db = self.db;
        let flat = flatten_pack(db, returns);
        match (flat.head.as_slice(), flat.tail) {
            ([only], None) => self.visit_type(*only),
            _ => {
                self.emit("(");
                self.visit_pack(returns);
                self.emit(")");
            }
        }
    }

    pub(crate) fn visit_named_function(&mut self, name: &str, function: &FunctionType) {
        let db = self.db;
        let opts = self.opts;
        self.reserve_explicit_names(function_nodes(function));

        self.emit(name);
        let hide_generics = !opts.exhaustive
            && opts.hide_named_function_type_parameters
            && !opts.function_type_arguments;
        if !hide_generics {
            self.render_generic_list(function);
        }

        self.emit("(");
        let flat = flatten_pack(db, function.params);
        let mut first = true;
        let mut stopped = false;
        for (index, &ty) in flat
            .head
            .iter()
            .enumerate()
            .skip(self.self_params_to_skip(function))
        {
            if !first {
                self.emit(", ");
            }
            first = false;
            if self.stop_if_over_budget() {
                stopped = true;
                break;
            }
            let arg_name = opts
                .named_function_override_arg_names
                .get(index)
                .map(String::as_str)
                .or_else(|| function.arg_names.get(index).and_then(|name| name.as_deref()))
                .unwrap_or("_");
            self.emit(arg_name);
            self.emit(": ");
            self.visit_type(ty);
        }
        if let (Some(tail), false) = (flat.tail, stopped) {
            if !first {
                self.emit(", ");
            }
            self.emit("...: ");
            match db.lookup_pack(tail) {
                TypePackData::Variadic(ty) => self.visit_type(*ty),
                _ => self.render_pack_tail(tail),
            }
        }
        self.emit("): ");
        self.render_returns(function.returns);
    }

    // =========================================================================
    // Packs
    // =========================================================================

    fn visit_pack(&mut self, tp: TypePackId) {
        self.render_pack(tp, &[], 0, false);
    }

    /// Render the values of `tp` separated by commas, skipping the first
    /// `skip` head entries. With `show_names`, entries with a name in
    /// `arg_names` (indexed like the head) are written `name: T`.
    fn render_pack(&mut self, tp: TypePackId, arg_names: &[Option<Name>], skip: usize, show_names: bool) {
        let db = self.db;
        let tp = db.follow_pack(tp);
        if self.over_budget() {
            self.truncated = true;
            return;
        }

        match self.guard.enter(Node::Pack(tp)) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => {
                trace!(pack_id = tp.0, "stringify: pack back-reference");
                self.cycle = true;
                self.emit(CYCLE_PACK_MARKER);
                return;
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                debug!(pack_id = tp.0, "stringify: recursion limit reached");
                self.truncated = true;
                self.emit(TRUNCATION_MARKER);
                return;
            }
        }

        let flat = flatten_pack(db, tp);
        let mut first = true;
        let mut stopped = false;
        for (index, &ty) in flat.head.iter().enumerate().skip(skip) {
            if !first {
                self.emit(", ");
            }
            first = false;
            if self.stop_if_over_budget() {
                stopped = true;
                break;
            }
            if show_names {
                if let Some(Some(name)) = arg_names.get(index) {
                    self.emit(name);
                    self.emit(": ");
                }
            }
            self.visit_type(ty);
        }
        if let (Some(tail), false) = (flat.tail, stopped) {
            if !first {
                self.emit(", ");
            }
            self.render_pack_tail(tail);
        }

        self.guard.leave(Node::Pack(tp));
    }

    fn render_pack_tail(&mut self, tail: TypePackId) {
        let db = self.db;
        match db.lookup_pack(tail) {
            TypePackData::Variadic(ty) => {
                self.emit("...");
                self.visit_type(*ty);
            }
            TypePackData::Generic { name } => {
                let name = match name {
                    Some(name) => name.clone(),
                    None => self.names.pack_name(tail),
                };
                self.emit(&name);
                self.emit("...");
            }
            TypePackData::Free => {
                let name = self.names.pack_name(tail);
                self.emit("'");
                self.emit(&name);
                self.emit("...");
            }
            // Flattening stops at a list it has already seen.
            TypePackData::List { .. } => {
                self.cycle = true;
                self.emit(CYCLE_PACK_MARKER);
            }
            TypePackData::Error | TypePackData::Bound(_) => {
                self.error = true;
                self.emit(ERROR_MARKER);
            }
        }
    }

    // =========================================================================
    // Result
    // =========================================================================

    pub(crate) fn finish(mut self) -> ToStringResult {
        let mut name = std::mem::take(&mut self.out);

        if !self.definitions.is_empty() {
            self.definitions
                .sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
            let definitions = self
                .definitions
                .iter()
                .map(|(cycle_name, body)| format!("{cycle_name} = {body}"))
                .collect::<Vec<_>>()
                .join(" ; ");
            name.push_str(" where ");
            name.push_str(&definitions);
        }

        let limit = self.type_budget();
        if limit > 0 && name.chars().count() > limit {
            name = name
                .chars()
                .take(limit.saturating_sub(TRUNCATION_MARKER.len()))
                .collect();
            name.push_str(TRUNCATION_MARKER);
            self.truncated = true;
        }
        if self.truncated {
            debug!(limit, emitted = self.emitted, "stringify: output truncated");
        }

        let (name_map, deprecated_name_map) = publish(self.names.into_name_map());
        ToStringResult {
            name,
            name_map,
            deprecated_name_map,
            invalid: self.invalid,
            error: self.error,
            cycle: self.cycle,
            truncated: self.truncated,
        }
    }
}

/// `true` if `name` can be written as a bare table key.
fn function_nodes(function: &FunctionType) -> impl Iterator<Item = Node> + '_ {
    [Node::Pack(function.params), Node::Pack(function.returns)]
        .into_iter()
        .chain(function.generics.iter().map(|&ty| Node::Type(ty)))
        .chain(function.generic_packs.iter().map(|&tp| Node::Pack(tp)))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
