//! Structured type errors produced by the property resolver.
//!
//! Errors are collected as data (`TypeErrorData` holds handles, not text) and
//! rendered with the stringifier only when a message is requested, so lookups
//! attempted speculatively never pay for formatting.

use crate::arena::TypeDatabase;
use crate::format::{ToStringOptions, to_string};
use crate::types::{Name, TypeData, TypeId};
use lsz_common::Location;
use tracing::error;

/// Append-only sink for errors found while resolving properties.
pub type ErrorVec = Vec<TypeError>;

#[derive(Clone, Debug, PartialEq)]
pub enum TypeErrorData {
    /// `key` is not a member of `ty` (table, class or anything else).
    UnknownProperty { ty: TypeId, key: Name },
    /// `key` is missing from some members of the union `ty`.
    MissingUnionProperty {
        ty: TypeId,
        missing: Vec<TypeId>,
        key: Name,
    },
    GenericError { message: String },
    /// A lookup hit the recursion limits.
    CodeTooComplex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeError {
    pub location: Location,
    pub data: TypeErrorData,
}

impl TypeError {
    pub fn new(location: Location, data: TypeErrorData) -> Self {
        Self { location, data }
    }

    /// Render the message text, formatting any types involved.
    pub fn message(&self, db: &dyn TypeDatabase) -> String {
        let opts = ToStringOptions::default();
        match &self.data {
            TypeErrorData::UnknownProperty { ty, key } => {
                let shown = to_string(db, *ty, &opts);
                match db.lookup(db.follow(*ty)) {
                    TypeData::Table(_) => format!("Key '{key}' not found in table '{shown}'"),
                    TypeData::Class(class) => {
                        format!("Key '{key}' not found in class '{}'", class.name)
                    }
                    _ => format!("Type '{shown}' does not have key '{key}'"),
                }
            }
            TypeErrorData::MissingUnionProperty { ty, missing, key } => {
                let members = missing
                    .iter()
                    .map(|member| format!("'{}'", to_string(db, *member, &opts)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Key '{key}' is missing from {members} in the type '{}'",
                    to_string(db, *ty, &opts)
                )
            }
            TypeErrorData::GenericError { message } => message.clone(),
            TypeErrorData::CodeTooComplex => {
                "Code is too complex to typecheck! Consider simplifying the code around this area"
                    .to_string()
            }
        }
    }
}

/// Collects internal-compiler-error reports.
///
/// Reports are logged and kept for the caller to inspect; analysis continues.
#[derive(Debug, Default)]
pub struct InternalErrorReporter {
    /// Module being checked, included in log output.
    pub module_name: Option<String>,
    reports: Vec<(Location, String)>,
}

impl InternalErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_module(name: impl Into<String>) -> Self {
        Self {
            module_name: Some(name.into()),
            reports: Vec::new(),
        }
    }

    pub fn ice(&mut self, message: impl Into<String>, location: Location) {
        let message = message.into();
        error!(
            module = self.module_name.as_deref().unwrap_or("<unknown>"),
            %location,
            "internal compiler error: {message}"
        );
        self.reports.push((location, message));
    }

    pub fn reports(&self) -> &[(Location, String)] {
        &self.reports
    }

    pub fn has_reports(&self) -> bool {
        !self.reports.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
