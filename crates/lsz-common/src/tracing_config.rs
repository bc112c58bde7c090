//! Tracing configuration for debugging type rendering and property lookups.
//!
//! Supports three output formats controlled by `LSZ_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Human-readable tree
//! LSZ_LOG=debug LSZ_LOG_FORMAT=tree cargo test -p lsz-solver
//!
//! # Fine-grained filtering
//! LSZ_LOG="lsz_solver::format=trace" cargo test -p lsz-solver
//! ```
//!
//! The subscriber is only initialised when `LSZ_LOG` (or `RUST_LOG`) is set,
//! so there is zero overhead in normal use.

use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read the format from the `LSZ_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        Self::parse(&std::env::var("LSZ_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `LSZ_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("LSZ_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `LSZ_LOG` nor `RUST_LOG` is set. Safe to call
/// more than once: a subscriber that is already installed is left in place.
/// All output goes to stderr.
pub fn init_tracing() {
    let has_lsz_log = std::env::var("LSZ_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_lsz_log && !has_rust_log {
        return;
    }

    if let Err(err) = install(LogFormat::from_env(), build_filter()) {
        debug!(%err, "tracing subscriber not installed");
    }
}

/// Install a subscriber writing `format` output, filtered by `filter`.
///
/// Fails if a global subscriber is already set.
fn install(format: LogFormat, filter: EnvFilter) -> Result<(), TryInitError> {
    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);

            Registry::default().with(filter).with(text_layer).try_init()
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
