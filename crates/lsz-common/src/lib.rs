//! Common types and utilities for the lsz Luau type analysis crates.
//!
//! This crate provides foundational types used across all lsz crates:
//! - Source positions (`Position`, `Location`)
//! - Stringifier and resolver limits
//! - Tracing subscriber setup for debugging sessions

// Position/Location types for line/column source locations
pub mod position;
pub use position::{Location, Position};

// Centralized limits and thresholds
pub mod limits;

// Tracing configuration (LSZ_LOG / LSZ_LOG_FORMAT)
pub mod tracing_config;
