//! Centralized limits and thresholds for Luau type analysis.
//!
//! This module provides shared constants for output budgets and chain
//! lengths used throughout the solver. Centralizing these values:
//! - Prevents duplicate definitions with inconsistent values
//! - Documents the rationale for each limit
//!
//! # Solver recursion limits
//!
//! Recursion limits for the stringifier and the property resolver are
//! centralized in `lsz_solver::recursion::RecursionProfile` rather than here.
//! The profiles are the single source of truth for solver recursion.

// =============================================================================
// Stringifier Budgets
// =============================================================================

/// Default maximum length, in characters, of a stringified type.
///
/// Once the stringifier has emitted this many characters it stops expanding
/// further subtrees and the final text is clamped, ending in `...`. A value of
/// `0` disables the budget. Exhaustive rendering ignores it.
///
/// # Luau example
///
/// ```lua
/// -- A large table literal whose inferred type would otherwise print
/// -- every one of its several hundred fields in a hover or error message:
/// local config = { a = 1, b = 2, c = 3, --[[ ... ]] zz = 700 }
/// ```
pub const TYPE_MAX_STRINGIFIER_LENGTH: usize = 500;

/// Default maximum number of fields printed per table type.
///
/// Fields beyond the limit are elided with a `...` marker. `0` means no
/// limit, which is the default: table size is usually bounded well enough by
/// [`TYPE_MAX_STRINGIFIER_LENGTH`].
///
/// # Luau example
///
/// ```lua
/// -- With a table limit of 2:
/// local t = { x = 1, y = 2, z = 3 }
/// -- prints as `{ x: number, y: number, ... }`
/// ```
pub const TABLE_TYPE_MAX_STRINGIFIER_LENGTH: usize = 0;

// =============================================================================
// Resolver Limits
// =============================================================================

/// Maximum number of `__index` hops followed when resolving a table property.
///
/// Repeated tables are already caught by a visited set; this bound protects
/// against very long chains of distinct metatables.
///
/// # Luau example
///
/// ```lua
/// local Base = {}
/// Base.__index = Base
/// local Derived = setmetatable({}, Base)
/// Derived.__index = Derived
/// -- ... a hundred levels of inheritance emulated through __index ...
/// ```
pub const MAX_INDEX_CHAIN_LENGTH: usize = 100;

/// Maximum number of nested metatables inspected by a metatable entry lookup.
pub const MAX_METATABLE_CHAIN_LENGTH: usize = 100;
