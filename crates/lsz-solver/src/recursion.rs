//! Cycle detection and work bounding for recursive walks over the type graph.
//!
//! Type graphs are cyclic by construction (self-referential tables, methods
//! returning `self`, `__index` pointing back at its own table). Every walk in
//! this crate keeps a [`RecursionGuard`] keyed by the handles it is currently
//! inside, which gives it:
//! 1. **Cycle detection** via a visiting set (`FxHashSet<K>`)
//! 2. **Depth limiting** so deep but acyclic graphs cannot overflow the stack
//! 3. **Iteration bounding** so wide graphs cannot stall a hover request
//!
//! Limits come from [`RecursionProfile`] presets instead of literals at the
//! call site:
//!
//! ```ignore
//! let mut guard = RecursionGuard::with_profile(RecursionProfile::PropertyAccess);
//! ```
//!
//! In debug builds, dropping a guard with active entries panics, which
//! catches a missing `leave()` on an early-return path.

use rustc_hash::FxHashSet;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Rendering a type or pack to text.
    ///
    /// Deep because every table field and function parameter is a nesting
    /// level; the output length budget normally stops the walk long before.
    ///
    /// depth = 200, iterations = 200,000
    Stringify,

    /// Resolving a property through unions, intersections, metatables and
    /// class ancestry.
    ///
    /// depth = 50, iterations = 100,000
    PropertyAccess,

    /// Custom limits for one-off or test scenarios.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::Stringify => 200,
            Self::PropertyAccess => 50,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::Stringify => 200_000,
            Self::PropertyAccess => 100_000,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// This key is already being visited.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks the keys a walk is currently inside, plus depth and total work.
///
/// ```ignore
/// match guard.enter(ty) {
///     RecursionResult::Entered => {
///         let result = resolve(ty);
///         guard.leave(ty);
///         result
///     }
///     RecursionResult::Cycle => None,
///     RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
///         report_too_complex()
///     }
/// }
/// ```
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    exceeded: bool,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    /// Prefer [`with_profile`](Self::with_profile) outside of tests.
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
            exceeded: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Try to enter the computation for `key`.
    ///
    /// On [`RecursionResult::Entered`] the caller must call
    /// [`leave`](Self::leave) with the same key when done.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            self.exceeded = true;
            return RecursionResult::IterationExceeded;
        }
        if self.visiting.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return RecursionResult::DepthExceeded;
        }

        self.visiting.insert(key);
        self.depth += 1;
        RecursionResult::Entered
    }

    /// Leave the computation for `key`.
    ///
    /// # Debug panics
    ///
    /// Panics if `key` is not being visited (double leave or leave without
    /// enter).
    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);
        debug_assert!(
            was_present,
            "RecursionGuard::leave() called with a key that is not being visited"
        );
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Sticky: stays set once any limit was hit, for the life of the guard.
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!(
                "RecursionGuard dropped with {} active entries still in the visiting set",
                self.visiting.len(),
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
