//! Cache replacement policies.
//!
//! The cache delegates every replacement decision to a policy through three
//! hooks; policies keep per-set metadata only and never touch lines or RAM.
//!
//! # Policies
//!
//! - `Lru`: true Least Recently Used, per-set age vectors.
//! - `TreePlru`: tree-based pseudo-LRU (bpLRU), three bits per 4-way set.

/// True Least Recently Used replacement policy.
pub mod lru;

/// Tree-based pseudo-LRU (bpLRU) replacement policy.
pub mod plru;

use std::fmt;

pub use lru::LruPolicy;
pub use plru::TreePlruPolicy;

/// Trait for cache replacement policies.
///
/// All three hooks are invoked synchronously, at most once per cache access,
/// and must run in constant time without allocating.
pub trait ReplacementPolicy: Send + Sync {
    /// Selects the way to evict from `set`.
    ///
    /// Only called when every way of the set is valid; invalid ways are
    /// consumed by the cache before the policy is consulted.
    fn victim(&mut self, set: usize) -> usize;

    /// Records that an access hit the line in (`set`, `way`).
    ///
    /// Called for read hits and write hits alike, regardless of whether the
    /// hit advances a statistics counter.
    fn on_hit(&mut self, set: usize, way: usize);

    /// Records that a miss filled the line in (`set`, `way`).
    fn on_fill(&mut self, set: usize, way: usize);
}

/// Replacement policy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplacementKind {
    /// True LRU with per-set age vectors.
    Lru,
    /// Tree-based pseudo-LRU with three bits per set.
    BpLru,
}

impl ReplacementKind {
    /// Returns the display name used in the statistics table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::BpLru => "bpLRU",
        }
    }

    /// Builds the boxed policy for a cache of `sets` sets and `ways` ways.
    pub(crate) fn build(self, sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
        match self {
            Self::Lru => Box::new(LruPolicy::new(sets, ways)),
            Self::BpLru => {
                debug_assert_eq!(ways, 4, "tree PLRU metadata is sized for 4 ways");
                Box::new(TreePlruPolicy::new(sets))
            }
        }
    }
}

impl fmt::Display for ReplacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
