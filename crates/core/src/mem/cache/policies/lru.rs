//! True Least Recently Used (LRU) replacement policy.
//!
//! Each set carries one age value per way. Age 0 is the most recently used
//! way; the largest age marks the victim. The ages of a set are a permutation
//! of `0..ways` at all times: a touch resets the touched way to 0 and
//! increments exactly the ways that were younger than it, which preserves the
//! permutation.
//!
//! # Performance
//!
//! - **Time Complexity:** `on_hit()`/`on_fill()`/`victim()` are O(W) in the
//!   associativity, constant for a fixed geometry.
//! - **Space Complexity:** one byte per line.

use super::ReplacementPolicy;

/// True LRU policy state: per-set age vectors.
pub struct LruPolicy {
    age: Vec<Vec<u8>>,
}

impl LruPolicy {
    /// Creates LRU metadata for `sets` sets of `ways` ways.
    ///
    /// Initial ages within a set are `0, 1, .., ways - 1`, so way `ways - 1`
    /// is the first victim of an all-valid set.
    pub fn new(sets: usize, ways: usize) -> Self {
        let age = (0..sets).map(|_| (0..ways as u8).collect()).collect();
        Self { age }
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Returns the way holding the largest age.
    fn victim(&mut self, set: usize) -> usize {
        let ages = &self.age[set];
        let mut victim = 0;
        for (way, &age) in ages.iter().enumerate() {
            if age > ages[victim] {
                victim = way;
            }
        }
        victim
    }

    /// Resets the touched way to age 0 and ages every way that was younger.
    fn on_hit(&mut self, set: usize, way: usize) {
        let ages = &mut self.age[set];
        let old = ages[way];
        for (w, age) in ages.iter_mut().enumerate() {
            if w != way && *age < old {
                *age += 1;
            }
        }
        ages[way] = 0;
    }

    /// A fill is aged exactly like a hit: the filled way always holds the
    /// largest age of its set, so every other way is incremented.
    fn on_fill(&mut self, set: usize, way: usize) {
        self.on_hit(set, way);
    }
}
