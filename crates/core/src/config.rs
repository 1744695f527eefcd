//! Memory and cache geometry constants.
//!
//! All sizes are fixed at compile time. The address is split, high to low,
//! into a tag, a set index, and a line offset; the widths below drive every
//! address decomposition in the memory hierarchy.
//!
//! ```text
//! 17        10 9       5 4       0
//! +-----------+---------+---------+
//! |    tag    |  index  | offset  |
//! +-----------+---------+---------+
//! ```

/// Width of a physical address in bits.
pub const ADDRESS_LEN: u32 = 18;

/// Total size of main memory in bytes (256 KiB).
pub const MEMORY_SIZE: u32 = 1 << ADDRESS_LEN;

/// Width of the cache tag field in bits.
pub const CACHE_TAG_LEN: u32 = 8;

/// Width of the set index field in bits.
pub const CACHE_INDEX_LEN: u32 = 5;

/// Width of the intra-line offset field in bits (derived).
pub const CACHE_OFFSET_LEN: u32 = ADDRESS_LEN - CACHE_TAG_LEN - CACHE_INDEX_LEN;

/// Cache line size in bytes (32).
pub const CACHE_LINE_SIZE: usize = 1 << CACHE_OFFSET_LEN;

/// Number of sets in the cache (32).
pub const CACHE_SET_COUNT: usize = 1 << CACHE_INDEX_LEN;

/// Associativity: number of ways per set.
pub const CACHE_WAY: usize = 4;

/// Total number of cache lines.
pub const CACHE_LINE_COUNT: usize = CACHE_SET_COUNT * CACHE_WAY;

/// Total cache capacity in bytes (4 KiB).
pub const CACHE_SIZE: usize = CACHE_LINE_COUNT * CACHE_LINE_SIZE;
