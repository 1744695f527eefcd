//! Memory hierarchy: flat RAM and the set-associative cache.
//!
//! The cache is the only client of the RAM during a run; it borrows the RAM
//! mutably for its whole lifetime, performs byte-granularity line fills and
//! write-backs, and exposes 8/16/32-bit accessors upward to the interpreter.

/// Set-associative write-back cache and its replacement policies.
pub mod cache;

/// Flat byte-addressable main memory with definedness tracking.
pub mod ram;

pub use cache::Cache;
pub use ram::Ram;
