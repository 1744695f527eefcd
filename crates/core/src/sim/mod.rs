//! Simulation: program image codecs and the per-policy run driver.

/// Binary program image reading and final-state dumping.
pub mod loader;

/// Per-policy pipeline: fresh RAM + cache + processor per run.
pub mod simulator;

pub use loader::{MemoryFragment, ProgramImage};
pub use simulator::{PolicyRun, run_policy};
