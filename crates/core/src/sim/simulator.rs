//! Per-policy pipeline driver.
//!
//! Each policy run is fully independent: a fresh RAM is built from the image
//! fragments, a cache with the requested replacement policy borrows it, and a
//! processor drives the cache until the halt condition. Running the two
//! policies back to back therefore shares nothing but the (immutable) parsed
//! image, and identical inputs produce identical final state.

use tracing::debug;

use crate::common::SimError;
use crate::config::MEMORY_SIZE;
use crate::cpu::Processor;
use crate::mem::cache::Cache;
use crate::mem::cache::policies::ReplacementKind;
use crate::mem::ram::Ram;
use crate::sim::loader::ProgramImage;
use crate::stats::CacheStats;

/// Final state of one policy run.
#[derive(Debug)]
pub struct PolicyRun {
    /// The replacement policy this run used.
    pub kind: ReplacementKind,
    /// Final register file.
    pub registers: [u32; 32],
    /// Final main memory, with all dirty lines flushed.
    pub ram: Ram,
    /// Cache hit/miss counters.
    pub stats: CacheStats,
}

/// Executes the image to completion under the given replacement policy.
///
/// # Errors
///
/// Propagates any fatal failure from fragment loading or execution; no
/// partial state is returned.
pub fn run_policy(image: &ProgramImage, kind: ReplacementKind) -> Result<PolicyRun, SimError> {
    let mut ram = Ram::new(MEMORY_SIZE);
    for fragment in &image.fragments {
        ram.load_fragment(fragment.addr, &fragment.data)?;
    }

    debug!(
        policy = kind.label(),
        pc = format_args!("{:#x}", image.registers[0]),
        "starting run"
    );

    let (registers, stats) = {
        let cache = Cache::new(&mut ram, kind);
        let mut cpu = Processor::new(cache, &image.registers);
        cpu.run()?;
        (cpu.registers(), cpu.stats())
    };

    debug!(
        policy = kind.label(),
        accesses = stats.total_access(),
        hits = stats.total_hit(),
        "run finished"
    );

    Ok(PolicyRun {
        kind,
        registers,
        ram,
        stats,
    })
}
