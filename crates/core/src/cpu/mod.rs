//! CPU core: register file, interpreter state, and the fetch/execute loop.
//!
//! The [`Processor`] owns the cache it fetches through (the cache in turn
//! borrows the RAM), a general-purpose register file, and the program
//! counter. Execution is a strict fetch/decode/execute loop with two halt
//! conditions:
//! 1. The program counter reaches the halt return address captured from
//!    `regs[1]` at construction (checked before each fetch).
//! 2. An ECALL or EBREAK sets the halted flag.
//!
//! On either halt the cache is flushed so RAM reflects every committed store.

/// General-purpose register file.
pub mod gpr;

mod execute;
mod memory;

use tracing::trace;

use crate::common::{AccessKind, SimError};
use crate::cpu::gpr::Gpr;
use crate::isa::decode;
use crate::mem::cache::Cache;
use crate::stats::CacheStats;

/// The RV32IM interpreter.
///
/// Holds all architectural state reachable during a run; nothing is global.
pub struct Processor<'r> {
    cache: Cache<'r>,
    regs: Gpr,
    pc: u32,
    halt_ra: u32,
    halted: bool,
}

impl<'r> Processor<'r> {
    /// Creates a processor from an initial register image.
    ///
    /// `init[0]` becomes the entry program counter and `init[1]` the halt
    /// return address; the register file itself takes every entry with `x0`
    /// forced to zero.
    pub fn new(cache: Cache<'r>, init: &[u32; 32]) -> Self {
        Self {
            cache,
            regs: Gpr::from_image(init),
            pc: init[0],
            halt_ra: init[1],
            halted: false,
        }
    }

    /// Runs the fetch/decode/execute loop until a halt condition, then
    /// flushes the cache.
    ///
    /// # Errors
    ///
    /// Aborts the run on the first invalid encoding or memory failure; the
    /// cache is left unflushed in that case.
    pub fn run(&mut self) -> Result<(), SimError> {
        while self.pc != self.halt_ra && !self.halted {
            let raw = self.cache.read32(self.pc, AccessKind::Instruction)?;
            let cmd = decode(raw);
            trace!(pc = self.pc, raw, opcode = cmd.opcode, "executing");
            self.execute(&cmd)?;
        }
        self.cache.flush()
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Whether an ECALL/EBREAK halted the core.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Reads a register with an index check.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegisterIndex`] when `idx` is not below 32.
    pub fn reg(&self, idx: usize) -> Result<u32, SimError> {
        if idx >= 32 {
            return Err(SimError::InvalidRegisterIndex { index: idx });
        }
        Ok(self.regs.read(idx))
    }

    /// Returns a copy of the register file.
    pub fn registers(&self) -> [u32; 32] {
        self.regs.snapshot()
    }

    /// Returns the cache hit/miss counters accumulated so far.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
