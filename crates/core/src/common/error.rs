//! Fatal error definitions.
//!
//! Every failure the simulator can encounter is fatal: the run aborts, the
//! error propagates to the caller, and no statistics are emitted. There is no
//! retry or partial-recovery path, so a single flat enum covers the whole
//! surface: I/O, image format, memory bounds and definedness, and the
//! interpreter's invalid-encoding cases.

use std::io;

use thiserror::Error;

/// Fatal simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be opened, read, or written.
    #[error("i/o failure on '{path}': {source}")]
    Io {
        /// Path of the file involved in the failed operation.
        path: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },

    /// The input image is truncated or otherwise malformed.
    #[error("corrupted input image: {0}")]
    Format(String),

    /// A RAM access or dump slice fell outside the memory.
    #[error("memory access out of bounds: {len} byte(s) at {addr:#07x} (memory size {size:#x})")]
    OutOfBounds {
        /// First address of the failed access.
        addr: u32,
        /// Length of the failed access in bytes.
        len: u32,
        /// Total memory size the access was checked against.
        size: u32,
    },

    /// A byte that was never written or loaded was read.
    #[error("read of undefined memory at {addr:#07x}")]
    UndefinedMemory {
        /// Address of the undefined byte.
        addr: u32,
    },

    /// A multi-byte cache access straddled a line boundary.
    #[error("{len}-byte cache access at {addr:#07x} crosses a line boundary")]
    UnalignedAccess {
        /// First address of the rejected access.
        addr: u32,
        /// Length of the rejected access in bytes.
        len: u32,
    },

    /// An instruction carried an opcode or function-code combination outside
    /// the supported RV32IM subset.
    #[error("invalid opcode {opcode:#04x} in instruction {raw:#010x} at pc {pc:#07x}")]
    InvalidOpcode {
        /// The 7-bit major opcode field.
        opcode: u32,
        /// Full 32-bit instruction encoding.
        raw: u32,
        /// Program counter of the offending instruction.
        pc: u32,
    },

    /// A memory operation used a size other than 1, 2, or 4 bytes.
    #[error("invalid memory access size: {size} byte(s)")]
    InvalidAccessSize {
        /// The rejected access size.
        size: u32,
    },

    /// A register accessor was called with an index outside `0..32`.
    #[error("invalid register index: {index}")]
    InvalidRegisterIndex {
        /// The rejected register index.
        index: usize,
    },
}
