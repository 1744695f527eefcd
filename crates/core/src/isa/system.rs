//! SYSTEM-opcode funct12 encodings.
//!
//! Under `OP_SYSTEM` with `funct3 == PRIV`, the `funct12` field (bits 31-20)
//! selects the operation. Both encodings below halt the simulated core; every
//! other SYSTEM encoding is executed as a no-op.

/// Environment call.
pub const ECALL: u32 = 0b0000_0000_0000;

/// Environment breakpoint.
pub const EBREAK: u32 = 0b0000_0000_0001;
