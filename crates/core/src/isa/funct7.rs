//! RV32 function code 7 definitions.
//!
//! The `funct7` field (bits 31-25) disambiguates R-type instructions sharing
//! a `funct3` value.

/// Base integer encoding (ADD, SLL, SRL, etc.).
pub const BASE: u32 = 0b0000000;

/// M-extension encoding (MUL, MULH, DIV, DIVU, REM, REMU).
pub const MULDIV: u32 = 0b0000001;

/// Alternate integer encoding (SUB, SRA); also the SRAI marker bit in the
/// shift-immediate forms.
pub const ALT: u32 = 0b0100000;
