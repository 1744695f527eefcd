//! RISC-V instruction decoder.
//!
//! Decodes a raw 32-bit encoding into a [`Decoded`] record: fixed fields come
//! from [`InstructionBits`]; the immediate is reassembled from the scattered
//! bit ranges of the format the opcode selects (I, S, B, U, or J) and
//! sign-extended to 32 bits where the ISA requires it.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::opcodes;

/// Decodes a RISC-V instruction into its component fields.
///
/// Opcodes outside the supported set still decode (with a zero immediate);
/// rejecting them is the interpreter's dispatch decision, not the decoder's.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_LOAD | opcodes::OP_IMM | opcodes::OP_JALR | opcodes::OP_SYSTEM => {
            i_type_imm(inst)
        }
        opcodes::OP_STORE => s_type_imm(inst),
        opcodes::OP_BRANCH => b_type_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => u_type_imm(inst),
        opcodes::OP_JAL => j_type_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        funct12: inst.funct12(),
        imm,
    }
}

/// Sign-extends the low `bits` bits of `value` to 32 bits.
fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// I-type: `imm[11:0] | rs1 | funct3 | rd | opcode`.
///
/// The immediate is the top 12 bits; an arithmetic shift extends the sign.
fn i_type_imm(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-type: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
fn s_type_imm(inst: u32) -> i32 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// B-type: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
///
/// Bit 0 of the reconstructed offset is always zero.
fn b_type_imm(inst: u32) -> i32 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 0x1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, 13)
}

/// U-type: `imm[31:12] | rd | opcode`.
///
/// The immediate keeps its position; the low 12 bits are zero.
fn u_type_imm(inst: u32) -> i32 {
    (inst & 0xFFFF_F000) as i32
}

/// J-type: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
///
/// Bit 0 of the reconstructed offset is always zero.
fn j_type_imm(inst: u32) -> i32 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, 21)
}
