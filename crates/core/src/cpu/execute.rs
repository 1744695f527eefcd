//! Instruction execution handlers.
//!
//! One handler per major opcode, dispatched by a match on the decoded opcode.
//! Every handler is responsible for the final program counter of its
//! instruction: straight-line handlers advance by four, branches and jumps
//! set the target directly. Unknown opcodes and undecodable function-code
//! combinations inside a supported opcode abort the run.

use super::Processor;
use crate::common::SimError;
use crate::isa::instruction::Decoded;
use crate::isa::{funct3, funct7, opcodes, system};

/// Shift amounts use the low five bits of their operand.
const SHAMT_MASK: u32 = 0x1F;

impl Processor<'_> {
    pub(crate) fn execute(&mut self, c: &Decoded) -> Result<(), SimError> {
        match c.opcode {
            opcodes::OP_REG => self.exec_reg(c),
            opcodes::OP_IMM => self.exec_imm(c),
            opcodes::OP_LOAD => self.exec_load(c),
            opcodes::OP_STORE => self.exec_store(c),
            opcodes::OP_BRANCH => self.exec_branch(c),
            opcodes::OP_LUI => {
                self.exec_lui(c);
                Ok(())
            }
            opcodes::OP_AUIPC => {
                self.exec_auipc(c);
                Ok(())
            }
            opcodes::OP_JAL => {
                self.exec_jal(c);
                Ok(())
            }
            opcodes::OP_JALR => {
                self.exec_jalr(c);
                Ok(())
            }
            opcodes::OP_SYSTEM => {
                self.exec_system(c);
                Ok(())
            }
            _ => Err(self.invalid(c)),
        }
    }

    fn invalid(&self, c: &Decoded) -> SimError {
        SimError::InvalidOpcode {
            opcode: c.opcode,
            raw: c.raw,
            pc: self.pc,
        }
    }

    /// R-type: base integer ops (funct7 0x00/0x20) and the M extension
    /// (funct7 0x01).
    fn exec_reg(&mut self, c: &Decoded) -> Result<(), SimError> {
        let a = self.regs.read(c.rs1);
        let b = self.regs.read(c.rs2);
        let value = match (c.funct3, c.funct7) {
            (funct3::ADD_SUB, funct7::BASE) => a.wrapping_add(b),
            (funct3::ADD_SUB, funct7::ALT) => a.wrapping_sub(b),
            (funct3::ADD_SUB, funct7::MULDIV) => a.wrapping_mul(b),
            (funct3::SLL, funct7::BASE) => a << (b & SHAMT_MASK),
            (funct3::SLL, funct7::MULDIV) => mulh(a, b),
            (funct3::SLT, funct7::BASE) => u32::from((a as i32) < (b as i32)),
            (funct3::SLTU, funct7::BASE) => u32::from(a < b),
            (funct3::XOR, funct7::BASE) => a ^ b,
            (funct3::XOR, funct7::MULDIV) => div(a, b),
            (funct3::SRL_SRA, funct7::BASE) => a >> (b & SHAMT_MASK),
            (funct3::SRL_SRA, funct7::ALT) => ((a as i32) >> (b & SHAMT_MASK)) as u32,
            (funct3::SRL_SRA, funct7::MULDIV) => divu(a, b),
            (funct3::OR, funct7::BASE) => a | b,
            (funct3::OR, funct7::MULDIV) => rem(a, b),
            (funct3::AND, funct7::BASE) => a & b,
            (funct3::AND, funct7::MULDIV) => remu(a, b),
            _ => return Err(self.invalid(c)),
        };
        self.regs.write(c.rd, value);
        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }

    /// I-type arithmetic: ADDI, SLTI(U), XORI, ORI, ANDI, and the shifts.
    fn exec_imm(&mut self, c: &Decoded) -> Result<(), SimError> {
        let a = self.regs.read(c.rs1);
        let value = match c.funct3 {
            funct3::ADD_SUB => a.wrapping_add(c.imm as u32),
            funct3::SLT => u32::from((a as i32) < c.imm),
            funct3::SLTU => u32::from(a < c.imm as u32),
            funct3::XOR => a ^ c.imm as u32,
            funct3::OR => a | c.imm as u32,
            funct3::AND => a & c.imm as u32,
            funct3::SLL => a << (c.imm as u32 & SHAMT_MASK),
            funct3::SRL_SRA => {
                let shamt = c.imm as u32 & SHAMT_MASK;
                if c.funct7 & funct7::ALT != 0 {
                    ((a as i32) >> shamt) as u32
                } else {
                    a >> shamt
                }
            }
            _ => return Err(self.invalid(c)),
        };
        self.regs.write(c.rd, value);
        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }

    /// Loads: LB/LH/LW signed, LBU/LHU zero-extended.
    fn exec_load(&mut self, c: &Decoded) -> Result<(), SimError> {
        let addr = self.regs.read(c.rs1).wrapping_add(c.imm as u32);
        let value = match c.funct3 {
            funct3::LB => self.read_mem(addr, 1, true)?,
            funct3::LH => self.read_mem(addr, 2, true)?,
            funct3::LW => self.read_mem(addr, 4, false)?,
            funct3::LBU => self.read_mem(addr, 1, false)?,
            funct3::LHU => self.read_mem(addr, 2, false)?,
            _ => return Err(self.invalid(c)),
        };
        self.regs.write(c.rd, value);
        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }

    /// Stores: SB/SH/SW.
    fn exec_store(&mut self, c: &Decoded) -> Result<(), SimError> {
        let addr = self.regs.read(c.rs1).wrapping_add(c.imm as u32);
        let value = self.regs.read(c.rs2);
        match c.funct3 {
            funct3::SB => self.write_mem(addr, value, 1)?,
            funct3::SH => self.write_mem(addr, value, 2)?,
            funct3::SW => self.write_mem(addr, value, 4)?,
            _ => return Err(self.invalid(c)),
        }
        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }

    /// Conditional branches; a taken branch adds the B-type offset to `pc`.
    fn exec_branch(&mut self, c: &Decoded) -> Result<(), SimError> {
        let a = self.regs.read(c.rs1);
        let b = self.regs.read(c.rs2);
        let taken = match c.funct3 {
            funct3::BEQ => a == b,
            funct3::BNE => a != b,
            funct3::BLT => (a as i32) < (b as i32),
            funct3::BGE => (a as i32) >= (b as i32),
            funct3::BLTU => a < b,
            funct3::BGEU => a >= b,
            _ => return Err(self.invalid(c)),
        };
        self.pc = if taken {
            self.pc.wrapping_add(c.imm as u32)
        } else {
            self.pc.wrapping_add(4)
        };
        Ok(())
    }

    fn exec_lui(&mut self, c: &Decoded) {
        self.regs.write(c.rd, c.imm as u32);
        self.pc = self.pc.wrapping_add(4);
    }

    fn exec_auipc(&mut self, c: &Decoded) {
        self.regs.write(c.rd, self.pc.wrapping_add(c.imm as u32));
        self.pc = self.pc.wrapping_add(4);
    }

    fn exec_jal(&mut self, c: &Decoded) {
        self.regs.write(c.rd, self.pc.wrapping_add(4));
        self.pc = self.pc.wrapping_add(c.imm as u32);
    }

    /// JALR clears bit 0 of the computed target.
    fn exec_jalr(&mut self, c: &Decoded) {
        let link = self.pc.wrapping_add(4);
        self.pc = self.regs.read(c.rs1).wrapping_add(c.imm as u32) & !1;
        self.regs.write(c.rd, link);
    }

    /// ECALL/EBREAK halt the core; other SYSTEM encodings are no-ops.
    fn exec_system(&mut self, c: &Decoded) {
        if c.funct3 == funct3::PRIV && (c.funct12 == system::ECALL || c.funct12 == system::EBREAK) {
            self.halted = true;
            return;
        }
        self.pc = self.pc.wrapping_add(4);
    }
}

/// High 32 bits of the signed 64-bit product.
fn mulh(a: u32, b: u32) -> u32 {
    let wide = i64::from(a as i32) * i64::from(b as i32);
    (wide >> 32) as u32
}

/// Signed division with the RV32M sentinels: division by zero yields -1,
/// `i32::MIN / -1` yields `i32::MIN`.
fn div(a: u32, b: u32) -> u32 {
    if b == 0 {
        return u32::MAX;
    }
    (a as i32).wrapping_div(b as i32) as u32
}

/// Unsigned division; division by zero yields all ones.
fn divu(a: u32, b: u32) -> u32 {
    if b == 0 { u32::MAX } else { a / b }
}

/// Signed remainder with the RV32M sentinels: remainder by zero yields the
/// dividend, `i32::MIN % -1` yields 0.
fn rem(a: u32, b: u32) -> u32 {
    if b == 0 {
        return a;
    }
    (a as i32).wrapping_rem(b as i32) as u32
}

/// Unsigned remainder; remainder by zero yields the dividend.
fn remu(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { a % b }
}
