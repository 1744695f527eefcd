//! Load/store semantics through the cache.

use crate::common::encode::{
    addi, ebreak, lb, lbu, lh, lhu, lw, r_type, sb, sh, sw,
};
use crate::common::harness::{image_with, line_padded_fragment, run_image};
use rvcache_core::ReplacementKind;
use rvcache_core::common::SimError;
use rvcache_core::isa::{funct3, funct7, opcodes};
use rvcache_core::sim::simulator::run_policy;

/// Address of the data line used by the load/store programs.
const DATA: u32 = 0x2000;

// ══════════════════════════════════════════════════════════
// 1. Sign extension
// ══════════════════════════════════════════════════════════

/// LB sign-extends a 0xFF byte to all ones; LBU zero-extends it.
#[test]
fn lb_sign_extends_lbu_zero_extends() {
    let data = line_padded_fragment(DATA, &[0xFF]);
    let image = image_with(
        &[(8, DATA)],
        vec![data],
        &[lb(3, 8, 0), lbu(4, 8, 0), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[3], 0xFFFF_FFFF);
    assert_eq!(run.registers[4], 0x0000_00FF);
}

#[test]
fn lh_sign_extends_lhu_zero_extends() {
    let data = line_padded_fragment(DATA, &[0xFE, 0xFF]);
    let image = image_with(
        &[(8, DATA)],
        vec![data],
        &[lh(3, 8, 0), lhu(4, 8, 0), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[3], 0xFFFF_FFFE);
    assert_eq!(run.registers[4], 0x0000_FFFE);
}

/// A positive byte is unchanged by either extension.
#[test]
fn lb_of_positive_byte_matches_lbu() {
    let data = line_padded_fragment(DATA, &[0x7F]);
    let image = image_with(
        &[(8, DATA)],
        vec![data],
        &[lb(3, 8, 0), lbu(4, 8, 0), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[3], 0x7F);
    assert_eq!(run.registers[4], 0x7F);
}

// ══════════════════════════════════════════════════════════
// 2. Stores and RAM visibility
// ══════════════════════════════════════════════════════════

/// SW then LW round-trips through the cache; after the halt flush the RAM
/// holds the stored bytes little-endian.
#[test]
fn sw_lw_roundtrip_and_flush_visibility() {
    let data = line_padded_fragment(DATA, &[0u8; 8]);
    let image = image_with(
        &[(8, DATA), (9, 0xDEAD_BEEF)],
        vec![data],
        &[sw(8, 9, 4), lw(5, 8, 4), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[5], 0xDEAD_BEEF);
    assert_eq!(
        run.ram.dump(DATA + 4, 4).unwrap(),
        vec![0xEF, 0xBE, 0xAD, 0xDE]
    );
}

/// SB patches a single byte of the line.
#[test]
fn sb_patches_one_byte() {
    let data = line_padded_fragment(DATA, &[0x11, 0x22, 0x33, 0x44]);
    let image = image_with(
        &[(8, DATA), (9, 0xAB)],
        vec![data],
        &[sb(8, 9, 1), lw(5, 8, 0), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[5], 0x4433_AB11);
    assert_eq!(run.ram.dump(DATA, 4).unwrap(), vec![0x11, 0xAB, 0x33, 0x44]);
}

/// SH stores the low halfword only.
#[test]
fn sh_stores_low_halfword() {
    let data = line_padded_fragment(DATA, &[0u8; 4]);
    let image = image_with(
        &[(8, DATA), (9, 0x1234_5678)],
        vec![data],
        &[sh(8, 9, 0), lhu(5, 8, 0), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[5], 0x5678);
}

/// Negative load offsets address below the base register.
#[test]
fn negative_offset_load() {
    let data = line_padded_fragment(DATA, &[0x2A, 0, 0, 0]);
    let image = image_with(
        &[(8, DATA + 4)],
        vec![data],
        &[lbu(5, 8, -4), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[5], 0x2A);
}

// ══════════════════════════════════════════════════════════
// 3. Failure modes
// ══════════════════════════════════════════════════════════

/// An unsupported major opcode aborts the run.
#[test]
fn invalid_opcode_aborts() {
    let image = image_with(&[], Vec::new(), &[0x0000_007B]);
    let err = run_policy(&image, ReplacementKind::Lru).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidOpcode { opcode: 0x7B, .. }
    ));
}

/// An undecodable funct combination inside a supported opcode aborts too:
/// MULHSU (funct3 2, funct7 0x01) is outside the implemented subset.
#[test]
fn unsupported_funct_combination_aborts() {
    let word = r_type(opcodes::OP_REG, 1, funct3::SLT, 2, 3, funct7::MULDIV);
    let image = image_with(&[], Vec::new(), &[word, ebreak()]);
    let err = run_policy(&image, ReplacementKind::Lru).unwrap_err();
    assert!(matches!(err, SimError::InvalidOpcode { .. }));
}

/// A load touching a line with undefined bytes aborts with the RAM error.
#[test]
fn load_from_undefined_line_aborts() {
    let image = image_with(&[(8, 0x4000)], Vec::new(), &[lw(5, 8, 0), ebreak()]);
    let err = run_policy(&image, ReplacementKind::Lru).unwrap_err();
    assert!(matches!(err, SimError::UndefinedMemory { .. }));
}

/// A load outside the memory aborts with the bounds error.
#[test]
fn load_out_of_bounds_aborts() {
    let image = image_with(
        &[(8, 0xFFFF_0000)],
        Vec::new(),
        &[lw(5, 8, 0), ebreak()],
    );
    let err = run_policy(&image, ReplacementKind::Lru).unwrap_err();
    assert!(matches!(err, SimError::OutOfBounds { .. }));
}

/// A store followed by a bad encoding still aborts; the error wins over any
/// partial progress.
#[test]
fn abort_after_store_reports_invalid_opcode() {
    let data = line_padded_fragment(DATA, &[0u8; 4]);
    let image = image_with(
        &[(8, DATA), (9, 0x55)],
        vec![data],
        &[sb(8, 9, 0), 0x0000_007B],
    );
    let err = run_policy(&image, ReplacementKind::Lru).unwrap_err();
    assert!(matches!(err, SimError::InvalidOpcode { .. }));
}

/// ADDI after a load keeps working on the loaded value (load-use ordering).
#[test]
fn load_then_use() {
    let data = line_padded_fragment(DATA, &[5, 0, 0, 0]);
    let image = image_with(
        &[(8, DATA)],
        vec![data],
        &[lw(5, 8, 0), addi(5, 5, 10), ebreak()],
    );
    let run = run_image(&image);
    assert_eq!(run.registers[5], 15);
}
