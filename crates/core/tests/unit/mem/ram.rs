//! RAM bounds and definedness tests.

use rvcache_core::common::SimError;
use rvcache_core::config::MEMORY_SIZE;
use rvcache_core::mem::ram::Ram;

#[test]
fn size_reports_construction_size() {
    let ram = Ram::new(MEMORY_SIZE);
    assert_eq!(ram.size(), MEMORY_SIZE);
}

/// Write-then-read of the same address yields the written byte.
#[test]
fn write_read_roundtrip() {
    let mut ram = Ram::new(MEMORY_SIZE);
    ram.write8(0x1234, 0xAB).unwrap();
    assert_eq!(ram.read8(0x1234).unwrap(), 0xAB);
}

/// Reading a byte that was never written or loaded is a fatal error.
#[test]
fn read_of_undefined_byte_fails() {
    let ram = Ram::new(MEMORY_SIZE);
    let err = ram.read8(0x40).unwrap_err();
    assert!(matches!(err, SimError::UndefinedMemory { addr: 0x40 }));
}

/// Writing defines the byte; its neighbors stay undefined.
#[test]
fn write_defines_only_the_written_byte() {
    let mut ram = Ram::new(MEMORY_SIZE);
    ram.write8(0x100, 1).unwrap();
    assert!(ram.read8(0x100).is_ok());
    assert!(matches!(
        ram.read8(0x101),
        Err(SimError::UndefinedMemory { addr: 0x101 })
    ));
}

#[test]
fn read_out_of_bounds_fails() {
    let ram = Ram::new(MEMORY_SIZE);
    let err = ram.read8(MEMORY_SIZE).unwrap_err();
    assert!(matches!(err, SimError::OutOfBounds { .. }));
}

#[test]
fn write_out_of_bounds_fails() {
    let mut ram = Ram::new(MEMORY_SIZE);
    assert!(matches!(
        ram.write8(MEMORY_SIZE, 0),
        Err(SimError::OutOfBounds { .. })
    ));
}

/// The last valid address is writable; one past it is not.
#[test]
fn bounds_are_exact_at_the_top_of_memory() {
    let mut ram = Ram::new(MEMORY_SIZE);
    ram.write8(MEMORY_SIZE - 1, 0x5A).unwrap();
    assert_eq!(ram.read8(MEMORY_SIZE - 1).unwrap(), 0x5A);
    assert!(ram.write8(MEMORY_SIZE, 0).is_err());
}

/// A fragment whose span would wrap the address space is rejected, not
/// silently truncated.
#[test]
fn fragment_spanning_past_the_end_fails() {
    let mut ram = Ram::new(MEMORY_SIZE);
    let err = ram.load_fragment(MEMORY_SIZE - 2, &[0; 4]).unwrap_err();
    assert!(matches!(err, SimError::OutOfBounds { .. }));
}

/// Fragments define every byte they cover.
#[test]
fn load_fragment_defines_span() {
    let mut ram = Ram::new(MEMORY_SIZE);
    ram.load_fragment(0x200, &[1, 2, 3, 4]).unwrap();
    assert_eq!(ram.read8(0x200).unwrap(), 1);
    assert_eq!(ram.read8(0x203).unwrap(), 4);
    assert!(ram.read8(0x204).is_err());
}

/// Dumping ignores definedness: untouched bytes come out as zero.
#[test]
fn dump_returns_storage_without_definedness_check() {
    let mut ram = Ram::new(MEMORY_SIZE);
    ram.write8(0x301, 0x7F).unwrap();
    let bytes = ram.dump(0x300, 4).unwrap();
    assert_eq!(bytes, vec![0, 0x7F, 0, 0]);
}

#[test]
fn dump_out_of_bounds_fails() {
    let ram = Ram::new(MEMORY_SIZE);
    assert!(matches!(
        ram.dump(MEMORY_SIZE - 4, 8),
        Err(SimError::OutOfBounds { .. })
    ));
}
