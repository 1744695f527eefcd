//! Set-associative write-back, write-allocate cache.
//!
//! The cache owns its line storage and a statistics record, borrows the RAM
//! it sits in front of, and delegates replacement decisions to a
//! [`ReplacementPolicy`]. Every access resolves against the lines; misses
//! fill a whole line byte-wise from RAM, evicting (and writing back, when
//! dirty) a victim chosen first among invalid ways and then by the policy.
//!
//! Counter contract: reads advance the access counter of their kind and, on
//! hit, the matching hit counter. Writes advance `data_access` only — a write
//! hit updates the policy metadata but never a hit counter.

/// Replacement policy trait and implementations.
pub mod policies;

use self::policies::{ReplacementKind, ReplacementPolicy};
use crate::common::{AccessKind, SimError};
use crate::config::{
    CACHE_INDEX_LEN, CACHE_LINE_SIZE, CACHE_OFFSET_LEN, CACHE_SET_COUNT, CACHE_WAY,
};
use crate::mem::ram::Ram;
use crate::stats::CacheStats;

/// One cache line: data buffer, validity, dirtiness, and the stored tag.
#[derive(Clone)]
struct Line {
    data: [u8; CACHE_LINE_SIZE],
    valid: bool,
    dirty: bool,
    tag: u32,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            data: [0; CACHE_LINE_SIZE],
            valid: false,
            dirty: false,
            tag: 0,
        }
    }
}

/// Intra-line byte offset of `addr`.
fn line_offset(addr: u32) -> usize {
    (addr as usize) & (CACHE_LINE_SIZE - 1)
}

/// Set index of `addr`.
fn set_index(addr: u32) -> usize {
    ((addr >> CACHE_OFFSET_LEN) as usize) & (CACHE_SET_COUNT - 1)
}

/// Tag of `addr`.
fn line_tag(addr: u32) -> u32 {
    addr >> (CACHE_OFFSET_LEN + CACHE_INDEX_LEN)
}

/// Base address of the line containing `addr`.
fn line_base(addr: u32) -> u32 {
    addr & !(CACHE_LINE_SIZE as u32 - 1)
}

/// Base address reconstructed from a stored (tag, set) pair.
fn stored_base(tag: u32, set: usize) -> u32 {
    (tag << (CACHE_OFFSET_LEN + CACHE_INDEX_LEN)) | ((set as u32) << CACHE_OFFSET_LEN)
}

/// Set-associative write-back cache over a borrowed [`Ram`].
///
/// Lines are stored set-major: the ways of set `s` occupy indices
/// `s * CACHE_WAY .. (s + 1) * CACHE_WAY`.
pub struct Cache<'r> {
    ram: &'r mut Ram,
    lines: Vec<Line>,
    stats: CacheStats,
    policy: Box<dyn ReplacementPolicy>,
}

impl<'r> Cache<'r> {
    /// Creates an empty cache in front of `ram` with the given replacement
    /// policy. All lines start invalid, clean, and zero-filled.
    pub fn new(ram: &'r mut Ram, kind: ReplacementKind) -> Self {
        Self {
            ram,
            lines: vec![Line::default(); CACHE_SET_COUNT * CACHE_WAY],
            stats: CacheStats::default(),
            policy: kind.build(CACHE_SET_COUNT, CACHE_WAY),
        }
    }

    /// Returns a copy of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Propagates RAM fill failures ([`SimError::OutOfBounds`],
    /// [`SimError::UndefinedMemory`]).
    pub fn read8(&mut self, addr: u32, kind: AccessKind) -> Result<u8, SimError> {
        Ok(self.read_bytes::<1>(addr, kind)?[0])
    }

    /// Reads a little-endian halfword from within a single line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnalignedAccess`] when the halfword straddles a
    /// line boundary; propagates RAM fill failures.
    pub fn read16(&mut self, addr: u32, kind: AccessKind) -> Result<u16, SimError> {
        Ok(u16::from_le_bytes(self.read_bytes(addr, kind)?))
    }

    /// Reads a little-endian word from within a single line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnalignedAccess`] when the word straddles a line
    /// boundary; propagates RAM fill failures.
    pub fn read32(&mut self, addr: u32, kind: AccessKind) -> Result<u32, SimError> {
        Ok(u32::from_le_bytes(self.read_bytes(addr, kind)?))
    }

    /// Writes one byte in-cache, allocating the line on a miss.
    ///
    /// # Errors
    ///
    /// Propagates RAM failures from the allocate fill or the victim
    /// write-back.
    pub fn write8(&mut self, addr: u32, value: u8) -> Result<(), SimError> {
        self.write_bytes(addr, [value])
    }

    /// Writes a little-endian halfword in-cache within a single line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnalignedAccess`] when the halfword straddles a
    /// line boundary; propagates RAM failures.
    pub fn write16(&mut self, addr: u32, value: u16) -> Result<(), SimError> {
        self.write_bytes(addr, value.to_le_bytes())
    }

    /// Writes a little-endian word in-cache within a single line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnalignedAccess`] when the word straddles a line
    /// boundary; propagates RAM failures.
    pub fn write32(&mut self, addr: u32, value: u32) -> Result<(), SimError> {
        self.write_bytes(addr, value.to_le_bytes())
    }

    /// Writes every valid dirty line back to RAM and clears its dirty bit.
    ///
    /// Idempotent: a second flush with no intervening writes is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates RAM write failures.
    pub fn flush(&mut self) -> Result<(), SimError> {
        for set in 0..CACHE_SET_COUNT {
            for way in 0..CACHE_WAY {
                let idx = set * CACHE_WAY + way;
                if !(self.lines[idx].valid && self.lines[idx].dirty) {
                    continue;
                }
                let base = stored_base(self.lines[idx].tag, set);
                for i in 0..CACHE_LINE_SIZE {
                    let byte = self.lines[idx].data[i];
                    self.ram.write8(base + i as u32, byte)?;
                }
                self.lines[idx].dirty = false;
            }
        }
        Ok(())
    }

    fn read_bytes<const N: usize>(
        &mut self,
        addr: u32,
        kind: AccessKind,
    ) -> Result<[u8; N], SimError> {
        match kind {
            AccessKind::Instruction => self.stats.instr_access += 1,
            AccessKind::Data => self.stats.data_access += 1,
        }
        let offset = line_offset(addr);
        if offset + N > CACHE_LINE_SIZE {
            return Err(SimError::UnalignedAccess { addr, len: N as u32 });
        }
        let line = self.fetch_line(addr, Some(kind))?;
        let mut out = [0u8; N];
        out.copy_from_slice(&line.data[offset..offset + N]);
        Ok(out)
    }

    fn write_bytes<const N: usize>(&mut self, addr: u32, bytes: [u8; N]) -> Result<(), SimError> {
        self.stats.data_access += 1;
        let offset = line_offset(addr);
        if offset + N > CACHE_LINE_SIZE {
            return Err(SimError::UnalignedAccess { addr, len: N as u32 });
        }
        let line = self.fetch_line(addr, None)?;
        line.data[offset..offset + N].copy_from_slice(&bytes);
        line.dirty = true;
        Ok(())
    }

    /// Resolves the line holding `addr`, filling it on a miss.
    ///
    /// `hit_kind` is `Some` for reads, whose hits advance the matching hit
    /// counter; writes pass `None` and leave the hit counters untouched. The
    /// policy sees `on_hit`/`on_fill` either way.
    fn fetch_line(
        &mut self,
        addr: u32,
        hit_kind: Option<AccessKind>,
    ) -> Result<&mut Line, SimError> {
        let set = set_index(addr);
        let tag = line_tag(addr);
        let base_idx = set * CACHE_WAY;

        let mut hit = None;
        for way in 0..CACHE_WAY {
            let line = &self.lines[base_idx + way];
            if line.valid && line.tag == tag {
                hit = Some(way);
                break;
            }
        }
        if let Some(way) = hit {
            self.policy.on_hit(set, way);
            match hit_kind {
                Some(AccessKind::Instruction) => self.stats.instr_hit += 1,
                Some(AccessKind::Data) => self.stats.data_hit += 1,
                None => {}
            }
            return Ok(&mut self.lines[base_idx + way]);
        }

        // Miss: take the first invalid way, else ask the policy for a victim.
        let mut invalid = None;
        for way in 0..CACHE_WAY {
            if !self.lines[base_idx + way].valid {
                invalid = Some(way);
                break;
            }
        }
        let way = match invalid {
            Some(way) => way,
            None => self.policy.victim(set),
        };

        // Write back a dirty victim to the address its stored tag names.
        {
            let line = &self.lines[base_idx + way];
            if line.valid && line.dirty {
                let base = stored_base(line.tag, set);
                for i in 0..CACHE_LINE_SIZE {
                    let byte = line.data[i];
                    self.ram.write8(base + i as u32, byte)?;
                }
            }
        }

        // Fill the whole line from RAM; definedness failures propagate.
        let base = line_base(addr);
        let mut data = [0u8; CACHE_LINE_SIZE];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = self.ram.read8(base + i as u32)?;
        }

        let line = &mut self.lines[base_idx + way];
        line.data = data;
        line.valid = true;
        line.dirty = false;
        line.tag = tag;

        self.policy.on_fill(set, way);
        Ok(&mut self.lines[base_idx + way])
    }
}
