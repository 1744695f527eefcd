//! Load/store helpers between the interpreter and the cache.
//!
//! Loads and stores move 1, 2, or 4 bytes through the cache as a single
//! first-class access, so a halfword access advances the data access counter
//! exactly once. Sign extension for sub-word loads happens here, after the
//! cache has assembled the little-endian value.

use super::Processor;
use crate::common::{AccessKind, SimError};

impl Processor<'_> {
    /// Reads `size` bytes at `addr` through the cache, extending to 32 bits.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidAccessSize`] for sizes other than 1, 2, or
    /// 4; cache and RAM failures propagate unchanged.
    pub(crate) fn read_mem(&mut self, addr: u32, size: u32, signed: bool) -> Result<u32, SimError> {
        let value = match size {
            1 => u32::from(self.cache.read8(addr, AccessKind::Data)?),
            2 => u32::from(self.cache.read16(addr, AccessKind::Data)?),
            4 => self.cache.read32(addr, AccessKind::Data)?,
            _ => return Err(SimError::InvalidAccessSize { size }),
        };
        if signed {
            let extended = match size {
                1 => value as u8 as i8 as i32 as u32,
                2 => value as u16 as i16 as i32 as u32,
                _ => value,
            };
            return Ok(extended);
        }
        Ok(value)
    }

    /// Writes the low `size` bytes of `value` at `addr` through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidAccessSize`] for sizes other than 1, 2, or
    /// 4; cache and RAM failures propagate unchanged.
    pub(crate) fn write_mem(&mut self, addr: u32, value: u32, size: u32) -> Result<(), SimError> {
        match size {
            1 => self.cache.write8(addr, value as u8),
            2 => self.cache.write16(addr, value as u16),
            4 => self.cache.write32(addr, value),
            _ => Err(SimError::InvalidAccessSize { size }),
        }
    }
}
