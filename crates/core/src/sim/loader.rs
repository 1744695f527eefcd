//! Binary program image reading and final-state dumping.
//!
//! The input image is little-endian binary: 32 words for the initial register
//! file, then zero or more memory fragments, each a `(addr, size)` word pair
//! followed by `size` raw bytes. End-of-file is only legal where the next
//! fragment address would begin; truncation anywhere else is corruption.
//!
//! The output dump mirrors the layout: 32 register words, the slice start
//! address and size, then the raw RAM bytes.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::common::SimError;
use crate::mem::ram::Ram;

/// One memory fragment of the program image.
#[derive(Debug)]
pub struct MemoryFragment {
    /// RAM address the fragment is loaded at.
    pub addr: u32,
    /// Raw fragment bytes.
    pub data: Vec<u8>,
}

/// A parsed program image: initial registers plus memory fragments.
///
/// By convention `registers[0]` is the entry program counter, `registers[1]`
/// the halt return address, and `registers[2]` the initial stack pointer.
#[derive(Debug)]
pub struct ProgramImage {
    /// Initial register file.
    pub registers: [u32; 32],
    /// Memory fragments in file order.
    pub fragments: Vec<MemoryFragment>,
}

/// Reads and parses a program image file.
///
/// # Errors
///
/// Returns [`SimError::Io`] when the file cannot be opened or read and
/// [`SimError::Format`] when it is truncated mid-structure.
pub fn read_image(path: &Path) -> Result<ProgramImage, SimError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut reader = BufReader::new(file);

    let mut registers = [0u32; 32];
    for reg in &mut registers {
        *reg = read_word(&mut reader, path)?
            .ok_or_else(|| SimError::Format("register block truncated".to_owned()))?;
    }

    let mut fragments = Vec::new();
    while let Some(addr) = read_word(&mut reader, path)? {
        let size = read_word(&mut reader, path)?
            .ok_or_else(|| SimError::Format("fragment header truncated (size missing)".to_owned()))?;

        let mut data = vec![0u8; size as usize];
        if let Err(e) = reader.read_exact(&mut data) {
            return Err(if e.kind() == io::ErrorKind::UnexpectedEof {
                SimError::Format("fragment body truncated".to_owned())
            } else {
                io_error(path, e)
            });
        }

        debug!(addr = format_args!("{addr:#x}"), size, "image fragment");
        fragments.push(MemoryFragment { addr, data });
    }

    Ok(ProgramImage { registers, fragments })
}

/// Writes the final register file and a RAM slice to a dump file.
///
/// # Errors
///
/// Returns [`SimError::OutOfBounds`] when the slice exceeds the RAM and
/// [`SimError::Io`] when the file cannot be created or written.
pub fn write_dump(
    path: &Path,
    registers: &[u32; 32],
    ram: &Ram,
    start: u32,
    size: u32,
) -> Result<(), SimError> {
    let bytes = ram.dump(start, size)?;

    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    for reg in registers {
        writer
            .write_all(&reg.to_le_bytes())
            .map_err(|e| io_error(path, e))?;
    }
    writer
        .write_all(&start.to_le_bytes())
        .map_err(|e| io_error(path, e))?;
    writer
        .write_all(&size.to_le_bytes())
        .map_err(|e| io_error(path, e))?;
    writer.write_all(&bytes).map_err(|e| io_error(path, e))?;
    writer.flush().map_err(|e| io_error(path, e))
}

/// Reads one little-endian word, or `None` on a clean end-of-file.
///
/// A partial word (1-3 bytes before EOF) is a format error, not a clean end.
fn read_word<R: Read>(reader: &mut R, path: &Path) -> Result<Option<u32>, SimError> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).map_err(|e| io_error(path, e))?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    match filled {
        0 => Ok(None),
        4 => Ok(Some(u32::from_le_bytes(buf))),
        _ => Err(SimError::Format("image ends in the middle of a word".to_owned())),
    }
}

fn io_error(path: &Path, source: io::Error) -> SimError {
    SimError::Io {
        path: path.display().to_string(),
        source,
    }
}
