//! Wp16: LZSS over 16-bit units.
//!
//! Flags come 32 at a time from little-endian words; literals and matches
//! both move whole 2-byte units, and the token displacement counts units,
//! not bytes.

use crate::bitio::FlagWord;
use crate::cursor::ByteCursor;
use crate::errors::LzError;
use crate::window::Window;

pub fn wp16(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_exact(4)? != b"Wp16" {
        return Err(LzError::InvalidHeader("wp16"));
    }
    let size = csr.read_u32_le()? as usize;
    let mut out = Vec::with_capacity(size);
    let mut win = Window::new(0xFFE);
    let mut flags = FlagWord::new();
    while out.len() < size {
        if flags.next_le(&mut csr)? {
            let byte = csr.read_u8()?;
            win.put(&mut out, byte);
            if out.len() < size {
                let byte = csr.read_u8()?;
                win.put(&mut out, byte);
            }
        } else {
            let at = csr.position();
            let token = csr.read_u16_le()? as usize;
            let displacement = (token & 0x7FF) * 2;
            let length = ((token >> 11) + 2) * 2;
            let remaining = size - out.len();
            win.copy_back(&mut out, displacement, length.min(remaining), at)?;
        }
    }
    Ok(out)
}
