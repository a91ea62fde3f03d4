//! Ring-position LZSS dialects.
//!
//! These tokens carry an absolute slot in the ring rather than a
//! displacement, and the ring starts out "already written" — a zero-filled
//! pre-buffer the first matches may legally reach into.

use crate::cursor::ByteCursor;
use crate::errors::LzError;
use crate::window::Window;

/// `SSZL`-tagged LZSS: 0x1000-byte ring preseeded at 0xFEE, 12-bit window
/// positions, flag bits consumed LSB-first.
pub fn lzss(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_exact(4)? != b"SSZL" {
        return Err(LzError::InvalidHeader("lzss"));
    }
    let _reserved = csr.read_u32_le()?;
    let payload = csr.read_u32_le()? as usize;
    let size = csr.read_u32_le()? as usize;
    if payload > csr.remaining() {
        return Err(LzError::InvalidHeader("lzss"));
    }
    let mut out = Vec::with_capacity(size);
    let mut win = Window::preseeded(0x1000, 0xFEE);
    ring_loop(&mut csr, &mut out, &mut win, size, 0xF, 4)?;
    Ok(out)
}

/// `ECD`-tagged LZSS: a stored count of leading literal bytes, then a
/// 0x400-byte ring preseeded at 0x3BE with 10-bit window positions.
pub fn lz_ecd(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_exact(3)? != b"ECD" {
        return Err(LzError::InvalidHeader("lz-ecd"));
    }
    let version = csr.read_u8()?;
    if version != 1 {
        return Err(LzError::UnsupportedConfiguration {
            kind: "lz-ecd version",
            value: version as u32,
        });
    }
    let skip = csr.read_u32_be()? as usize;
    let payload = csr.read_u32_be()? as usize;
    let size = csr.read_u32_be()? as usize;
    if payload > csr.remaining() || skip > size {
        return Err(LzError::InvalidHeader("lz-ecd"));
    }
    let mut out = Vec::with_capacity(size);
    let mut win = Window::preseeded(0x400, 0x3BE);
    // the stored prefix still passes through the ring so matches can use it
    for _ in 0..skip {
        let byte = csr.read_u8()?;
        win.put(&mut out, byte);
    }
    ring_loop(&mut csr, &mut out, &mut win, size, 0x3F, 2)?;
    Ok(out)
}

// Shared token loop. The second token byte splits into a length field
// (`len_mask`) and the high bits of the ring slot, shifted up by `shift`.
fn ring_loop(
    csr: &mut ByteCursor,
    out: &mut Vec<u8>,
    win: &mut Window,
    size: usize,
    len_mask: usize,
    shift: u32,
) -> Result<(), LzError> {
    let mut flags = 0u32; // bit 8 counts down the group
    while out.len() < size {
        flags >>= 1;
        if flags & 0x100 == 0 {
            flags = csr.read_u8()? as u32 | 0xFF00;
        }
        if flags & 1 == 1 {
            let byte = csr.read_u8()?;
            win.put(out, byte);
        } else {
            let b1 = csr.read_u8()? as usize;
            let b2 = csr.read_u8()? as usize;
            let slot = b1 | (b2 & !len_mask) << shift;
            let length = ((b2 & len_mask) + 3).min(size - out.len());
            win.copy_from(out, slot, length);
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lzss_literal_then_ring_copy() {
        // three literals land in slots 0xFEE..0xFF1; the token replays two
        // of them from their absolute slots
        let data = [
            b'S', b'S', b'Z', b'L',
            0, 0, 0, 0,
            6, 0, 0, 0, // payload bytes after the header
            5, 0, 0, 0, // decompressed size
            0b0000_0111, b'h', b'i', b'!',
            0xEE, 0xF0, // slot 0xFEE, length 0+3 (clamped to 2)
        ];
        assert_eq!(lzss(&data).unwrap(), b"hi!hi");
    }

    #[test]
    fn lzss_rejects_inconsistent_payload_length() {
        let data = [
            b'S', b'S', b'Z', b'L',
            0, 0, 0, 0,
            0xFF, 0, 0, 0, // claims more payload than exists
            1, 0, 0, 0,
            0x01, b'x',
        ];
        assert!(matches!(lzss(&data), Err(LzError::InvalidHeader("lzss"))));
    }

    #[test]
    fn ecd_stored_prefix_then_copy() {
        let data = [
            b'E', b'C', b'D', 0x01,
            0, 0, 0, 2, // two stored leading bytes
            0, 0, 0, 5, // payload
            0, 0, 0, 6, // decompressed size
            b'o', b'k',
            0b0000_0000,      // one token group, first flag clear
            0xBE, 0xC1,       // slot 0x3BE, length 1+3
        ];
        assert_eq!(lz_ecd(&data).unwrap(), b"okokok");
    }

    #[test]
    fn ecd_unknown_version() {
        let data = [b'E', b'C', b'D', 0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            lz_ecd(&data),
            Err(LzError::UnsupportedConfiguration { value: 2, .. })
        ));
    }
}
