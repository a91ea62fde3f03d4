//! The N64-era mask-bit family: Yaz0's inline stream, and the Yay0/MIO0
//! layouts that split mask bits, back-reference tokens, and literal bytes
//! into separate regions addressed from the header.

use crate::bitio::FlagWord;
use crate::cursor::ByteCursor;
use crate::errors::LzError;
use crate::window::Window;

/// Yaz0: MSB-first flag bytes inline with the data. A zero length nibble
/// escapes to a full extra length byte (`+0x12`).
pub fn yaz0(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_exact(4)? != b"Yaz0" {
        return Err(LzError::InvalidHeader("yaz0"));
    }
    let size = csr.read_u32_be()? as usize;
    csr.read_exact(8)?; // reserved words

    let mut out = Vec::with_capacity(size);
    let mut win = Window::new(0x1000);
    let mut flags = 0u8;
    let mut left = 0u32;
    while out.len() < size {
        if left == 0 {
            flags = csr.read_u8()?;
            left = 8;
        }
        let bit = flags & 0x80 != 0;
        flags <<= 1;
        left -= 1;
        if bit {
            let byte = csr.read_u8()?;
            win.put(&mut out, byte);
        } else {
            let at = csr.position();
            let token = csr.read_u16_be()? as usize;
            let displacement = (token & 0xFFF) + 1;
            let length = match token >> 12 {
                0 => csr.read_u8()? as usize + 0x12,
                n => n + 2,
            };
            let remaining = size - out.len();
            win.copy_back(&mut out, displacement, length.min(remaining), at)?;
        }
    }
    Ok(out)
}

/// Yay0: Yaz0's token formulas, but mask words, tokens, and literals live
/// in three separate streams; the header points at the latter two.
pub fn yay0(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_exact(4)? != b"Yay0" {
        return Err(LzError::InvalidHeader("yay0"));
    }
    let size = csr.read_u32_be()? as usize;
    let links_at = csr.read_u32_be()? as usize;
    let chunks_at = csr.read_u32_be()? as usize;
    let mut links = ByteCursor::at(input, links_at).map_err(|_| LzError::InvalidHeader("yay0"))?;
    let mut chunks =
        ByteCursor::at(input, chunks_at).map_err(|_| LzError::InvalidHeader("yay0"))?;

    let mut out = Vec::with_capacity(size);
    let mut win = Window::new(0x1000);
    let mut mask = FlagWord::new();
    while out.len() < size {
        if mask.next_be(&mut csr)? {
            let byte = chunks.read_u8()?;
            win.put(&mut out, byte);
        } else {
            let at = links.position();
            let token = links.read_u16_be()? as usize;
            let displacement = (token & 0xFFF) + 1;
            let length = match token >> 12 {
                0 => chunks.read_u8()? as usize + 0x12,
                n => n + 2,
            };
            let remaining = size - out.len();
            win.copy_back(&mut out, displacement, length.min(remaining), at)?;
        }
    }
    Ok(out)
}

/// MIO0: the same split layout as Yay0 with a plain 4-bit length (`+3`)
/// and no escape.
pub fn mio0(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_exact(4)? != b"MIO0" {
        return Err(LzError::InvalidHeader("mio0"));
    }
    let size = csr.read_u32_be()? as usize;
    let comp_at = csr.read_u32_be()? as usize;
    let raw_at = csr.read_u32_be()? as usize;
    let mut comp = ByteCursor::at(input, comp_at).map_err(|_| LzError::InvalidHeader("mio0"))?;
    let mut raw = ByteCursor::at(input, raw_at).map_err(|_| LzError::InvalidHeader("mio0"))?;

    let mut out = Vec::with_capacity(size);
    let mut win = Window::new(0x1000);
    let mut mask = FlagWord::new();
    while out.len() < size {
        if mask.next_be(&mut csr)? {
            let byte = raw.read_u8()?;
            win.put(&mut out, byte);
        } else {
            let at = comp.position();
            let token = comp.read_u16_be()? as usize;
            let length = (token >> 12) + 3;
            let displacement = (token & 0xFFF) + 1;
            let remaining = size - out.len();
            win.copy_back(&mut out, displacement, length.min(remaining), at)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn yaz0_escape_length() {
        // 3 literals, then a token with a zero nibble and an extra length
        // byte of 0 -> 0x12 bytes from displacement 3
        let mut data = vec![b'Y', b'a', b'z', b'0', 0, 0, 0, 21];
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&[0b1110_0000, b'a', b'b', b'c', 0x00, 0x02, 0x00]);
        let out = yaz0(&data).unwrap();
        assert_eq!(out.len(), 21);
        assert_eq!(&out[..6], b"abcabc");
        assert_eq!(&out[18..], b"abc");
    }

    #[test]
    fn yaz0_short_token() {
        let mut data = vec![b'Y', b'a', b'z', b'0', 0, 0, 0, 6];
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&[0b1100_0000, b'h', b'i', 0x20, 0x01]);
        assert_eq!(yaz0(&data).unwrap(), b"hihihi");
    }

    #[test]
    fn mio0_split_streams() {
        let data = [
            b'M', b'I', b'O', b'0',
            0x00, 0x00, 0x00, 0x08, // size 8
            0x00, 0x00, 0x00, 0x14, // tokens at 0x14
            0x00, 0x00, 0x00, 0x16, // literals at 0x16
            0b1100_0000, 0x00, 0x00, 0x00, // mask word: two literals, then a copy
            0x30, 0x01, // length 3+3, displacement 2
            b'G', b'O',
        ];
        assert_eq!(mio0(&data).unwrap(), b"GOGOGOGO");
    }

    #[test]
    fn yay0_magic_only_differs_by_case() {
        let data = [b'y', b'a', b'y', b'0', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(yay0(&data), Err(LzError::InvalidHeader("yay0"))));
    }
}
