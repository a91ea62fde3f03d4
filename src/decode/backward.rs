//! Backward-decoded overlay LZ.
//!
//! The stream is parsed from a footer at the end of the input, and both the
//! token reads and the output writes run high-to-low. The decode happens in
//! place over a copy of the input grown by the footer's expansion count;
//! everything below the compressed region is stored data and stays put.

use crate::cursor::{ByteCursor, ReverseCursor};
use crate::errors::LzError;

pub fn backward_lz77(input: &[u8]) -> Result<Vec<u8>, LzError> {
    if input.len() < 8 {
        return Err(LzError::InvalidHeader("backward-lz77"));
    }
    let mut footer = ByteCursor::at(input, input.len() - 8)?;
    let top_and_bottom = footer.read_u32_le()?;
    let grown = footer.read_u32_le()? as usize;
    let bottom = (top_and_bottom & 0x00FF_FFFF) as usize;
    let footer_len = (top_and_bottom >> 24) as usize;
    if footer_len < 8 || footer_len > bottom || bottom > input.len() {
        return Err(LzError::InvalidHeader("backward-lz77"));
    }

    let total = input.len() + grown;
    let mut out = vec![0u8; total];
    out[..input.len()].copy_from_slice(input);

    // compressed region sits between the stored prefix and the footer
    let floor = input.len() - bottom;
    let mut src = ReverseCursor::new(&input[floor..input.len() - footer_len]);
    let mut dst = total;
    while dst > floor {
        let flags = src.read_u8()?;
        for bit in (0..8).rev() {
            if dst <= floor {
                break;
            }
            if flags >> bit & 1 == 1 {
                let at = floor + src.position();
                let b1 = src.read_u8()? as usize;
                let b2 = src.read_u8()? as usize;
                let length = (b1 >> 4) + 3;
                let displacement = ((b1 & 0xF) << 8 | b2) + 3;
                if displacement > total - dst {
                    return Err(LzError::DisplacementOutOfRange {
                        displacement,
                        produced: total - dst,
                        offset: at,
                    });
                }
                for _ in 0..length {
                    if dst <= floor {
                        break;
                    }
                    dst -= 1;
                    out[dst] = out[dst + displacement];
                }
            } else {
                dst -= 1;
                out[dst] = src.read_u8()?;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    // Hand-built stream: two stored bytes, then a compressed region that
    // emits four literals and one displacement-3 length-14 copy, all
    // back-to-front.
    fn sample() -> Vec<u8> {
        let mut data = vec![b'U', b'V']; // stored prefix
        // compressed region in file order; the decoder reads it from the
        // end: flags 0x08, then literals, then the copy token
        data.extend_from_slice(&[0x00, 0xB0, b'D', b'C', b'B', b'A', 0b0000_1000]);
        // footer: bottom = region + footer = 7 + 8, footer length 8
        data.extend_from_slice(&0x0800_000Fu32.to_le_bytes());
        data.extend_from_slice(&3u32.to_le_bytes()); // grows by 3
        data
    }

    #[test]
    fn decodes_back_to_front() {
        let out = backward_lz77(&sample()).unwrap();
        // literals land at the top; the copy repeats them downward with a
        // period of three until it hits the stored prefix
        assert_eq!(out, b"UVCBDCBDCBDCBDCBDCBA");
        assert_eq!(out.len(), sample().len() + 3);
    }

    #[test]
    fn bad_footer_lengths_are_rejected() {
        let mut data = sample();
        let n = data.len();
        data[n - 5] = 0x02; // footer length 2 < 8
        assert!(matches!(
            backward_lz77(&data),
            Err(LzError::InvalidHeader("backward-lz77"))
        ));
    }
}
