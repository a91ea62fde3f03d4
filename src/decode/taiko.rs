//! The Taiko bitstream dialects.
//!
//! `0x80` is byte-aligned: a 2-bit kind in each control byte selects a
//! literal run or one of three back-reference tiers. `0x81` spends its
//! whole payload as one MSB-first bitstream: a structurally-serialized
//! Huffman alphabet resolves literals, an end marker, and length symbols
//! whose bases and extra-bit counts come from fixed lookup tables.

use crate::bitio::{msb_bits, read_vlc_bytes};
use crate::cursor::ByteCursor;
use crate::errors::LzError;
use crate::huffman::Tree;
use crate::window::Window;

const WINDOW: usize = 0x8000;

/// Length-symbol lookup tables for the `0x81` alphabet (symbols
/// `0x101..=0x11D`).
const LENGTH_BASE: [usize; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115,
    131, 163, 195, 227, 258,
];
const LENGTH_EXTRA: [u32; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Distance slots: a 4-bit slot index, then `DIST_EXTRA` more bits on top
/// of the base. The last slot tops out exactly at the window size.
const DIST_BASE: [usize; 16] = [
    1, 2, 3, 5, 9, 17, 33, 65, 129, 257, 513, 1025, 2049, 4097, 8193, 16385,
];
const DIST_EXTRA: [u32; 16] = [0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14];

const END_SYMBOL: u16 = 0x100;

/// Taiko `0x80`: control bytes with a 2-bit kind field.
///
/// Kind 0 is a literal run; a zero count escalates to continuation-coded
/// extra bytes, and the two-byte sequence `00 00` ends the stream early.
/// Kinds 1-3 are back-reference tiers of increasing length and
/// displacement width, each with a `+1` displacement bias.
pub fn taiko_lz80(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_u8()? != 0x80 {
        return Err(LzError::InvalidHeader("taiko-lz80"));
    }
    let size = csr.read_u24_le()? as usize;
    let mut out = Vec::with_capacity(size);
    let mut win = Window::new(WINDOW);
    while out.len() < size {
        let at = csr.position();
        let control = csr.read_u8()?;
        let (length, displacement) = match control >> 6 {
            0 => {
                let mut count = (control & 0x3F) as usize;
                if count == 0 {
                    let unit = csr.read_u8()?;
                    if unit == 0 {
                        break; // early terminator
                    }
                    count = 0x3F + read_vlc_bytes(&mut csr, unit, 0xFF)?;
                }
                check_fit(count, size - out.len())?;
                for _ in 0..count {
                    let byte = csr.read_u8()?;
                    win.put(&mut out, byte);
                }
                continue;
            }
            1 => {
                let length = ((control >> 4) & 0x3) as usize + 2;
                let low = csr.read_u8()? as usize;
                (length, ((control & 0xF) as usize) << 8 | low)
            }
            2 => {
                let length = (control & 0x3F) as usize + 3;
                (length, (csr.read_u16_be()? & 0x7FFF) as usize)
            }
            _ => {
                let high = (control & 0x3F) as usize;
                let length = (high << 8 | csr.read_u8()? as usize) + 0x43;
                (length, (csr.read_u16_be()? & 0x7FFF) as usize)
            }
        };
        check_fit(length, size - out.len())?;
        win.copy_back(&mut out, displacement + 1, length, at)?;
    }
    Ok(out)
}

// A block that runs past the declared length has no agreed-on meaning in
// this dialect, so refuse it instead of guessing.
fn check_fit(length: usize, remaining: usize) -> Result<(), LzError> {
    if length > remaining {
        return Err(LzError::UnsupportedConfiguration {
            kind: "taiko block past declared end",
            value: length as u32,
        });
    }
    Ok(())
}

/// Taiko `0x81`: Huffman-coded symbols over one bitstream, with an
/// optional additive obfuscation pass undone after the main loop.
///
/// The header's lag byte is zero when no pass is applied; otherwise each
/// output byte had the byte `lag` positions before it added in, and the
/// decoder re-adds them in a single forward sweep once decoding ends.
pub fn taiko_lz81(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_u8()? != 0x81 {
        return Err(LzError::InvalidHeader("taiko-lz81"));
    }
    let lag = csr.read_u8()? as usize;
    let size = csr.read_u24_le()? as usize;
    let payload_at = csr.position();

    let mut out = Vec::with_capacity(size);
    let mut win = Window::new(WINDOW);
    let mut bits = msb_bits(&mut csr);
    let tree = Tree::from_bits(&mut bits, 9)?;
    while out.len() < size {
        let symbol = tree.walk(&mut bits)?;
        if symbol < 0x100 {
            win.put(&mut out, symbol as u8);
        } else if symbol == END_SYMBOL {
            break;
        } else {
            let code = (symbol - 0x101) as usize;
            if code >= LENGTH_BASE.len() {
                return Err(LzError::UnsupportedConfiguration {
                    kind: "taiko length symbol",
                    value: symbol as u32,
                });
            }
            let length = LENGTH_BASE[code] + bits.read::<u32>(LENGTH_EXTRA[code])? as usize;
            let slot = bits.read::<u32>(4)? as usize;
            let displacement = DIST_BASE[slot] + bits.read::<u32>(DIST_EXTRA[slot])? as usize;
            let remaining = size - out.len();
            win.copy_back(&mut out, displacement, length.min(remaining), payload_at)?;
        }
    }

    if lag != 0 {
        for i in lag..out.len() {
            out[i] = out[i].wrapping_add(out[i - lag]);
        }
    }
    Ok(out)
}
