//! Encoders for the formats that have one.
//!
//! Each encoder exists to produce streams its paired decoder reproduces
//! byte-exactly; none of them chase compression ratio. They all lean on the
//! same greedy window search and differ only in token packaging.

mod matcher;

use crate::errors::LzError;
use matcher::{longest_match, MatchParams};
use smallvec::SmallVec;

/// Shared container header for the cartridge family: type byte plus a
/// 24-bit length, escalating to the 32-bit form for large inputs.
fn container_header(out: &mut Vec<u8>, ty: u8, len: usize) -> Result<(), LzError> {
    if len > u32::MAX as usize {
        return Err(LzError::UnsupportedConfiguration {
            kind: "stream size",
            value: u32::MAX,
        });
    }
    // a zero 24-bit field is the escape for the 32-bit form, so an empty
    // input has to take the long encoding too
    if len != 0 && len < 0x100_0000 {
        out.push(ty);
        out.extend_from_slice(&(len as u32).to_le_bytes()[..3]);
    } else {
        out.extend_from_slice(&[ty, 0, 0, 0]);
        out.extend_from_slice(&(len as u32).to_le_bytes());
    }
    Ok(())
}

/// Compress into the LZ10 container.
pub fn lz10(data: &[u8]) -> Result<Vec<u8>, LzError> {
    const P: MatchParams = MatchParams {
        window: 0x1000,
        min: 3,
        max: 18,
    };
    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    container_header(&mut out, 0x10, data.len())?;
    let mut pos = 0;
    while pos < data.len() {
        let mut flags = 0u8;
        let mut group: SmallVec<[u8; 16]> = SmallVec::new();
        for bit in (0..8).rev() {
            if pos >= data.len() {
                break;
            }
            match longest_match(data, pos, &P) {
                Some(m) => {
                    flags |= 1 << bit;
                    let token = ((m.length - 3) << 12 | (m.displacement - 1)) as u16;
                    group.extend_from_slice(&token.to_be_bytes());
                    pos += m.length;
                }
                None => {
                    group.push(data[pos]);
                    pos += 1;
                }
            }
        }
        out.push(flags);
        out.extend_from_slice(&group);
    }
    Ok(out)
}

/// Compress into the LZ11 container, using the escalating length forms for
/// matches past 16 bytes.
pub fn lz11(data: &[u8]) -> Result<Vec<u8>, LzError> {
    const P: MatchParams = MatchParams {
        window: 0x1000,
        min: 3,
        max: 0x10110,
    };
    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    container_header(&mut out, 0x11, data.len())?;
    let mut pos = 0;
    while pos < data.len() {
        let mut flags = 0u8;
        let mut group: SmallVec<[u8; 32]> = SmallVec::new();
        for bit in (0..8).rev() {
            if pos >= data.len() {
                break;
            }
            match longest_match(data, pos, &P) {
                Some(m) => {
                    flags |= 1 << bit;
                    let disp = m.displacement - 1;
                    match m.length {
                        3..=0x10 => {
                            group.push(((m.length - 1) << 4 | disp >> 8) as u8);
                        }
                        0x11..=0x110 => {
                            let n = m.length - 0x11;
                            group.push((n >> 4) as u8);
                            group.push(((n & 0xF) << 4 | disp >> 8) as u8);
                        }
                        _ => {
                            let n = m.length - 0x111;
                            group.push((0x10 | n >> 12) as u8);
                            group.push(((n >> 4) & 0xFF) as u8);
                            group.push(((n & 0xF) << 4 | disp >> 8) as u8);
                        }
                    }
                    group.push((disp & 0xFF) as u8);
                    pos += m.length;
                }
                None => {
                    group.push(data[pos]);
                    pos += 1;
                }
            }
        }
        out.push(flags);
        out.extend_from_slice(&group);
    }
    Ok(out)
}

/// Compress into the RLE container: runs of three or more collapse, and
/// everything between them rides in stored spans.
pub fn rle(data: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut out = Vec::with_capacity(data.len() / 2 + 8);
    container_header(&mut out, 0x30, data.len())?;
    let run_at = |pos: usize| {
        data[pos..]
            .iter()
            .take_while(|&&b| b == data[pos])
            .count()
    };
    let mut pos = 0;
    while pos < data.len() {
        let run = run_at(pos).min(0x82);
        if run >= 3 {
            out.push(0x80 | (run - 3) as u8);
            out.push(data[pos]);
            pos += run;
        } else {
            let start = pos;
            while pos < data.len() && pos - start < 0x80 {
                let run = run_at(pos);
                if run >= 3 {
                    break;
                }
                pos += run.min(0x80 - (pos - start));
            }
            out.push((pos - start - 1) as u8);
            out.extend_from_slice(&data[start..pos]);
        }
    }
    Ok(out)
}

/// Compress into the Yaz0 container.
pub fn yaz0(data: &[u8]) -> Result<Vec<u8>, LzError> {
    const P: MatchParams = MatchParams {
        window: 0x1000,
        min: 3,
        max: 0x111,
    };
    if data.len() > u32::MAX as usize {
        return Err(LzError::UnsupportedConfiguration {
            kind: "stream size",
            value: u32::MAX,
        });
    }
    let mut out = Vec::with_capacity(data.len() / 2 + 24);
    out.extend_from_slice(b"Yaz0");
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&[0; 8]);
    let mut pos = 0;
    while pos < data.len() {
        let mut flags = 0u8;
        let mut group: SmallVec<[u8; 24]> = SmallVec::new();
        for bit in (0..8).rev() {
            if pos >= data.len() {
                break;
            }
            match longest_match(data, pos, &P) {
                Some(m) => {
                    let disp = m.displacement - 1;
                    if m.length >= 0x12 {
                        group.push((disp >> 8) as u8);
                        group.push((disp & 0xFF) as u8);
                        group.push((m.length - 0x12) as u8);
                    } else {
                        group.push(((m.length - 2) << 4 | disp >> 8) as u8);
                        group.push((disp & 0xFF) as u8);
                    }
                    pos += m.length;
                }
                None => {
                    flags |= 1 << bit;
                    group.push(data[pos]);
                    pos += 1;
                }
            }
        }
        out.push(flags);
        out.extend_from_slice(&group);
    }
    Ok(out)
}

/// Compress into the fully continuation-coded LZSS layout.
pub fn lzss_vlc(data: &[u8]) -> Result<Vec<u8>, LzError> {
    const P: MatchParams = MatchParams {
        window: 0x10000,
        min: 3,
        max: usize::MAX,
    };
    let mut out = Vec::with_capacity(data.len() / 2 + 8);
    out.extend_from_slice(b"LZVC");
    push_vlc(&mut out, data.len());
    let mut pos = 0;
    let mut run_start = 0;
    while pos < data.len() {
        match longest_match(data, pos, &P) {
            Some(m) => {
                push_vlc(&mut out, pos - run_start);
                out.extend_from_slice(&data[run_start..pos]);
                push_vlc(&mut out, m.length - 2);
                push_vlc(&mut out, m.displacement - 1);
                pos += m.length;
                run_start = pos;
            }
            None => pos += 1,
        }
    }
    if run_start < data.len() {
        push_vlc(&mut out, data.len() - run_start);
        out.extend_from_slice(&data[run_start..]);
    }
    Ok(out)
}

// Low-bit-terminated form: seven value bits per byte, most significant
// group first, low bit set on the final byte.
fn push_vlc(out: &mut Vec<u8>, value: usize) {
    let mut groups: SmallVec<[u8; 10]> = SmallVec::new();
    let mut v = value;
    loop {
        groups.push((v & 0x7F) as u8);
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    for (i, group) in groups.iter().enumerate().rev() {
        out.push(*group << 1 | (i == 0) as u8);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vlc_bytes_match_the_reader() {
        let mut out = Vec::new();
        push_vlc(&mut out, 0x84);
        assert_eq!(out, [0x02, 0x09]);
        out.clear();
        push_vlc(&mut out, 0);
        assert_eq!(out, [0x01]);
    }

    #[test]
    fn rle_boundary_run_lengths() {
        // a run of exactly 0x82 fills one control byte
        let data = vec![0x7Cu8; 0x82];
        let out = rle(&data).unwrap();
        assert_eq!(&out[4..], &[0xFF, 0x7C]);
    }
}
