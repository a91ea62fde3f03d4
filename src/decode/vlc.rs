//! LZSS with every field continuation-coded.
//!
//! Counts, lengths, and displacements are all low-bit-terminated variable
//! width integers; there are no flag bits at all. Each round is a literal
//! run (possibly empty) followed by one match, until the declared length
//! is reached.

use crate::bitio::read_vlc_low_bit;
use crate::cursor::ByteCursor;
use crate::errors::LzError;
use crate::window::Window;

pub fn lzss_vlc(input: &[u8]) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    if csr.read_exact(4)? != b"LZVC" {
        return Err(LzError::InvalidHeader("lzss-vlc"));
    }
    let size = read_vlc_low_bit(&mut csr)?;
    let mut out = Vec::with_capacity(size);
    let mut win = Window::new(0x10000);
    while out.len() < size {
        let literals = read_vlc_low_bit(&mut csr)?.min(size - out.len());
        for _ in 0..literals {
            let byte = csr.read_u8()?;
            win.put(&mut out, byte);
        }
        if out.len() >= size {
            break;
        }
        let at = csr.position();
        let length = read_vlc_low_bit(&mut csr)? + 2;
        let displacement = read_vlc_low_bit(&mut csr)? + 1;
        let remaining = size - out.len();
        win.copy_back(&mut out, displacement, length.min(remaining), at)?;
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn runs_and_matches() {
        let data = [
            b'L', b'Z', b'V', b'C',
            0x13, // size 9
            0x07, // 3 literals
            b'a', b'b', b'c',
            0x09, // length 4+2
            0x05, // displacement 2+1
        ];
        assert_eq!(lzss_vlc(&data).unwrap(), b"abcabcabc");
    }

    #[test]
    fn wide_values_span_two_bytes() {
        // size 0x84 and a literal count of 0x80 both need two VLC bytes
        let mut data = vec![b'L', b'Z', b'V', b'C', 0x02, 0x09, 0x02, 0x01];
        data.extend(0..=0x7Fu8);
        data.push(0x05); // length 2+2
        data.push(0xFF); // displacement 0x7F+1
        let out = lzss_vlc(&data).unwrap();
        assert_eq!(out.len(), 0x84);
        assert_eq!(&out[0x80..], [0, 1, 2, 3]);
    }
}
