//! Bit-granular reading on top of [`ByteCursor`].
//!
//! Two independent axes vary between formats: the order bits are consumed
//! within a byte (MSB-first or LSB-first), and the byte order of any
//! multi-byte group the bits are pulled from. Single-byte streams go through
//! `bitstream_io` with the endianness parameter picking the bit order; the
//! word-based helpers below cover the formats that refill their flag or
//! symbol bits from 32-bit words.

use crate::cursor::ByteCursor;
use crate::errors::LzError;
use bitstream_io::{BigEndian, BitReader};
use std::io::Read;

/// MSB-first bit reader: the first bit out of `0b1011_0000` is `1`.
/// The LSB-first dialects interleave their flag bits with byte-aligned
/// data, so they consume control bytes directly instead of stacking a
/// `LittleEndian` reader over the stream.
pub(crate) type MsbReader<R> = BitReader<R, BigEndian>;

pub(crate) fn msb_bits<R: Read>(rdr: R) -> MsbReader<R> {
    BitReader::endian(rdr, BigEndian)
}

/// Flag bits refilled 32 at a time from whole words, consumed from the most
/// significant end. The word's byte order is the caller's per-read choice,
/// since that is exactly where the dialects disagree.
#[derive(Debug, Default)]
pub(crate) struct FlagWord {
    bits: u32,
    left: u32,
}

impl FlagWord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_be(&mut self, csr: &mut ByteCursor) -> Result<bool, LzError> {
        if self.left == 0 {
            self.bits = csr.read_u32_be()?;
            self.left = 32;
        }
        Ok(self.take())
    }

    pub fn next_le(&mut self, csr: &mut ByteCursor) -> Result<bool, LzError> {
        if self.left == 0 {
            self.bits = csr.read_u32_le()?;
            self.left = 32;
        }
        Ok(self.take())
    }

    fn take(&mut self) -> bool {
        let bit = self.bits & 0x8000_0000 != 0;
        self.bits <<= 1;
        self.left -= 1;
        bit
    }
}

/// Symbol bits drawn MSB-first out of little-endian 32-bit words.
///
/// The table-driven Huffman containers store their bitstream this way: the
/// first bit of the stream is bit 31 of the first LE word.
pub(crate) struct LeWordBits<'c, 'a> {
    csr: &'c mut ByteCursor<'a>,
    bits: u32,
    left: u32,
}

impl<'c, 'a> LeWordBits<'c, 'a> {
    pub fn new(csr: &'c mut ByteCursor<'a>) -> Self {
        Self { csr, bits: 0, left: 0 }
    }

    pub fn read_bit(&mut self) -> Result<bool, LzError> {
        if self.left == 0 {
            self.bits = self.csr.read_u32_le()?;
            self.left = 32;
        }
        let bit = self.bits & 0x8000_0000 != 0;
        self.bits <<= 1;
        self.left -= 1;
        Ok(bit)
    }
}

/// Continuation-byte integer: units equal to `sentinel` each contribute the
/// unit maximum (0xFF) and keep the number open; the first other unit closes
/// it. `first` is the unit the caller has already pulled off the stream.
pub(crate) fn read_vlc_bytes(
    csr: &mut ByteCursor,
    first: u8,
    sentinel: u8,
) -> Result<usize, LzError> {
    let mut total = 0usize;
    let mut unit = first;
    while unit == sentinel {
        total += 0xFF;
        unit = csr.read_u8()?;
    }
    Ok(total + unit as usize)
}

/// Low-bit-terminated integer: seven value bits per byte, most significant
/// group first, and a set low bit marks the final byte.
pub(crate) fn read_vlc_low_bit(csr: &mut ByteCursor) -> Result<usize, LzError> {
    let mut value = 0usize;
    loop {
        let unit = csr.read_u8()?;
        value = (value << 7) | (unit >> 1) as usize;
        if unit & 1 == 1 {
            return Ok(value);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bitstream_io::LittleEndian;

    #[test]
    fn bit_order_of_a_nibble_read() {
        let data = [0b1011_0000u8];
        let mut msb = msb_bits(&data[..]);
        assert_eq!(msb.read::<u8>(4).unwrap(), 0b1011);
        let mut lsb = BitReader::endian(&data[..], LittleEndian);
        assert_eq!(lsb.read::<u8>(4).unwrap(), 0b0000);
    }

    #[test]
    fn msb_reader_spans_byte_boundaries() {
        let data = [0b1100_0011u8, 0b1010_0000];
        let mut bits = msb_bits(&data[..]);
        assert_eq!(bits.read::<u16>(12).unwrap(), 0b1100_0011_1010);
    }

    #[test]
    fn flag_word_byte_orders_disagree() {
        let data = [0x80, 0x00, 0x00, 0x01];
        let mut be = FlagWord::new();
        let mut csr = ByteCursor::new(&data);
        // 0x80000001 big-endian: first bit set
        assert!(be.next_be(&mut csr).unwrap());
        let mut le = FlagWord::new();
        let mut csr = ByteCursor::new(&data);
        // 0x01000080 little-endian: first bit clear
        assert!(!le.next_le(&mut csr).unwrap());
    }

    #[test]
    fn le_word_bits_start_at_bit_31_of_the_first_word() {
        let data = [0x00, 0x00, 0x00, 0x80];
        let mut csr = ByteCursor::new(&data);
        let mut bits = LeWordBits::new(&mut csr);
        assert!(bits.read_bit().unwrap());
        for _ in 0..31 {
            assert!(!bits.read_bit().unwrap());
        }
        assert!(bits.read_bit().is_err());
    }

    #[test]
    fn vlc_byte_chains() {
        // sentinel units each add 0xFF, the closing unit adds itself
        let mut csr = ByteCursor::new(&[0x05]);
        assert_eq!(read_vlc_bytes(&mut csr, 0xFF, 0xFF).unwrap(), 0xFF + 0x05);
        let mut csr = ByteCursor::new(&[]);
        assert_eq!(read_vlc_bytes(&mut csr, 0x13, 0xFF).unwrap(), 0x13);
    }

    #[test]
    fn vlc_low_bit_terminated() {
        // 0x02 0x03: groups 0b0000001 (open) then 0b0000001 (closed)
        let mut csr = ByteCursor::new(&[0x02, 0x03]);
        assert_eq!(read_vlc_low_bit(&mut csr).unwrap(), (1 << 7) | 1);
        let mut csr = ByteCursor::new(&[0x81]);
        assert_eq!(read_vlc_low_bit(&mut csr).unwrap(), 0x40);
        let mut csr = ByteCursor::new(&[0x02]);
        assert!(read_vlc_low_bit(&mut csr).is_err());
    }
}
