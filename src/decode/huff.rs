//! Table-driven Huffman containers (types `0x24` and `0x28`).
//!
//! The whole trie travels in the header as a packed byte array; only symbol
//! bits are spent in the stream, pulled MSB-first out of little-endian
//! 32-bit words.

use crate::bitio::LeWordBits;
use crate::cursor::ByteCursor;
use crate::errors::LzError;
use crate::huffman::ArrayTree;

/// 4-bit symbols, two tree walks per output byte, low nibble first.
pub fn huffman4(input: &[u8]) -> Result<Vec<u8>, LzError> {
    huffman(input, 4)
}

/// 8-bit symbols, one tree walk per output byte.
pub fn huffman8(input: &[u8]) -> Result<Vec<u8>, LzError> {
    huffman(input, 8)
}

fn huffman(input: &[u8], depth: u32) -> Result<Vec<u8>, LzError> {
    let mut csr = ByteCursor::new(input);
    let word = csr.read_u32_le()?;
    if word & 0xF0 != 0x20 {
        return Err(LzError::InvalidHeader("huffman"));
    }
    let found = word & 0xF;
    if found != depth {
        return Err(LzError::UnsupportedConfiguration {
            kind: "huffman bit depth",
            value: found,
        });
    }
    let size = match (word >> 8) as usize {
        0 => csr.read_u32_le()? as usize,
        size => size,
    };

    // the tree block is its size byte plus that many node pairs; the walk
    // happens in place over the input slice
    let tree_at = csr.position();
    let pairs = csr.read_u8()? as usize + 1;
    csr.read_exact(pairs * 2 - 1)?;
    let tree = ArrayTree::new(&input[tree_at..tree_at + pairs * 2])?;

    let mut out = Vec::with_capacity(size);
    let mut bits = LeWordBits::new(&mut csr);
    if depth == 8 {
        while out.len() < size {
            out.push(tree.walk(&mut bits)?);
        }
    } else {
        while out.len() < size {
            let lo = tree.walk(&mut bits)?;
            let hi = tree.walk(&mut bits)?;
            out.push((hi & 0xF) << 4 | lo & 0xF);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_the_sibling_bit_depth() {
        let data = [0x28, 0x01, 0x00, 0x00, 0x00, 0xC0, b'a', b'a'];
        match huffman4(&data) {
            Err(LzError::UnsupportedConfiguration { value: 8, .. }) => {}
            other => panic!("expected a bit-depth error, got {:?}", other),
        }
    }

    #[test]
    fn eight_bit_symbols() {
        // one node pair: root 0xC0 (both children leaves), leaves 'n'/'o';
        // symbol bits 0,1,1,0 in one LE word
        let data = [
            0x28, 0x04, 0x00, 0x00, // type 0x28, size 4
            0x01, 0xC0, b'n', b'o',
            0x00, 0x00, 0x00, 0x60, // word 0x60000000
        ];
        assert_eq!(huffman8(&data).unwrap(), b"noon");
    }

    #[test]
    fn four_bit_symbols_fill_low_nibble_first() {
        // leaves 0x1 and 0xF; bits 0,1 decode to 0x1 then 0xF -> byte 0xF1
        let data = [
            0x24, 0x01, 0x00, 0x00,
            0x01, 0xC0, 0x01, 0x0F,
            0x00, 0x00, 0x00, 0x40,
        ];
        assert_eq!(huffman4(&data).unwrap(), [0xF1]);
    }
}
