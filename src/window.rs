//! The sliding window every LZ-family decoder copies its matches out of.

use crate::errors::LzError;

/// Fixed-capacity ring over the most recently produced output bytes.
///
/// The ring and the output accumulator always move together: [`put`] writes
/// one byte to both, and the copy routines re-emit window bytes through
/// [`put`] one at a time, so a match whose source overlaps its own
/// destination unrolls into the repeating pattern the encoder meant.
///
/// [`put`]: Window::put
#[derive(Debug)]
pub(crate) struct Window {
    buf: Vec<u8>,
    pos: usize,
    produced: usize,
    seeded: bool,
}

impl Window {
    /// Empty window; a displacement is only valid once that many bytes have
    /// actually been produced.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            pos: 0,
            produced: 0,
            seeded: false,
        }
    }

    /// Zero-filled window with the write cursor parked at `start`.
    ///
    /// The Okumura-style dialects begin with the whole ring "already
    /// written", so matches may legally reach into the seeded zeros before
    /// any real output exists.
    pub fn preseeded(capacity: usize, start: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            pos: start % capacity,
            produced: 0,
            seeded: true,
        }
    }

    /// Append one byte to the ring and the output together.
    pub fn put(&mut self, out: &mut Vec<u8>, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos = (self.pos + 1) % self.buf.len();
        self.produced += 1;
        out.push(byte);
    }

    /// Copy `length` bytes starting `displacement` behind the write cursor,
    /// byte by byte, into both the ring and `out`. `offset` is the input
    /// position of the token that requested the copy, for diagnostics.
    pub fn copy_back(
        &mut self,
        out: &mut Vec<u8>,
        displacement: usize,
        length: usize,
        offset: usize,
    ) -> Result<(), LzError> {
        let reach = if self.seeded {
            self.buf.len()
        } else {
            self.produced.min(self.buf.len())
        };
        if displacement == 0 || displacement > reach {
            return Err(LzError::DisplacementOutOfRange {
                displacement,
                produced: self.produced,
                offset,
            });
        }
        let cap = self.buf.len();
        for _ in 0..length {
            let byte = self.buf[(self.pos + cap - displacement) % cap];
            self.put(out, byte);
        }
        Ok(())
    }

    /// Copy `length` bytes starting at the absolute ring position `from`.
    ///
    /// Dialects that store window positions instead of displacements resolve
    /// their tokens here; the position-to-displacement conversion is the
    /// modulo walk of the ring itself. Only meaningful on preseeded windows,
    /// where every slot is readable.
    pub fn copy_from(&mut self, out: &mut Vec<u8>, from: usize, length: usize) {
        debug_assert!(self.seeded);
        let cap = self.buf.len();
        let mut src = from % cap;
        for _ in 0..length {
            let byte = self.buf[src];
            src = (src + 1) % cap;
            self.put(out, byte);
        }
    }
}
