//! Decoders for the LZ-style, run-length, and Huffman compression schemes
//! found in game resource archives.
//!
//! Every decoder is a pure transformation: it takes the complete compressed
//! input as a byte slice and returns the complete decoded output, or a
//! structured [`LzError`]. There is no streaming, no retained state between
//! calls, and no partial output on failure — archive tooling that feeds a
//! corrupted entry in gets an error out, never a silently truncated asset.
//!
//! Pick a decoder explicitly through [`Format`], or let the signature
//! sniffer choose:
//!
//! ```
//! let packed = retrolz::encode::lz10(b"tomato tomato tomato")?;
//! assert_eq!(retrolz::decompress(&packed)?, b"tomato tomato tomato");
//! assert_eq!(retrolz::Format::sniff(&packed), Some(retrolz::Format::Lz10));
//! # Ok::<(), retrolz::LzError>(())
//! ```
//!
//! A handful of formats have paired encoders under [`encode`]; the rest are
//! decode-only, matching what the archives in the wild actually contain.

mod bitio;
mod cursor;
mod errors;
mod huffman;
mod window;

pub mod decode;
pub mod encode;
mod format;

pub use errors::LzError;
pub use format::{decompress, Format};
