//! The per-dialect decoders.
//!
//! Each function is a pure transformation from one complete compressed
//! input to one complete decoded output. All of them validate their header
//! before the first loop iteration and never return a partial buffer.

mod backward;
mod huff;
mod nintendo;
mod okumura;
mod taiko;
mod vlc;
mod wp16;
mod yay;

pub use backward::backward_lz77;
pub use huff::{huffman4, huffman8};
pub use nintendo::{lz10, lz11, lz40, lz60, lz77, rle};
pub use okumura::{lz_ecd, lzss};
pub use taiko::{taiko_lz80, taiko_lz81};
pub use vlc::lzss_vlc;
pub use wp16::wp16;
pub use yay::{mio0, yay0, yaz0};
