use std::io;
use thiserror::Error;

/// Everything that can go wrong while turning a compressed stream back into
/// its original bytes.
///
/// A failed decode never yields partial output; callers get exactly one of
/// these and nothing else.
#[derive(Debug, Error)]
pub enum LzError {
    /// The input's signature bytes or a header field did not match the
    /// format the decoder was asked to handle.
    #[error("invalid header for {0}")]
    InvalidHeader(&'static str),

    /// A header or stream parameter is outside the set this implementation
    /// knows how to decode.
    #[error("{kind} value {value:#x} is not supported")]
    UnsupportedConfiguration { kind: &'static str, value: u32 },

    /// The input ran out of bytes before the decode loop finished.
    #[error("compressed stream ended before decoding finished")]
    TruncatedStream,

    /// A back-reference pointed before the start of the produced output.
    #[error(
        "back-reference displacement {displacement:#x} exceeds the \
         {produced:#x} bytes produced so far (input offset {offset:#x})"
    )]
    DisplacementOutOfRange {
        displacement: usize,
        produced: usize,
        offset: usize,
    },
}

// Bit readers stack on top of in-memory cursors, so the only I/O failure
// that can actually surface is running off the end of the input.
impl From<io::Error> for LzError {
    fn from(_: io::Error) -> Self {
        LzError::TruncatedStream
    }
}
