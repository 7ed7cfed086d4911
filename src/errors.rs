//! Error types for encoding and decoding.
//!
//! Both enums carry a message string per variant and implement `Debug`,
//! `Display` and `std::error::Error` by hand, matching the rest of the zune
//! family (see `zune-hdr`'s `HdrDecodeErrors`) rather than pulling in a
//! derive-macro error crate.
use std::fmt::{Debug, Display, Formatter};

/// Errors that can occur while encoding an image.
///
/// Encoder errors are always fatal to the call: nothing is written before
/// the error is returned.
pub enum EncodeErrors {
    /// Wrong dimensionality, non-RGB data, or a bad `quality`/geometry
    /// argument.
    InvalidInput(String),
    /// A VLI category fell outside `[0,15]` or a magnitude was too large
    /// to represent.
    NumericRange(String),
    /// A Huffman table could not encode a required symbol.
    InvalidTable(String)
}

impl Debug for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeErrors::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            EncodeErrors::NumericRange(msg) => write!(f, "Numeric range error: {msg}"),
            EncodeErrors::InvalidTable(msg) => write!(f, "Invalid Huffman table: {msg}")
        }
    }
}

impl Display for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for EncodeErrors {}

/// Errors that can occur while decoding a container produced by [`crate::encode`].
///
/// `CorruptBitstream` is recoverable: the orchestrator stops the current
/// component at the block boundary where it occurred and keeps whatever was
/// already decoded, zero-filling the rest, so a best-effort image is still
/// produced. Every other variant is fatal.
pub enum DecodeErrors {
    /// Magic mismatch, truncated header, malformed JSON, or a missing key.
    InvalidContainer(String),
    /// Huffman table counts summed to more than 256, or the counts don't
    /// form a complete prefix code.
    InvalidTable(String),
    /// Huffman decode found no symbol (end of input or a marker byte), an
    /// AC position overflowed past 63, or an invalid `(run, category)`
    /// symbol was read.
    CorruptBitstream(String),
    /// A VLI category fell outside `[0,15]` or a decoded magnitude was
    /// out of range.
    NumericRange(String)
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeErrors::InvalidContainer(msg) => write!(f, "Invalid container: {msg}"),
            DecodeErrors::InvalidTable(msg) => write!(f, "Invalid Huffman table: {msg}"),
            DecodeErrors::CorruptBitstream(msg) => write!(f, "Corrupt bitstream: {msg}"),
            DecodeErrors::NumericRange(msg) => write!(f, "Numeric range error: {msg}")
        }
    }
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for DecodeErrors {}
