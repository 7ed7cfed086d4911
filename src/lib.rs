//! This crate provides a small baseline still-image codec built from the
//! same stages as ITU-T.81 (JPEG-1): block DCT, perceptual quantization,
//! and canonical Huffman entropy coding, wrapped in a self-describing
//! container instead of the JFIF marker stream.
//!
//! # Features
//!  - 4:2:0 chroma subsampling with rounded-mean downsampling and
//!    nearest-neighbor upsampling
//!  - Quality-scaled quantization matrices (`1..=100`)
//!  - Canonical Huffman coding with the standard default tables
//!  - Fault-tolerant decoding: a corrupt component continues with a
//!    best-effort, zero-filled tail instead of failing the whole image
//!
//! # Usage
//! Add myjpeg to the dependencies in the project Cargo.toml
//!
//! ```toml
//! [dependencies]
//! myjpeg = "0.1.0"
//! ```
//!
//! # Examples
//!
//! ## Encode an RGB image and decode it back
//! ```no_run
//! use myjpeg::{decode, encode, EncoderOptions};
//!
//! let width = 64;
//! let height = 64;
//! let rgb = vec![128u8; width * height * 3];
//!
//! let bytes = encode(&rgb, height, width, EncoderOptions::new().set_quality(85)).unwrap();
//! let image = decode(&bytes, Default::default()).unwrap();
//! assert_eq!((image.height, image.width), (height, width));
//! ```
//!
//! # Crate features.
//! This crate tries to be as minimal as possible while staying a
//! complete implementation of the pipeline: no progressive mode, no
//! restart markers, no SIMD. Fault tolerance is dynamic: by default a
//! corrupt bitstream degrades the affected component instead of failing
//! the whole decode; set [`DecoderOptions::set_strict_mode`] to make
//! such faults hard errors instead.
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc
)]

#[macro_use]
extern crate log;

pub use crate::errors::{DecodeErrors, EncodeErrors};
pub use crate::options::{DecoderOptions, EncoderOptions};

mod bitstream;
mod block;
mod codec;
mod color_convert;
mod component;
mod container;
mod dct;
pub mod errors;
mod huffman;
mod huffman_tables;
mod options;
mod quantization;
mod rle;
mod vli;
mod zigzag;

/// A decoded image: packed row-major `height * width * 3` RGB bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub data:   Vec<u8>,
    pub height: usize,
    pub width:  usize
}

/// Encode a packed row-major RGB buffer into a container byte stream.
///
/// # Errors
/// See [`EncodeErrors`]: returned if `rgb.len() != height * width * 3`,
/// `quality` is outside `[1,100]`, or either dimension is zero.
pub fn encode(rgb: &[u8], height: usize, width: usize, options: EncoderOptions) -> Result<Vec<u8>, EncodeErrors> {
    codec::encode(rgb, height, width, options)
}

/// Decode a container byte stream produced by [`encode`] back into an
/// [`RgbImage`].
///
/// # Errors
/// See [`DecodeErrors`]. `CorruptBitstream` only escapes when `options`
/// has strict mode set; otherwise the decoder returns a best-effort
/// image with any corrupted tail zero-filled.
pub fn decode(bytes: &[u8], options: DecoderOptions) -> Result<RgbImage, DecodeErrors> {
    let (data, height, width) = codec::decode(bytes, options)?;
    Ok(RgbImage { data, height, width })
}

/// A stateful encoder carrying its own [`EncoderOptions`], mirroring the
/// builder-style entry point offered alongside the free [`encode`]
/// function.
#[derive(Copy, Clone, Default)]
pub struct JpegEncoder {
    options: EncoderOptions
}

impl JpegEncoder {
    #[must_use]
    pub fn new() -> JpegEncoder {
        JpegEncoder { options: EncoderOptions::new() }
    }

    #[must_use]
    pub fn new_with_options(options: EncoderOptions) -> JpegEncoder {
        JpegEncoder { options }
    }

    /// # Errors
    /// See [`encode`].
    pub fn encode(&self, rgb: &[u8], height: usize, width: usize) -> Result<Vec<u8>, EncodeErrors> {
        encode(rgb, height, width, self.options)
    }
}

/// A stateful decoder carrying its own [`DecoderOptions`].
#[derive(Copy, Clone, Default)]
pub struct JpegDecoder {
    options: DecoderOptions
}

impl JpegDecoder {
    #[must_use]
    pub fn new() -> JpegDecoder {
        JpegDecoder { options: DecoderOptions::new() }
    }

    #[must_use]
    pub fn new_with_options(options: DecoderOptions) -> JpegDecoder {
        JpegDecoder { options }
    }

    /// # Errors
    /// See [`decode`].
    pub fn decode(&self, bytes: &[u8]) -> Result<RgbImage, DecodeErrors> {
        decode(bytes, self.options)
    }
}
