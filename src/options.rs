//! Encoder and decoder configuration.
//!
//! Mirrors the teacher's `ZuneJpegOptions`: a small `Copy` struct with a
//! `Default` impl and a fluent `#[must_use]` builder.

/// Options that influence [`crate::encode`].
#[derive(Copy, Clone)]
pub struct EncoderOptions {
    /// Quality factor in `[1,100]`, higher is better quality/larger output.
    quality: u8
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self { quality: 75 }
    }
}

impl EncoderOptions {
    /// Create a new set of options with the default quality of 75.
    #[must_use]
    pub fn new() -> EncoderOptions {
        Self::default()
    }

    /// Get the configured quality factor.
    #[must_use]
    pub const fn get_quality(&self) -> u8 {
        self.quality
    }

    /// Set the quality factor.
    ///
    /// Must be in `[1,100]`; out of range values are rejected at encode
    /// time with `EncodeErrors::InvalidInput`.
    #[must_use]
    pub fn set_quality(mut self, quality: u8) -> EncoderOptions {
        self.quality = quality;
        self
    }
}

/// Options that influence [`crate::decode`].
#[derive(Copy, Clone)]
pub struct DecoderOptions {
    /// Treat recoverable `CorruptBitstream` faults as hard errors instead
    /// of continuing with a best-effort, zero-filled tail.
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self { strict_mode: false }
    }
}

impl DecoderOptions {
    #[must_use]
    pub fn new() -> DecoderOptions {
        Self::default()
    }

    /// Get whether warnings are treated as hard errors.
    #[must_use]
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set whether to treat warnings as errors.
    #[must_use]
    pub fn set_strict_mode(mut self, choice: bool) -> DecoderOptions {
        self.strict_mode = choice;
        self
    }
}
