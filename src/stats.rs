//! Encoding density report
//!
//! Compares the size of a base91 encoding against padded standard base64
//! for the same input.

use crate::encoder::Encoder;
use base64::Engine;
use std::fmt;

/// Sizes of one input under base91 and base64
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingStats {
    pub input_len: usize,
    pub base91_len: usize,
    pub base64_len: usize,
}

impl EncodingStats {
    /// Encode `input` both ways and record the lengths
    pub fn measure(encoder: &Encoder<'_>, input: impl AsRef<[u8]>) -> Self {
        let input = input.as_ref();
        let mut output = vec![0u8; encoder.encoded_len(input.len())];
        let base91_len = encoder.encode_into(input, &mut output);
        let base64_len = base64::engine::general_purpose::STANDARD.encode(input).len();

        let stats = Self {
            input_len: input.len(),
            base91_len,
            base64_len,
        };
        log::debug!("base91: {}", stats);
        stats
    }

    /// Encoded symbols per input byte
    pub fn base91_ratio(&self) -> f64 {
        ratio(self.base91_len, self.input_len)
    }

    pub fn base64_ratio(&self) -> f64 {
        ratio(self.base64_len, self.input_len)
    }

    /// Symbols saved over base64, negative if base91 is longer
    pub fn savings(&self) -> isize {
        self.base64_len as isize - self.base91_len as isize
    }
}

fn ratio(encoded: usize, input: usize) -> f64 {
    if input == 0 {
        0.0
    } else {
        encoded as f64 / input as f64
    }
}

impl fmt::Display for EncodingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes -> base91 {} ({:.3}x), base64 {} ({:.3}x), saved {}",
            self.input_len,
            self.base91_len,
            self.base91_ratio(),
            self.base64_len,
            self.base64_ratio(),
            self.savings()
        )
    }
}
