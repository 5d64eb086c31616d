//! base91 encoder

use crate::alphabet::{Alphabet, STANDARD};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Values whose low 13 bits exceed this are packed as 13 bits, others as 14
pub(crate) const WIDE_LIMIT: u32 = 88;

pub(crate) const MASK_13: u32 = (1 << 13) - 1;
const MASK_14: u32 = (1 << 14) - 1;

/// Upper bound on the encoded length of `n` input bytes.
///
/// The worst case packs 13 bits into two symbols, so this is `ceil(n * 16 / 13)`.
/// The actual length returned by [`Encoder::encode_into`] may be shorter.
pub const fn encoded_len(n: usize) -> usize {
    (n * 16).div_ceil(13)
}

/// Encodes bytes into base91 text
#[derive(Clone, Copy, Debug)]
pub struct Encoder<'a> {
    alphabet: &'a Alphabet,
    /// Line width for writer output, 0 disables wrapping
    line_width: usize,
}

impl<'a> Encoder<'a> {
    /// Create a new encoder for `alphabet`
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet, line_width: 0 }
    }

    /// Wrap writer output after `width` symbols (0 disables wrapping)
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub const fn encoded_len(&self, n: usize) -> usize {
        encoded_len(n)
    }

    /// Encode `input` into `output`, returning the number of symbols written.
    ///
    /// # Panics
    /// Panics if `output` is shorter than the encoded form. Sizing it with
    /// [`encoded_len`] is always enough.
    pub fn encode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> usize {
        let input = input.as_ref();
        let output = output.as_mut();

        let mut queue: u32 = 0;
        let mut bits: u32 = 0;
        let mut index = 0;

        for &byte in input {
            queue |= (byte as u32) << bits;
            bits += 8;

            while bits > 13 {
                let mut value = queue & MASK_13;
                if value > WIDE_LIMIT {
                    queue >>= 13;
                    bits -= 13;
                } else {
                    // Small values leave room to take a 14th bit
                    value = queue & MASK_14;
                    queue >>= 14;
                    bits -= 14;
                }
                output[index] = self.alphabet.symbol((value % 91) as usize);
                output[index + 1] = self.alphabet.symbol((value / 91) as usize);
                index += 2;
            }
        }

        // Flush
        if bits > 0 {
            output[index] = self.alphabet.symbol((queue % 91) as usize);
            index += 1;
            if bits > 7 || queue > 90 {
                output[index] = self.alphabet.symbol((queue / 91) as usize);
                index += 1;
            }
        }

        log::trace!("base91: encoded {} bytes into {} symbols", input.len(), index);
        index
    }

    /// Encode `input` to a string
    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        let input = input.as_ref();
        let mut output = vec![0u8; encoded_len(input.len())];
        let len = self.encode_into(input, &mut output);
        output.truncate(len);
        // Alphabet symbols are always ASCII
        output.into_iter().map(char::from).collect()
    }

    /// Encode `input` directly to a writer, wrapping lines if a line width is set
    pub fn encode_to_writer<W: Write>(&self, input: impl AsRef<[u8]>, mut writer: W) -> Result<()> {
        let encoded = self.encode(input);

        if self.line_width == 0 {
            writer.write_all(encoded.as_bytes())?;
        } else {
            for line in encoded.as_bytes().chunks(self.line_width) {
                writer.write_all(line)?;
                writer.write_all(b"\n")?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Encode `input` to a file
    pub fn encode_to_file(&self, input: impl AsRef<[u8]>, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.encode_to_writer(input, std::io::BufWriter::new(file))
    }
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new(&STANDARD)
    }
}

/// Encode `input` with the standard alphabet
pub fn encode(input: impl AsRef<[u8]>) -> String {
    Encoder::default().encode(input)
}

/// Encode `input` into `output` with the standard alphabet
pub fn encode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> usize {
    Encoder::default().encode_into(input, output)
}
