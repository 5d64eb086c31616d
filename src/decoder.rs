//! base91 decoder

use crate::alphabet::{Alphabet, STANDARD};
use crate::encoder::{MASK_13, WIDE_LIMIT};
use anyhow::{anyhow, Result};
use std::fmt;
use std::io::Read;
use std::path::Path;

// Line break bytes, never part of an alphabet
const LINE_FEED: u8 = b'\n';
const CARRIAGE_RETURN: u8 = b'\r';

/// Upper bound on the decoded length of `n` symbols.
///
/// Decoded output is never longer than its encoded form. A tighter
/// `ceil(n * 13 / 16)` bound undercounts on real data, so this stays at `n`.
pub const fn decoded_len(n: usize) -> usize {
    n
}

/// A byte outside of the alphabet was found while decoding.
///
/// Decoding stops at the first such byte. Everything decoded before it has
/// already been written to the output.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CorruptInputError {
    /// Index of the offending byte in the input
    pub position: usize,
    /// The offending byte
    pub byte: u8,
    /// Bytes written to the output before decoding stopped
    pub written: usize,
}

impl fmt::Display for CorruptInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.byte.is_ascii_graphic() {
            write!(f, "Invalid base91 symbol '{}' at index {}", self.byte as char, self.position)
        } else {
            write!(f, "Invalid base91 symbol {:#04x} at index {}", self.byte, self.position)
        }
    }
}

impl std::error::Error for CorruptInputError {}

/// Result of a decode that keeps partial output
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decoded {
    /// Bytes decoded before the end of input or the first invalid symbol
    pub data: Vec<u8>,
    /// Set when decoding stopped early
    pub error: Option<CorruptInputError>,
}

impl Decoded {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Drop the partial output if decoding stopped early
    pub fn into_result(self) -> Result<Vec<u8>, CorruptInputError> {
        match self.error {
            None => Ok(self.data),
            Some(err) => Err(err),
        }
    }
}

/// Decodes base91 text into bytes
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'a> {
    alphabet: &'a Alphabet,
    /// Skip CR and LF instead of treating them as corrupt input
    skip_line_breaks: bool,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder for `alphabet`
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            skip_line_breaks: false,
        }
    }

    /// Skip line breaks in the input, e.g. for wrapped text.
    ///
    /// Reported positions still index into the original input.
    pub fn with_skip_line_breaks(mut self, skip: bool) -> Self {
        self.skip_line_breaks = skip;
        self
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    pub const fn decoded_len(&self, n: usize) -> usize {
        decoded_len(n)
    }

    /// Decode `input` into `output`, returning the number of bytes written.
    ///
    /// Stops at the first byte that is not in the alphabet; the returned
    /// error records where, and how many bytes were written before it.
    ///
    /// # Panics
    /// Panics if `output` is shorter than the decoded form. Sizing it with
    /// [`decoded_len`] is always enough.
    pub fn decode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, CorruptInputError> {
        let input = input.as_ref();
        let output = output.as_mut();

        let mut queue: u32 = 0;
        let mut bits: u32 = 0;
        // Low digit of a pair waiting for its high digit
        let mut pending: Option<u32> = None;
        let mut index = 0;

        for (position, &byte) in input.iter().enumerate() {
            let digit = match self.alphabet.value_of(byte) {
                Some(digit) => digit as u32,
                None if self.skip_line_breaks && (byte == LINE_FEED || byte == CARRIAGE_RETURN) => continue,
                None => {
                    log::debug!("base91: invalid symbol {:#04x} at index {}, {} bytes decoded", byte, position, index);
                    return Err(CorruptInputError {
                        position,
                        byte,
                        written: index,
                    });
                }
            };

            let low = match pending.take() {
                None => {
                    pending = Some(digit);
                    continue;
                }
                Some(low) => low,
            };

            let value = low + digit * 91;
            queue |= value << bits;
            bits += if (value & MASK_13) > WIDE_LIMIT { 13 } else { 14 };

            while bits > 7 {
                output[index] = queue as u8;
                index += 1;
                queue >>= 8;
                bits -= 8;
            }
        }

        // A lone trailing symbol carries the last partial byte
        if let Some(low) = pending {
            output[index] = (queue | low << bits) as u8;
            index += 1;
        }

        log::trace!("base91: decoded {} symbols into {} bytes", input.len(), index);
        Ok(index)
    }

    /// Decode `input`, keeping whatever was decoded before an invalid symbol
    pub fn decode_partial(&self, input: impl AsRef<[u8]>) -> Decoded {
        let input = input.as_ref();
        let mut data = vec![0u8; decoded_len(input.len())];

        match self.decode_into(input, &mut data) {
            Ok(len) => {
                data.truncate(len);
                Decoded { data, error: None }
            }
            Err(err) => {
                data.truncate(err.written);
                Decoded { data, error: Some(err) }
            }
        }
    }

    /// Decode `input`, failing on the first invalid symbol
    pub fn decode(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, CorruptInputError> {
        self.decode_partial(input).into_result()
    }

    /// Read everything from `reader` and decode it
    pub fn decode_from_reader<R: Read>(&self, mut reader: R) -> Result<Vec<u8>> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        Ok(self.decode(&input)?)
    }

    /// Decode the contents of a file
    pub fn decode_file(&self, path: &Path) -> Result<Vec<u8>> {
        let input = std::fs::read(path)?;
        self.decode(&input)
            .map_err(|err| anyhow!(err).context(format!("Failed to decode base91 file '{}'", path.display())))
    }
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new(&STANDARD)
    }
}

/// Decode `input` with the standard alphabet
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, CorruptInputError> {
    Decoder::default().decode(input)
}

/// Decode `input` into `output` with the standard alphabet
pub fn decode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, CorruptInputError> {
    Decoder::default().decode_into(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::STANDARD_SYMBOLS;
    use crate::encoder::{encode, Encoder};

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode(""), Ok(vec![]));
        assert_eq!(decode("AA"), Ok(vec![0x00]));
        assert_eq!(decode("AAA"), Ok(vec![0x00, 0x00]));
        assert_eq!(decode("/C"), Ok(vec![0xff]));
        assert_eq!(decode("GB"), Ok(b"a".to_vec()));
        assert_eq!(decode("fPNK"), Ok(b"tes".to_vec()));
        assert_eq!(decode("fPNKd"), Ok(b"test".to_vec()));
        assert_eq!(decode("dr/2s)uC"), Ok(b"foobar".to_vec()));
        assert_eq!(decode(">OwJh>}AQ;r@@Y?F"), Ok(b"Hello, World!".to_vec()));
        assert_eq!(decode("B\"B\"#"), Ok(vec![0xff, 0xff, 0xff, 0xff]));
        assert_eq!(decode("Q<c[2!,C"), Ok(vec![0x14, 0xfb, 0x9c, 0x03, 0xd9, 0x7e]));
    }

    #[test]
    fn test_decode_lone_trailing_symbol() {
        assert_eq!(decode("A"), Ok(vec![0x00]));
    }

    #[test]
    fn test_decode_space_is_corrupt() {
        let decoded = Decoder::default().decode_partial("fPNK ALL");
        assert_eq!(decoded.data, b"tes");
        assert_eq!(
            decoded.error,
            Some(CorruptInputError {
                position: 4,
                byte: b' ',
                written: 3
            })
        );
        assert!(!decoded.is_complete());
    }

    #[test]
    fn test_decode_corrupt_with_pending_digit() {
        // 'd' is waiting for its pair when the space arrives
        let decoded = Decoder::default().decode_partial("fPNKd L");
        assert_eq!(decoded.data, b"tes");
        assert_eq!(decoded.error.map(|err| err.position), Some(5));
    }

    #[test]
    fn test_decode_corrupt_first_symbol() {
        let err = decode(" AA").unwrap_err();
        assert_eq!(err, CorruptInputError { position: 0, byte: b' ', written: 0 });
    }

    #[test]
    fn test_decode_non_ascii_is_corrupt() {
        let err = decode("\u{e9}AA").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.byte, 0xc3);
    }

    #[test]
    fn test_decode_into_reports_written() {
        let mut output = [0u8; 8];
        assert_eq!(decode_into("fPNKd", &mut output), Ok(4));
        assert_eq!(&output[..4], b"test");

        let mut output = [0u8; 8];
        let err = decode_into("fPNK-", &mut output).unwrap_err();
        assert_eq!(err.written, 3);
        assert_eq!(&output[..3], b"tes");
    }

    #[test]
    #[should_panic]
    fn test_decode_into_short_buffer_panics() {
        let mut output = [0u8; 2];
        let _ = decode_into("fPNKd", &mut output);
    }

    #[test]
    fn test_decode_line_breaks() {
        let err = decode("AA\nAA").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.byte, b'\n');

        let decoder = Decoder::default().with_skip_line_breaks(true);
        assert_eq!(decoder.decode("fPN\r\nKd\n"), Ok(b"test".to_vec()));

        // Positions are still relative to the raw input
        let err = decoder.decode("fP\nNK ").unwrap_err();
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_decode_custom_alphabet() {
        let definition: Vec<u8> = STANDARD_SYMBOLS.iter().rev().copied().collect();
        let alphabet = Alphabet::new(&definition).unwrap();

        let encoded = Encoder::new(&alphabet).encode(b"foobar");
        assert_eq!(Decoder::new(&alphabet).decode(&encoded), Ok(b"foobar".to_vec()));
        // Standard decoder reads different bytes out of the same text
        assert_ne!(decode(&encoded), Ok(b"foobar".to_vec()));
    }

    #[test]
    fn test_decode_round_trip_all_byte_values() {
        let input: Vec<u8> = (0..=255).collect();
        let encoded = encode(&input);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, input);
        assert!(decoded.len() <= decoded_len(encoded.len()));
    }

    #[test]
    fn test_decode_from_reader() {
        let decoder = Decoder::default().with_skip_line_breaks(true);
        let data = decoder.decode_from_reader(&b"dr/2\ns)uC\n"[..]).unwrap();
        assert_eq!(data, b"foobar");

        let err = decoder.decode_from_reader(&b"dr/2 s)uC"[..]).unwrap_err();
        let corrupt = err.downcast_ref::<CorruptInputError>().unwrap();
        assert_eq!(corrupt.position, 4);
    }

    #[test]
    fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.b91");

        std::fs::write(&path, "fPNKd").unwrap();
        assert_eq!(Decoder::default().decode_file(&path).unwrap(), b"test");

        std::fs::write(&path, "fPNK d").unwrap();
        let err = Decoder::default().decode_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to decode base91 file"));
        assert!(err.downcast_ref::<CorruptInputError>().is_some());
    }
}
