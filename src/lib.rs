//! # emx-base91
//!
//! basE91 binary-to-text encoding with the standard or a custom alphabet.
//!
//! base91 turns arbitrary bytes into printable ASCII. It packs 13 or 14 input
//! bits into each pair of symbols, so encoded data is typically around 1.23x
//! the input size, against 1.33x for base64.
//!
//! ## Standard Alphabet
//!
//! The 95 printable ASCII characters minus space, `'`, `-` and `\`:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~"
//! ```
//!
//! Custom alphabets must have 91 distinct ASCII symbols and may not contain
//! CR or LF.
//!
//! ## Encoding
//!
//! Input bits are queued little-endian. Once more than 13 bits are queued,
//! the low 13 bits form a value `v`. If `v > 88` those 13 bits are taken,
//! otherwise 14 bits are taken. The value is written as two symbols, low digit
//! first (`v % 91`, then `v / 91`). Leftover bits are flushed as one symbol,
//! or two if they do not fit in a single digit.
//!
//! ## Decoding
//!
//! Symbols are read in pairs and the same 13/14-bit rule recovers how many
//! bits each pair carried. A trailing unpaired symbol yields the final byte.
//! The first byte outside the alphabet stops decoding with a
//! [`CorruptInputError`]; bytes decoded before it are still available.
//!
//! ```
//! use emx_base91::{decode, encode};
//!
//! let encoded = encode(b"Hello, World!");
//! assert_eq!(encoded, ">OwJh>}AQ;r@@Y?F");
//! assert_eq!(decode(&encoded).unwrap(), b"Hello, World!");
//! ```

pub mod alphabet;
pub mod encoder;
pub mod decoder;
pub mod stats;

pub use alphabet::{Alphabet, AlphabetError, STANDARD, STANDARD_SYMBOLS};
pub use encoder::{encode, encode_into, encoded_len, Encoder};
pub use decoder::{decode, decode_into, decoded_len, CorruptInputError, Decoded, Decoder};
pub use stats::EncodingStats;
