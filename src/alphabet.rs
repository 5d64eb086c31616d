//! Alphabet table
//!
//! An [`Alphabet`] maps the values `0..=90` to 91 printable symbols and back.
//! It is built once, validated at construction, and never mutated afterwards,
//! so a single table can be shared by any number of encoders and decoders.

use std::fmt;
use std::str::FromStr;

/// Number of symbols in a base91 alphabet
pub const SIZE: usize = 91;

/// The standard basE91 symbol order.
///
/// All 95 printable ASCII characters except space, apostrophe (`'`),
/// hyphen (`-`) and backslash (`\`).
pub const STANDARD_SYMBOLS: &[u8; SIZE] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~\"";

/// The standard alphabet, built from [`STANDARD_SYMBOLS`]
pub const STANDARD: Alphabet = match Alphabet::new(STANDARD_SYMBOLS) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("standard base91 alphabet is invalid"),
};

/// Error returned when an alphabet definition is rejected
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AlphabetError {
    /// Definition is not exactly 91 bytes long
    WrongLength { length: usize },
    /// Definition contains a carriage return or line feed
    ForbiddenSymbol { symbol: u8, index: usize },
    /// Definition contains a byte outside of ASCII
    NonAsciiSymbol { symbol: u8, index: usize },
    /// The same symbol appears twice
    DuplicateSymbol { symbol: u8, first: usize, second: usize },
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphabetError::WrongLength { length } => {
                write!(f, "Invalid base91 alphabet: expected {} symbols, got {}", SIZE, length)
            }
            AlphabetError::ForbiddenSymbol { symbol, index } => {
                write!(f, "Invalid base91 alphabet: line break {:#04x} at index {}", symbol, index)
            }
            AlphabetError::NonAsciiSymbol { symbol, index } => {
                write!(f, "Invalid base91 alphabet: non-ascii symbol {:#04x} at index {}", symbol, index)
            }
            AlphabetError::DuplicateSymbol { symbol, first, second } => {
                write!(
                    f,
                    "Invalid base91 alphabet: symbol '{}' at indexes {} and {}",
                    *symbol as char, first, second
                )
            }
        }
    }
}

impl std::error::Error for AlphabetError {}

/// Bidirectional mapping between base91 digit values and symbols
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    /// Digit value -> symbol
    symbols: [u8; SIZE],
    /// Symbol -> digit value, `None` for bytes outside the alphabet
    values: [Option<u8>; 256],
}

impl Alphabet {
    /// Build an alphabet from a 91-byte definition.
    ///
    /// The definition must contain 91 distinct ASCII bytes and no CR or LF.
    pub const fn new(definition: &[u8]) -> Result<Self, AlphabetError> {
        if definition.len() != SIZE {
            return Err(AlphabetError::WrongLength { length: definition.len() });
        }

        let mut symbols = [0u8; SIZE];
        let mut values: [Option<u8>; 256] = [None; 256];

        let mut index = 0;
        while index < SIZE {
            let symbol = definition[index];
            if symbol == b'\r' || symbol == b'\n' {
                return Err(AlphabetError::ForbiddenSymbol { symbol, index });
            }
            if !symbol.is_ascii() {
                return Err(AlphabetError::NonAsciiSymbol { symbol, index });
            }
            if let Some(first) = values[symbol as usize] {
                return Err(AlphabetError::DuplicateSymbol {
                    symbol,
                    first: first as usize,
                    second: index,
                });
            }
            symbols[index] = symbol;
            values[symbol as usize] = Some(index as u8);
            index += 1;
        }

        Ok(Self { symbols, values })
    }

    /// Symbol for a digit value.
    ///
    /// # Panics
    /// Panics if `value` is not below 91.
    #[inline]
    pub fn symbol(&self, value: usize) -> u8 {
        self.symbols[value]
    }

    /// Digit value of a symbol, or `None` if the byte is not part of the alphabet
    #[inline]
    pub fn value_of(&self, symbol: u8) -> Option<u8> {
        self.values[symbol as usize]
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.value_of(symbol).is_some()
    }

    pub const fn symbols(&self) -> &[u8; SIZE] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        STANDARD
    }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::new(s.as_bytes())
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.symbols {
            write!(f, "{}", symbol as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.to_string()).finish()
    }
}
