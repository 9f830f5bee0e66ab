//! Token kinds of the stream and their wire encoding.
//!
//! ```text
//! Literal      0            byte
//! ShortMatch   1 0 LL       distance-1                  (2..=5, 1..=256)
//! LongMatch    1 1          [len-2:3|dist:5] [dist>>5]  (3..=9)
//! LongMatch    1 1          [000|dist:5] [dist>>5] ext  (>= 10)
//! Terminator   1 1          0x20 0x00                   (distance 0)
//! ```
//!
//! Extension bytes add 255 per `0x00` and end with the first non-zero byte,
//! which is added as-is on top of a base length of 9.

use std::fmt;

use crate::bitstream::{BitReader, BitWriter};
use crate::LzssError;

pub const MIN_MATCH: usize = 2;
pub const SHORT_MAX_LENGTH: usize = 5;
pub const SHORT_MAX_DISTANCE: usize = 256;
/// Largest distance the 13-bit long-match field can carry.
pub const MAX_DISTANCE: usize = 0x1FFF;
/// Long matches below this length store `length - 2` inline.
pub const EXTENDED_LENGTH: usize = 10;
const EXTENSION_BASE: usize = 9;
const EXTENSION_STEP: usize = 255;

pub const LITERAL_COST: usize = 9;
const SHORT_COST: usize = 12;
const LONG_COST: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(u8),
    ShortMatch { length: usize, distance: usize },
    LongMatch { length: usize, distance: usize },
    Terminator,
}

/// Whether a match fits the compact short encoding.
pub fn is_short(length: usize, distance: usize) -> bool {
    (MIN_MATCH..=SHORT_MAX_LENGTH).contains(&length) && distance <= SHORT_MAX_DISTANCE
}

/// Encoded size in bits of a match, used to weigh it against literals.
pub fn match_cost(length: usize, distance: usize) -> usize {
    if is_short(length, distance) {
        SHORT_COST
    } else if length < EXTENDED_LENGTH {
        LONG_COST
    } else {
        LONG_COST + 8 * (length - EXTENSION_BASE).div_ceil(EXTENSION_STEP)
    }
}

impl Token {
    /// Build the match token the encoder would emit for `(length, distance)`.
    pub fn for_match(length: usize, distance: usize) -> Self {
        if is_short(length, distance) {
            Token::ShortMatch { length, distance }
        } else {
            Token::LongMatch { length, distance }
        }
    }

    /// Number of output bytes this token produces.
    pub fn output_len(&self) -> usize {
        match *self {
            Token::Literal(_) => 1,
            Token::ShortMatch { length, .. } | Token::LongMatch { length, .. } => length,
            Token::Terminator => 0,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Token::ShortMatch { .. } | Token::LongMatch { .. })
    }

    /// Low two bits of the first byte following a match's flag bits.
    ///
    /// `None` for tokens that are not back-references.
    pub fn offset_low_bits(&self) -> Option<u8> {
        match *self {
            Token::ShortMatch { distance, .. } => Some(((distance - 1) & 0x03) as u8),
            Token::LongMatch { distance, .. } => Some((distance & 0x03) as u8),
            _ => None,
        }
    }

    pub fn write(&self, w: &mut BitWriter) {
        match *self {
            Token::Literal(byte) => {
                w.write_bit(false);
                w.write_byte(byte);
            }
            Token::ShortMatch { length, distance } => {
                debug_assert!(is_short(length, distance) && distance >= 1);
                w.write_bit(true);
                w.write_bit(false);
                w.write_bits((length - MIN_MATCH) as u32, 2);
                w.write_byte((distance - 1) as u8);
            }
            Token::LongMatch { length, distance } => {
                debug_assert!(length >= 3 && (1..=MAX_DISTANCE).contains(&distance));
                w.write_bit(true);
                w.write_bit(true);
                let low = (distance & 0x1F) as u8;
                let high = ((distance >> 5) & 0xFF) as u8;
                if length < EXTENDED_LENGTH {
                    w.write_byte((((length - MIN_MATCH) as u8) << 5) | low);
                    w.write_byte(high);
                } else {
                    w.write_byte(low);
                    w.write_byte(high);
                    let mut remaining = length - EXTENSION_BASE;
                    while remaining > EXTENSION_STEP {
                        w.write_byte(0);
                        remaining -= EXTENSION_STEP;
                    }
                    w.write_byte(remaining as u8);
                }
            }
            Token::Terminator => {
                w.write_bit(true);
                w.write_bit(true);
                w.write_byte(0x20);
                w.write_byte(0x00);
            }
        }
    }

    /// Parse one token. The caller decides what an error at a token boundary
    /// means.
    pub fn read(r: &mut BitReader<'_>) -> Result<Self, LzssError> {
        if !r.read_bit()? {
            return Ok(Token::Literal(r.read_byte()?));
        }
        if !r.read_bit()? {
            let length = r.read_bits(2)? as usize + MIN_MATCH;
            let distance = r.read_byte()? as usize + 1;
            return Ok(Token::ShortMatch { length, distance });
        }
        let b1 = r.read_byte()? as usize;
        let b2 = r.read_byte()? as usize;
        let distance = (b2 << 5) | (b1 & 0x1F);
        if distance == 0 {
            return Ok(Token::Terminator);
        }
        let length = match b1 >> 5 {
            0 => {
                let mut length = EXTENSION_BASE;
                loop {
                    match r.read_byte()? {
                        0 => length += EXTENSION_STEP,
                        n => break length + n as usize,
                    }
                }
            }
            field => field + MIN_MATCH,
        };
        Ok(Token::LongMatch { length, distance })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Token::Literal(b) => write!(f, "L {:02x}", b),
            Token::ShortMatch { length, distance } => write!(f, "S len={length} dist={distance}"),
            Token::LongMatch { length, distance } => write!(f, "M len={length} dist={distance}"),
            Token::Terminator => write!(f, "END"),
        }
    }
}

/// Iterator over the tokens of a compressed stream.
///
/// Stops after the terminator, at the end of input, or after yielding the
/// first error.
pub struct TokenReader<'a> {
    reader: BitReader<'a>,
    done: bool,
}

impl<'a> TokenReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader::from_slice(data),
            done: false,
        }
    }

    /// Byte offset of the next unread input byte.
    pub fn position(&self) -> usize {
        self.reader.position()
    }
}

impl Iterator for TokenReader<'_> {
    type Item = Result<Token, LzssError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.reader.is_exhausted() {
            return None;
        }
        let token = Token::read(&mut self.reader);
        if matches!(token, Ok(Token::Terminator) | Err(_)) {
            self.done = true;
        }
        Some(token)
    }
}

/// Parse every token of `data`, terminator included.
pub fn tokens(data: &[u8]) -> Result<Vec<Token>, LzssError> {
    TokenReader::new(data).collect()
}
