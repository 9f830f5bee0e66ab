//! Bit-exact LZSS codec for game save blocks.
//!
//! [`compress`] reproduces the token stream written by the game's own encoder
//! byte for byte, and [`decompress`] reads streams from either source. The
//! container around a block (headers, sizes, checksums) is left to callers;
//! [`adler32_zero`] and [`crc32_ps3`] are provided for the checksum fields.
//!
//! ```
//! let packed = lzss_save::compress(b"to be or not to be");
//! assert_eq!(lzss_save::decompress(&packed), b"to be or not to be");
//! ```

pub mod bitstream;
pub mod checksum;
pub mod compare;
pub mod config;
pub mod decoder;
pub mod encoder;
mod error;
pub mod io_utils;
pub mod match_finder;
pub mod stats;
pub mod token;

pub use checksum::{adler32_zero, crc32_ps3};
pub use compare::BlockComparison;
pub use config::{Config, DecodeMode};
pub use decoder::{decompress, decompress_with, Decoder};
pub use encoder::{compress, compress_with_stats, Compressed, Encoder};
pub use error::LzssError;
pub use stats::CompressStats;
pub use token::{tokens, Token, TokenReader};
