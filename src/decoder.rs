//! Token-driven decoder.
//!
//! Back-references copy one byte at a time so a distance shorter than the
//! length repeats the tail of the output. A source position before the start
//! of the output reads as zero, which is how streams written against the
//! virtual zero prefix decode.

use crate::config::{Config, DecodeMode};
use crate::token::{Token, TokenReader};
use crate::LzssError;

pub struct Decoder<'a> {
    tokens: TokenReader<'a>,
    out: Vec<u8>,
    config: &'a Config,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8], config: &'a Config) -> Self {
        Self {
            tokens: TokenReader::new(data),
            out: Vec::with_capacity(data.len().saturating_mul(2).min(config.limit)),
            config,
        }
    }

    pub fn decode(mut self) -> Result<Vec<u8>, LzssError> {
        loop {
            match self.tokens.next() {
                Some(Ok(Token::Terminator)) => return Ok(self.out),
                Some(Ok(token)) => self.apply(token)?,
                Some(Err(e)) => return self.stop_early(e),
                None => {
                    let offset = self.tokens.position();
                    return self.stop_early(LzssError::UnexpectedEnd { offset });
                }
            }
        }
    }

    fn stop_early(self, err: LzssError) -> Result<Vec<u8>, LzssError> {
        match self.config.mode {
            DecodeMode::Strict => Err(err),
            DecodeMode::Lenient => {
                log::debug!("decode stopped after {} bytes: {err}", self.out.len());
                Ok(self.out)
            }
        }
    }

    fn apply(&mut self, token: Token) -> Result<(), LzssError> {
        if self.out.len().saturating_add(token.output_len()) > self.config.limit {
            return Err(LzssError::LimitExceeded {
                limit: self.config.limit,
            });
        }
        match token {
            Token::Literal(byte) => self.out.push(byte),
            Token::ShortMatch { length, distance } | Token::LongMatch { length, distance } => {
                self.copy(length, distance)
            }
            Token::Terminator => {}
        }
        Ok(())
    }

    fn copy(&mut self, length: usize, distance: usize) {
        for _ in 0..length {
            let byte = match self.out.len().checked_sub(distance) {
                Some(src) => self.out[src],
                None => 0,
            };
            self.out.push(byte);
        }
    }
}

/// Decode with explicit options.
pub fn decompress_with(data: &[u8], config: &Config) -> Result<Vec<u8>, LzssError> {
    Decoder::new(data, config).decode()
}

/// Decode leniently: a truncated stream yields the bytes decoded so far.
pub fn decompress(data: &[u8]) -> Vec<u8> {
    // lenient decoding without a limit has no error path left
    decompress_with(data, &Config::default()).unwrap_or_default()
}
