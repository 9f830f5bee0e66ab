//! Per-call encoder counters.
//!
//! `CompressStats` is returned with every compressed buffer rather than kept
//! in global state, so concurrent calls never share counters.

use serde::{Deserialize, Serialize};

use crate::token::Token;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub literals: usize,
    pub short_matches: usize,
    pub long_matches: usize,
    /// Three-byte matches re-emitted as literals between two matches.
    pub scenario1_rewrites: usize,
}

impl CompressStats {
    pub fn new(input_bytes: usize) -> Self {
        Self {
            input_bytes,
            ..Self::default()
        }
    }

    pub fn record(&mut self, token: &Token) {
        match token {
            Token::Literal(_) => self.literals += 1,
            Token::ShortMatch { .. } => self.short_matches += 1,
            Token::LongMatch { .. } => self.long_matches += 1,
            Token::Terminator => {}
        }
    }

    /// Compressed size as a percentage of the input size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 * 100.0 / self.input_bytes as f64
    }

    pub fn report(&self) {
        log::info!(
            "{} -> {} bytes ({:.2}%), literals {}, short {}, long {}, scenario-1 {}",
            self.input_bytes,
            self.output_bytes,
            self.ratio(),
            self.literals,
            self.short_matches,
            self.long_matches,
            self.scenario1_rewrites
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_kind() {
        let mut stats = CompressStats::new(10);
        stats.record(&Token::Literal(1));
        stats.record(&Token::ShortMatch { length: 2, distance: 1 });
        stats.record(&Token::LongMatch { length: 7, distance: 400 });
        stats.record(&Token::Terminator);
        assert_eq!((stats.literals, stats.short_matches, stats.long_matches), (1, 1, 1));
    }

    #[test]
    fn ratio_of_empty_input_is_zero() {
        assert_eq!(CompressStats::new(0).ratio(), 0.0);
    }

    #[test]
    fn serializes_to_json() {
        let stats = CompressStats {
            input_bytes: 4,
            output_bytes: 8,
            ..CompressStats::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["output_bytes"], 8);
        assert_eq!(json["scenario1_rewrites"], 0);
    }
}
