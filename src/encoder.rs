//! Encoder reproducing the game's compressor decisions.
//!
//! The input is viewed behind two zero bytes of history and encoded from
//! position 2 onwards. At each position the longest match is weighed against
//! the match one byte later (lazy matching) and against the literal cost of
//! the same bytes. Three-byte matches squeezed between two matches may then be
//! re-emitted as literals, which is how the game's encoder behaves when the
//! previous match's first offset byte has its low two bits clear.

use crate::bitstream::BitWriter;
use crate::match_finder::{Match, MatchFinder, PREFIX_LEN};
use crate::stats::CompressStats;
use crate::token::{is_short, match_cost, Token, LITERAL_COST, MIN_MATCH};

/// Compressed bytes together with the counters of the call that made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub data: Vec<u8>,
    pub stats: CompressStats,
}

/// Match length at which a run between two matches is re-emitted as literals.
const SCENARIO1_LENGTH: usize = 3;

pub struct Encoder<'a> {
    window: &'a [u8],
    finder: MatchFinder<'a>,
    writer: BitWriter,
    /// Low two offset bits of the previous token when it was a match.
    prev_match_low_bits: Option<u8>,
    stats: CompressStats,
}

impl<'a> Encoder<'a> {
    /// `window` must begin with the zero prefix.
    pub fn new(window: &'a [u8]) -> Self {
        debug_assert!(window.len() >= PREFIX_LEN);
        let input_bytes = window.len().saturating_sub(PREFIX_LEN);
        Self {
            window,
            finder: MatchFinder::new(window),
            writer: BitWriter::with_capacity(input_bytes + input_bytes / 8 + 4),
            prev_match_low_bits: None,
            stats: CompressStats::new(input_bytes),
        }
    }

    pub fn encode(mut self) -> Compressed {
        let mut pos = PREFIX_LEN;
        while pos < self.window.len() {
            // the game's encoder never opens with a match
            let chosen = if pos == PREFIX_LEN {
                None
            } else {
                self.choose(pos)
            };

            pos += match chosen {
                Some(m) if self.rewrites_as_literals(pos, m) => {
                    log::debug!(
                        "scenario-1 at {}: len={} dist={} emitted as literals",
                        pos - PREFIX_LEN,
                        m.length,
                        m.distance
                    );
                    for i in 0..m.length {
                        self.emit(Token::Literal(self.window[pos + i]));
                    }
                    self.stats.scenario1_rewrites += 1;
                    m.length
                }
                Some(m) => {
                    self.emit(Token::for_match(m.length, m.distance));
                    m.length
                }
                None => {
                    self.emit(Token::Literal(self.window[pos]));
                    1
                }
            };
        }

        self.emit(Token::Terminator);
        let data = self.writer.finish();
        self.stats.output_bytes = data.len();
        Compressed {
            data,
            stats: self.stats,
        }
    }

    /// Match to emit at `pos` after lazy matching and the cost check.
    fn choose(&mut self, pos: usize) -> Option<Match> {
        let mut current = self.finder.find_match(pos);

        if current.length >= MIN_MATCH && pos + 1 < self.window.len() {
            let next = self.finder.find_match(pos + 1);
            if next.length >= current.length + lazy_adjustment(current, next) {
                current = Match::NONE;
            }
        }

        if current.length >= MIN_MATCH
            && match_cost(current.length, current.distance) >= LITERAL_COST * current.length
        {
            current = Match::NONE;
        }

        (current.length >= MIN_MATCH).then_some(current)
    }

    fn rewrites_as_literals(&mut self, pos: usize, m: Match) -> bool {
        if m.length != SCENARIO1_LENGTH || self.prev_match_low_bits != Some(0) {
            return false;
        }
        let next = pos + m.length;
        next < self.window.len() && self.choose(next).is_some()
    }

    fn emit(&mut self, token: Token) {
        log::trace!("{token}");
        token.write(&mut self.writer);
        self.stats.record(&token);
        self.prev_match_low_bits = token.offset_low_bits();
    }
}

/// How much longer the match one byte ahead must be to defer the current one.
fn lazy_adjustment(current: Match, next: Match) -> usize {
    let current_short = is_short(current.length, current.distance);
    let next_short = is_short(next.length, next.distance);

    if current_short && next_short {
        return 1;
    }
    let mut adjustment: isize = if current_short { 2 } else { 1 };
    if current_short && next.length >= MIN_MATCH {
        adjustment += 2;
    }
    if next_short {
        adjustment -= 1;
    }
    adjustment.max(1) as usize
}

/// Compress `data`, returning the counters alongside the stream.
pub fn compress_with_stats(data: &[u8]) -> Compressed {
    let mut window = Vec::with_capacity(data.len() + PREFIX_LEN);
    window.resize(PREFIX_LEN, 0);
    window.extend_from_slice(data);
    Encoder::new(&window).encode()
}

/// Compress `data` into a terminated token stream.
pub fn compress(data: &[u8]) -> Vec<u8> {
    compress_with_stats(data).data
}
