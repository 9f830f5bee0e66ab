//! Hash-chain match finder.
//!
//! Positions are bucketed by a 14-bit hash of the three bytes starting there.
//! Each bucket head points at the newest position, and `chain` links every
//! position to the previous one that shared its hash, so a lookup walks
//! candidates from nearest to farthest.

use crate::token::{MAX_DISTANCE, MIN_MATCH};

pub const HASH_BITS: u32 = 14;
pub const HASH_SIZE: usize = 1 << HASH_BITS;
const HASH_MASK: u32 = (HASH_SIZE - 1) as u32;
pub const MAX_CHAIN_DEPTH: usize = 2048;
pub const MAX_MATCH: usize = 2048;
/// A match this long ends the chain walk.
pub const GOOD_ENOUGH: usize = 2048;
/// Bytes of zero history the encoder places ahead of the input.
pub const PREFIX_LEN: usize = 2;
/// Reach of the fallback scan for two-byte matches.
const SHORT_SCAN: usize = 256;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Match {
    pub length: usize,
    pub distance: usize,
}

impl Match {
    pub const NONE: Match = Match {
        length: 0,
        distance: 0,
    };
}

pub struct HashChain {
    head: Vec<usize>,
    chain: Vec<usize>,
}

impl HashChain {
    pub fn new(len: usize) -> Self {
        Self {
            head: vec![NIL; HASH_SIZE],
            chain: vec![NIL; len],
        }
    }

    fn insert(&mut self, hash: usize, pos: usize) {
        self.chain[pos] = self.head[hash];
        self.head[hash] = pos;
    }

    fn head(&self, hash: usize) -> usize {
        self.head[hash]
    }

    fn next(&self, pos: usize) -> usize {
        self.chain[pos]
    }
}

/// Finds back-references inside a zero-prefixed buffer.
///
/// The buffer is expected to start with [`PREFIX_LEN`] zero bytes that are
/// never referenced.
pub struct MatchFinder<'a> {
    data: &'a [u8],
    chain: HashChain,
    /// Every position below this one has been inserted.
    inserted: usize,
}

impl<'a> MatchFinder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            chain: HashChain::new(data.len()),
            inserted: 0,
        }
    }

    /// 14-bit hash of the three bytes at `pos`; 0 when fewer than three remain.
    pub fn hash_at(&self, pos: usize) -> usize {
        if pos + 2 >= self.data.len() {
            return 0;
        }
        let b0 = self.data[pos] as u32;
        let b1 = self.data[pos + 1] as u32;
        let b2 = self.data[pos + 2] as u32;
        let mut h = (b0 << 5) ^ b1;
        h = (h << 5) ^ b2;
        h = h.wrapping_mul(0x9f5f) >> 5;
        (h & HASH_MASK) as usize
    }

    /// Insert every position below `pos`. Never moves backwards.
    pub fn advance_to(&mut self, pos: usize) {
        while self.inserted < pos {
            let p = self.inserted;
            if p + 2 < self.data.len() {
                let h = self.hash_at(p);
                self.chain.insert(h, p);
            }
            self.inserted += 1;
        }
    }

    /// Longest match for `pos`, or [`Match::NONE`].
    pub fn find_match(&mut self, pos: usize) -> Match {
        self.advance_to(pos);
        if pos < PREFIX_LEN || pos >= self.data.len() {
            return Match::NONE;
        }

        let max_length = MAX_MATCH.min(self.data.len() - pos);
        let mut best = Match::NONE;
        let mut candidate = self.chain.head(self.hash_at(pos));
        let mut walked = 0;

        while candidate != NIL && walked < MAX_CHAIN_DEPTH {
            walked += 1;
            let cand = candidate;
            candidate = self.chain.next(cand);

            // positions at or past `pos` are reachable once lookahead has
            // advanced the chain beyond the current position
            if cand >= pos || pos - cand > MAX_DISTANCE || cand < PREFIX_LEN {
                continue;
            }
            if best.length >= MIN_MATCH
                && self.data[cand + best.length] != self.data[pos + best.length]
            {
                continue;
            }
            let length = self.common_prefix(cand, pos, max_length);
            if length < MIN_MATCH || length <= best.length {
                continue;
            }
            best = Match {
                length,
                distance: pos - cand,
            };
            if best.length >= max_length || best.length >= GOOD_ENOUGH {
                break;
            }
        }

        if best.length < MIN_MATCH && pos + 1 < self.data.len() {
            best = self.scan_pair(pos, max_length);
        }
        best
    }

    /// Nearest two-byte match within [`SHORT_SCAN`] bytes, extended.
    fn scan_pair(&self, pos: usize, max_length: usize) -> Match {
        let (b0, b1) = (self.data[pos], self.data[pos + 1]);
        let reach = SHORT_SCAN.min(pos - PREFIX_LEN);
        for distance in 1..=reach {
            let cand = pos - distance;
            if self.data[cand] == b0 && self.data[cand + 1] == b1 {
                return Match {
                    length: self.common_prefix(cand, pos, max_length),
                    distance,
                };
            }
        }
        Match::NONE
    }

    fn common_prefix(&self, a: usize, b: usize, max_length: usize) -> usize {
        self.data[a..]
            .iter()
            .zip(&self.data[b..])
            .take(max_length)
            .take_while(|(x, y)| x == y)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixed(data: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; PREFIX_LEN];
        buf.extend_from_slice(data);
        buf
    }

    #[test]
    fn hash_formula() {
        let buf = [1u8, 2, 3];
        let finder = MatchFinder::new(&buf);
        let h = ((((1u32 << 5) ^ 2) << 5) ^ 3).wrapping_mul(0x9f5f) >> 5;
        assert_eq!(finder.hash_at(0), (h & 0x3FFF) as usize);
        assert_eq!(finder.hash_at(1), 0);
    }

    #[test]
    fn prefix_positions_never_match() {
        let buf = prefixed(b"abc");
        let mut finder = MatchFinder::new(&buf);
        assert_eq!(finder.find_match(0), Match::NONE);
        assert_eq!(finder.find_match(1), Match::NONE);
    }

    #[test]
    fn zero_prefix_is_not_referenced() {
        let buf = prefixed(&[0, 0, 0, 0]);
        let mut finder = MatchFinder::new(&buf);
        // position 2 could only match the prefix
        assert_eq!(finder.find_match(2), Match::NONE);
        let m = finder.find_match(3);
        assert_eq!(m, Match { length: 3, distance: 1 });
    }

    #[test]
    fn prefers_longest_then_nearest() {
        let buf = prefixed(b"abcdXabcYabcdZabcd");
        let mut finder = MatchFinder::new(&buf);
        let pos = PREFIX_LEN + 14;
        let m = finder.find_match(pos);
        // "abcd" occurs at distance 5 and 14; the nearer one wins
        assert_eq!(m, Match { length: 4, distance: 5 });
    }

    #[test]
    fn two_byte_fallback_takes_nearest() {
        let buf = prefixed(b"abQabRab");
        let mut finder = MatchFinder::new(&buf);
        let m = finder.find_match(PREFIX_LEN + 6);
        assert_eq!(m, Match { length: 2, distance: 3 });
    }

    #[test]
    fn match_length_is_capped() {
        let buf = prefixed(&vec![7u8; 5000]);
        let mut finder = MatchFinder::new(&buf);
        let m = finder.find_match(PREFIX_LEN + 1);
        assert_eq!(m, Match { length: MAX_MATCH, distance: 1 });
    }

    fn window_probe(filler: usize) -> (usize, Match) {
        let mut data = b"wxyz".to_vec();
        // filler without any "wx" pair
        data.extend((0..filler).map(|i| b'a' + (i % 20) as u8));
        data.extend_from_slice(b"wxyz");
        let buf = prefixed(&data);
        let mut finder = MatchFinder::new(&buf);
        let pos = buf.len() - 4;
        (pos - PREFIX_LEN, finder.find_match(pos))
    }

    #[test]
    fn farthest_representable_distance_matches() {
        let (distance, m) = window_probe(MAX_DISTANCE - 4);
        assert_eq!(distance, MAX_DISTANCE);
        assert_eq!(m, Match { length: 4, distance: MAX_DISTANCE });
    }

    #[test]
    fn distance_beyond_window_is_rejected() {
        // 8192 would encode as distance 0, the terminator
        let (distance, m) = window_probe(MAX_DISTANCE - 3);
        assert_eq!(distance, MAX_DISTANCE + 1);
        assert_eq!(m, Match::NONE);
    }

    #[test]
    fn lookahead_does_not_produce_self_match() {
        let buf = prefixed(b"abcabcabc");
        let mut finder = MatchFinder::new(&buf);
        finder.advance_to(PREFIX_LEN + 5);
        let m = finder.find_match(PREFIX_LEN + 3);
        assert_eq!(m, Match { length: 6, distance: 3 });
    }
}
