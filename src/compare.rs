//! Comparison of an encoder result against a block written by the game.

use std::fmt;

use serde::Serialize;

/// First byte at which two blocks disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteDiff {
    pub offset: usize,
    pub ours: u8,
    pub game: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockComparison {
    pub identical: bool,
    pub ours_len: usize,
    pub game_len: usize,
    /// `None` when one block is a prefix of the other.
    pub first_diff: Option<ByteDiff>,
}

impl BlockComparison {
    pub fn new(ours: &[u8], game: &[u8]) -> Self {
        let first_diff = ours
            .iter()
            .zip(game)
            .position(|(a, b)| a != b)
            .map(|offset| ByteDiff {
                offset,
                ours: ours[offset],
                game: game[offset],
            });
        Self {
            identical: ours == game,
            ours_len: ours.len(),
            game_len: game.len(),
            first_diff,
        }
    }

    /// Our size minus the game's size.
    pub fn size_difference(&self) -> i64 {
        self.ours_len as i64 - self.game_len as i64
    }
}

impl fmt::Display for BlockComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identical {
            return write!(f, "identical to game block ({} bytes)", self.game_len);
        }
        write!(
            f,
            "differs from game block: {} vs {} bytes ({:+})",
            self.ours_len,
            self.game_len,
            self.size_difference()
        )?;
        match self.first_diff {
            Some(d) => write!(
                f,
                ", first diff at byte {}: ours=0x{:02x}, game=0x{:02x}",
                d.offset, d.ours, d.game
            ),
            None => write!(f, ", shorter block is a prefix of the longer"),
        }
    }
}
