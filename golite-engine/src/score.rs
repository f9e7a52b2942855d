use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::stone::{Owner, Stone};

/// Stone counts per owner, with empty points as their own bucket.
///
/// Use [`Score::raw`] to include the empty bucket and [`Score::player`] or
/// [`Score::players`] when only stones matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
    pub empty: u32,
}

impl Score {
    /// Count every cell on the board.
    pub fn tally(grid: &Grid) -> Self {
        let mut score = Score::default();
        for owner in grid.owners() {
            score.add(owner);
        }
        score
    }

    pub fn raw(&self, owner: Owner) -> u32 {
        match owner {
            Owner::Empty => self.empty,
            Owner::Stone(stone) => self.player(stone),
        }
    }

    pub fn player(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    pub fn players(&self) -> [(Stone, u32); 2] {
        [(Stone::Black, self.black), (Stone::White, self.white)]
    }

    /// Sum of all buckets; equals the board area.
    pub fn total(&self) -> u32 {
        self.black + self.white + self.empty
    }

    fn add(&mut self, owner: Owner) {
        match owner {
            Owner::Empty => self.empty += 1,
            Owner::Stone(Stone::Black) => self.black += 1,
            Owner::Stone(Stone::White) => self.white += 1,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Black: {} White: {}", self.black, self.white)
    }
}
