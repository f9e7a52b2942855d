use std::fmt;

use serde_repr::{Deserialize_repr, Serialize_repr};

/// A player. On the wire and in saved journals Black is `1` and White is `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Black = 1,
    White = -1,
}

impl Stone {
    /// Board letter used by the text rendering.
    pub fn letter(self) -> char {
        match self {
            Stone::Black => 'B',
            Stone::White => 'W',
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stone::Black => "Black",
            Stone::White => "White",
        })
    }
}

/// Who holds a cell. `Empty` is a scoring bucket of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Owner {
    #[default]
    Empty,
    Stone(Stone),
}

impl Owner {
    /// Board encoding: 0 for empty, otherwise the stone's value.
    pub fn to_int(self) -> i8 {
        match self {
            Owner::Empty => 0,
            Owner::Stone(stone) => stone as i8,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Owner::Empty
    }

    pub fn letter(self) -> char {
        match self {
            Owner::Empty => 'E',
            Owner::Stone(stone) => stone.letter(),
        }
    }
}

impl From<Stone> for Owner {
    fn from(stone: Stone) -> Self {
        Owner::Stone(stone)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Empty => write!(f, "Empty"),
            Owner::Stone(stone) => fmt::Display::fmt(stone, f),
        }
    }
}
