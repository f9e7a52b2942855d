use std::fmt;

use arrayvec::ArrayVec;

use crate::Point;
use crate::error::GoError;
use crate::stone::Owner;

/// Largest supported board edge.
pub const MAX_SIZE: u8 = 19;

/// Reject sizes outside `1..=MAX_SIZE`.
pub fn check_size(size: u8) -> Result<u8, GoError> {
    if (1..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(GoError::InvalidSize(size))
    }
}

/// A single intersection: its owner and the on-board points next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    owner: Owner,
    adjacent: ArrayVec<Point, 4>,
}

impl Cell {
    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn adjacent(&self) -> &[Point] {
        &self.adjacent
    }
}

/// Square board stored as a flat arena of cells.
///
/// Adjacency is computed once at construction and kept as coordinates, so the
/// board is plain data. It holds nothing that replaying the journal cannot
/// recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty board with precomputed adjacency.
    pub fn new(size: u8) -> Result<Self, GoError> {
        let size = check_size(size)?;
        let mut cells = Vec::with_capacity(size as usize * size as usize);
        for row in 0..size {
            for col in 0..size {
                let mut adjacent = ArrayVec::new();
                if col > 0 {
                    adjacent.push((row, col - 1));
                }
                if row > 0 {
                    adjacent.push((row - 1, col));
                }
                if col + 1 < size {
                    adjacent.push((row, col + 1));
                }
                if row + 1 < size {
                    adjacent.push((row + 1, col));
                }
                cells.push(Cell {
                    owner: Owner::Empty,
                    adjacent,
                });
            }
        }
        Ok(Grid { size, cells })
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn on_board(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    /// Owner at a point, or `None` when the point is off the board.
    pub fn get(&self, point: Point) -> Option<Owner> {
        self.cell(point).map(Cell::owner)
    }

    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.index(point).map(|i| &self.cells[i])
    }

    /// On-board neighbors of a point; empty for off-board points.
    pub fn neighbors(&self, point: Point) -> &[Point] {
        match self.cell(point) {
            Some(cell) => cell.adjacent(),
            None => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.owner.is_empty())
    }

    /// Owners in row-major order.
    pub fn owners(&self) -> impl Iterator<Item = Owner> + '_ {
        self.cells.iter().map(Cell::owner)
    }

    /// Board encoded as row-major `i8` values (0 empty, 1 black, -1 white).
    pub fn to_ints(&self) -> Vec<i8> {
        self.owners().map(Owner::to_int).collect()
    }

    // -- Mutation --

    /// Set the owner of a point. Off-board points are ignored; returns whether
    /// the point was on the board.
    pub fn set(&mut self, point: Point, owner: Owner) -> bool {
        match self.index(point) {
            Some(i) => {
                self.cells[i].owner = owner;
                true
            }
            None => false,
        }
    }

    /// Empty every cell, keeping the adjacency.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.owner = Owner::Empty;
        }
    }

    #[inline]
    pub(crate) fn index(&self, (row, col): Point) -> Option<usize> {
        self.on_board((row, col))
            .then(|| row as usize * self.size as usize + col as usize)
    }

    /// Test helper: build a grid from an ASCII layout. 'B' = Black,
    /// 'W' = White, anything else = Empty.
    #[cfg(test)]
    pub(crate) fn from_layout(layout: &[&str]) -> Grid {
        use crate::stone::Stone;

        let mut grid = Grid::new(layout.len() as u8).unwrap();
        for (row, line) in layout.iter().enumerate() {
            assert_eq!(line.len(), layout.len(), "layout must be square");
            for (col, c) in line.chars().enumerate() {
                let owner = match c {
                    'B' => Owner::Stone(Stone::Black),
                    'W' => Owner::Stone(Stone::White),
                    _ => Owner::Empty,
                };
                grid.set((row as u8, col as u8), owner);
            }
        }
        grid
    }
}

/// One line per row; each cell is its owner's letter followed by a space.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size as usize) {
            for cell in row {
                write!(f, "{} ", cell.owner.letter())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
