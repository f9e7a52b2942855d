use serde::{Deserialize, Serialize};

use crate::capture::{can_capture, capture};
use crate::error::GoError;
use crate::event::{Event, EventKind};
use crate::grid::Grid;
use crate::stone::{Owner, Stone};

/// A move that took effect during replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub stone: Stone,
    pub row: u8,
    pub col: u8,
}

/// The board derived from a journal, plus the outcome of its final event.
///
/// Built from scratch on every call: an undo re-derives the board from the
/// surviving moves instead of restoring a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    grid: Grid,
    applied: Vec<Placement>,
    accepted: bool,
}

impl Replay {
    /// Replay `events` in order onto an empty board of `size`.
    ///
    /// A move onto an occupied or off-board point is skipped. If that move is
    /// the last event, `accepted` is false. An event kind the engine does not
    /// know aborts the rebuild.
    pub fn rebuild(size: u8, events: &[Event]) -> Result<Self, GoError> {
        let mut grid = Grid::new(size)?;
        let mut applied: Vec<Placement> = Vec::new();
        let mut accepted = true;
        let last = events.len().saturating_sub(1);

        for (i, event) in events.iter().enumerate() {
            match &event.kind {
                EventKind::Move { stone, row, col } => {
                    let placement = Placement {
                        stone: *stone,
                        row: *row,
                        col: *col,
                    };
                    if place(&mut grid, placement) {
                        applied.push(placement);
                    } else if i == last {
                        accepted = false;
                    }
                }
                EventKind::Undo => {
                    if applied.pop().is_some() {
                        grid.clear();
                        for &placement in &applied {
                            place(&mut grid, placement);
                        }
                    }
                }
                EventKind::Unsupported(kind) => {
                    return Err(GoError::UnsupportedEvent {
                        timestamp: event.timestamp,
                        kind: kind.clone(),
                    });
                }
            }
        }

        Ok(Replay {
            grid,
            applied,
            accepted,
        })
    }

    // -- Accessors --

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Moves still in effect, oldest first.
    pub fn applied(&self) -> &[Placement] {
        &self.applied
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.applied.last().copied()
    }
}

/// Place a stone if its point is on the board and empty, then resolve
/// captures for every point in the 3x3 block around it. Returns whether the
/// stone was placed.
pub fn place(grid: &mut Grid, Placement { stone, row, col }: Placement) -> bool {
    if grid.get((row, col)) != Some(Owner::Empty) {
        return false;
    }
    grid.set((row, col), Owner::Stone(stone));

    for dr in -1i8..=1 {
        for dc in -1i8..=1 {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if can_capture(grid, stone, (r, c)) {
                capture(grid, stone, (r, c));
            }
        }
    }

    true
}
