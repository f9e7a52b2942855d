use std::fmt;

use crate::error::GoError;
use crate::event::{Event, Timestamp};
use crate::grid::Grid;
use crate::journal::Journal;
use crate::replay::{Placement, Replay};
use crate::score::Score;
use crate::stone::{Owner, Stone};

/// Board sizes a new game may be started with.
pub const ALLOWED_SIZES: [u8; 5] = [7, 9, 13, 17, 19];

/// One game: the journal that is the source of truth and the board derived
/// from it.
///
/// The board is rebuilt from the whole journal on every journaled mutation.
/// Callers must serialize mutations of a single session themselves.
#[derive(Debug, Clone)]
pub struct Session {
    size: u8,
    journal: Journal<Event>,
    grid: Grid,
    accepted: bool,
    last_placement: Option<Placement>,
    /// Size of a requested new game that has not been confirmed yet.
    pending_confirmation: Option<u8>,
}

impl Session {
    pub fn new(size: u8) -> Result<Self, GoError> {
        Self::from_events(size, Vec::new())
    }

    /// Restore a session from a persisted event log. The log is put back in
    /// timestamp order before it is replayed.
    pub fn from_events(size: u8, events: Vec<Event>) -> Result<Self, GoError> {
        let journal = Journal::from_entries(events, Event::by_timestamp)?;
        let replay = Replay::rebuild(size, journal.log())?;
        let mut session = Session {
            size,
            journal,
            grid: Grid::new(size)?,
            accepted: true,
            last_placement: None,
            pending_confirmation: None,
        };
        session.apply(replay);
        Ok(session)
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn journal(&self) -> &Journal<Event> {
        &self.journal
    }

    pub fn events(&self) -> &[Event] {
        self.journal.log()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Outcome of the last event in the journal as of the latest rebuild.
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    pub fn pending_confirmation(&self) -> Option<u8> {
        self.pending_confirmation
    }

    /// Owner of a point, or `None` when it is off the board.
    pub fn get(&self, row: u8, col: u8) -> Option<Owner> {
        self.grid.get((row, col))
    }

    pub fn score(&self) -> Score {
        Score::tally(&self.grid)
    }

    pub fn render_text(&self) -> String {
        self.grid.to_string()
    }

    // -- Journaled mutation --

    /// Insert an event, rebuild the board and report whether the journal's
    /// last event took effect.
    ///
    /// On a fault the insert is rolled back and the board is left as it was.
    pub fn add_event(&mut self, event: Event) -> Result<bool, GoError> {
        self.pending_confirmation = None;

        let index = self.journal.insert(event)?;
        match Replay::rebuild(self.size, self.journal.log()) {
            Ok(replay) => {
                self.apply(replay);
                Ok(self.accepted)
            }
            Err(e) => {
                self.journal.remove(index);
                Err(e)
            }
        }
    }

    pub fn play(
        &mut self,
        timestamp: Timestamp,
        stone: Stone,
        row: u8,
        col: u8,
    ) -> Result<bool, GoError> {
        self.add_event(Event::play(timestamp, stone, row, col))
    }

    pub fn undo(&mut self, timestamp: Timestamp) -> Result<bool, GoError> {
        self.add_event(Event::undo(timestamp))
    }

    // -- Non-journaled mutation --

    /// Write a cell directly, bypassing the journal. The next rebuild discards
    /// it, so this is not for game moves.
    pub fn set(&mut self, owner: Owner, row: u8, col: u8) {
        self.grid.set((row, col), owner);
    }

    /// Drop the journal and start from an empty board of the same size.
    pub fn clear(&mut self) {
        self.journal.clear();
        self.grid.clear();
        self.accepted = true;
        self.last_placement = None;
    }

    /// Drop the journal, optionally changing the board size.
    pub fn reset(&mut self, new_size: Option<u8>) -> Result<(), GoError> {
        let size = new_size.unwrap_or(self.size);
        if size != self.size {
            self.grid = Grid::new(size)?;
            self.size = size;
        }
        self.clear();
        Ok(())
    }

    /// Ask for a new game. Nothing changes until [`Session::confirm_reset`].
    pub fn request_reset(&mut self, size: Option<u8>) -> Result<u8, GoError> {
        let size = size.unwrap_or(self.size);
        if !ALLOWED_SIZES.contains(&size) {
            return Err(GoError::InvalidSize(size));
        }
        self.pending_confirmation = Some(size);
        Ok(size)
    }

    /// Carry out a requested new game. Returns the new size, or `None` when no
    /// request was pending.
    pub fn confirm_reset(&mut self) -> Result<Option<u8>, GoError> {
        let Some(size) = self.pending_confirmation.take() else {
            return Ok(None);
        };
        self.reset(Some(size))?;
        Ok(Some(size))
    }

    pub fn cancel_reset(&mut self) {
        self.pending_confirmation = None;
    }

    fn apply(&mut self, replay: Replay) {
        self.accepted = replay.accepted();
        self.last_placement = replay.last_placement();
        self.grid = replay.into_grid();
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}
