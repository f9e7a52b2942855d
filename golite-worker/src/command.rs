use golite_engine::{Owner, Score, Stone, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::WorkerError;

/// One normalized request from the command layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub session: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Coordinates are taken wide so that far off-board points are still a
    /// rejected move rather than a malformed command.
    Move {
        timestamp: Timestamp,
        stone: Stone,
        row: u32,
        col: u32,
    },
    Undo {
        timestamp: Timestamp,
    },
    Show,
    Get {
        row: u32,
        col: u32,
    },
    Score,
    NewGame {
        #[serde(default)]
        size: Option<u8>,
    },
    ConfirmNew,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Move { .. } => "move",
            Action::Undo { .. } => "undo",
            Action::Show => "show",
            Action::Get { .. } => "get",
            Action::Score => "score",
            Action::NewGame { .. } => "new_game",
            Action::ConfirmNew => "confirm_new",
        }
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, WorkerError> {
        let data: serde_json::Value = serde_json::from_str(line)?;
        Self::from_value(data)
    }

    pub fn from_value(data: serde_json::Value) -> Result<Self, WorkerError> {
        let session = data
            .get("session")
            .and_then(|v| v.as_str())
            .ok_or_else(|| WorkerError::BadCommand("Missing session".to_string()))?
            .to_string();

        let name = data
            .get("action")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        if name.is_empty() {
            return Err(WorkerError::BadCommand("Missing action".to_string()));
        }
        let action = serde_json::from_value::<Action>(data)
            .map_err(|e| WorkerError::BadCommand(format!("Bad {name} command: {e}")))?;

        Ok(Command { session, action })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Event {
        session: String,
        timestamp: Timestamp,
        accepted: bool,
    },
    Board {
        session: String,
        size: u8,
        board: String,
    },
    Cell {
        session: String,
        row: u32,
        col: u32,
        /// 0 empty, 1 black, -1 white; `null` off the board.
        owner: Option<i8>,
    },
    Score {
        session: String,
        black: u32,
        white: u32,
        empty: u32,
        text: String,
    },
    ConfirmNeeded {
        session: String,
        size: u8,
    },
    Error {
        message: String,
    },
}

impl Reply {
    pub fn cell(session: &str, row: u32, col: u32, owner: Option<Owner>) -> Self {
        Reply::Cell {
            session: session.to_string(),
            row,
            col,
            owner: owner.map(Owner::to_int),
        }
    }

    pub fn score(session: &str, score: &Score) -> Self {
        Reply::Score {
            session: session.to_string(),
            black: score.player(Stone::Black),
            white: score.player(Stone::White),
            empty: score.raw(Owner::Empty),
            text: score.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Reply::Error {
            message: message.into(),
        }
    }

    pub fn to_line(&self) -> String {
        // Only plain strings, integers and bools, so this cannot fail.
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"kind":"error","message":"reply encoding failed: {e}"}}"#)
        })
    }
}
