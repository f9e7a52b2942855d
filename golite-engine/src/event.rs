use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::stone::Stone;

/// Logical time of an event. Any strictly increasing sequence works, such as
/// update ids handed out by the message source.
pub type Timestamp = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Move { stone: Stone, row: u8, col: u8 },
    Undo,
    /// A recorded kind this engine does not know. Replaying it is a fault.
    Unsupported(String),
}

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEvent", into = "RawEvent")]
pub struct Event {
    pub timestamp: Timestamp,
    pub kind: EventKind,
}

impl Event {
    pub fn play(timestamp: Timestamp, stone: Stone, row: u8, col: u8) -> Self {
        Event {
            timestamp,
            kind: EventKind::Move { stone, row, col },
        }
    }

    pub fn undo(timestamp: Timestamp) -> Self {
        Event {
            timestamp,
            kind: EventKind::Undo,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, EventKind::Move { .. })
    }

    pub fn is_undo(&self) -> bool {
        self.kind == EventKind::Undo
    }

    /// Default journal ordering: ascending timestamp.
    pub fn by_timestamp(a: &Event, b: &Event) -> Option<Ordering> {
        Some(a.timestamp.cmp(&b.timestamp))
    }
}

/// Flat wire form: `{"timestamp":7,"kind":"move","stone":1,"row":2,"col":3}`.
#[derive(Debug, Serialize, Deserialize)]
struct RawEvent {
    timestamp: Timestamp,
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stone: Option<Stone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    row: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    col: Option<u8>,
}

impl TryFrom<RawEvent> for Event {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "move" => match (raw.stone, raw.row, raw.col) {
                (Some(stone), Some(row), Some(col)) => EventKind::Move { stone, row, col },
                _ => return Err(format!("move at {} is missing stone or point", raw.timestamp)),
            },
            "undo" => EventKind::Undo,
            _ => EventKind::Unsupported(raw.kind),
        };
        Ok(Event {
            timestamp: raw.timestamp,
            kind,
        })
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        let mut raw = RawEvent {
            timestamp: event.timestamp,
            kind: String::new(),
            stone: None,
            row: None,
            col: None,
        };
        match event.kind {
            EventKind::Move { stone, row, col } => {
                raw.kind = "move".to_string();
                raw.stone = Some(stone);
                raw.row = Some(row);
                raw.col = Some(col);
            }
            EventKind::Undo => raw.kind = "undo".to_string(),
            EventKind::Unsupported(kind) => raw.kind = kind,
        }
        raw
    }
}
