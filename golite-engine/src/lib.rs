pub mod capture;
pub mod error;
pub mod event;
pub mod grid;
pub mod journal;
pub mod replay;
pub mod score;
pub mod session;
pub mod stone;

/// A board coordinate as `(row, col)`.
pub type Point = (u8, u8);

pub use error::GoError;
pub use event::{Event, EventKind, Timestamp};
pub use grid::{Cell, Grid, MAX_SIZE};
pub use journal::{Comparator, Journal};
pub use replay::{Placement, Replay};
pub use score::Score;
pub use session::{ALLOWED_SIZES, Session};
pub use stone::{Owner, Stone};
