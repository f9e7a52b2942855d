pub mod command;
pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod worker;

pub use command::{Action, Command, Reply};
pub use config::{Config, StoreKind};
pub use error::WorkerError;
pub use registry::{SessionHandle, SessionRegistry};
pub use store::{FileStore, MemoryStore, SessionRecord, SessionStore};
