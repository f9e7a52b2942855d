use std::path::PathBuf;

use golite_engine::grid::check_size;

use crate::error::WorkerError;

pub const DEFAULT_SAVE_DIR: &str = "games";
pub const DEFAULT_BOARD_SIZE: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON record per session.
    pub save_dir: PathBuf,
    /// Board size for sessions that have no saved record yet.
    pub board_size: u8,
    pub store: StoreKind,
}

impl Config {
    pub fn from_env() -> Result<Self, WorkerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WorkerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let save_dir = lookup("GOLITE_SAVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR));

        let board_size = match lookup("GOLITE_BOARD_SIZE") {
            Some(raw) => {
                let size = raw.trim().parse::<u8>().map_err(|_| {
                    WorkerError::Config(format!("GOLITE_BOARD_SIZE is not a number: {raw}"))
                })?;
                check_size(size)
                    .map_err(|e| WorkerError::Config(format!("GOLITE_BOARD_SIZE: {e}")))?
            }
            None => DEFAULT_BOARD_SIZE,
        };

        let store = match lookup("GOLITE_STORE").as_deref().map(str::trim) {
            None | Some("file") => StoreKind::File,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(WorkerError::Config(format!(
                    "GOLITE_STORE must be 'file' or 'memory', got '{other}'"
                )));
            }
        };

        Ok(Config {
            save_dir,
            board_size,
            store,
        })
    }
}
