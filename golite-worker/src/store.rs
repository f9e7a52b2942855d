use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use golite_engine::{Event, GoError, Session};
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::error::WorkerError;

/// Persisted form of a session. The board is not stored; it is rebuilt from
/// `events` on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub key: String,
    pub size: u8,
    pub events: Vec<Event>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn capture(key: &str, session: &Session) -> Self {
        SessionRecord {
            key: key.to_string(),
            size: session.size(),
            events: session.events().to_vec(),
            updated_at: Utc::now(),
        }
    }

    pub fn into_session(self) -> Result<Session, GoError> {
        Session::from_events(self.size, self.events)
    }
}

pub trait SessionStore: Send + Sync + 'static {
    /// `Ok(None)` when nothing usable is stored under `key`.
    fn load(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<SessionRecord>, WorkerError>> + Send;

    fn save(&self, record: &SessionRecord) -> impl Future<Output = Result<(), WorkerError>> + Send;
}

// -- File store --

/// One JSON file per session key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", file_stem(key)))
    }
}

/// Map a key onto `[A-Za-z0-9_-]`. Every other byte, including `_`, becomes
/// `_` plus two hex digits, so distinct keys never share a file.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            stem.push(b as char);
        } else {
            stem.push_str(&format!("_{b:02x}"));
        }
    }
    if stem.is_empty() {
        stem.push('_');
    }
    stem
}

impl SessionStore for FileStore {
    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, WorkerError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(WorkerError::io(path, e)),
        };

        match serde_json::from_slice::<SessionRecord>(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable record {}: {e}", path.display());
                Ok(None)
            }
        }
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), WorkerError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| WorkerError::io(&self.dir, e))?;

        let path = self.path_for(&record.key);
        let tmp = self.tmp_path_for(&record.key);
        let bytes = serde_json::to_vec_pretty(record)?;

        if let Err(e) = replace_file(&tmp, &path, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }

        // fsync the directory so the rename itself survives a crash
        #[cfg(unix)]
        {
            if let Ok(dir) = File::open(&self.dir).await {
                let _ = dir.sync_all().await;
            }
        }

        Ok(())
    }
}

/// Write `bytes` to `tmp`, flush them to disk, then rename over `path` so a
/// reader sees either the old file or the complete new one.
async fn replace_file(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<(), WorkerError> {
    let mut file = File::create(tmp)
        .await
        .map_err(|e| WorkerError::io(tmp, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| WorkerError::io(tmp, e))?;
    file.sync_all().await.map_err(|e| WorkerError::io(tmp, e))?;
    drop(file);

    tokio::fs::rename(tmp, path)
        .await
        .map_err(|e| WorkerError::io(path, e))
}

// -- Memory store --

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl SessionStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, WorkerError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), WorkerError> {
        self.records
            .write()
            .await
            .insert(record.key.clone(), record.clone());
        Ok(())
    }
}
