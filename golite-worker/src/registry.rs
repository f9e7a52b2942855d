use std::collections::HashMap;
use std::sync::Arc;

use golite_engine::{Event, Owner, Score, Session};
use tokio::sync::{Mutex, RwLock};

use crate::error::WorkerError;
use crate::store::{SessionRecord, SessionStore};

pub type SessionHandle = Arc<Mutex<Session>>;

/// Open sessions keyed by their logical key, backed by a store.
///
/// Each session sits behind its own mutex. Every mutation holds it across
/// insert, rebuild and persist, so one key never sees two replays at once
/// while different keys proceed independently.
pub struct SessionRegistry<S> {
    store: Arc<S>,
    default_size: u8,
    sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
}

impl<S> Clone for SessionRegistry<S> {
    fn clone(&self) -> Self {
        SessionRegistry {
            store: Arc::clone(&self.store),
            default_size: self.default_size,
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<S: SessionStore> SessionRegistry<S> {
    pub fn new(store: S, default_size: u8) -> Self {
        SessionRegistry {
            store: Arc::new(store),
            default_size,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn default_size(&self) -> u8 {
        self.default_size
    }

    /// Get the open session or load it from the store, creating a fresh one
    /// when nothing usable is stored. The session stays registered.
    ///
    /// On a hit (read lock) the handle is returned immediately. On a miss the
    /// store is read with no lock held, then the first insert wins.
    pub async fn open(&self, key: &str) -> Result<SessionHandle, WorkerError> {
        if let Some(handle) = self.lookup(key).await {
            return Ok(handle);
        }

        let session = self.load(key).await?;

        let mut sessions = self.sessions.write().await;
        let handle = sessions
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(session)));
        Ok(Arc::clone(handle))
    }

    /// Number of sessions held in memory.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn lookup(&self, key: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(key).map(Arc::clone)
    }

    async fn load(&self, key: &str) -> Result<Session, WorkerError> {
        match self.store.load(key).await? {
            Some(record) => match record.into_session() {
                Ok(session) => {
                    tracing::debug!("Loaded session {key}");
                    Ok(session)
                }
                Err(e) => {
                    tracing::warn!("Stored session {key} does not replay ({e}), starting fresh");
                    Ok(Session::new(self.default_size)?)
                }
            },
            None => Ok(Session::new(self.default_size)?),
        }
    }

    /// Journal an event and persist the session. Returns whether the last
    /// event of the journal took effect.
    ///
    /// If persisting fails the session is rolled back to its previous state.
    pub async fn add_event(&self, key: &str, event: Event) -> Result<bool, WorkerError> {
        let handle = self.open(key).await?;
        let mut session = handle.lock().await;

        let snapshot = session.clone();
        let accepted = session.add_event(event)?;
        if let Err(e) = self.persist(key, &session).await {
            *session = snapshot;
            return Err(e);
        }
        Ok(accepted)
    }

    // -- Reads (each also cancels a pending new game) --
    //
    // A read never adds a session to the map.

    pub async fn get(&self, key: &str, row: u8, col: u8) -> Result<Option<Owner>, WorkerError> {
        self.inspect(key, |session| session.get(row, col)).await
    }

    pub async fn score(&self, key: &str) -> Result<Score, WorkerError> {
        self.inspect(key, Session::score).await
    }

    /// Board size and text rendering.
    pub async fn render(&self, key: &str) -> Result<(u8, String), WorkerError> {
        self.inspect(key, |session| (session.size(), session.render_text()))
            .await
    }

    // -- New game --

    pub async fn request_reset(&self, key: &str, size: Option<u8>) -> Result<u8, WorkerError> {
        let handle = self.open(key).await?;
        let mut session = handle.lock().await;
        Ok(session.request_reset(size)?)
    }

    /// Carry out a pending new game and persist it. `Ok(None)` when nothing
    /// was pending.
    pub async fn confirm_reset(&self, key: &str) -> Result<Option<u8>, WorkerError> {
        // a pending request only exists on an open session
        let Some(handle) = self.lookup(key).await else {
            return Ok(None);
        };
        let mut session = handle.lock().await;

        let snapshot = session.clone();
        let Some(size) = session.confirm_reset()? else {
            return Ok(None);
        };
        if let Err(e) = self.persist(key, &session).await {
            *session = snapshot;
            return Err(e);
        }
        Ok(Some(size))
    }

    pub async fn cancel_reset(&self, key: &str) -> Result<(), WorkerError> {
        if let Some(handle) = self.lookup(key).await {
            handle.lock().await.cancel_reset();
        }
        Ok(())
    }

    /// Read a session without registering it. An open session also has its
    /// pending new game cancelled; an unopened one has none to cancel.
    async fn inspect<T>(
        &self,
        key: &str,
        f: impl FnOnce(&Session) -> T,
    ) -> Result<T, WorkerError> {
        match self.lookup(key).await {
            Some(handle) => {
                let mut session = handle.lock().await;
                session.cancel_reset();
                Ok(f(&session))
            }
            None => Ok(f(&self.load(key).await?)),
        }
    }

    async fn persist(&self, key: &str, session: &Session) -> Result<(), WorkerError> {
        self.store.save(&SessionRecord::capture(key, session)).await
    }
}
