//! The one piece of global mutable state: the current session.
//!
//! Consumers depend on the [`SessionStore`] trait rather than ambient
//! storage, so tests substitute [`MemoryStore`] and desktop embedders use
//! [`FileStore`]. Stores are read at the start of each operation, never
//! cached, so a logout or login performed elsewhere is picked up on the next
//! call.

use std::path::PathBuf;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use lostfound_shared::account::{Actor, Role};

/// Identity and bearer token granted on OTP confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn actor(&self) -> Actor {
        Actor {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

pub type SessionListener = Box<dyn Fn(Option<&Session>) + Send + Sync>;

pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<Session>;
    fn set(&self, session: Session);
    fn clear(&self);
    /// Registers a listener fired on every `set`/`clear` in this process.
    fn subscribe(&self, listener: SessionListener);
}

/// In-memory store for tests and embedders that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    session: RwLock<Option<Session>>,
    listeners: Mutex<Vec<SessionListener>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::default();
        *store.session.write() = Some(session);
        store
    }

    fn fire(&self, session: Option<&Session>) {
        for listener in self.listeners.lock().iter() {
            listener(session);
        }
    }
}

impl SessionStore for MemoryStore {
    fn get(&self) -> Option<Session> {
        self.session.read().clone()
    }

    fn set(&self, session: Session) {
        *self.session.write() = Some(session.clone());
        self.fire(Some(&session));
    }

    fn clear(&self) {
        *self.session.write() = None;
        self.fire(None);
    }

    fn subscribe(&self, listener: SessionListener) {
        self.listeners.lock().push(listener);
    }
}

/// TOML-file-backed store. `get` re-reads the file on every call so another
/// process sharing the file is picked up without a restart; cross-process
/// changes do not fire this process's listeners.
pub struct FileStore {
    path: PathBuf,
    listeners: Mutex<Vec<SessionListener>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn fire(&self, session: Option<&Session>) {
        for listener in self.listeners.lock().iter() {
            listener(session);
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::debug!(%err, path = %self.path.display(), "ignoring malformed session file");
                None
            }
        }
    }

    fn set(&self, session: Session) {
        match toml::to_string(&session) {
            Ok(raw) => {
                if let Err(err) = std::fs::write(&self.path, raw) {
                    tracing::error!(%err, path = %self.path.display(), "failed to persist session");
                }
            }
            Err(err) => tracing::error!(%err, "failed to encode session"),
        }
        self.fire(Some(&session));
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::error!(%err, path = %self.path.display(), "failed to clear session file");
            }
        }
        self.fire(None);
    }

    fn subscribe(&self, listener: SessionListener) {
        self.listeners.lock().push(listener);
    }
}
