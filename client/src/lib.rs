//! Typed client layer for the lost-and-found backend.
//!
//! All business rules live server-side; this crate is the presentation
//! layer's data backbone: a session store, an HTTP gateway that attaches the
//! bearer token and classifies failures, and per-page view-models (claims,
//! items, users, dashboard) that fetch, filter, paginate and optimistically
//! patch their collections between polling refreshes.

use std::sync::Arc;

use lostfound_shared::account::Actor;

pub mod api;
pub mod auth;
pub mod config;
pub mod notify;
pub mod permission;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use notify::{Level, Notice, Notifier};
pub use session::{Session, SessionStore};

/// Everything a request or view-model needs to talk to the backend.
///
/// Cheap to clone; the HTTP client and the trait objects are shared.
#[derive(Clone)]
pub struct Context {
    base_url: String,
    http: reqwest::Client,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    config: Config,
}

impl Context {
    pub fn new(
        config: Config,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
            session,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &dyn SessionStore {
        &*self.session
    }

    pub fn notifier(&self) -> &dyn Notifier {
        &*self.notifier
    }

    /// The current actor, if a session is present. Reads the store fresh so
    /// a login/logout elsewhere is picked up on the next operation.
    pub fn actor(&self) -> Option<Actor> {
        self.session.get().map(|session| session.actor())
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn require_session(&self) -> Result<Session, Error> {
        self.session.get().ok_or(Error::NotLoggedIn)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No token in the session store; checked before issuing a call.
    #[error("not logged in")]
    NotLoggedIn,
    /// HTTP 401. The gateway has already cleared the session store.
    #[error("session expired: {0}")]
    AuthExpired(String),
    /// HTTP 403. The session stays valid; the resource is off-limits.
    #[error("access denied: {0}")]
    Forbidden(String),
    /// HTTP 400 on a mutating call; carries the server message verbatim.
    #[error("{0}")]
    Validation(String),
    /// HTTP 404; the record is already gone.
    #[error("not found: {0}")]
    NotFound(String),
    /// Transport-level failure; the backend could not be reached.
    #[error("cannot connect to server: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("unexpected response {status}: {message}")]
    Unexpected {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        use reqwest::StatusCode;
        match status {
            StatusCode::UNAUTHORIZED => Error::AuthExpired(message),
            StatusCode::FORBIDDEN => Error::Forbidden(message),
            StatusCode::BAD_REQUEST => Error::Validation(message),
            StatusCode::NOT_FOUND => Error::NotFound(message),
            _ => Error::Unexpected { status, message },
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Error::AuthExpired(_))
    }
}
