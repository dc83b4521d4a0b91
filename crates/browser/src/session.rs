//! Session gate.
//!
//! A mock sign-in in front of the browser: one fixed credential pair, a
//! fake bearer token, and a small JSON file so the session survives between
//! runs. It is a gate, not a security mechanism.
//!
//! The current session lives in a `watch` channel owned by the gate. Views
//! receive a read-only `SessionHandle` instead of reaching for shared state.
//! While signed in, a background task swaps the token every five minutes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const VALID_USERNAME: &str = "jedi";
const VALID_PASSWORD: &str = "force123";

/// Token issued on sign-in
pub const INITIAL_TOKEN: &str = "mock-jwt-token";

pub const TOKEN_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to read session file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write session file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Session file {path} is not valid JSON")]
    Encoding {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// On-disk layout: two independent entries, either of which may be missing.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredEntries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// JSON file holding the username and token entries.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, if both entries are present and non-empty.
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let entries: StoredEntries =
            serde_json::from_str(&raw).map_err(|source| SessionError::Encoding {
                path: self.path.clone(),
                source,
            })?;

        Ok(match (entries.username, entries.token) {
            (Some(username), Some(token)) if !username.is_empty() && !token.is_empty() => {
                Some(Session { username, token })
            }
            _ => None,
        })
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let body = self.encode(session)?;
        self.write(&body)
    }

    fn encode(&self, session: &Session) -> Result<String> {
        let entries = StoredEntries {
            username: Some(session.username.clone()),
            token: Some(session.token.clone()),
        };
        serde_json::to_string_pretty(&entries).map_err(|source| SessionError::Encoding {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, body: &str) -> Result<()> {
        let write_error = |source: io::Error| SessionError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.path, body).map_err(write_error)
    }

    /// Remove both entries. A missing file is already clear.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Read-only view of the current session, handed to views.
#[derive(Debug, Clone)]
pub struct SessionHandle(watch::Receiver<Option<Session>>);

impl SessionHandle {
    pub fn current(&self) -> Option<Session> {
        self.0.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.borrow().is_some()
    }
}

pub struct SessionGate {
    store: SessionStore,
    state: Arc<watch::Sender<Option<Session>>>,
    refresh_interval: Duration,
    refresh: Option<CancellationToken>,
}

impl SessionGate {
    /// Open the gate, restoring a stored session if there is one.
    ///
    /// An unreadable session file is an error. A file that isn't valid JSON
    /// is logged and treated as signed out.
    pub fn open(store: SessionStore) -> Result<Self> {
        let restored = match store.load() {
            Ok(restored) => restored,
            Err(err @ SessionError::Encoding { .. }) => {
                warn!("Ignoring stored session: {}", err);
                None
            }
            Err(err) => return Err(err),
        };

        if let Some(session) = &restored {
            info!("Restored session for {}", session.username);
        }

        let (state, _) = watch::channel(restored);
        let mut gate = Self {
            store,
            state: Arc::new(state),
            refresh_interval: TOKEN_REFRESH_INTERVAL,
            refresh: None,
        };
        if gate.is_authenticated() {
            gate.start_refresh();
        }
        Ok(gate)
    }

    /// Change how often the token is replaced (default: 5 minutes)
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        if self.is_authenticated() {
            self.start_refresh();
        }
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn user(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle(self.state.subscribe())
    }

    /// Check the credentials and, when they match, start a session.
    ///
    /// Returns `Ok(false)` on a credential mismatch, leaving the current
    /// session untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if username != VALID_USERNAME || password != VALID_PASSWORD {
            info!("Rejected sign-in for {:?}", username);
            return Ok(false);
        }

        let session = Session {
            username: username.to_string(),
            token: INITIAL_TOKEN.to_string(),
        };
        self.store.save(&session)?;
        self.state.send_replace(Some(session));
        info!("Signed in as {}", username);

        self.start_refresh();
        Ok(true)
    }

    /// Forget the stored session, then the in-memory one.
    ///
    /// If the file can't be removed the gate stays signed in, so memory and
    /// disk never disagree about whether a session exists.
    pub fn logout(&mut self) -> Result<()> {
        // Cleared under the channel lock so a refresh can't rewrite the file
        // between the removal and the sign-out.
        let mut cleared = Ok(None);
        self.state.send_if_modified(|current| {
            cleared = self.store.clear().map(|()| current.take());
            matches!(cleared, Ok(Some(_)))
        });
        let previous = cleared?;

        self.stop_refresh();
        if let Some(session) = previous {
            info!("Signed out {}", session.username);
        }
        Ok(())
    }

    fn start_refresh(&mut self) {
        self.stop_refresh();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime, token refresh disabled");
            return;
        };

        let cancel = CancellationToken::new();
        runtime.spawn(refresh_tokens(
            self.store.clone(),
            Arc::clone(&self.state),
            self.refresh_interval.max(Duration::from_millis(1)),
            cancel.clone(),
        ));
        self.refresh = Some(cancel);
    }

    fn stop_refresh(&mut self) {
        if let Some(cancel) = self.refresh.take() {
            cancel.cancel();
        }
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.stop_refresh();
    }
}

fn refreshed_token() -> String {
    format!("{}-{}", INITIAL_TOKEN, chrono::Utc::now().timestamp_millis())
}

/// Replace the token every `period` until cancelled or signed out.
///
/// The new entry is encoded up front; only the file write happens while the
/// channel is held. Readers of the session wait for that one small write,
/// which keeps a refresh from landing after `logout` removed the file.
async fn refresh_tokens(
    store: SessionStore,
    state: Arc<watch::Sender<Option<Session>>>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let Some(username) = state.borrow().as_ref().map(|s| s.username.clone()) else {
                    break;
                };
                let next = Session {
                    username,
                    token: refreshed_token(),
                };
                let body = match store.encode(&next) {
                    Ok(body) => body,
                    Err(err) => {
                        warn!("Failed to encode refreshed token: {}", err);
                        continue;
                    }
                };

                let mut saved = None;
                let refreshed = state.send_if_modified(|current| match current {
                    Some(session) if session.username == next.username => {
                        saved = Some(store.write(&body));
                        session.token = next.token.clone();
                        true
                    }
                    _ => false,
                });

                if !refreshed {
                    break;
                }
                match saved {
                    Some(Err(err)) => warn!("Failed to persist refreshed token: {}", err),
                    _ => debug!("Refreshed session token"),
                }
            }
        }
    }
    debug!("Token refresh stopped");
}
