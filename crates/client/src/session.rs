//! On-disk session store and the per-view auth gate.
//!
//! The session file is the client's persistent storage: it holds the bearer
//! token issued at login, the denormalized user display object written at
//! registration, and the optional remembered login email. [`SessionStore`]
//! is the single place credentials are issued and cleared; every view goes
//! through [`SessionStore::require`] before doing any work and through
//! [`SessionStore::invalidate_on`] after its first data fetch.
//!
//! Writes are last-writer-wins across concurrent processes. That
//! limitation is accepted; no locking.

use std::fs;
use std::path::PathBuf;

use medipos_core::{SessionCredential, SessionToken, UserProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ApiError;

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No usable credential is stored. The caller should send the user to
    /// the login flow and perform no further work.
    #[error("not logged in - run `medipos login` first")]
    AuthRequired,

    /// Reading or writing the session file failed.
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the session file failed.
    #[error("session file encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serialized shape of the session file.
///
/// All three fields are optional so partial files (e.g. a remembered
/// email with no active login) stay readable.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<SessionToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remembered_email: Option<String>,
}

/// Owner of the on-disk session credential.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store over the given session file path.
    ///
    /// The file does not need to exist yet; a missing file reads as an
    /// empty session.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored credential, if any.
    ///
    /// An absent file, an empty token, or an unreadable file all read as
    /// "not logged in". A corrupt file is overwritten by the next write.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] when the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<SessionCredential>, SessionError> {
        let file = self.read()?;

        match file.token {
            Some(token) if !token.is_empty() => Ok(Some(SessionCredential {
                token,
                user: file.user,
            })),
            _ => Ok(None),
        }
    }

    /// The per-view gate: a credential, or [`SessionError::AuthRequired`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AuthRequired`] when no token is stored.
    pub fn require(&self) -> Result<SessionCredential, SessionError> {
        self.load()?.ok_or(SessionError::AuthRequired)
    }

    /// Store a freshly issued bearer token, keeping the rest of the file.
    ///
    /// # Errors
    ///
    /// Returns an error when the session file cannot be written.
    pub fn store_token(&self, token: SessionToken) -> Result<(), SessionError> {
        let mut file = self.read()?;
        file.token = Some(token);
        self.write(&file)
    }

    /// Persist the user/company display object written at registration.
    ///
    /// # Errors
    ///
    /// Returns an error when the session file cannot be written.
    pub fn remember_user(&self, profile: UserProfile) -> Result<(), SessionError> {
        let mut file = self.read()?;
        file.user = Some(profile);
        self.write(&file)
    }

    /// Persist the login email for pre-filling the next login.
    ///
    /// # Errors
    ///
    /// Returns an error when the session file cannot be written.
    pub fn remember_email(&self, email: &str) -> Result<(), SessionError> {
        let mut file = self.read()?;
        file.remembered_email = Some(email.to_owned());
        self.write(&file)
    }

    /// The email remembered by a previous `login --remember`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] when the file exists but cannot be read.
    pub fn remembered_email(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.remembered_email)
    }

    /// Drop the stored token, keeping the display object and remembered
    /// email. Used by logout and by the read-failure policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the session file cannot be written.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut file = self.read()?;
        file.token = None;
        self.write(&file)
    }

    /// The read-failure policy: any backend rejection of a protected read
    /// clears the stored token and surfaces [`SessionError::AuthRequired`],
    /// regardless of the underlying cause (a 500 is treated the same as a
    /// 401 - transient server errors are indistinguishable from auth
    /// failures to this client, and there is no retry path).
    ///
    /// # Errors
    ///
    /// Maps every `Err` in `result` to [`SessionError::AuthRequired`].
    pub fn invalidate_on<T>(&self, result: Result<T, ApiError>) -> Result<T, SessionError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::warn!("protected read rejected, clearing session: {error}");
                if let Err(clear_error) = self.clear() {
                    tracing::error!("failed to clear session file: {clear_error}");
                }
                Err(SessionError::AuthRequired)
            }
        }
    }

    fn read(&self) -> Result<SessionFile, SessionError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionFile::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(file) => Ok(file),
            Err(e) => {
                tracing::warn!("session file is corrupt, treating as logged out: {e}");
                Ok(SessionFile::default())
            }
        }
    }

    fn write(&self, file: &SessionFile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, serde_json::to_string_pretty(file)?)?;
        Ok(())
    }
}
