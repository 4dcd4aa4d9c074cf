//! Persisted session state.
//!
//! The backend hands out an opaque token plus a role label on login.
//! Both are cached in a single TOML file so later invocations can
//! attach the token without logging in again. The pair is written
//! atomically and removed as a whole; there is no partial update.
//!
//! No expiry is tracked here. Whether the token is still good is the
//! backend's call, made on next use.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::nav::Role;

/// The cached proof of authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    /// Role label cached alongside the token. A session written by
    /// login always carries one; an absent role means the holder is
    /// authenticated but gets only the always-visible surface.
    #[serde(default)]
    pub role: Option<Role>,
}

/// File-backed store for the session pair.
///
/// Hydrates once at construction; mutated only by login (`set`) and
/// logout (`clear`).
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Hydrate from the session file. A missing file means no
    /// session; a malformed one is discarded with a warning and
    /// treated the same way.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Session>(&content) {
                Ok(session) => {
                    debug!("Hydrated session from {}", path.display());
                    Some(session)
                }
                Err(e) => {
                    warn!(
                        "Ignoring malformed session file {}: {}",
                        path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read session file {}: {}", path.display(), e);
                None
            }
        };
        Self { path, current }
    }

    pub fn get(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().and_then(|s| s.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Persist a new token/role pair.
    ///
    /// The file is staged in the same directory and renamed into
    /// place, so readers never observe one field without the other.
    pub fn set(&mut self, token: String, role: Role) -> Result<()> {
        let session = Session {
            token,
            role: Some(role),
        };

        let dir = self.path.parent().unwrap_or_else(|| std::path::Path::new("."));
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create session directory: {}", dir.display()))?;

        let content =
            toml::to_string_pretty(&session).context("Failed to serialize session")?;

        let staged = tempfile::NamedTempFile::new_in(dir)
            .context("Failed to stage session file")?;
        std::fs::write(staged.path(), content).context("Failed to write session file")?;
        staged
            .persist(&self.path)
            .with_context(|| format!("Failed to persist session file: {}", self.path.display()))?;

        debug!("Session written to {}", self.path.display());
        self.current = Some(session);
        Ok(())
    }

    /// Remove the session. Succeeds when there is nothing to remove.
    pub fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Session file {} removed", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to remove session file: {}", self.path.display())
                })
            }
        }
        self.current = None;
        Ok(())
    }
}
