//! Persisted session state: the credential pair and the cached identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Four string keys survive across runs: `access_token`, `refresh_token`,
//! `user` (JSON) and `company` (JSON). They are written together when a login
//! or registration succeeds and removed together on logout or when the
//! backend rejects the token. Storage is pluggable through [`SessionStore`].

mod file;
mod memory;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";
pub const COMPANY_KEY: &str = "company";

/// Every key owned by the session, in the order they are cleared.
pub const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY, COMPANY_KEY];

/// Errors produced by session stores.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-keyed persistent storage for session values.
///
/// Multi-key writes and removals must be applied as one unit.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), SessionError>;

    fn remove_all(&self, keys: &[&str]) -> Result<(), SessionError>;

    fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.set_all(&[(key, value)])
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.remove_all(&[key])
    }
}

/// Bearer credential pair issued by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
}

/// Handle to the persisted session, shared by the client and its callers.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Current access token. Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn access_token(&self) -> Result<Option<String>, SessionError> {
        self.non_empty(ACCESS_TOKEN_KEY)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn refresh_token(&self) -> Result<Option<String>, SessionError> {
        self.non_empty(REFRESH_TOKEN_KEY)
    }

    /// Whether an access token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.access_token(), Ok(Some(_)))
    }

    /// Cached user snapshot, if one was stored and still parses.
    #[must_use]
    pub fn user<T: DeserializeOwned>(&self) -> Option<T> {
        self.cached(USER_KEY)
    }

    /// Cached company snapshot, if one was stored and still parses.
    #[must_use]
    pub fn company<T: DeserializeOwned>(&self) -> Option<T> {
        self.cached(COMPANY_KEY)
    }

    /// Numeric company id recovered from the cached company snapshot.
    #[must_use]
    pub fn company_id(&self) -> Option<u64> {
        let company: Value = self.company()?;
        company.get("id").and_then(Value::as_u64)
    }

    /// Persist whatever parts of a login/registration grant are present.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be serialized or the store
    /// cannot be written.
    pub fn persist(
        &self,
        tokens: Option<&Tokens>,
        user: Option<&Value>,
        company: Option<&Value>,
    ) -> Result<(), SessionError> {
        let mut entries = Vec::with_capacity(SESSION_KEYS.len());
        if let Some(tokens) = tokens {
            entries.push((ACCESS_TOKEN_KEY, tokens.access.clone()));
            entries.push((REFRESH_TOKEN_KEY, tokens.refresh.clone()));
        }
        if let Some(user) = user {
            entries.push((USER_KEY, serde_json::to_string(user)?));
        }
        if let Some(company) = company {
            entries.push((COMPANY_KEY, serde_json::to_string(company)?));
        }
        if entries.is_empty() {
            return Ok(());
        }
        self.store.set_all(&entries)?;
        tracing::debug!(keys = entries.len(), "session persisted");
        Ok(())
    }

    /// Remove all four session keys at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove_all(&SESSION_KEYS)?;
        tracing::debug!("session cleared");
        Ok(())
    }

    fn non_empty(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.store.get(key)?.filter(|value| !value.is_empty()))
    }

    fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(error) => {
                tracing::warn!(key, %error, "failed to read cached snapshot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key, %error, "cached snapshot is malformed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
