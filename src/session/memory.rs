//! In-process session store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{SessionError, SessionStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Copy of every stored key/value pair.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), SessionError> {
        let mut values = self.lock();
        for (key, value) in entries {
            values.insert((*key).to_owned(), value.clone());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), SessionError> {
        let mut values = self.lock();
        for key in keys {
            values.remove(*key);
        }
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        (**self).get(key)
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), SessionError> {
        (**self).set_all(entries)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), SessionError> {
        (**self).remove_all(keys)
    }
}
