//! JSON-file session store, the on-disk counterpart of browser storage.
//!
//! The whole map is rewritten on every change through a sibling temp file and
//! a rename, so a crash never leaves half of a multi-key update behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{SessionError, SessionStore};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(values) => Ok(values),
                Err(error) => {
                    // Unreadable contents count as no session; the next write replaces them.
                    tracing::warn!(path = %self.path.display(), %error, "session file is corrupt; treating as empty");
                    Ok(BTreeMap::new())
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_vec_pretty(values)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, rendered)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.load()?;
        apply(&mut values);
        self.save(&values)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.remove(key))
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), SessionError> {
        self.update(|values| {
            for (key, value) in entries {
                values.insert((*key).to_owned(), value.clone());
            }
        })
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), SessionError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|values| {
            for key in keys {
                values.remove(*key);
            }
        })
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
