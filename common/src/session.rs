//! Mock sign-in session.
//!
//! Any non-empty credentials are accepted and a user record is fabricated.
//! The signed-in user is persisted through an injected [`KeyValueStore`] so
//! callers own the session value and tests can swap the storage.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Storage key under which the signed-in user is kept.
pub const USER_KEY: &str = "career-code-user";

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// String key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    fn fabricate(id: String, name: String, email: &str) -> Self {
        Self {
            id,
            name,
            email: email.to_string(),
            avatar: Some(format!("{AVATAR_BASE_URL}{email}")),
        }
    }
}

pub struct Session<S> {
    store: S,
    user: Option<User>,
}

impl<S: KeyValueStore> Session<S> {
    /// Resumes whatever user `store` holds. An unreadable record is dropped
    /// and the session starts signed out.
    pub fn restore(store: S) -> Result<Self> {
        let user = match store.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable stored user");
                    None
                }
            },
            None => None,
        };
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Signs in with any non-empty email and password.
    ///
    /// Returns `Ok(None)` when either credential is empty.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Option<&User>> {
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }
        let name = email.split('@').next().unwrap_or(email).to_string();
        self.sign_in(User::fabricate("1".to_string(), name, email))
    }

    /// Registers and signs in. Requires all three fields to be non-empty.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Option<&User>> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Ok(None);
        }
        let id = Utc::now().timestamp_millis().to_string();
        self.sign_in(User::fabricate(id, name.to_string(), email))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.store.remove(USER_KEY)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn sign_in(&mut self, user: User) -> Result<Option<&User>> {
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        tracing::debug!(user_id = %user.id, "Signed in");
        Ok(Some(&*self.user.insert(user)))
    }
}
