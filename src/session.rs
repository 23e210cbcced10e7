//! Key-value local store holding the session token and the selected role.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, anyhow};
use tracing::debug;

use crate::{app_error::AppError, domain::AccountType, models::UserToken};

pub const USER_TOKEN_KEY: &str = "userToken";
pub const SELECTED_USER_TYPE_KEY: &str = "selectedUserType";

/// String-to-string storage with typed helpers for the session keys.
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;

    fn load_token(&self) -> Result<Option<UserToken>, AppError> {
        self.get_item(USER_TOKEN_KEY)?
            .map(|raw| {
                serde_json::from_str(&raw)
                    .context("Failed to parse stored user token")
                    .map_err(AppError::from)
            })
            .transpose()
    }

    fn save_token(&self, token: &UserToken) -> Result<(), AppError> {
        let raw = serde_json::to_string(token).context("Failed to serialize user token")?;
        self.set_item(USER_TOKEN_KEY, &raw)
    }

    fn load_account_type(&self) -> Result<Option<AccountType>, AppError> {
        self.get_item(SELECTED_USER_TYPE_KEY)?
            .map(|raw| raw.parse())
            .transpose()
    }

    fn save_account_type(&self, account_type: AccountType) -> Result<(), AppError> {
        self.set_item(SELECTED_USER_TYPE_KEY, account_type.as_str())
    }
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> T,
    ) -> Result<T, AppError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        Ok(f(&mut items))
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        self.with_items(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.with_items(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.with_items(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<(), AppError> {
        self.with_items(BTreeMap::clear)
    }
}

/// Store persisted as a flat JSON object in one file.
///
/// Every write rewrites the whole file; the store holds two keys.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw).with_context(|| {
                format!("Failed to parse session file {}", self.path.display())
            })?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(anyhow::Error::from(err)
                .context(format!("Failed to read session file {}", self.path.display()))
                .into()),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(items).context("Failed to serialize session")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        debug!("Session written to {}", self.path.display());
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(anyhow::Error::from(err)
                .context(format!("Failed to remove session file {}", self.path.display()))
                .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn token() -> UserToken {
        UserToken {
            user_id: 3,
            customer_id: Some(11),
            courier_id: None,
        }
    }

    fn exercise(store: &dyn SessionStore) {
        assert_eq!(store.load_token().unwrap(), None);

        store.save_token(&token()).unwrap();
        store.save_account_type(AccountType::Customer).unwrap();
        assert_eq!(store.load_token().unwrap(), Some(token()));
        assert_eq!(
            store.load_account_type().unwrap(),
            Some(AccountType::Customer)
        );

        store.remove_item(SELECTED_USER_TYPE_KEY).unwrap();
        assert_eq!(store.load_account_type().unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.load_token().unwrap(), None);
    }

    #[rstest]
    fn memory_store_round_trips_session() {
        exercise(&MemorySessionStore::new());
    }

    #[rstest]
    fn file_store_round_trips_session() {
        let dir = TempDir::new().unwrap();
        exercise(&FileSessionStore::new(dir.path().join("nested/session.json")));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::new(&path).save_token(&token()).unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.load_token().unwrap(), Some(token()));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(USER_TOKEN_KEY));
    }

    #[test]
    fn corrupt_token_is_an_error() {
        let store = MemorySessionStore::new();
        store.set_item(USER_TOKEN_KEY, "not json").unwrap();
        assert!(matches!(store.load_token(), Err(AppError::Other(_))));
    }
}
