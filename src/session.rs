// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::project_dirs;
use crate::error::SessionError;
use crate::models::UserSession;
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "jwt";

/// Browser-style key/value storage holding the session descriptor.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage persisted as a JSON object on disk; every write is flushed.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

pub fn default_storage_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("session.json"))
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Read session at {}", path.display()))?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid session file {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(FileStorage {
            path,
            items: RefCell::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create session dir")?;
        }
        let json = serde_json::to_string_pretty(&*self.items.borrow())?;
        fs::write(&self.path, json)
            .with_context(|| format!("Write session at {}", self.path.display()))?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        self.flush()
    }
}

pub fn read_user(storage: &dyn Storage) -> Result<UserSession, SessionError> {
    let raw = storage.get_item(USER_KEY).ok_or(SessionError::Missing)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_user(storage: &dyn Storage, user: &UserSession) -> Result<()> {
    storage.set_item(USER_KEY, &serde_json::to_string(user)?)
}

pub fn read_token(storage: &dyn Storage) -> Option<String> {
    storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
}
