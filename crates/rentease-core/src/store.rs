//! String-keyed JSON persistence standing in for a backend.
//!
//! One document per key at `<root>/<key>.json`. Reads treat a missing or
//! unparseable document as "no value" so callers can fall back to seed data;
//! writes replace the whole document through a temp-file rename so a torn
//! write never leaves half a collection behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the store and the mutators built on top of it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store root required")]
    RootRequired,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("{0}")]
    Validation(String),
    #[error("user not found: {0}")]
    UserNotFound(u32),
    #[error("item not found: {0}")]
    ItemNotFound(u32),
    #[error("booking not found: {0}")]
    BookingNotFound(u32),
}

/// Key-value store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Create a store rooted at `root`, creating the directory if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(StoreError::RootRequired);
        }
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `key`.
    #[must_use]
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read the document stored under `key`.
    ///
    /// Missing documents return `Ok(None)`. So do unparseable ones: corrupt
    /// data is replaced by the caller's default, never treated as fatal.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.key_path(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(serde_json::from_str(&data).ok())
    }

    /// Replace the document stored under `key`.
    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(value)?;
        let path = self.key_path(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, data.as_bytes())?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::{Store, StoreError};

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path()).expect("open store");
        let value: Option<Vec<u32>> = store.read_json("absent").expect("read");
        assert!(value.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path()).expect("open store");
        store.write_json("numbers", &vec![1u32, 2, 3]).expect("write");
        let value: Option<Vec<u32>> = store.read_json("numbers").expect("read");
        assert_eq!(value, Some(vec![1, 2, 3]));
        assert!(store.key_path("numbers").exists());
    }

    #[test]
    fn corrupt_document_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path()).expect("open store");
        std::fs::write(store.key_path("broken"), b"{not json").expect("write raw");
        let value: Option<Vec<u32>> = store.read_json("broken").expect("read");
        assert!(value.is_none());
    }

    #[test]
    fn write_replaces_prior_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path()).expect("open store");
        store.write_json("slot", &vec!["old"]).expect("first write");
        store.write_json("slot", &vec!["new"]).expect("second write");
        let value: Option<Vec<String>> = store.read_json("slot").expect("read");
        assert_eq!(value, Some(vec!["new".to_string()]));
        assert!(!store.root().join("slot.json.tmp").exists());
    }

    #[test]
    fn empty_root_is_rejected() {
        let err = Store::open("").unwrap_err();
        assert!(matches!(err, StoreError::RootRequired));
    }
}
