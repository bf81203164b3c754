// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file key-value store, the on-disk counterpart of browser local
//! storage.
//!
//! The whole map is held in memory and written through on every change.
//! Writes go to a sibling temp file which is then renamed over the target,
//! and the file is created with mode 0600 on Unix since it holds tokens.

use super::KeyValueStore;
use crate::error::{ClientError, Result};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cache: DashMap<String, String>,
    /// Serializes flushes so two writers never interleave on disk.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = DashMap::new();

        if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| {
                ClientError::Storage(format!("cannot read {}: {}", path.display(), e))
            })?;
            if !contents.trim().is_empty() {
                let map: BTreeMap<String, String> =
                    serde_json::from_str(&contents).map_err(|e| {
                        ClientError::Storage(format!(
                            "corrupted session file {}: {} (delete it and log in again)",
                            path.display(),
                            e
                        ))
                    })?;
                for (key, value) in map {
                    cache.insert(key, value);
                }
            }
        }

        tracing::debug!(path = %path.display(), keys = cache.len(), "Session store opened");

        Ok(Self {
            path,
            cache,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ClientError::Storage("session store lock poisoned".to_string()))?;

        let snapshot: BTreeMap<String, String> = self
            .cache
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let contents = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ClientError::Storage(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .map_err(|e| ClientError::Storage(format!("cannot write {}: {}", tmp.display(), e)))?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            ClientError::Storage(format!("cannot replace {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|e| ClientError::Storage(format!("cannot chmod {}: {}", path.display(), e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.apply(&[(key, Some(value))])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.apply(&[(key, None)])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let ops: Vec<(&str, Option<&str>)> = entries.iter().map(|&(k, v)| (k, Some(v))).collect();
        self.apply(&ops)
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let ops: Vec<(&str, Option<&str>)> = keys.iter().map(|&k| (k, None)).collect();
        self.apply(&ops)
    }
}

impl FileStore {
    /// Apply a batch to the cache and flush once. If the flush fails the
    /// cache is put back, so memory never runs ahead of the file.
    fn apply(&self, ops: &[(&str, Option<&str>)]) -> Result<()> {
        let mut previous: Vec<(&str, Option<String>)> = Vec::with_capacity(ops.len());
        let mut changed = false;

        for &(key, value) in ops {
            let old = match value {
                Some(value) => self.cache.insert(key.to_string(), value.to_string()),
                None => self.cache.remove(key).map(|(_, v)| v),
            };
            changed |= value.is_some() || old.is_some();
            previous.push((key, old));
        }

        if !changed {
            return Ok(());
        }

        if let Err(e) = self.flush() {
            for (key, old) in previous.into_iter().rev() {
                match old {
                    Some(old) => {
                        self.cache.insert(key.to_string(), old);
                    }
                    None => {
                        self.cache.remove(key);
                    }
                }
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set("access_token", "A1").unwrap();
        store.set("refresh_token", "R1").unwrap();
        store.remove("refresh_token").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("access_token").unwrap().as_deref(), Some("A1"));
        assert_eq!(reopened.get("refresh_token").unwrap(), None);
    }

    #[test]
    fn test_batch_written_together() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path).unwrap();
        store
            .set_many(&[("refresh_token", "R1"), ("access_token", "A1")])
            .unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("access_token").unwrap().as_deref(), Some("A1"));
        assert_eq!(reopened.get("refresh_token").unwrap().as_deref(), Some("R1"));

        store.remove_many(&["access_token", "refresh_token"]).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("access_token").unwrap(), None);
        assert_eq!(reopened.get("refresh_token").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_flush_leaves_cache_unchanged() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("locked");
        fs::create_dir(&sub).unwrap();
        let store = FileStore::open(sub.join("session.json")).unwrap();
        store.set("access_token", "A1").unwrap();

        fs::set_permissions(&sub, fs::Permissions::from_mode(0o500)).unwrap();
        // root ignores directory permissions
        let writable = fs::write(sub.join("check"), "").is_ok();
        if !writable {
            assert!(store
                .set_many(&[("refresh_token", "R2"), ("access_token", "A2")])
                .is_err());
            assert_eq!(store.get("access_token").unwrap().as_deref(), Some("A1"));
            assert_eq!(store.get("refresh_token").unwrap(), None);
        }
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o700)).unwrap();
    }

    #[test]
    fn test_corrupted_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).unwrap();
        store.set("access_token", "A1").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
