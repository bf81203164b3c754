//! Local persistence (key-value store backing the session).

pub mod file;
pub mod memory;
pub mod token_store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use token_store::TokenStore;

use crate::error::Result;

/// Storage key names as constants.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Serialized auth snapshot (user + flag, never tokens)
    pub const AUTH_SNAPSHOT: &str = "auth-storage";
}

/// String key-value storage shared by the HTTP client and the auth session.
///
/// Implementations must be safe to call from several tasks at once.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Write several keys as one unit: all of them or none.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let ops: Vec<(&str, Option<&str>)> = entries.iter().map(|&(k, v)| (k, Some(v))).collect();
        apply_with_rollback(self, &ops)
    }

    /// Remove several keys as one unit: all of them or none.
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let ops: Vec<(&str, Option<&str>)> = keys.iter().map(|&k| (k, None)).collect();
        apply_with_rollback(self, &ops)
    }
}

/// Apply writes (`Some`) and removals (`None`) one key at a time, putting
/// back the earlier keys if a later one fails.
fn apply_with_rollback<S: KeyValueStore + ?Sized>(
    store: &S,
    ops: &[(&str, Option<&str>)],
) -> Result<()> {
    let mut applied: Vec<(&str, Option<String>)> = Vec::with_capacity(ops.len());

    for &(key, value) in ops {
        let previous = store.get(key)?;
        let result = match value {
            Some(value) => store.set(key, value),
            None => store.remove(key),
        };

        if let Err(e) = result {
            for (key, previous) in applied.into_iter().rev() {
                let restored = match previous {
                    Some(value) => store.set(key, &value),
                    None => store.remove(key),
                };
                if let Err(restore_err) = restored {
                    tracing::error!(key, error = %restore_err, "Failed to roll back store write");
                }
            }
            return Err(e);
        }
        applied.push((key, previous));
    }
    Ok(())
}
