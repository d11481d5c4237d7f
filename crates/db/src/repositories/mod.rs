pub mod member;
pub mod workout;

use fitlog_core::errors::{JournalError, JournalResult};
use serde::{Serialize, de::DeserializeOwned};

use crate::store::KeyValueStore;

/// Suffix of the key a corrupted blob is copied to before it is replaced.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Reads the JSON array stored under `key`. A missing key is an empty collection.
pub fn load_collection<T, S>(store: &S, key: &str) -> JournalResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        tracing::debug!("No data stored under {}", key);
        return Ok(Vec::new());
    };

    let items: Vec<T> = serde_json::from_str(&raw).map_err(|source| JournalError::Corrupted {
        key: key.to_string(),
        source,
    })?;

    tracing::debug!("Loaded {} records from {}", items.len(), key);
    Ok(items)
}

pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> JournalResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items)
        .map_err(|e| JournalError::Storage(eyre::eyre!("Failed to serialize {}: {}", key, e)))?;
    store.set(key, &raw)?;

    tracing::debug!("Saved {} records to {}", items.len(), key);
    Ok(())
}

/// Copies the raw blob under `key` to `<key>.corrupt` so it survives a reset.
///
/// Returns the backup key, or `None` if nothing was stored.
pub fn quarantine<S>(store: &S, key: &str) -> JournalResult<Option<String>>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    let backup_key = format!("{}{}", key, CORRUPT_SUFFIX);
    store.set(&backup_key, &raw)?;
    tracing::warn!("Moved unreadable data from {} to {}", key, backup_key);
    Ok(Some(backup_key))
}
