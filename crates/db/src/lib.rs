pub mod repositories;
pub mod store;

pub mod mock;

use std::path::Path;

use eyre::Result;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Opens the file-backed store rooted at `data_dir`, creating it if needed.
pub fn open_store(data_dir: impl AsRef<Path>) -> Result<FileStore> {
    let store = FileStore::open(data_dir)?;
    tracing::debug!("Opened journal store at {}", store.root().display());
    Ok(store)
}
