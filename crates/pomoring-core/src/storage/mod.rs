mod config;
pub mod database;
mod memory;

pub use config::Config;
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::PersistenceError;

/// Minimal key-value persistence consumed by the settings store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the value under `key` in a single write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `POMORING_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/pomoring/`, or `~/.config/pomoring-dev/` with POMORING_ENV=dev.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("POMORING_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("POMORING_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("pomoring-dev")
            } else {
                base_dir.join("pomoring")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
