use tracing::{debug, info, warn};

use super::{AccentColor, Durations, Font, Settings};
use crate::error::PersistenceError;
use crate::storage::KvStore;

/// Key under which the whole preference record is stored.
pub const SETTINGS_KEY: &str = "pomodoroSettings";

/// Owner of the user's [`Settings`].
///
/// Every mutation is applied in memory first and then written through to the
/// backing [`KvStore`]. A failed write is returned to the caller as a
/// warning; the in-memory value stays updated.
#[derive(Debug)]
pub struct SettingsStore<S> {
    kv: S,
    settings: Settings,
}

impl<S: KvStore> SettingsStore<S> {
    /// Wrap a store without reading from it. Settings start at their defaults.
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            settings: Settings::default(),
        }
    }

    /// Wrap a store and load any previously saved settings.
    pub fn open(kv: S) -> Self {
        let mut store = Self::new(kv);
        store.settings = store.load();
        store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn durations(&self) -> Durations {
        self.settings.durations
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Read the saved record, merged over the defaults.
    ///
    /// Never fails: unreadable storage or malformed data yields defaults.
    pub fn load(&self) -> Settings {
        let raw = match self.kv.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved settings, using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!(error = %e, "failed to read settings, using defaults");
                return Settings::default();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) if value.is_object() => Settings::merged_from(&value),
            Ok(_) | Err(_) => {
                warn!("saved settings are not a JSON object, using defaults");
                Settings::default()
            }
        }
    }

    /// Reload from storage, replacing the in-memory settings.
    pub fn reload(&mut self) -> &Settings {
        self.settings = self.load();
        &self.settings
    }

    /// Write the full current snapshot.
    ///
    /// # Errors
    /// Returns the storage failure. The in-memory settings are unaffected.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&self.settings)?;
        self.kv.set(SETTINGS_KEY, &json).inspect_err(|e| {
            warn!(error = %e, "failed to persist settings");
        })
    }

    /// Replace the whole record and save it.
    ///
    /// # Errors
    /// Returns the storage failure; the new settings are kept in memory.
    pub fn replace(&mut self, settings: Settings) -> Result<(), PersistenceError> {
        self.settings = settings;
        self.save()
    }

    /// Clamp and store new durations, in minutes.
    ///
    /// # Errors
    /// Returns the storage failure; the clamped durations are kept in memory.
    pub fn update_durations(
        &mut self,
        work: i64,
        short_break: i64,
        long_break: i64,
    ) -> Result<(), PersistenceError> {
        self.settings.durations = Durations::clamped(work, short_break, long_break);
        info!(durations = ?self.settings.durations, "durations updated");
        self.save()
    }

    /// # Errors
    /// Returns the storage failure; the font is kept in memory.
    pub fn update_font(&mut self, font: Font) -> Result<(), PersistenceError> {
        self.settings.font = font;
        info!(font = font.class(), "font updated");
        self.save()
    }

    /// # Errors
    /// Returns the storage failure; the color is kept in memory.
    pub fn update_color(&mut self, color: AccentColor) -> Result<(), PersistenceError> {
        self.settings.color = color;
        info!(color = %color.hex(), "color updated");
        self.save()
    }

    /// # Errors
    /// Returns the storage failure; the flag is kept in memory.
    pub fn update_dark_mode(&mut self, dark_mode: bool) -> Result<(), PersistenceError> {
        self.settings.dark_mode = dark_mode;
        info!(dark_mode, "theme updated");
        self.save()
    }
}
