//! Shared CLI plumbing: config, logging, store wiring and text rendering.

use pomoring_core::storage::{Config, Database, KvStore, MemoryStore};
use pomoring_core::{Event, PersistenceError, SettingsStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type Store = SettingsStore<Box<dyn KvStore>>;

const BAR_WIDTH: usize = 20;

/// Load the app config, then install the tracing subscriber it describes.
///
/// Logs go to stderr so stdout stays parseable.
pub fn load_config_and_init_logging() -> Config {
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "using default config");
    }
    config
}

/// Open the preference store, falling back to memory if SQLite is unavailable.
pub fn open_store(config: &Config) -> Store {
    let kv: Box<dyn KvStore> = if config.storage.in_memory {
        Box::new(MemoryStore::new())
    } else {
        match Database::open() {
            Ok(db) => Box::new(db),
            Err(e) => {
                tracing::warn!(error = %e, "database unavailable, settings will not persist");
                Box::new(MemoryStore::new())
            }
        }
    };
    SettingsStore::open(kv)
}

/// Print a persistence failure as a warning; the change still applies in memory.
pub fn warn_unsaved(result: Result<(), PersistenceError>) {
    if let Err(e) = result {
        eprintln!("warning: settings not saved: {e}");
    }
}

/// `MM:SS`
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn progress_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// One human-readable line per event.
pub fn render(event: &Event) -> String {
    match event {
        Event::TimerStarted {
            mode,
            remaining_secs,
            ..
        } => format!("{mode} started  {}", format_clock(*remaining_secs)),
        Event::TimerPaused { remaining_secs, .. } => {
            format!("paused at {}", format_clock(*remaining_secs))
        }
        Event::TimerResumed { remaining_secs, .. } => {
            format!("resumed at {}", format_clock(*remaining_secs))
        }
        Event::TimerReset {
            mode,
            remaining_secs,
            ..
        } => format!("{mode} reset  {}", format_clock(*remaining_secs)),
        Event::ModeSwitched {
            to, remaining_secs, ..
        } => format!("-> {to}  {}", format_clock(*remaining_secs)),
        Event::TimerUpdated {
            remaining_secs,
            progress,
            ..
        } => format!(
            "{}  {} {:>3.0}%",
            format_clock(*remaining_secs),
            progress_bar(*progress),
            progress * 100.0
        ),
        Event::TimerCompleted { .. } => "Time is up!".to_string(),
        Event::StateSnapshot {
            status,
            mode_label,
            remaining_secs,
            progress,
            ..
        } => format!(
            "{mode_label} ({status:?})  {}  {}",
            format_clock(*remaining_secs),
            progress_bar(*progress)
        ),
    }
}
