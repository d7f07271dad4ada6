//! # Pomoring Core Library
//!
//! Core logic of the Pomoring Pomodoro timer: a three-mode countdown state
//! machine and the user preferences it reads its durations from. Rendering is
//! left to whatever front end subscribes to the engine's events; the CLI in
//! this workspace is one such front end.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a one-second countdown state machine. It arms an
//!   injected [`Scheduler`] while running; the scheduler's owner calls `tick()`
//! - **Settings**: durations, font, accent color and theme, written through to
//!   a key-value store on every change
//! - **Storage**: SQLite key-value table, an in-memory fallback, and the TOML
//!   application config
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SettingsStore`]: Preference ownership and persistence
//! - [`KvStore`]: Persistence seam, implemented by [`Database`] and [`MemoryStore`]
//! - [`Config`]: Application configuration management

pub mod timer;
pub mod settings;
pub mod storage;
pub mod events;
pub mod error;

pub use timer::{Mode, ManualScheduler, Scheduler, TickHandle, TimerEngine, TimerStatus};
pub use settings::{AccentColor, Durations, Font, Rgb, Settings, SettingsStore};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use events::Event;
pub use error::{ConfigError, PersistenceError, ValidationError};
