use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Mode, TimerStatus};

/// Every state change of the timer produces an Event.
/// Presentation layers subscribe to them; they never reach into the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed.
    TimerUpdated {
        mode: Mode,
        remaining_secs: u64,
        /// Elapsed fraction of the current mode, 0.0 ..= 1.0.
        progress: f64,
        at: DateTime<Utc>,
    },
    /// The countdown of `mode` reached zero.
    TimerCompleted {
        mode: Mode,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        mode: Mode,
        mode_label: String,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, as used in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::TimerReset { .. } => "timer_reset",
            Event::ModeSwitched { .. } => "mode_switched",
            Event::TimerUpdated { .. } => "timer_updated",
            Event::TimerCompleted { .. } => "timer_completed",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}
