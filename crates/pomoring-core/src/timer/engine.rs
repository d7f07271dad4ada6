//! Timer engine implementation.
//!
//! The timer engine is a one-second countdown state machine. It does not use
//! internal threads - it arms a [`Scheduler`] while running and the owner of
//! that scheduler calls `tick()` once per period.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   ^        |
//!   +--------+  (reset, switch_mode, completion)
//! ```
//!
//! Commands that do not apply in the current state are ignored and return
//! `None`; they never error.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings.durations(), scheduler);
//! engine.subscribe(|event| println!("{event:?}"));
//! engine.start();
//! // Once per second while running:
//! engine.tick();
//! ```

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::mode::Mode;
use super::scheduler::{Scheduler, TickHandle};
use crate::events::Event;
use crate::settings::Durations;

/// Period of one tick.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

/// Token returned by [`TimerEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Event)>;

/// Core timer engine.
///
/// Holds its own copy of the durations; hand it a fresh copy with
/// [`set_durations`](Self::set_durations) when the settings change.
pub struct TimerEngine {
    mode: Mode,
    status: TimerStatus,
    remaining_secs: u64,
    durations: Durations,
    scheduler: Box<dyn Scheduler>,
    tick_interval: Duration,
    /// Tick source armed by the last start/resume, if still live.
    armed: Option<TickHandle>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("remaining_secs", &self.remaining_secs)
            .field("durations", &self.durations)
            .field("armed", &self.armed)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl TimerEngine {
    /// Create an idle engine in `Work` mode with the full work duration.
    ///
    /// Durations outside their bounds are clamped.
    pub fn new(durations: Durations, scheduler: impl Scheduler + 'static) -> Self {
        let durations = durations.normalized();
        Self {
            mode: Mode::Work,
            status: TimerStatus::Idle,
            remaining_secs: durations.secs(Mode::Work),
            durations,
            scheduler: Box::new(scheduler),
            tick_interval: TICK_INTERVAL,
            armed: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Override the period requested from the scheduler.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    /// Handle of the currently armed tick source.
    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.armed
    }

    /// Full length of the current mode in seconds.
    pub fn total_secs(&self) -> u64 {
        self.durations.secs(self.mode)
    }

    /// 0.0 .. 1.0 elapsed fraction of the current mode.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (1.0 - self.remaining_secs as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            mode: self.mode,
            mode_label: self.mode.label().to_string(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register a callback for every emitted event.
    pub fn subscribe(&mut self, callback: impl FnMut(&Event) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Idle {
            debug!(status = ?self.status, "start ignored");
            return None;
        }
        self.status = TimerStatus::Running;
        self.arm();
        debug!(mode = ?self.mode, remaining_secs = self.remaining_secs, "timer started");
        Some(self.emit(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            debug!(status = ?self.status, "pause ignored");
            return None;
        }
        self.disarm();
        self.status = TimerStatus::Paused;
        Some(self.emit(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }))
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Paused {
            debug!(status = ?self.status, "resume ignored");
            return None;
        }
        self.status = TimerStatus::Running;
        self.arm();
        Some(self.emit(Event::TimerResumed {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }))
    }

    /// Stop and rewind the current mode. Valid from any state.
    pub fn reset(&mut self) -> Option<Event> {
        self.rewind();
        Some(self.emit(Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }))
    }

    /// Change mode and rewind to its full duration, idle.
    pub fn switch_mode(&mut self, mode: Mode) -> Option<Event> {
        let from = self.mode;
        self.mode = mode;
        self.rewind();
        debug!(?from, to = ?mode, "mode switched");
        Some(self.emit(Event::ModeSwitched {
            from,
            to: mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }))
    }

    /// Move to the mode that follows the current one.
    ///
    /// Work goes to a short break, either break goes back to work.
    pub fn auto_advance(&mut self) -> Option<Event> {
        self.switch_mode(self.mode.next())
    }

    /// Install new durations; the current mode restarts at its new length.
    pub fn set_durations(&mut self, durations: Durations) -> Option<Event> {
        self.durations = durations.normalized();
        self.reset()
    }

    /// Advance the countdown by one second.
    ///
    /// Emits `TimerUpdated` for the decrement. When this tick reaches zero
    /// the engine also stops, emits `TimerCompleted` and auto-advances; the
    /// completion event is returned in that case.
    pub fn tick(&mut self) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            let update = self.emit(Event::TimerUpdated {
                mode: self.mode,
                remaining_secs: self.remaining_secs,
                progress: self.progress(),
                at: Utc::now(),
            });
            if self.remaining_secs > 0 {
                return Some(update);
            }
        }
        Some(self.complete())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        self.disarm();
        self.status = TimerStatus::Idle;
        let finished = self.mode;
        info!(mode = finished.duration_key(), "countdown completed");
        let completed = self.emit(Event::TimerCompleted {
            mode: finished,
            at: Utc::now(),
        });
        self.auto_advance();
        completed
    }

    fn rewind(&mut self) {
        self.disarm();
        self.status = TimerStatus::Idle;
        self.remaining_secs = self.total_secs();
    }

    fn arm(&mut self) {
        self.disarm();
        self.armed = Some(self.scheduler.schedule(self.tick_interval));
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.armed.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn emit(&mut self, event: Event) -> Event {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
        event
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.disarm();
    }
}
