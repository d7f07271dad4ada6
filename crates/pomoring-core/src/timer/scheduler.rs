//! Periodic tick source abstraction.
//!
//! The engine never sleeps or spawns. It asks a [`Scheduler`] to start a
//! periodic source when the countdown runs and cancels it when the countdown
//! stops; whoever owns the source calls [`TimerEngine::tick`] on each period.
//!
//! [`TimerEngine::tick`]: super::TimerEngine::tick

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Identifies one armed periodic source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

pub trait Scheduler {
    /// Begin invoking the tick callback every `interval`.
    fn schedule(&mut self, interval: Duration) -> TickHandle;

    /// Stop the source behind `handle`. Unknown handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

#[derive(Debug, Default)]
struct ManualState {
    next_id: u64,
    armed: Option<(TickHandle, Duration)>,
    scheduled: usize,
    cancelled: usize,
}

/// Deterministic scheduler for tests and headless drivers.
///
/// Clones share state, so a test can hand one clone to the engine and keep
/// another to observe what the engine asked for.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.inner.borrow().armed.is_some()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.inner.borrow().armed.map(|(_, interval)| interval)
    }

    pub fn armed_handle(&self) -> Option<TickHandle> {
        self.inner.borrow().armed.map(|(handle, _)| handle)
    }

    /// Number of times a source was armed.
    pub fn scheduled_count(&self) -> usize {
        self.inner.borrow().scheduled
    }

    /// Number of times an armed source was cancelled.
    pub fn cancelled_count(&self) -> usize {
        self.inner.borrow().cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, interval: Duration) -> TickHandle {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let handle = TickHandle(state.next_id);
        state.armed = Some((handle, interval));
        state.scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let mut state = self.inner.borrow_mut();
        if state.armed.map(|(h, _)| h) == Some(handle) {
            state.armed = None;
            state.cancelled += 1;
        }
    }
}
