//! Integration tests for the countdown state machine.
//!
//! These drive the engine through a manual scheduler, one tick per
//! simulated second, and check the behaviour a front end relies on.

use std::cell::RefCell;
use std::rc::Rc;

use pomoring_core::{Durations, Event, ManualScheduler, Mode, TimerEngine, TimerStatus};
use proptest::prelude::*;

fn durations_strategy() -> impl Strategy<Value = Durations> {
    (1u32..=60, 1u32..=30, 1u32..=60).prop_map(|(work, short_break, long_break)| Durations {
        work,
        short_break,
        long_break,
    })
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Work),
        Just(Mode::ShortBreak),
        Just(Mode::LongBreak)
    ]
}

/// Tick while the scheduler says a source is armed, up to `limit` ticks.
fn drive(engine: &mut TimerEngine, scheduler: &ManualScheduler, limit: u64) -> u64 {
    let mut ticks = 0;
    while scheduler.is_armed() && ticks < limit {
        engine.tick();
        ticks += 1;
    }
    ticks
}

fn completions(log: &Rc<RefCell<Vec<Event>>>) -> Vec<Mode> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::TimerCompleted { mode, .. } => Some(*mode),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn switch_mode_sets_full_duration(durations in durations_strategy(), mode in mode_strategy()) {
        let mut engine = TimerEngine::new(durations, ManualScheduler::new());
        engine.switch_mode(mode);
        prop_assert_eq!(engine.remaining_secs(), u64::from(durations.minutes(mode)) * 60);
        prop_assert_eq!(engine.status(), TimerStatus::Idle);
        prop_assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn completes_after_exactly_full_duration(durations in durations_strategy(), mode in mode_strategy()) {
        let scheduler = ManualScheduler::new();
        let mut engine = TimerEngine::new(durations, scheduler.clone());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        engine.switch_mode(mode);
        engine.start();
        let total = durations.secs(mode);

        for _ in 0..total - 1 {
            engine.tick();
        }
        prop_assert_eq!(engine.status(), TimerStatus::Running);
        prop_assert_eq!(engine.remaining_secs(), 1);
        prop_assert!(completions(&log).is_empty());

        engine.tick();
        prop_assert_eq!(engine.status(), TimerStatus::Idle);
        prop_assert_eq!(completions(&log), vec![mode]);
        prop_assert!(!scheduler.is_armed());
    }

    #[test]
    fn progress_is_monotonic_within_a_session(work in 1u32..=5) {
        let durations = Durations { work, ..Durations::default() };
        let mut engine = TimerEngine::new(durations, ManualScheduler::new());
        engine.start();

        let total = durations.secs(Mode::Work);
        let mut previous = engine.progress();
        prop_assert_eq!(previous, 0.0);
        for _ in 0..total - 1 {
            engine.tick();
            let current = engine.progress();
            prop_assert!(current >= previous);
            prop_assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
        // The last tick before completion is one second short of the end.
        prop_assert!((previous - (1.0 - 1.0 / total as f64)).abs() < 1e-9);
    }

    #[test]
    fn pause_resume_preserves_remaining(elapsed in 0u64..1499) {
        let scheduler = ManualScheduler::new();
        let mut engine = TimerEngine::new(Durations::default(), scheduler.clone());
        engine.start();
        for _ in 0..elapsed {
            engine.tick();
        }
        let before = engine.remaining_secs();

        engine.pause();
        // Ticks that arrive while paused are dropped.
        engine.tick();
        engine.resume();
        prop_assert_eq!(engine.remaining_secs(), before);

        engine.tick();
        prop_assert_eq!(engine.remaining_secs(), before - 1);
    }
}

#[test]
fn auto_advance_alternates_work_and_short_break() {
    let durations = Durations {
        work: 1,
        short_break: 1,
        long_break: 1,
    };
    let scheduler = ManualScheduler::new();
    let mut engine = TimerEngine::new(durations, scheduler.clone());
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut visited = vec![engine.mode()];
    for _ in 0..6 {
        engine.start();
        assert_eq!(drive(&mut engine, &scheduler, 120), 60);
        visited.push(engine.mode());
    }

    assert_eq!(
        visited,
        [
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
            Mode::ShortBreak,
            Mode::Work,
        ]
    );
    assert!(!completions(&log).contains(&Mode::LongBreak));
}

#[test]
fn long_break_is_only_entered_manually_and_returns_to_work() {
    let scheduler = ManualScheduler::new();
    let mut engine = TimerEngine::new(
        Durations {
            long_break: 1,
            ..Durations::default()
        },
        scheduler.clone(),
    );
    engine.switch_mode(Mode::LongBreak);
    engine.start();
    drive(&mut engine, &scheduler, 120);

    assert_eq!(engine.mode(), Mode::Work);
    assert_eq!(engine.remaining_secs(), 25 * 60);
    assert_eq!(engine.status(), TimerStatus::Idle);
}

#[test]
fn completed_session_must_be_started_again() {
    let scheduler = ManualScheduler::new();
    let mut engine = TimerEngine::new(
        Durations {
            work: 1,
            ..Durations::default()
        },
        scheduler.clone(),
    );
    engine.start();
    drive(&mut engine, &scheduler, 120);

    assert_eq!(scheduler.scheduled_count(), 1);
    assert_eq!(scheduler.cancelled_count(), 1);
    assert!(engine.tick().is_none());
    assert!(engine.start().is_some());
    assert_eq!(scheduler.scheduled_count(), 2);
}
