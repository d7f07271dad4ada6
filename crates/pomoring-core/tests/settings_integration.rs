//! Integration tests for preference persistence.
//!
//! These verify the load/save round trip across store instances, the way a
//! fresh session sees what the previous one saved.

use pomoring_core::settings::SETTINGS_KEY;
use pomoring_core::{
    AccentColor, Database, Durations, Font, KvStore, ManualScheduler, MemoryStore, Mode, Settings,
    SettingsStore, TimerEngine, TimerStatus,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn font_strategy() -> impl Strategy<Value = Font> {
    prop_oneof![
        Just(Font::KumbhSans),
        Just(Font::RobotoSlab),
        Just(Font::SpaceMono)
    ]
}

fn color_strategy() -> impl Strategy<Value = AccentColor> {
    prop_oneof![
        Just(AccentColor::RedOrange),
        Just(AccentColor::Cyan),
        Just(AccentColor::Purple)
    ]
}

fn settings_strategy() -> impl Strategy<Value = Settings> {
    (
        1u32..=60,
        1u32..=30,
        1u32..=60,
        font_strategy(),
        color_strategy(),
        any::<bool>(),
    )
        .prop_map(|(work, short_break, long_break, font, color, dark_mode)| Settings {
            durations: Durations {
                work,
                short_break,
                long_break,
            },
            font,
            color,
            dark_mode,
        })
}

proptest! {
    #[test]
    fn save_then_load_round_trips(settings in settings_strategy()) {
        let mut store = SettingsStore::new(MemoryStore::new());
        store.replace(settings.clone()).unwrap();

        let reopened = SettingsStore::open(store.into_inner());
        prop_assert_eq!(reopened.settings(), &settings);
    }

    #[test]
    fn update_durations_always_lands_in_bounds(
        work in -1000i64..1000,
        short_break in -1000i64..1000,
        long_break in -1000i64..1000,
    ) {
        let mut store = SettingsStore::new(MemoryStore::new());
        store.update_durations(work, short_break, long_break).unwrap();
        let d = store.durations();
        prop_assert!(Durations::bounds(Mode::Work).contains(&d.work));
        prop_assert!(Durations::bounds(Mode::ShortBreak).contains(&d.short_break));
        prop_assert!(Durations::bounds(Mode::LongBreak).contains(&d.long_break));
    }
}

#[test]
fn empty_store_loads_defaults() {
    let store = SettingsStore::open(MemoryStore::new());
    let settings = store.settings();
    assert_eq!(settings.durations.work, 25);
    assert_eq!(settings.durations.short_break, 5);
    assert_eq!(settings.durations.long_break, 15);
    assert_eq!(settings.font, Font::ALL[0]);
    assert_eq!(settings.color, AccentColor::ALL[0]);
    assert!(settings.dark_mode);
}

#[test]
fn clamping_matches_documented_examples() {
    let mut store = SettingsStore::open(MemoryStore::new());
    store.update_durations(0, 5, 15).unwrap();
    assert_eq!(store.durations().work, 1);
    store.update_durations(999, 5, 15).unwrap();
    assert_eq!(store.durations().work, 60);
}

#[test]
fn sqlite_file_persists_across_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pomoring.db");

    {
        let mut store = SettingsStore::open(Database::open_at(&path).unwrap());
        store.update_durations(45, 10, 20).unwrap();
        store.update_font(Font::RobotoSlab).unwrap();
        store.update_color(AccentColor::Purple).unwrap();
        store.update_dark_mode(false).unwrap();
    }

    let store = SettingsStore::open(Database::open_at(&path).unwrap());
    assert_eq!(
        store.settings(),
        &Settings {
            durations: Durations {
                work: 45,
                short_break: 10,
                long_break: 20,
            },
            font: Font::RobotoSlab,
            color: AccentColor::Purple,
            dark_mode: false,
        }
    );
}

#[test]
fn record_from_older_version_is_merged() {
    let mut kv = MemoryStore::new();
    kv.set(
        SETTINGS_KEY,
        r##"{"times":{"pomodoro":40,"shortBreak":5,"longBreak":15},"font":"font-roboto","color":"#d881f8"}"##,
    )
    .unwrap();

    let store = SettingsStore::open(kv);
    assert_eq!(store.durations().work, 40);
    assert_eq!(store.settings().font, Font::RobotoSlab);
    assert_eq!(store.settings().color, AccentColor::Purple);
    assert!(store.settings().dark_mode);
}

#[test]
fn fresh_session_starts_idle_at_saved_work_duration() {
    let mut store = SettingsStore::open(MemoryStore::new());
    store.update_durations(30, 5, 15).unwrap();

    let store = SettingsStore::open(store.into_inner());
    let engine = TimerEngine::new(store.durations(), ManualScheduler::new());
    assert_eq!(engine.mode(), Mode::Work);
    assert_eq!(engine.status(), TimerStatus::Idle);
    assert_eq!(engine.remaining_secs(), 30 * 60);
}

#[test]
fn switching_modes_does_not_touch_storage() {
    let store = SettingsStore::open(MemoryStore::new());
    let mut engine = TimerEngine::new(store.durations(), ManualScheduler::new());
    engine.switch_mode(Mode::ShortBreak);
    engine.switch_mode(Mode::LongBreak);
    assert!(store.kv().is_empty());
}
