//! User preferences: per-mode durations, font, accent color and theme.
//!
//! The serialized form of [`Settings`] is the persisted record:
//!
//! ```text
//! { "times": { "pomodoro": 25, "shortBreak": 5, "longBreak": 15 },
//!   "font": "font-kumbh", "color": "#F87070", "darkMode": true }
//! ```

mod store;

pub use store::{SettingsStore, SETTINGS_KEY};

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::Mode;

pub const WORK_BOUNDS: RangeInclusive<u32> = 1..=60;
pub const SHORT_BREAK_BOUNDS: RangeInclusive<u32> = 1..=30;
pub const LONG_BREAK_BOUNDS: RangeInclusive<u32> = 1..=60;

/// Minutes per mode.
///
/// Deserializing clamps each field into its bounds, and the engine clamps
/// whatever it is handed, so out-of-range minutes never reach a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct Durations {
    #[serde(rename = "pomodoro")]
    pub work: u32,
    #[serde(rename = "shortBreak")]
    pub short_break: u32,
    #[serde(rename = "longBreak")]
    pub long_break: u32,
}

impl Durations {
    /// Build durations from raw user input, clamping each value into its bounds.
    pub fn clamped(work: i64, short_break: i64, long_break: i64) -> Self {
        Self {
            work: clamp_minutes(work, Mode::Work),
            short_break: clamp_minutes(short_break, Mode::ShortBreak),
            long_break: clamp_minutes(long_break, Mode::LongBreak),
        }
    }

    /// The same durations with every field clamped into its bounds.
    pub fn normalized(self) -> Self {
        Self::clamped(
            i64::from(self.work),
            i64::from(self.short_break),
            i64::from(self.long_break),
        )
    }

    /// Overlay the usable fields of a stored `times` object onto the defaults.
    pub fn merged_from(times: &serde_json::Value) -> Self {
        let mut durations = Durations::default();
        for mode in Mode::ALL {
            match times.get(mode.duration_key()).and_then(serde_json::Value::as_i64) {
                Some(minutes) => durations.set_minutes(mode, minutes),
                None if times.get(mode.duration_key()).is_some() => {
                    tracing::warn!(field = mode.duration_key(), "ignoring malformed stored duration");
                }
                None => {}
            }
        }
        durations
    }

    pub fn bounds(mode: Mode) -> RangeInclusive<u32> {
        match mode {
            Mode::Work => WORK_BOUNDS,
            Mode::ShortBreak => SHORT_BREAK_BOUNDS,
            Mode::LongBreak => LONG_BREAK_BOUNDS,
        }
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    pub fn set_minutes(&mut self, mode: Mode, minutes: i64) {
        let value = clamp_minutes(minutes, mode);
        match mode {
            Mode::Work => self.work = value,
            Mode::ShortBreak => self.short_break = value,
            Mode::LongBreak => self.long_break = value,
        }
    }

    pub fn secs(&self, mode: Mode) -> u64 {
        u64::from(self.minutes(mode)) * 60
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: 25,
            short_break: 5,
            long_break: 15,
        }
    }
}

impl From<serde_json::Value> for Durations {
    fn from(value: serde_json::Value) -> Self {
        Durations::merged_from(&value)
    }
}

pub(crate) fn clamp_minutes(value: i64, mode: Mode) -> u32 {
    let bounds = Durations::bounds(mode);
    let clamped = value.clamp(i64::from(*bounds.start()), i64::from(*bounds.end()));
    if clamped != value {
        tracing::debug!(mode = mode.duration_key(), value, clamped, "duration out of range, clamped");
    }
    // In range of u32 after the clamp above.
    clamped as u32
}

/// Typeface used by the countdown display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Font {
    #[default]
    #[serde(rename = "font-kumbh")]
    KumbhSans,
    #[serde(rename = "font-roboto")]
    RobotoSlab,
    #[serde(rename = "font-space")]
    SpaceMono,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::KumbhSans, Font::RobotoSlab, Font::SpaceMono];

    pub fn id(self) -> &'static str {
        match self {
            Font::KumbhSans => "kumbh-sans",
            Font::RobotoSlab => "roboto-slab",
            Font::SpaceMono => "space-mono",
        }
    }

    /// Stylesheet class, also the persisted value.
    pub fn class(self) -> &'static str {
        match self {
            Font::KumbhSans => "font-kumbh",
            Font::RobotoSlab => "font-roboto",
            Font::SpaceMono => "font-space",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Font::KumbhSans => "Kumbh Sans",
            Font::RobotoSlab => "Roboto Slab",
            Font::SpaceMono => "Space Mono",
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Font {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Font::ALL
            .into_iter()
            .find(|font| {
                [font.id(), font.class(), font.name()]
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| ValidationError::UnknownFont(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, uppercase.
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Accent color for the progress ring and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccentColor {
    #[default]
    #[serde(rename = "#F87070")]
    RedOrange,
    #[serde(rename = "#70F3F8")]
    Cyan,
    #[serde(rename = "#D881F8")]
    Purple,
}

impl AccentColor {
    pub const ALL: [AccentColor; 3] = [AccentColor::RedOrange, AccentColor::Cyan, AccentColor::Purple];

    pub fn id(self) -> &'static str {
        match self {
            AccentColor::RedOrange => "red-orange",
            AccentColor::Cyan => "cyan",
            AccentColor::Purple => "purple",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AccentColor::RedOrange => "Red-Orange",
            AccentColor::Cyan => "Cyan",
            AccentColor::Purple => "Purple",
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            AccentColor::RedOrange => Rgb::new(0xF8, 0x70, 0x70),
            AccentColor::Cyan => Rgb::new(0x70, 0xF3, 0xF8),
            AccentColor::Purple => Rgb::new(0xD8, 0x81, 0xF8),
        }
    }

    pub fn hex(self) -> String {
        self.rgb().hex()
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccentColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AccentColor::ALL
            .into_iter()
            .find(|color| {
                color.id().eq_ignore_ascii_case(wanted)
                    || color.name().eq_ignore_ascii_case(wanted)
                    || color.hex().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ValidationError::UnknownColor(s.to_string()))
    }
}

/// The persisted preference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct Settings {
    #[serde(rename = "times")]
    pub durations: Durations,
    pub font: Font,
    pub color: AccentColor,
    #[serde(rename = "darkMode")]
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            font: Font::default(),
            color: AccentColor::default(),
            dark_mode: true,
        }
    }
}

impl Settings {
    /// Overlay whatever fields of a stored record are usable onto the defaults.
    ///
    /// Fields that are missing, mistyped or unrecognized keep their default.
    /// Durations are merged one by one and clamped into bounds; extra fields
    /// are ignored.
    pub fn merged_from(value: &serde_json::Value) -> Self {
        let mut settings = Settings::default();

        if let Some(times) = value.get("times") {
            settings.durations = Durations::merged_from(times);
        }

        if let Some(raw) = value.get("font") {
            match raw.as_str().map(str::parse::<Font>) {
                Some(Ok(font)) => settings.font = font,
                _ => tracing::warn!(value = %raw, "ignoring unrecognized stored font"),
            }
        }

        if let Some(raw) = value.get("color") {
            match raw.as_str().map(str::parse::<AccentColor>) {
                Some(Ok(color)) => settings.color = color,
                _ => tracing::warn!(value = %raw, "ignoring unrecognized stored color"),
            }
        }

        if let Some(raw) = value.get("darkMode") {
            match raw.as_bool() {
                Some(dark_mode) => settings.dark_mode = dark_mode,
                None => tracing::warn!(value = %raw, "ignoring malformed stored darkMode"),
            }
        }

        settings
    }
}

impl From<serde_json::Value> for Settings {
    fn from(value: serde_json::Value) -> Self {
        Settings::merged_from(&value)
    }
}
