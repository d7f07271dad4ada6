use std::error::Error;

use clap::{builder::BoolishValueParser, ArgAction, Subcommand};
use pomoring_core::storage::Config;
use pomoring_core::{AccentColor, Font, Mode, Settings};

use crate::common::{open_store, warn_unsaved};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current preferences
    Show {
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set durations in minutes; omitted values keep their current setting
    Durations {
        #[arg(long, allow_negative_numbers = true)]
        work: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        short: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        long: Option<i64>,
    },
    /// Choose the display font (kumbh-sans, roboto-slab, space-mono)
    Font { font: Font },
    /// Choose the accent color (red-orange, cyan, purple, or its hex)
    Color { color: AccentColor },
    /// Turn dark mode on or off
    DarkMode {
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        enabled: bool,
    },
}

pub fn print_settings(settings: &Settings, json: bool) {
    if json {
        match serde_json::to_string(settings) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("error: cannot encode settings: {e}"),
        }
        return;
    }

    for mode in Mode::ALL {
        let bounds = pomoring_core::Durations::bounds(mode);
        println!(
            "{:<12} {:>2} min  ({}-{})",
            mode.label(),
            settings.durations.minutes(mode),
            bounds.start(),
            bounds.end()
        );
    }
    println!("{:<12} {}", "Font", settings.font);
    println!("{:<12} {} {}", "Color", settings.color, settings.color.hex());
    println!(
        "{:<12} {}",
        "Theme",
        if settings.dark_mode { "dark" } else { "light" }
    );
}

pub fn run(action: SettingsAction, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(config);

    match action {
        SettingsAction::Show { json } => {
            print_settings(store.settings(), json);
            return Ok(());
        }
        SettingsAction::Durations { work, short, long } => {
            let current = store.durations();
            warn_unsaved(store.update_durations(
                work.unwrap_or_else(|| i64::from(current.work)),
                short.unwrap_or_else(|| i64::from(current.short_break)),
                long.unwrap_or_else(|| i64::from(current.long_break)),
            ));
        }
        SettingsAction::Font { font } => warn_unsaved(store.update_font(font)),
        SettingsAction::Color { color } => warn_unsaved(store.update_color(color)),
        SettingsAction::DarkMode { enabled } => warn_unsaved(store.update_dark_mode(enabled)),
    }

    print_settings(store.settings(), false);
    Ok(())
}
