use clap::{Parser, Subcommand};

mod commands;
mod common;
mod scheduler;

#[derive(Parser)]
#[command(name = "pomoring", version, about = "Pomoring CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Timer preferences (durations, font, color, theme)
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Application configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = common::load_config_and_init_logging();

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action, &config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dark_mode_takes_a_boolish_value() {
        for (raw, expected) in [("off", false), ("false", false), ("on", true), ("yes", true)] {
            let cli = Cli::try_parse_from(["pomoring", "settings", "dark-mode", raw]).unwrap();
            match cli.command {
                Commands::Settings {
                    action: commands::settings::SettingsAction::DarkMode { enabled },
                } => assert_eq!(enabled, expected, "{raw}"),
                _ => panic!("parsed into the wrong subcommand"),
            }
        }
    }
}
