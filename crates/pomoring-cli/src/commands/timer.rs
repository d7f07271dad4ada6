use std::error::Error;

use clap::Subcommand;
use pomoring_core::storage::Config;
use pomoring_core::{
    AccentColor, Event, Font, ManualScheduler, Mode, TimerEngine, TimerStatus,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::settings::print_settings;
use crate::common::{open_store, render, warn_unsaved, Store};
use crate::scheduler::IntervalScheduler;

const HELP: &str = "\
commands:
  start | pause | resume | toggle | reset
  mode <pomodoro|shortBreak|longBreak>
  durations <work> <short> <long>     minutes, clamped to bounds
  font <kumbh-sans|roboto-slab|space-mono>
  color <red-orange|cyan|purple>
  theme <dark|light>
  status | help | quit";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground, reading commands from stdin
    Run {
        /// Mode to begin in (pomodoro, shortBreak, longBreak)
        #[arg(long)]
        mode: Option<Mode>,
        /// Start counting immediately
        #[arg(long)]
        start: bool,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the state a fresh session starts in
    Status {
        #[arg(long)]
        mode: Option<Mode>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// One line typed into a running session.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Start,
    Pause,
    Resume,
    Toggle,
    Reset,
    Mode(Mode),
    Durations(i64, i64, i64),
    Font(Font),
    Color(AccentColor),
    Theme(bool),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Blank lines parse to `None`.
    fn parse(line: &str) -> Result<Option<Command>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("start", []) => Command::Start,
            ("pause", []) => Command::Pause,
            ("resume", []) => Command::Resume,
            ("toggle", []) | ("t", []) => Command::Toggle,
            ("reset", []) => Command::Reset,
            ("status", []) => Command::Status,
            ("help", []) | ("?", []) => Command::Help,
            ("quit", []) | ("exit", []) | ("q", []) => Command::Quit,
            ("mode", [mode]) => Command::Mode(mode.parse().map_err(|e| format!("{e}"))?),
            ("font", [font]) => Command::Font(font.parse().map_err(|e| format!("{e}"))?),
            ("color", [color]) => Command::Color(color.parse().map_err(|e| format!("{e}"))?),
            ("theme", [theme]) => match theme.to_ascii_lowercase().as_str() {
                "dark" => Command::Theme(true),
                "light" => Command::Theme(false),
                other => return Err(format!("unknown theme '{other}' (expected dark or light)")),
            },
            ("durations", [work, short, long]) => {
                let minutes = |raw: &str| {
                    raw.parse::<i64>()
                        .map_err(|_| format!("'{raw}' is not a whole number of minutes"))
                };
                Command::Durations(minutes(*work)?, minutes(*short)?, minutes(*long)?)
            }
            _ => return Err(format!("unrecognized command '{}', try 'help'", line.trim())),
        };
        Ok(Some(command))
    }
}

fn print_event(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("error: cannot encode event: {e}"),
        }
    } else {
        println!("{}", render(event));
    }
}

fn apply(command: Command, engine: &mut TimerEngine, store: &mut Store, json: bool) {
    match command {
        Command::Start => {
            engine.start();
        }
        Command::Pause => {
            engine.pause();
        }
        Command::Resume => {
            engine.resume();
        }
        Command::Toggle => {
            match engine.status() {
                TimerStatus::Idle => engine.start(),
                TimerStatus::Running => engine.pause(),
                TimerStatus::Paused => engine.resume(),
            };
        }
        Command::Reset => {
            engine.reset();
        }
        Command::Mode(mode) => {
            engine.switch_mode(mode);
        }
        Command::Durations(work, short, long) => {
            warn_unsaved(store.update_durations(work, short, long));
            engine.set_durations(store.durations());
        }
        Command::Font(font) => {
            warn_unsaved(store.update_font(font));
            print_settings(store.settings(), json);
        }
        Command::Color(color) => {
            warn_unsaved(store.update_color(color));
            print_settings(store.settings(), json);
        }
        Command::Theme(dark_mode) => {
            warn_unsaved(store.update_dark_mode(dark_mode));
            print_settings(store.settings(), json);
        }
        Command::Status => print_event(&engine.snapshot(), json),
        Command::Help => eprintln!("{HELP}"),
        Command::Quit => {}
    }
}

async fn run_interactive(
    config: &Config,
    mode: Option<Mode>,
    autostart: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(config);
    let (scheduler, mut ticks) = IntervalScheduler::new();
    let mut engine =
        TimerEngine::new(store.durations(), scheduler).with_tick_interval(config.tick_interval());
    engine.subscribe(move |event| print_event(event, json));

    match mode {
        Some(mode) => {
            engine.switch_mode(mode);
        }
        None => print_event(&engine.snapshot(), json),
    }
    if autostart {
        engine.start();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        // With no more input, keep going only while a countdown is live.
        if !stdin_open && engine.status() != TimerStatus::Running {
            break;
        }

        tokio::select! {
            Some(handle) = ticks.recv() => {
                if engine.tick_handle() == Some(handle) {
                    engine.tick();
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(None) => stdin_open = false,
                    Ok(Some(line)) => match Command::parse(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => apply(command, &mut engine, &mut store, json),
                        Ok(None) => {}
                        Err(e) => eprintln!("{e}"),
                    },
                    // The offending line is consumed; keep reading after it.
                    Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                        eprintln!("skipping unreadable input line: {e}");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin failed, no more commands will be read");
                        stdin_open = false;
                    }
                }
            }
            else => break,
        }
    }

    tracing::debug!(status = ?engine.status(), "session ended");
    Ok(())
}

pub fn run(action: TimerAction, config: &Config) -> Result<(), Box<dyn Error>> {
    match action {
        TimerAction::Run { mode, start, json } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let result = runtime.block_on(run_interactive(config, mode, start, json));
            runtime.shutdown_background();
            result
        }
        TimerAction::Status { mode, json } => {
            let store = open_store(config);
            let mut engine = TimerEngine::new(store.durations(), ManualScheduler::new());
            if let Some(mode) = mode {
                engine.switch_mode(mode);
            }
            let snapshot = engine.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", render(&snapshot));
            }
            Ok(())
        }
    }
}
