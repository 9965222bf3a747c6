//! Installs the global logger for the newsdesk binary.
//!
//! The reader prints to the same terminal, so logs go to `./newsdesk.log`
//! unless `--log terminal` or `--log both` asks otherwise. Only records from
//! the newsdesk crates pass; HTTP stack chatter is filtered out.

use std::fs::File;

use clap::ValueEnum;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

const LOG_FILE: &str = "./newsdesk.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    File,
    Terminal,
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("newsdesk")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(LOG_FILE) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            // No logger is installed yet, so this is the only place to say so.
            Err(err) => eprintln!("newsdesk: cannot open {LOG_FILE}: {err}; file logging off"),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}
