//! Command-line flags for the newsdesk terminal reader.

use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse news headlines from the terminal")]
pub struct Cli {
    /// RON config file; defaults to ./newsdesk.ron when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// News API key, overriding the config file
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log level (off, error, warn, info, debug, trace), overriding the config file
    #[arg(long)]
    pub log_level: Option<String>,
}
