use crate::config::toml_config::{DashConfig, LogFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vibe-dash")]
#[command(about = "Loads dashboard feeds and derives the adaptive theme")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory feed paths are resolved against (overrides the config file)
    #[arg(long, global = true)]
    pub base_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Derive a theme; omitted clock inputs come from the local time
    Theme {
        #[arg(long, allow_negative_numbers = true)]
        hour: Option<i32>,

        #[arg(long, allow_negative_numbers = true)]
        month: Option<i32>,

        #[arg(long, allow_negative_numbers = true)]
        day_of_year: Option<i32>,

        /// Temperature in °F; anything unparsable counts as unknown
        #[arg(long, default_value = "unknown", allow_hyphen_values = true)]
        temperature: String,

        #[arg(long, default_value = "unknown")]
        condition: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Css)]
        format: OutputFormat,
    },
    /// Load every feed and report where each one came from
    Feeds,
    /// Load the feeds and derive the theme from the weather feed
    Bundle {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Css,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl CliArgs {
    /// Applies command line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut DashConfig) {
        if let Some(base_dir) = &self.base_dir {
            config.base_dir = Some(base_dir.clone());
        }
        if let Some(format) = self.log_format {
            config.logging.format = format.into();
        }
    }
}
