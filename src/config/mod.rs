#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliArgs, Command, OutputFormat};
pub use toml_config::{DashConfig, FeedPaths, FeedsConfig, LogFormat};
