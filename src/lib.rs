pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::DashConfig;

pub use core::{
    derive_theme, Dashboard, DashboardFeeds, FeedDescriptor, FeedLoader, FeedResult, FeedSource,
    SceneInputs, StyleBundle, ThemeDeriver,
};
pub use utils::error::{DashError, Result};
