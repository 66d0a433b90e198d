pub mod dashboard;
pub mod feed_loader;
pub mod stylesheet;
pub mod theme;

pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
pub use dashboard::{Dashboard, DashboardFeeds, Provenance};
pub use feed_loader::{FeedDescriptor, FeedLoader, FeedResult, FeedSource};
pub use theme::{derive_theme, SceneInputs, StyleBundle, ThemeDeriver};
