//! Loads every feed the dashboard shows and pairs it with a derived theme.

use crate::config::toml_config::DashConfig;
use crate::core::feed_loader::{FeedDescriptor, FeedLoader, FeedResult, FeedSource};
use crate::core::theme::{SceneInputs, StyleBundle, ThemeDeriver, ThemeTable};
use crate::domain::model::{
    AutomationStatus, CommunityFeed, CuratedEntry, CuratedFeed, Headline, LegacyData, Listing,
    NewsFeed, PriceFeed, WeatherReport, WorkflowRun,
};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::path::PathBuf;

pub const MAX_HEADLINES: usize = 5;
pub const MAX_WORKFLOWS: usize = 5;
pub const MAX_AGENTS: usize = 3;
pub const MAX_LISTINGS: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardFeeds {
    pub weather: FeedResult<WeatherReport>,
    pub news: FeedResult<NewsFeed>,
    pub prices: FeedResult<PriceFeed>,
    pub curated: FeedResult<CuratedFeed>,
    pub community: FeedResult<CommunityFeed>,
    pub workflow_runs: FeedResult<Vec<WorkflowRun>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub name: String,
    pub source: FeedSource,
    pub ok: bool,
    pub path: Option<PathBuf>,
}

impl<T> From<&FeedResult<T>> for Provenance {
    fn from(result: &FeedResult<T>) -> Self {
        Self {
            name: result.name.clone(),
            source: result.source.clone(),
            ok: result.ok,
            path: result.path.clone(),
        }
    }
}

impl DashboardFeeds {
    pub fn load<S: Storage>(loader: &FeedLoader<S>, config: &DashConfig) -> Self {
        let feeds = &config.feeds;

        let legacy = config.legacy_path().map(|path| {
            loader.load(&FeedDescriptor::new("legacy", path, LegacyData::default()))
        });
        let legacy = legacy.map(|result| result.value).unwrap_or_default();

        let news = loader
            .load(&feeds.news.descriptor("news", NewsFeed::default()))
            .map(|feed| merge_news(feed, &legacy));
        let curated = loader
            .load(&feeds.curated.descriptor("curated", CuratedFeed::default()))
            .map(|feed| merge_curated(feed, &legacy));

        let loaded = Self {
            weather: loader.load(&feeds.weather.descriptor("weather", WeatherReport::default())),
            news,
            prices: loader.load(&feeds.prices.descriptor("prices", PriceFeed::default())),
            curated,
            community: loader.load(&feeds.community.descriptor("community", CommunityFeed::default())),
            workflow_runs: loader.load(&feeds.workflow_runs.descriptor("workflow_runs", Vec::new())),
        };

        let defaulted: Vec<String> = loaded
            .provenance()
            .into_iter()
            .filter(|p| !p.ok)
            .map(|p| p.name)
            .collect();
        if defaulted.is_empty() {
            tracing::info!("All feeds loaded");
        } else {
            tracing::warn!("Feeds using defaults: {}", defaulted.join(", "));
        }
        loaded
    }

    pub fn provenance(&self) -> Vec<Provenance> {
        vec![
            Provenance::from(&self.weather),
            Provenance::from(&self.news),
            Provenance::from(&self.prices),
            Provenance::from(&self.curated),
            Provenance::from(&self.community),
            Provenance::from(&self.workflow_runs),
        ]
    }

    pub fn headlines(&self) -> &[Headline] {
        capped(self.news.value.headlines.as_deref().unwrap_or_default(), MAX_HEADLINES)
    }

    pub fn featured_workflows(&self) -> &[CuratedEntry] {
        capped(
            self.curated.value.featured_workflows.as_deref().unwrap_or_default(),
            MAX_WORKFLOWS,
        )
    }

    pub fn featured_agents(&self) -> &[CuratedEntry] {
        capped(
            self.curated.value.featured_agents.as_deref().unwrap_or_default(),
            MAX_AGENTS,
        )
    }

    pub fn listings(&self) -> &[Listing] {
        capped(&self.community.value.community_listings, MAX_LISTINGS)
    }

    pub fn automation_status(&self) -> AutomationStatus {
        AutomationStatus::from_runs(&self.workflow_runs.value)
    }

    /// Theme inputs from the weather feed plus the caller's clock.
    pub fn scene_inputs_at<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> SceneInputs {
        let weather = &self.weather.value;
        let temperature = weather
            .temperature
            .as_ref()
            .map(|reading| reading.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let condition = weather.condition.clone().unwrap_or_else(|| "unknown".to_string());
        SceneInputs::at(time, temperature, condition)
    }
}

fn capped<T>(items: &[T], max: usize) -> &[T] {
    &items[..items.len().min(max)]
}

/// Fills fields the current news document lacks from the legacy document.
/// A present field is never replaced.
pub fn merge_news(mut current: NewsFeed, legacy: &LegacyData) -> NewsFeed {
    if current.headlines.is_none() {
        current.headlines = legacy.nytimes_headlines.clone();
    }
    if current.last_updated.is_none() {
        current.last_updated = legacy.last_updated.clone();
    }
    current
}

/// Same rule as [`merge_news`], against the legacy `glif` section.
pub fn merge_curated(mut current: CuratedFeed, legacy: &LegacyData) -> CuratedFeed {
    let Some(old) = legacy.glif.as_ref() else {
        return current;
    };
    if current.featured_workflows.is_none() {
        current.featured_workflows = old.featured_workflows.clone();
    }
    if current.featured_agents.is_none() {
        current.featured_agents = old.featured_agents.clone();
    }
    if current.last_updated.is_none() {
        current.last_updated = old.last_updated.clone();
    }
    current
}

/// Builds the deriver for `config`: the configured table, resolved against
/// the base directory, or the built-in one.
pub fn theme_deriver(config: &DashConfig) -> Result<ThemeDeriver> {
    let Some(table) = &config.theme.table else {
        return Ok(ThemeDeriver::default());
    };
    let path = config.base_dir().join(table);
    tracing::info!("Loading theme table from {}", path.display());
    Ok(ThemeDeriver::new(ThemeTable::from_file(&path)?))
}

/// Feeds, their summary and the derived theme: what presentation needs.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub provenance: Vec<Provenance>,
    pub feeds: DashboardFeeds,
    pub automation: AutomationStatus,
    pub style: StyleBundle,
}

impl Dashboard {
    pub fn compose<Tz: TimeZone>(
        feeds: DashboardFeeds,
        deriver: &ThemeDeriver,
        time: &DateTime<Tz>,
    ) -> Self {
        let style = deriver.derive(&feeds.scene_inputs_at(time));
        Self {
            provenance: feeds.provenance(),
            automation: feeds.automation_status(),
            feeds,
            style,
        }
    }
}
