use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value that feeds publish either as a JSON number or as free text
/// ("72", "—", "unknown").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl Reading {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Reading::Number(n) if n.is_finite() => Some(*n),
            Reading::Number(_) => None,
            Reading::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(n) => write!(f, "{}", n),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::Number(value)
    }
}

impl From<&str> for Reading {
    fn from(value: &str) -> Self {
        Reading::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub temperature: Option<Reading>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub humidity: Option<Reading>,
    #[serde(default)]
    pub feels_like: Option<Reading>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Default for WeatherReport {
    fn default() -> Self {
        Self {
            temperature: Some(Reading::Number(70.0)),
            condition: Some("Clear".to_string()),
            humidity: Some(Reading::from("—")),
            feels_like: Some(Reading::from("—")),
            location: None,
            last_updated: Some(NEVER.to_string()),
        }
    }
}

impl WeatherReport {
    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or("New York, NY")
    }
}

/// Placeholder timestamp for feeds that have never been refreshed.
pub const NEVER: &str = "Never";

/// Text fields that producers sometimes omit or publish as `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Headlines were published as bare strings before links were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Headline {
    Linked {
        #[serde(default, deserialize_with = "null_as_empty")]
        title: String,
        #[serde(default)]
        url: Option<String>,
    },
    Plain(String),
}

impl Headline {
    pub fn title(&self) -> &str {
        match self {
            Headline::Linked { title, .. } => title,
            Headline::Plain(title) => title,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Headline::Linked { url, .. } => url.as_deref().filter(|url| !url.is_empty()),
            Headline::Plain(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsFeed {
    #[serde(default)]
    pub headlines: Option<Vec<Headline>>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Default for NewsFeed {
    fn default() -> Self {
        Self {
            headlines: Some(Vec::new()),
            last_updated: Some(NEVER.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinQuote {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symbol: String,
    #[serde(default)]
    pub price: Option<Reading>,
    #[serde(default)]
    pub change_24h: Option<Reading>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
}

impl CoinQuote {
    pub fn change(&self) -> f64 {
        self.change_24h
            .as_ref()
            .and_then(Reading::as_f64)
            .unwrap_or(0.0)
    }

    /// Flat prices count as up.
    pub fn direction(&self) -> PriceDirection {
        if self.change() >= 0.0 {
            PriceDirection::Up
        } else {
            PriceDirection::Down
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFeed {
    #[serde(default)]
    pub coins: BTreeMap<String, CoinQuote>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self {
            coins: BTreeMap::new(),
            last_updated: Some(NEVER.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
}

impl CuratedEntry {
    pub const DESCRIPTION_LIMIT: usize = 80;

    pub fn short_description(&self) -> String {
        match self.description.as_deref() {
            Some(text) if !text.is_empty() => truncate_with_ellipsis(text, Self::DESCRIPTION_LIMIT),
            _ => "No description".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedFeed {
    #[serde(default)]
    pub featured_workflows: Option<Vec<CuratedEntry>>,
    #[serde(default)]
    pub featured_agents: Option<Vec<CuratedEntry>>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Default for CuratedFeed {
    fn default() -> Self {
        Self {
            featured_workflows: Some(Vec::new()),
            featured_agents: Some(Vec::new()),
            last_updated: Some(NEVER.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Listing {
    pub const DESCRIPTION_LIMIT: usize = 100;

    pub fn short_description(&self) -> Option<String> {
        self.description
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| truncate_with_ellipsis(text, Self::DESCRIPTION_LIMIT))
    }

    /// "type · date", skipping whichever is missing.
    pub fn meta_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.kind.as_deref(), self.date.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityFeed {
    #[serde(default)]
    pub community_listings: Vec<Listing>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Default for CommunityFeed {
    fn default() -> Self {
        Self {
            community_listings: Vec::new(),
            last_updated: Some(NEVER.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutomationStatus {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Whole percent, 0 when there are no runs.
    pub success_rate: u32,
}

impl AutomationStatus {
    pub fn from_runs(runs: &[WorkflowRun]) -> Self {
        let total = runs.len();
        let succeeded = runs
            .iter()
            .filter(|run| run.conclusion.as_deref() == Some("success"))
            .count();
        let failed = runs
            .iter()
            .filter(|run| run.conclusion.as_deref() == Some("failure"))
            .count();
        let success_rate = if total > 0 {
            ((succeeded as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total,
            succeeded,
            failed,
            success_rate,
        }
    }
}

/// The retired single-file `data.json` layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyData {
    #[serde(default)]
    pub nytimes_headlines: Option<Vec<Headline>>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub glif: Option<LegacyCurated>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyCurated {
    #[serde(default)]
    pub featured_workflows: Option<Vec<CuratedEntry>>,
    #[serde(default)]
    pub featured_agents: Option<Vec<CuratedEntry>>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_accepts_numeric_and_text_readings() {
        let report: WeatherReport = serde_json::from_str(
            r#"{"temperature": 45, "condition": "Overcast", "humidity": "82", "feels_like": "unknown"}"#,
        )
        .unwrap();
        assert_eq!(report.temperature, Some(Reading::Number(45.0)));
        assert_eq!(report.humidity.as_ref().and_then(Reading::as_f64), Some(82.0));
        assert_eq!(report.feels_like.as_ref().and_then(Reading::as_f64), None);
        assert_eq!(report.location_or_default(), "New York, NY");
        assert_eq!(report.last_updated, None);
    }

    #[test]
    fn test_headline_formats() {
        let feed: NewsFeed = serde_json::from_str(
            r#"{"headlines": ["Old style", {"title": "New style", "url": "https://nyti.ms/x"}]}"#,
        )
        .unwrap();
        let headlines = feed.headlines.unwrap();
        assert_eq!(headlines[0].title(), "Old style");
        assert_eq!(headlines[0].url(), None);
        assert_eq!(headlines[1].title(), "New style");
        assert_eq!(headlines[1].url(), Some("https://nyti.ms/x"));
    }

    #[test]
    fn test_curated_description_truncation() {
        let mut entry = CuratedEntry {
            name: "glif".to_string(),
            url: "https://glif.app/x".to_string(),
            description: Some("x".repeat(81)),
            creator: Some("jamie".to_string()),
        };
        assert_eq!(entry.short_description(), format!("{}...", "x".repeat(80)));

        entry.description = Some("x".repeat(80));
        assert_eq!(entry.short_description(), "x".repeat(80));

        entry.description = None;
        assert_eq!(entry.short_description(), "No description");
    }

    #[test]
    fn test_listing_meta_line() {
        let listing: Listing = serde_json::from_str(
            r#"{"title": "Open call", "url": "https://rhizome.org/x", "type": "Opportunity", "date": "2025-01-10"}"#,
        )
        .unwrap();
        assert_eq!(listing.meta_line().as_deref(), Some("Opportunity · 2025-01-10"));
        assert_eq!(listing.short_description(), None);
    }

    #[test]
    fn test_automation_status() {
        let runs = vec![
            WorkflowRun { conclusion: Some("success".into()), ..Default::default() },
            WorkflowRun { conclusion: Some("success".into()), ..Default::default() },
            WorkflowRun { conclusion: Some("failure".into()), ..Default::default() },
        ];
        let status = AutomationStatus::from_runs(&runs);
        assert_eq!(status.total, 3);
        assert_eq!(status.failed, 1);
        assert_eq!(status.success_rate, 67);
        assert_eq!(AutomationStatus::from_runs(&[]).success_rate, 0);
    }

    #[test]
    fn test_coin_direction() {
        let quote: CoinQuote =
            serde_json::from_str(r#"{"name": "Bitcoin", "symbol": "BTC", "price": "64000.5"}"#)
                .unwrap();
        assert_eq!(quote.direction(), PriceDirection::Up);
        assert_eq!(quote.price.as_ref().and_then(Reading::as_f64), Some(64000.5));
    }

    #[test]
    fn test_coin_change_published_as_text() {
        let quote: CoinQuote =
            serde_json::from_str(r#"{"name": "Ether", "symbol": "ETH", "change_24h": "-1.5"}"#)
                .unwrap();
        assert_eq!(quote.change(), -1.5);
        assert_eq!(quote.direction(), PriceDirection::Down);

        let quote: CoinQuote = serde_json::from_str(r#"{"change_24h": null}"#).unwrap();
        assert_eq!(quote.change(), 0.0);
    }

    #[test]
    fn test_incomplete_items_still_parse() {
        let feed: NewsFeed =
            serde_json::from_str(r#"{"headlines": [{"title": "No link"}, {"title": null, "url": ""}]}"#)
                .unwrap();
        let headlines = feed.headlines.unwrap();
        assert_eq!(headlines[0].title(), "No link");
        assert_eq!(headlines[0].url(), None);
        assert_eq!(headlines[1].title(), "");
        assert_eq!(headlines[1].url(), None);

        let entry: CuratedEntry =
            serde_json::from_str(r#"{"name": null, "url": null, "creator": null}"#).unwrap();
        assert_eq!(entry.name, "");
        assert_eq!(entry.url, "");
        assert_eq!(entry.short_description(), "No description");

        let listing: Listing = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(listing.title, "");
    }
}
