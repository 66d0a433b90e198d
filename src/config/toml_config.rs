use crate::core::feed_loader::FeedDescriptor;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Directory every feed path is resolved against.
    pub base_dir: Option<String>,
    pub feeds: FeedsConfig,
    pub legacy: LegacyConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    pub weather: FeedPaths,
    pub news: FeedPaths,
    pub prices: FeedPaths,
    pub curated: FeedPaths,
    pub community: FeedPaths,
    pub workflow_runs: FeedPaths,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            weather: FeedPaths::new("data/weather.json", &["weather.json"]),
            news: FeedPaths::new("data/nytimes.json", &[]),
            prices: FeedPaths::new("data/crypto-prices.json", &[]),
            curated: FeedPaths::new("data/glif.json", &[]),
            community: FeedPaths::new("data/rhizome.json", &[]),
            workflow_runs: FeedPaths::new("workflow_runs.json", &[]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPaths {
    pub primary: String,
    #[serde(default)]
    pub fallbacks: Vec<String>,
}

impl FeedPaths {
    pub fn new(primary: &str, fallbacks: &[&str]) -> Self {
        Self {
            primary: primary.to_string(),
            fallbacks: fallbacks.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn descriptor<T>(&self, name: &str, default_value: T) -> FeedDescriptor<T> {
        FeedDescriptor::new(name, &self.primary, default_value).with_fallbacks(&self.fallbacks)
    }

    fn validate_as(&self, field: &str) -> Result<()> {
        validate_path(&format!("{}.primary", field), &self.primary)?;
        for (i, fallback) in self.fallbacks.iter().enumerate() {
            validate_path(&format!("{}.fallbacks[{}]", field, i), fallback)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    /// Set to `false` once no producer writes the old single-file layout.
    pub enabled: bool,
    pub path: String,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "data.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// JSON theme table replacing the built-in palettes.
    pub table: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl DashConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown names are kept.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(self.base_dir.as_deref().unwrap_or("."))
    }

    pub fn legacy_path(&self) -> Option<&str> {
        self.legacy.enabled.then_some(self.legacy.path.as_str())
    }
}

impl Validate for DashConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_dir) = &self.base_dir {
            validate_path("base_dir", base_dir)?;
        }

        let feeds = &self.feeds;
        feeds.weather.validate_as("feeds.weather")?;
        feeds.news.validate_as("feeds.news")?;
        feeds.prices.validate_as("feeds.prices")?;
        feeds.curated.validate_as("feeds.curated")?;
        feeds.community.validate_as("feeds.community")?;
        feeds.workflow_runs.validate_as("feeds.workflow_runs")?;

        if self.legacy.enabled {
            validate_path("legacy.path", &self.legacy.path)?;
        }
        if let Some(table) = &self.theme.table {
            validate_non_empty_string("theme.table", table)?;
            validate_path("theme.table", table)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_reference_layout() {
        let config = DashConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashConfig::default());
        assert_eq!(config.feeds.weather.primary, "data/weather.json");
        assert_eq!(config.feeds.weather.fallbacks, vec!["weather.json"]);
        assert_eq!(config.legacy_path(), Some("data.json"));
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_overrides() {
        let toml_content = r#"
base_dir = "/srv/dash"

[feeds.news]
primary = "feeds/headlines.json"
fallbacks = ["cache/headlines.json"]

[legacy]
enabled = false

[theme]
table = "themes/custom.json"

[logging]
format = "json"
"#;

        let config = DashConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_dir(), PathBuf::from("/srv/dash"));
        assert_eq!(config.feeds.news.fallbacks, vec!["cache/headlines.json"]);
        // untouched feeds keep their defaults
        assert_eq!(config.feeds.prices.primary, "data/crypto-prices.json");
        assert_eq!(config.legacy_path(), None);
        assert_eq!(config.theme.table.as_deref(), Some("themes/custom.json"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VIBE_DASH_TEST_DATA_DIR", "/tmp/feeds");

        let toml_content = r#"
[feeds.weather]
primary = "${VIBE_DASH_TEST_DATA_DIR}/weather.json"
fallbacks = ["${VIBE_DASH_TEST_UNSET}/weather.json"]
"#;

        let config = DashConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.feeds.weather.primary, "/tmp/feeds/weather.json");
        assert_eq!(
            config.feeds.weather.fallbacks,
            vec!["${VIBE_DASH_TEST_UNSET}/weather.json"]
        );

        std::env::remove_var("VIBE_DASH_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[feeds.community]
primary = ""
"#;
        let config = DashConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("feeds.community.primary"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = DashConfig::from_toml_str("[feeds.weather\nprimary = 1").unwrap_err();
        assert!(matches!(err, DashError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[feeds.workflow_runs]\nprimary = \"runs/latest.json\"\n")
            .unwrap();

        let config = DashConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.feeds.workflow_runs.primary, "runs/latest.json");
    }

    #[test]
    fn test_descriptor_from_paths() {
        let descriptor = FeedsConfig::default().weather.descriptor("weather", 0u8);
        assert_eq!(descriptor.primary_path, PathBuf::from("data/weather.json"));
        assert_eq!(descriptor.fallback_paths, vec![PathBuf::from("weather.json")]);
    }
}
