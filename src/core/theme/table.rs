//! Palette lookup keyed by scene.
//!
//! A table is sparse: only scenes with a distinct look need an entry. Lookup
//! walks [`CASCADE`] from the most specific key to the universal default,
//! which every table is required to have.

use super::color::is_color_expression;
use super::scene::{Scene, Season, TimeOfDay, WeatherMood};
use crate::utils::error::{DashError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Palette {
    pub bg_primary: String,
    pub bg_secondary: String,
    pub bg_card: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub accent_primary: String,
    pub accent_secondary: String,
    pub accent_glow: String,
    pub shadow_glow: String,
}

impl Palette {
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("bgPrimary", &self.bg_primary),
            ("bgSecondary", &self.bg_secondary),
            ("bgCard", &self.bg_card),
            ("textPrimary", &self.text_primary),
            ("textSecondary", &self.text_secondary),
            ("accentPrimary", &self.accent_primary),
            ("accentSecondary", &self.accent_secondary),
            ("accentGlow", &self.accent_glow),
            ("shadowGlow", &self.shadow_glow),
        ]
    }

    fn validate(&self, key: &SceneKey) -> Result<()> {
        for (field, value) in self.fields() {
            if !is_color_expression(value) {
                return Err(DashError::ThemeTableError {
                    message: format!("{}.{} is not a CSS color: '{}'", key, field, value),
                });
            }
        }
        Ok(())
    }
}

/// A composite lookup key. The string form (`night-winter-snowy`,
/// `day-summer`, `default`, ...) exists only for table files and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    Exact(TimeOfDay, Season, WeatherMood),
    TimeSeason(TimeOfDay, Season),
    TimeMood(TimeOfDay, WeatherMood),
    Time(TimeOfDay),
    Universal,
}

pub const UNIVERSAL_KEY: &str = "default";

pub type KeyBuilder = fn(&Scene) -> SceneKey;

fn exact_key(scene: &Scene) -> SceneKey {
    SceneKey::Exact(scene.time_of_day, scene.season, scene.weather_mood)
}

fn time_season_key(scene: &Scene) -> SceneKey {
    SceneKey::TimeSeason(scene.time_of_day, scene.season)
}

fn time_mood_key(scene: &Scene) -> SceneKey {
    SceneKey::TimeMood(scene.time_of_day, scene.weather_mood)
}

fn time_key(scene: &Scene) -> SceneKey {
    SceneKey::Time(scene.time_of_day)
}

fn universal_key(_scene: &Scene) -> SceneKey {
    SceneKey::Universal
}

/// Lookup order, most specific first.
pub const CASCADE: [KeyBuilder; 5] = [
    exact_key,
    time_season_key,
    time_mood_key,
    time_key,
    universal_key,
];

impl SceneKey {
    pub fn candidates(scene: &Scene) -> [SceneKey; 5] {
        CASCADE.map(|build| build(scene))
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneKey::Exact(t, s, m) => write!(f, "{}-{}-{}", t, s, m),
            SceneKey::TimeSeason(t, s) => write!(f, "{}-{}", t, s),
            SceneKey::TimeMood(t, m) => write!(f, "{}-{}", t, m),
            SceneKey::Time(t) => write!(f, "{}", t),
            SceneKey::Universal => f.write_str(UNIVERSAL_KEY),
        }
    }
}

impl Serialize for SceneKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for SceneKey {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        if s == UNIVERSAL_KEY {
            return Ok(SceneKey::Universal);
        }

        let invalid = || DashError::ThemeTableError {
            message: format!("unknown theme key '{}'", s),
        };

        // "early-morning" contains a hyphen, so match time-of-day by prefix
        // rather than splitting.
        let (time, rest) = TimeOfDay::ALL
            .iter()
            .filter_map(|t| s.strip_prefix(t.as_str()).map(|rest| (*t, rest)))
            .max_by_key(|(t, _)| t.as_str().len())
            .ok_or_else(invalid)?;

        if rest.is_empty() {
            return Ok(SceneKey::Time(time));
        }
        let rest = rest.strip_prefix('-').ok_or_else(invalid)?;

        let season = Season::ALL.iter().find(|season| {
            rest == season.as_str() || rest.starts_with(&format!("{}-", season.as_str()))
        });
        match season {
            Some(season) => {
                let tail = &rest[season.as_str().len()..];
                if tail.is_empty() {
                    return Ok(SceneKey::TimeSeason(time, *season));
                }
                let mood = parse_mood(&tail[1..]).ok_or_else(invalid)?;
                Ok(SceneKey::Exact(time, *season, mood))
            }
            None => {
                let mood = parse_mood(rest).ok_or_else(invalid)?;
                Ok(SceneKey::TimeMood(time, mood))
            }
        }
    }
}

fn parse_mood(s: &str) -> Option<WeatherMood> {
    WeatherMood::ALL.iter().copied().find(|m| m.as_str() == s)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeTable {
    entries: HashMap<SceneKey, Palette>,
    universal: Palette,
}

impl ThemeTable {
    /// A table holding only the universal default.
    pub fn new(universal: Palette) -> Self {
        Self {
            entries: HashMap::new(),
            universal,
        }
    }

    pub fn with_entry(mut self, key: SceneKey, palette: Palette) -> Self {
        self.insert(key, palette);
        self
    }

    pub fn insert(&mut self, key: SceneKey, palette: Palette) {
        match key {
            SceneKey::Universal => self.universal = palette,
            key => {
                self.entries.insert(key, palette);
            }
        }
    }

    pub fn get(&self, key: &SceneKey) -> Option<&Palette> {
        match key {
            SceneKey::Universal => Some(&self.universal),
            key => self.entries.get(key),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// First entry present along the cascade. Total, since the universal
    /// entry always exists.
    pub fn resolve(&self, scene: &Scene) -> (SceneKey, &Palette) {
        SceneKey::candidates(scene)
            .into_iter()
            .find_map(|key| self.get(&key).map(|palette| (key, palette)))
            .unwrap_or((SceneKey::Universal, &self.universal))
    }

    /// Parses a JSON object of `"scene-key": { palette }` entries. The
    /// `"default"` entry is mandatory and every value must be a CSS color.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, Palette> = serde_json::from_str(content)?;

        let mut universal = None;
        let mut entries = HashMap::new();
        for (name, palette) in raw {
            let key: SceneKey = name.parse()?;
            palette.validate(&key)?;
            match key {
                SceneKey::Universal => universal = Some(palette),
                key => {
                    entries.insert(key, palette);
                }
            }
        }

        let universal = universal.ok_or_else(|| DashError::ThemeTableError {
            message: format!("missing the '{}' entry", UNIVERSAL_KEY),
        })?;
        tracing::debug!("Loaded theme table with {} scene entries", entries.len());
        Ok(Self { entries, universal })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let mut out: BTreeMap<String, &Palette> = self
            .entries
            .iter()
            .map(|(key, palette)| (key.to_string(), palette))
            .collect();
        out.insert(UNIVERSAL_KEY.to_string(), &self.universal);
        Ok(serde_json::to_string_pretty(&out)?)
    }

    /// The stock palettes. The daytime palette doubles as the universal
    /// default.
    pub fn builtin() -> Self {
        use Season::*;
        use TimeOfDay::*;
        use WeatherMood::*;

        let day_palette = palette([
            "linear-gradient(135deg, #ffffff 0%, #f5f5f5 100%)",
            "rgba(245, 245, 245, 0.7)",
            "rgba(255, 255, 255, 0.9)",
            "#2d2d2d",
            "#5a5a5a",
            "#3498db",
            "#2980b9",
            "#5dade2",
            "rgba(52, 152, 219, 0.2)",
        ]);

        ThemeTable::new(day_palette.clone())
            .with_entry(
                SceneKey::Exact(Night, Winter, Rainy),
                palette([
                    "linear-gradient(135deg, #0f1419 0%, #1a2332 100%)",
                    "rgba(26, 35, 50, 0.7)",
                    "rgba(31, 43, 61, 0.85)",
                    "#e8edf5",
                    "#b8c5db",
                    "#5eb3d6",
                    "#4a9bc4",
                    "#73c5e8",
                    "rgba(94, 179, 214, 0.15)",
                ]),
            )
            .with_entry(
                SceneKey::Exact(Night, Winter, Snowy),
                palette([
                    "linear-gradient(135deg, #0d1521 0%, #1c2b42 100%)",
                    "rgba(28, 43, 66, 0.7)",
                    "rgba(35, 52, 82, 0.85)",
                    "#f0f4fa",
                    "#c8d6ed",
                    "#a8d8f0",
                    "#82c4e8",
                    "#c2e5f7",
                    "rgba(168, 216, 240, 0.2)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Night, Winter),
                palette([
                    "linear-gradient(135deg, #0a0e1a 0%, #1a2333 100%)",
                    "rgba(26, 35, 51, 0.7)",
                    "rgba(32, 45, 66, 0.85)",
                    "#e0e8f0",
                    "#a8b8d1",
                    "#6ba3d1",
                    "#5088b8",
                    "#85b8db",
                    "rgba(107, 163, 209, 0.15)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Night, Spring),
                palette([
                    "linear-gradient(135deg, #0f1a1f 0%, #1a2d35 100%)",
                    "rgba(26, 45, 53, 0.7)",
                    "rgba(35, 58, 70, 0.85)",
                    "#e5f0ed",
                    "#b5d1c9",
                    "#5dbf8f",
                    "#4aa378",
                    "#75d1a3",
                    "rgba(93, 191, 143, 0.15)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Night, Summer),
                palette([
                    "linear-gradient(135deg, #1a1614 0%, #2d2620 100%)",
                    "rgba(45, 38, 32, 0.7)",
                    "rgba(58, 48, 40, 0.85)",
                    "#f0e8dc",
                    "#d1c2b0",
                    "#ffa94d",
                    "#ff8c42",
                    "#ffb366",
                    "rgba(255, 169, 77, 0.15)",
                ]),
            )
            .with_entry(
                SceneKey::Exact(Night, Fall, Rainy),
                palette([
                    "linear-gradient(135deg, #1a1f2e 0%, #2d3548 100%)",
                    "rgba(45, 53, 72, 0.7)",
                    "rgba(58, 68, 92, 0.85)",
                    "#e8edf5",
                    "#b8c5db",
                    "#ffa94d",
                    "#ff8c42",
                    "#ffb366",
                    "rgba(255, 169, 77, 0.15)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Night, Fall),
                palette([
                    "linear-gradient(135deg, #1a1410 0%, #2d2318 100%)",
                    "rgba(45, 35, 24, 0.7)",
                    "rgba(58, 45, 32, 0.85)",
                    "#f0e4d0",
                    "#d1bfa0",
                    "#e68a3d",
                    "#d4704d",
                    "#f5a256",
                    "rgba(230, 138, 61, 0.15)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(EarlyMorning, Spring),
                palette([
                    "linear-gradient(135deg, #f5e8d8 0%, #e8d4c0 100%)",
                    "rgba(232, 212, 192, 0.7)",
                    "rgba(245, 232, 216, 0.9)",
                    "#2d2520",
                    "#5a4a3d",
                    "#d4835c",
                    "#c4673a",
                    "#e69d75",
                    "rgba(212, 131, 92, 0.2)",
                ]),
            )
            .with_entry(
                SceneKey::Time(EarlyMorning),
                palette([
                    "linear-gradient(135deg, #ffecd1 0%, #ffd8a8 100%)",
                    "rgba(255, 216, 168, 0.7)",
                    "rgba(255, 236, 209, 0.9)",
                    "#2d2010",
                    "#5a4428",
                    "#e67e22",
                    "#d35400",
                    "#f39c3d",
                    "rgba(230, 126, 34, 0.2)",
                ]),
            )
            .with_entry(
                SceneKey::Exact(Day, Winter, Snowy),
                palette([
                    "linear-gradient(135deg, #f0f8ff 0%, #e0f0ff 100%)",
                    "rgba(224, 240, 255, 0.7)",
                    "rgba(240, 248, 255, 0.9)",
                    "#1a2840",
                    "#3d5270",
                    "#3498db",
                    "#2980b9",
                    "#5dade2",
                    "rgba(52, 152, 219, 0.2)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Day, Spring),
                palette([
                    "linear-gradient(135deg, #e8f8f0 0%, #d0ede0 100%)",
                    "rgba(208, 237, 224, 0.7)",
                    "rgba(232, 248, 240, 0.9)",
                    "#1a3d2e",
                    "#2d6350",
                    "#27ae60",
                    "#229954",
                    "#52be80",
                    "rgba(39, 174, 96, 0.2)",
                ]),
            )
            .with_entry(
                SceneKey::Exact(Day, Summer, Sunny),
                palette([
                    "linear-gradient(135deg, #fff8e1 0%, #ffecb3 100%)",
                    "rgba(255, 236, 179, 0.7)",
                    "rgba(255, 248, 225, 0.9)",
                    "#3d2e1a",
                    "#6b5030",
                    "#f39c12",
                    "#e67e22",
                    "#f9b851",
                    "rgba(243, 156, 18, 0.25)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Day, Summer),
                palette([
                    "linear-gradient(135deg, #fef5e7 0%, #fdebd0 100%)",
                    "rgba(253, 235, 208, 0.7)",
                    "rgba(254, 245, 231, 0.9)",
                    "#3d3020",
                    "#6b5840",
                    "#e67e22",
                    "#d35400",
                    "#f39c3d",
                    "rgba(230, 126, 34, 0.2)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Day, Fall),
                palette([
                    "linear-gradient(135deg, #fdf0e6 0%, #f8e2d0 100%)",
                    "rgba(248, 226, 208, 0.7)",
                    "rgba(253, 240, 230, 0.9)",
                    "#3d2818",
                    "#6b4830",
                    "#d68358",
                    "#c4673a",
                    "#e69d75",
                    "rgba(214, 131, 88, 0.2)",
                ]),
            )
            .with_entry(SceneKey::Time(Day), day_palette)
            .with_entry(
                SceneKey::TimeSeason(Evening, Summer),
                palette([
                    "linear-gradient(135deg, #ffe8d1 0%, #ffd4a8 100%)",
                    "rgba(255, 212, 168, 0.7)",
                    "rgba(255, 232, 209, 0.9)",
                    "#3d2510",
                    "#6b4528",
                    "#ff8c42",
                    "#e67e22",
                    "#ffa94d",
                    "rgba(255, 140, 66, 0.25)",
                ]),
            )
            .with_entry(
                SceneKey::TimeSeason(Evening, Fall),
                palette([
                    "linear-gradient(135deg, #ffe0c1 0%, #ffc896 100%)",
                    "rgba(255, 200, 150, 0.7)",
                    "rgba(255, 224, 193, 0.9)",
                    "#3d2010",
                    "#6b3d28",
                    "#e67e22",
                    "#d4704d",
                    "#f39c3d",
                    "rgba(230, 126, 34, 0.25)",
                ]),
            )
            .with_entry(
                SceneKey::Time(Evening),
                palette([
                    "linear-gradient(135deg, #ffebd8 0%, #ffd4b3 100%)",
                    "rgba(255, 212, 179, 0.7)",
                    "rgba(255, 235, 216, 0.9)",
                    "#3d2818",
                    "#6b4530",
                    "#e67e22",
                    "#d35400",
                    "#f39c3d",
                    "rgba(230, 126, 34, 0.2)",
                ]),
            )
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn palette(values: [&str; 9]) -> Palette {
    let [bg_primary, bg_secondary, bg_card, text_primary, text_secondary, accent_primary, accent_secondary, accent_glow, shadow_glow] =
        values.map(str::to_string);
    Palette {
        bg_primary,
        bg_secondary,
        bg_card,
        text_primary,
        text_secondary,
        accent_primary,
        accent_secondary,
        accent_glow,
        shadow_glow,
    }
}
