use super::color::with_alpha;
use super::effects::{atmospheric_overlay, weather_effect, SeasonalAccents};
use super::scene::{Scene, Temperature, TimeOfDay, WeatherMood};
use super::table::{Palette, SceneKey, ThemeTable};
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use serde::Serialize;
use std::fmt;

/// The five inputs a theme is derived from. Reading the clock happens here,
/// at the boundary, never inside the deriver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneInputs {
    pub hour: i32,
    pub month: i32,
    pub day_of_year: i32,
    /// As the caller wrote it (`"72.5"`, `"unknown"`); classification reads
    /// it through [`Temperature::parse`].
    pub temperature: String,
    pub condition: String,
}

impl SceneInputs {
    pub fn new(
        hour: i32,
        month: i32,
        day_of_year: i32,
        temperature: impl fmt::Display,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            hour,
            month,
            day_of_year,
            temperature: temperature.to_string(),
            condition: condition.into(),
        }
    }

    pub fn at<Tz: TimeZone>(
        time: &DateTime<Tz>,
        temperature: impl fmt::Display,
        condition: impl Into<String>,
    ) -> Self {
        Self::new(
            time.hour() as i32,
            time.month() as i32,
            time.ordinal() as i32,
            temperature,
            condition,
        )
    }

    /// Local wall-clock time.
    pub fn now(temperature: impl fmt::Display, condition: impl Into<String>) -> Self {
        Self::at(&Local::now(), temperature, condition)
    }

    pub fn parsed_temperature(&self) -> Temperature {
        Temperature::parse(&self.temperature)
    }

    /// `72.5°F`, or `unknown` when no temperature was given.
    pub fn temperature_label(&self) -> String {
        match self.temperature.trim() {
            "" | "unknown" => "unknown".to_string(),
            raw => format!("{}°F", raw),
        }
    }

    pub fn scene(&self) -> Scene {
        Scene::classify(
            self.hour,
            self.month,
            self.day_of_year,
            self.parsed_temperature(),
            &self.condition,
        )
    }
}

/// Style parameters computed from the palette and the time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStyles {
    pub bg_glass: String,
    pub text_muted: String,
    pub accent_cool: String,
    pub shadow_soft: String,
    pub shadow_medium: String,
    pub shadow_glow: String,
    pub shadow_soft_compact: String,
    pub shadow_medium_compact: String,
    pub border_subtle: String,
    pub overlay: String,
    pub button_text: String,
    pub code_background: String,
    pub heading_shadow: String,
    pub hover_border: String,
    pub link_glow: String,
    pub status_glow: String,
}

impl DerivedStyles {
    fn expand(palette: &Palette, time_of_day: TimeOfDay) -> Self {
        let night = time_of_day.is_night();
        let pick = |at_night: &str, otherwise: &str| {
            let chosen = if night { at_night } else { otherwise };
            chosen.to_string()
        };
        let (soft, medium) = if night { ("0.4", "0.5") } else { ("0.15", "0.2") };

        Self {
            bg_glass: format!("rgba({}, 0.6)", if night { "42, 50, 68" } else { "255, 255, 255" }),
            text_muted: with_alpha(&palette.text_secondary, 0.7),
            accent_cool: pick("#6c8fc9", "#3498db"),
            shadow_soft: format!("0 4px 20px rgba(0, 0, 0, {})", soft),
            shadow_medium: format!("0 8px 32px rgba(0, 0, 0, {})", medium),
            shadow_glow: format!("0 0 40px {}", palette.shadow_glow),
            shadow_soft_compact: format!("0 2px 10px rgba(0, 0, 0, {})", soft),
            shadow_medium_compact: format!("0 4px 16px rgba(0, 0, 0, {})", medium),
            border_subtle: pick("rgba(255, 255, 255, 0.1)", "rgba(0, 0, 0, 0.1)"),
            overlay: pick("rgba(26, 31, 46, 0.3)", "rgba(255, 255, 255, 0.3)"),
            button_text: pick("#1a1f2e", "#ffffff"),
            code_background: pick("rgba(26, 31, 46, 0.6)", "rgba(245, 245, 245, 0.8)"),
            heading_shadow: format!(
                "0 2px 10px rgba(0, 0, 0, {})",
                if night { "0.3" } else { "0.1" }
            ),
            hover_border: with_alpha(&palette.accent_primary, 0.3),
            link_glow: with_alpha(&palette.accent_glow, 0.4),
            status_glow: with_alpha(&palette.accent_primary, 0.5),
        }
    }
}

/// Everything about a theme except when it was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTheme {
    pub inputs: SceneInputs,
    #[serde(flatten)]
    pub scene: Scene,
    pub resolved_key: SceneKey,
    pub palette: Palette,
    pub seasonal: SeasonalAccents,
    pub atmospheric_overlay: &'static str,
    pub weather_effect: &'static str,
    pub derived: DerivedStyles,
    pub vibe: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleBundle {
    #[serde(flatten)]
    pub theme: DerivedTheme,
    pub generated_at_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ThemeDeriver {
    table: ThemeTable,
}

impl ThemeDeriver {
    pub fn new(table: ThemeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ThemeTable {
        &self.table
    }

    /// Pure derivation from the inputs alone.
    pub fn theme(&self, inputs: &SceneInputs) -> DerivedTheme {
        let scene = inputs.scene();
        let (resolved_key, palette) = self.table.resolve(&scene);
        tracing::debug!(
            "Scene {}/{}/{} resolved to theme '{}'",
            scene.time_of_day,
            scene.season,
            scene.weather_mood,
            resolved_key
        );

        DerivedTheme {
            inputs: inputs.clone(),
            scene,
            resolved_key,
            palette: palette.clone(),
            seasonal: SeasonalAccents::for_season(scene.season),
            atmospheric_overlay: atmospheric_overlay(scene.time_of_day, scene.weather_mood),
            weather_effect: weather_effect(scene.weather_mood),
            derived: DerivedStyles::expand(palette, scene.time_of_day),
            vibe: vibe(&scene),
        }
    }

    pub fn derive_at(&self, inputs: &SceneInputs, generated_at_utc: DateTime<Utc>) -> StyleBundle {
        StyleBundle {
            theme: self.theme(inputs),
            generated_at_utc,
        }
    }

    pub fn derive(&self, inputs: &SceneInputs) -> StyleBundle {
        self.derive_at(inputs, Utc::now())
    }
}

/// Derives a style bundle with the stock theme table.
pub fn derive_theme(
    hour: i32,
    month: i32,
    day_of_year: i32,
    temperature: impl fmt::Display,
    condition: &str,
) -> StyleBundle {
    ThemeDeriver::default().derive(&SceneInputs::new(
        hour,
        month,
        day_of_year,
        temperature,
        condition,
    ))
}

fn vibe(scene: &Scene) -> String {
    let mut parts = vec![
        match scene.time_of_day {
            TimeOfDay::Night => "nighttime",
            TimeOfDay::EarlyMorning => "early morning",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Day => "daytime",
        },
        scene.season.as_str(),
    ];
    if scene.weather_mood != WeatherMood::Neutral {
        parts.push(scene.weather_mood.as_str());
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::scene::Season;
    use chrono::NaiveDate;

    #[test]
    fn test_deterministic_apart_from_timestamp() {
        let deriver = ThemeDeriver::default();
        let inputs = SceneInputs::new(14, 4, 100, "61", "Partly Cloudy");
        assert_eq!(deriver.derive(&inputs).theme, deriver.derive(&inputs).theme);
    }

    #[test]
    fn test_night_derivations() {
        let theme = ThemeDeriver::default().theme(&SceneInputs::new(22, 1, 15, 25_i64, "Snow"));
        assert_eq!(theme.resolved_key.to_string(), "night-winter-snowy");
        assert_eq!(theme.derived.accent_cool, "#6c8fc9");
        assert_eq!(theme.derived.button_text, "#1a1f2e");
        assert_eq!(theme.derived.text_muted, "rgba(200, 214, 237, 0.7)");
        assert_eq!(theme.derived.shadow_glow, "0 0 40px rgba(168, 216, 240, 0.2)");
        assert_eq!(theme.vibe, "nighttime, winter, snowy");
        assert!(theme.weather_effect.contains("Snow effect"));
    }

    #[test]
    fn test_day_derivations() {
        let theme = ThemeDeriver::default().theme(&SceneInputs::new(10, 7, 190, 95_i64, "clear"));
        assert_eq!(theme.scene.weather_mood, WeatherMood::Sunny);
        assert_eq!(theme.resolved_key.to_string(), "day-summer-sunny");
        assert_eq!(theme.derived.bg_glass, "rgba(255, 255, 255, 0.6)");
        assert_eq!(theme.derived.hover_border, "rgba(243, 156, 18, 0.3)");
        assert_eq!(theme.atmospheric_overlay, "background: transparent;");
        assert_eq!(theme.weather_effect, "");
    }

    #[test]
    fn test_neutral_mood_left_out_of_vibe() {
        let theme = ThemeDeriver::default().theme(&SceneInputs::new(18, 10, 280, "unknown", "unknown"));
        assert_eq!(theme.scene.season, Season::Fall);
        assert_eq!(theme.vibe, "evening, fall");
        assert_eq!(theme.resolved_key.to_string(), "evening-fall");
    }

    #[test]
    fn test_inputs_from_clock() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(7, 30, 0))
            .unwrap()
            .and_utc();
        let inputs = SceneInputs::at(&time, 50_i64, "Rain");
        assert_eq!((inputs.hour, inputs.month, inputs.day_of_year), (7, 3, 61));
    }

    #[test]
    fn test_temperature_kept_as_written() {
        let inputs = SceneInputs::new(12, 7, 190, "72.5", "Haze");
        assert_eq!(inputs.temperature_label(), "72.5°F");
        assert_eq!(inputs.parsed_temperature().degrees(), Some(72));

        let inputs = SceneInputs::new(12, 7, 190, 88.9, "Haze");
        assert_eq!(inputs.temperature_label(), "88.9°F");
        assert_eq!(inputs.scene().weather_mood, WeatherMood::Hot);

        assert_eq!(SceneInputs::new(12, 7, 190, "unknown", "").temperature_label(), "unknown");
    }

    #[test]
    fn test_out_of_domain_inputs_do_not_panic() {
        let deriver = ThemeDeriver::default();
        for (hour, month) in [(-1, 0), (24, 13), (i32::MAX, i32::MIN)] {
            let theme = deriver.theme(&SceneInputs::new(hour, month, 0, "", ""));
            assert_eq!(theme.scene.weather_mood, WeatherMood::Neutral);
        }
    }

    #[test]
    fn test_bundle_serializes_metadata() {
        let bundle = derive_theme(6, 4, 100, 55_i64, "Drizzle");
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["timeOfDay"], "early-morning");
        assert_eq!(json["season"], "spring");
        assert_eq!(json["weatherMood"], "rainy");
        assert_eq!(json["resolvedKey"], "early-morning-spring");
        assert!(json["generatedAtUtc"].is_string());
        assert_eq!(json["palette"]["accentPrimary"], "#d4835c");
    }
}
