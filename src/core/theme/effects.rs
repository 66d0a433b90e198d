use super::scene::{Season, TimeOfDay, WeatherMood};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalAccents {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

impl SeasonalAccents {
    /// Fixed per season; does not depend on the resolved palette.
    pub fn for_season(season: Season) -> Self {
        let (primary, secondary, accent) = match season {
            Season::Winter => ("#6ba3d1", "#5088b8", "#85b8db"),
            Season::Spring => ("#5dbf8f", "#4aa378", "#75d1a3"),
            Season::Summer => ("#ffa94d", "#ff8c42", "#ffb366"),
            Season::Fall => ("#d4835c", "#a85e3a", "#e69d75"),
        };
        Self {
            primary,
            secondary,
            accent,
        }
    }

    pub fn css_variables(&self) -> String {
        format!(
            "--seasonal-primary: {};\n  --seasonal-secondary: {};\n  --seasonal-accent: {};",
            self.primary, self.secondary, self.accent
        )
    }
}

/// Background declaration for the full-page `body::before` layer.
///
/// Precedence is its own: rainy nights, then snow, then evening, then early
/// morning. It does not follow the palette cascade.
pub fn atmospheric_overlay(time_of_day: TimeOfDay, weather_mood: WeatherMood) -> &'static str {
    match (time_of_day, weather_mood) {
        (TimeOfDay::Night, WeatherMood::Rainy) => {
            "background:
    radial-gradient(circle at 30% 20%, rgba(255, 169, 77, 0.08) 0%, transparent 40%),
    radial-gradient(circle at 70% 60%, rgba(108, 143, 201, 0.12) 0%, transparent 50%);"
        }
        (_, WeatherMood::Snowy) => {
            "background:
    radial-gradient(circle at 40% 30%, rgba(168, 216, 240, 0.15) 0%, transparent 50%),
    radial-gradient(circle at 60% 70%, rgba(255, 255, 255, 0.1) 0%, transparent 50%);"
        }
        (TimeOfDay::Evening, _) => {
            "background:
    radial-gradient(circle at 20% 20%, rgba(255, 140, 66, 0.15) 0%, transparent 50%),
    radial-gradient(circle at 80% 80%, rgba(230, 126, 34, 0.1) 0%, transparent 50%);"
        }
        (TimeOfDay::EarlyMorning, _) => {
            "background:
    radial-gradient(circle at 50% 10%, rgba(255, 236, 209, 0.2) 0%, transparent 60%);"
        }
        _ => "background: transparent;",
    }
}

/// Decorative `.content::before` rule. Only rain and snow have one.
pub fn weather_effect(weather_mood: WeatherMood) -> &'static str {
    match weather_mood {
        WeatherMood::Rainy => {
            "/* Rain effect pattern */
.content::before {
  content: '';
  position: absolute;
  top: 0;
  left: 0;
  right: 0;
  bottom: 0;
  background-image: linear-gradient(transparent 50%, rgba(74, 95, 127, 0.03) 50%);
  background-size: 100% 4px;
  pointer-events: none;
  opacity: 0.5;
}"
        }
        WeatherMood::Snowy => {
            "/* Snow effect shimmer */
.content::before {
  content: '';
  position: absolute;
  top: 0;
  left: 0;
  right: 0;
  bottom: 0;
  background-image:
    radial-gradient(circle, rgba(255, 255, 255, 0.1) 1px, transparent 1px);
  background-size: 50px 50px;
  pointer-events: none;
  opacity: 0.3;
}"
        }
        WeatherMood::Cloudy
        | WeatherMood::Sunny
        | WeatherMood::Hot
        | WeatherMood::Cold
        | WeatherMood::Neutral => "",
    }
}
