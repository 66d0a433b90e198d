//! Scene classification: time of day, season and weather mood.
//!
//! Every function here is total. Out-of-range hours and months land in a
//! bucket, and unreadable temperatures are treated as absent.

use crate::domain::model::Reading;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    Night,
    EarlyMorning,
    Day,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Night,
        TimeOfDay::EarlyMorning,
        TimeOfDay::Day,
        TimeOfDay::Evening,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Night => "night",
            TimeOfDay::EarlyMorning => "early-morning",
            TimeOfDay::Day => "day",
            TimeOfDay::Evening => "evening",
        }
    }

    pub fn from_hour(hour: i32) -> Self {
        if hour >= 20 || hour <= 5 {
            TimeOfDay::Night
        } else if hour <= 8 {
            TimeOfDay::EarlyMorning
        } else if hour <= 16 {
            TimeOfDay::Day
        } else {
            TimeOfDay::Evening
        }
    }

    pub fn is_night(self) -> bool {
        self == TimeOfDay::Night
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// Northern-hemisphere mapping from month alone. `_day_of_year` is
    /// accepted so callers do not change when finer boundaries arrive.
    pub fn from_calendar(month: i32, _day_of_year: i32) -> Self {
        match month {
            12 => Season::Winter,
            m if m <= 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherMood {
    Rainy,
    Snowy,
    Cloudy,
    Sunny,
    Hot,
    Cold,
    Neutral,
}

/// Checked in order; the first group with a matching keyword wins.
const MOOD_KEYWORDS: [(WeatherMood, &[&str]); 4] = [
    (WeatherMood::Rainy, &["rain", "drizzle"]),
    (WeatherMood::Snowy, &["snow"]),
    (WeatherMood::Cloudy, &["cloud", "overcast"]),
    (WeatherMood::Sunny, &["clear", "sunny"]),
];

const HOT_ABOVE: i64 = 80;
const COLD_BELOW: i64 = 40;

impl WeatherMood {
    pub const ALL: [WeatherMood; 7] = [
        WeatherMood::Rainy,
        WeatherMood::Snowy,
        WeatherMood::Cloudy,
        WeatherMood::Sunny,
        WeatherMood::Hot,
        WeatherMood::Cold,
        WeatherMood::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeatherMood::Rainy => "rainy",
            WeatherMood::Snowy => "snowy",
            WeatherMood::Cloudy => "cloudy",
            WeatherMood::Sunny => "sunny",
            WeatherMood::Hot => "hot",
            WeatherMood::Cold => "cold",
            WeatherMood::Neutral => "neutral",
        }
    }

    pub fn classify(condition: &str, temperature: Temperature) -> Self {
        let condition = condition.to_lowercase();
        let keyword_match = MOOD_KEYWORDS.iter().find_map(|(mood, keywords)| {
            keywords
                .iter()
                .any(|keyword| condition.contains(keyword))
                .then_some(*mood)
        });
        if let Some(mood) = keyword_match {
            return mood;
        }

        match temperature.degrees() {
            Some(t) if t > HOT_ABOVE => WeatherMood::Hot,
            Some(t) if t < COLD_BELOW => WeatherMood::Cold,
            _ => WeatherMood::Neutral,
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(TimeOfDay, Season, WeatherMood);

/// Whole degrees Fahrenheit, or unknown.
///
/// Text input is read the way feed producers write it: leading whitespace,
/// an optional sign, then digits; anything after the digits is ignored, so
/// `"72.5"` and `"72F"` are both 72 and `"unknown"` is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Temperature(Option<i64>);

impl Temperature {
    pub fn unknown() -> Self {
        Temperature(None)
    }

    pub fn degrees(self) -> Option<i64> {
        self.0
    }

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Temperature(None);
        }

        let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
        Temperature(Some(if negative { -magnitude } else { magnitude }))
    }
}

impl From<i64> for Temperature {
    fn from(value: i64) -> Self {
        Temperature(Some(value))
    }
}

impl From<f64> for Temperature {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Temperature(Some(value.trunc() as i64))
        } else {
            Temperature(None)
        }
    }
}

impl From<&str> for Temperature {
    fn from(value: &str) -> Self {
        Temperature::parse(value)
    }
}

impl From<&Reading> for Temperature {
    fn from(value: &Reading) -> Self {
        match value {
            Reading::Number(n) => Temperature::from(*n),
            Reading::Text(s) => Temperature::parse(s),
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(degrees) => write!(f, "{}°F", degrees),
            None => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub time_of_day: TimeOfDay,
    pub season: Season,
    pub weather_mood: WeatherMood,
}

impl Scene {
    pub fn classify(
        hour: i32,
        month: i32,
        day_of_year: i32,
        temperature: Temperature,
        condition: &str,
    ) -> Self {
        Self {
            time_of_day: TimeOfDay::from_hour(hour),
            season: Season::from_calendar(month, day_of_year),
            weather_mood: WeatherMood::classify(condition, temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::EarlyMorning);
        assert_eq!(TimeOfDay::from_hour(8), TimeOfDay::EarlyMorning);
        assert_eq!(TimeOfDay::from_hour(9), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(19), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn test_time_of_day_out_of_range() {
        assert_eq!(TimeOfDay::from_hour(-4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(31), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(i32::MIN), TimeOfDay::Night);
    }

    #[test]
    fn test_seasons() {
        let seasons: Vec<Season> = (1..=12).map(|m| Season::from_calendar(m, 1)).collect();
        use Season::*;
        assert_eq!(
            seasons,
            vec![Winter, Winter, Spring, Spring, Spring, Summer, Summer, Summer, Fall, Fall, Fall, Winter]
        );
    }

    #[test]
    fn test_season_out_of_range() {
        assert_eq!(Season::from_calendar(0, 1), Season::Winter);
        assert_eq!(Season::from_calendar(-7, 1), Season::Winter);
        assert_eq!(Season::from_calendar(13, 400), Season::Fall);
    }

    #[test]
    fn test_mood_keyword_precedence() {
        let t = Temperature::unknown();
        assert_eq!(WeatherMood::classify("light rain and clouds", t), WeatherMood::Rainy);
        assert_eq!(WeatherMood::classify("Drizzle", t), WeatherMood::Rainy);
        assert_eq!(WeatherMood::classify("Snow showers, cloudy", t), WeatherMood::Snowy);
        assert_eq!(WeatherMood::classify("OVERCAST", t), WeatherMood::Cloudy);
        assert_eq!(WeatherMood::classify("Mostly Sunny", t), WeatherMood::Sunny);
        assert_eq!(WeatherMood::classify("Partly cloudy, clear later", t), WeatherMood::Cloudy);
    }

    #[test]
    fn test_temperature_only_when_no_keyword() {
        assert_eq!(WeatherMood::classify("sunny", 95_i64.into()), WeatherMood::Sunny);
        assert_eq!(WeatherMood::classify("Fog", 95_i64.into()), WeatherMood::Hot);
        assert_eq!(WeatherMood::classify("Fog", 39_i64.into()), WeatherMood::Cold);
        assert_eq!(WeatherMood::classify("Fog", 80_i64.into()), WeatherMood::Neutral);
        assert_eq!(WeatherMood::classify("Fog", 40_i64.into()), WeatherMood::Neutral);
        assert_eq!(WeatherMood::classify("", Temperature::parse("unknown")), WeatherMood::Neutral);
    }

    #[test]
    fn test_temperature_parse() {
        assert_eq!(Temperature::parse("72").degrees(), Some(72));
        assert_eq!(Temperature::parse("  72.9").degrees(), Some(72));
        assert_eq!(Temperature::parse("85F").degrees(), Some(85));
        assert_eq!(Temperature::parse("-12").degrees(), Some(-12));
        assert_eq!(Temperature::parse("unknown").degrees(), None);
        assert_eq!(Temperature::parse("").degrees(), None);
        assert_eq!(Temperature::parse("—").degrees(), None);
        assert_eq!(Temperature::from(f64::NAN).degrees(), None);
        assert_eq!(Temperature::from(-3.5).degrees(), Some(-3));
    }

    #[test]
    fn test_temperature_from_reading() {
        assert_eq!(Temperature::from(&Reading::Number(61.0)).degrees(), Some(61));
        assert_eq!(Temperature::from(&Reading::from("n/a")).degrees(), None);
    }

    #[test]
    fn test_scene_classify() {
        let scene = Scene::classify(22, 1, 15, 25_i64.into(), "Snow");
        assert_eq!(
            scene,
            Scene {
                time_of_day: TimeOfDay::Night,
                season: Season::Winter,
                weather_mood: WeatherMood::Snowy,
            }
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TimeOfDay::EarlyMorning.to_string(), "early-morning");
        assert_eq!(Season::Fall.to_string(), "fall");
        assert_eq!(WeatherMood::Neutral.to_string(), "neutral");
        assert_eq!(Temperature::from(70_i64).to_string(), "70°F");
    }
}
