use serde::Deserialize;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vibe_dash::domain::model::WeatherReport;
use vibe_dash::{FeedDescriptor, FeedLoader, FeedSource, LocalStorage};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Counter {
    count: u32,
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn backups_of(dir: &Path, file_name: &str) -> Vec<String> {
    let prefix = format!("{}.corrupted.", file_name);
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(&prefix))
        .collect()
}

#[test]
fn test_all_candidates_absent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let loader = FeedLoader::new(LocalStorage::new(temp_dir.path()));
    let descriptor = FeedDescriptor::new("counter", "data/counter.json", Counter { count: 7 })
        .with_fallback("counter.json")
        .with_fallback("backup/counter.json");

    let result = loader.load(&descriptor);

    assert_eq!(result.value, Counter { count: 7 });
    assert_eq!(result.source, FeedSource::Default);
    assert!(!result.ok);
    assert!(result.is_default());
    assert_eq!(result.path, None);
}

#[test]
fn test_valid_primary_wins_over_fallbacks() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "data/counter.json", r#"{"count": 1}"#);
    write(temp_dir.path(), "counter.json", r#"{"count": 2}"#);

    let loader = FeedLoader::new(LocalStorage::new(temp_dir.path()));
    let descriptor = FeedDescriptor::new("counter", "data/counter.json", Counter { count: 0 })
        .with_fallback("counter.json");

    let result = loader.load(&descriptor);

    assert_eq!(result.value, Counter { count: 1 });
    assert_eq!(result.source, FeedSource::Primary);
    assert!(result.ok);
    assert_eq!(result.path.as_deref(), Some(Path::new("data/counter.json")));
}

#[test]
fn test_missing_primary_uses_fallback_without_backup() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "counter.json", r#"{"count": 2}"#);

    let loader = FeedLoader::new(LocalStorage::new(temp_dir.path()));
    let descriptor = FeedDescriptor::new("counter", "data/counter.json", Counter { count: 0 })
        .with_fallback("counter.json");

    let result = loader.load(&descriptor);

    assert_eq!(result.value, Counter { count: 2 });
    assert_eq!(result.source, FeedSource::Fallback);
    assert!(backups_of(temp_dir.path(), "counter.json").is_empty());
}

#[test]
fn test_malformed_primary_falls_back_and_is_backed_up() {
    let temp_dir = TempDir::new().unwrap();
    let corrupted = "{\n  \"count\": 1,\n  oops\n}";
    write(temp_dir.path(), "data/counter.json", corrupted);
    write(temp_dir.path(), "counter.json", r#"{"count": 2}"#);

    let loader = FeedLoader::new(LocalStorage::new(temp_dir.path()));
    let descriptor = FeedDescriptor::new("counter", "data/counter.json", Counter { count: 0 })
        .with_fallback("counter.json");

    let result = loader.load(&descriptor);

    assert_eq!(result.value, Counter { count: 2 });
    assert_eq!(result.source, FeedSource::Fallback);
    assert!(result.ok);

    let backups = backups_of(&temp_dir.path().join("data"), "counter.json");
    assert_eq!(backups.len(), 1);
    let backup = fs::read_to_string(temp_dir.path().join("data").join(&backups[0])).unwrap();
    assert_eq!(backup, corrupted);
    // the corrupted file itself stays in place
    assert!(temp_dir.path().join("data/counter.json").exists());
}

#[test]
fn test_every_candidate_malformed_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.json", "not json");
    write(temp_dir.path(), "b.json", "[1, 2");

    let loader = FeedLoader::new(LocalStorage::new(temp_dir.path()));
    let descriptor =
        FeedDescriptor::new("counter", "a.json", Counter { count: 9 }).with_fallback("b.json");

    let result = loader.load(&descriptor);

    assert_eq!(result.value, Counter { count: 9 });
    assert_eq!(result.source, FeedSource::Default);
    assert_eq!(backups_of(temp_dir.path(), "a.json").len(), 1);
    assert_eq!(backups_of(temp_dir.path(), "b.json").len(), 1);
}

#[test]
fn test_repeated_failures_get_distinct_backups() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "counter.json", "{");

    let loader = FeedLoader::new(LocalStorage::new(temp_dir.path()));
    let descriptor = FeedDescriptor::new("counter", "counter.json", Counter { count: 0 });

    for _ in 0..3 {
        assert!(loader.load(&descriptor).is_default());
    }
    assert_eq!(backups_of(temp_dir.path(), "counter.json").len(), 3);
}

#[test]
fn test_weather_feed_with_partial_document() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "data/weather.json",
        r#"{"temperature": "64", "condition": "Overcast", "location": "Brooklyn, NY"}"#,
    );

    let loader = FeedLoader::new(LocalStorage::new(temp_dir.path()));
    let descriptor =
        FeedDescriptor::new("weather", "data/weather.json", WeatherReport::default());

    let result = loader.load(&descriptor);

    assert_eq!(result.source, FeedSource::Primary);
    assert_eq!(result.value.condition.as_deref(), Some("Overcast"));
    assert_eq!(result.value.location_or_default(), "Brooklyn, NY");
    assert_eq!(result.value.humidity, None);
}
