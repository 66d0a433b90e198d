//! Loads JSON feeds from an ordered list of candidate paths.
//!
//! The loader walks the primary path and then each fallback. A missing file
//! moves on silently. A file that exists but cannot be parsed is logged with
//! its error position and skipped; malformed JSON (as opposed to well-formed
//! JSON of the wrong shape) is also copied aside as `<path>.corrupted.<millis>`. When no candidate yields a value the descriptor's default is
//! returned. `load` never fails.

use crate::domain::ports::Storage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Primary,
    Fallback,
    Default,
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeedSource::Primary => "primary",
            FeedSource::Fallback => "fallback",
            FeedSource::Default => "default",
        })
    }
}

#[derive(Debug, Clone)]
pub struct FeedDescriptor<T> {
    pub name: String,
    pub primary_path: PathBuf,
    pub fallback_paths: Vec<PathBuf>,
    pub default_value: T,
}

impl<T> FeedDescriptor<T> {
    pub fn new(name: impl Into<String>, primary_path: impl Into<PathBuf>, default_value: T) -> Self {
        Self {
            name: name.into(),
            primary_path: primary_path.into(),
            fallback_paths: Vec::new(),
            default_value,
        }
    }

    pub fn with_fallback(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_paths.push(path.into());
        self
    }

    pub fn with_fallbacks<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.fallback_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Every candidate in search order, tagged with the source it would report.
    pub fn candidates(&self) -> impl Iterator<Item = (FeedSource, &Path)> {
        std::iter::once((FeedSource::Primary, self.primary_path.as_path())).chain(
            self.fallback_paths
                .iter()
                .map(|path| (FeedSource::Fallback, path.as_path())),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedResult<T> {
    pub name: String,
    pub value: T,
    pub source: FeedSource,
    /// The candidate that supplied `value`; `None` for the default.
    pub path: Option<PathBuf>,
    pub ok: bool,
}

impl<T> FeedResult<T> {
    pub fn is_default(&self) -> bool {
        self.source == FeedSource::Default
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FeedResult<U> {
        FeedResult {
            name: self.name,
            value: f(self.value),
            source: self.source,
            path: self.path,
            ok: self.ok,
        }
    }
}

enum Attempt<T> {
    Missing,
    Rejected,
    Parsed(T),
}

pub struct FeedLoader<S: Storage> {
    storage: S,
}

impl<S: Storage> FeedLoader<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load<T>(&self, descriptor: &FeedDescriptor<T>) -> FeedResult<T>
    where
        T: DeserializeOwned + Clone,
    {
        for (source, path) in descriptor.candidates() {
            match self.attempt::<T>(&descriptor.name, path) {
                Attempt::Missing => {
                    tracing::debug!("Feed '{}': no file at {}", descriptor.name, path.display());
                }
                Attempt::Rejected => {}
                Attempt::Parsed(value) => {
                    tracing::debug!(
                        "Feed '{}' loaded from {} ({})",
                        descriptor.name,
                        path.display(),
                        source
                    );
                    return FeedResult {
                        name: descriptor.name.clone(),
                        value,
                        source,
                        path: Some(path.to_path_buf()),
                        ok: true,
                    };
                }
            }
        }

        tracing::info!(
            "Feed '{}': no usable candidate, using built-in default",
            descriptor.name
        );
        FeedResult {
            name: descriptor.name.clone(),
            value: descriptor.default_value.clone(),
            source: FeedSource::Default,
            path: None,
            ok: false,
        }
    }

    fn attempt<T: DeserializeOwned>(&self, feed: &str, path: &Path) -> Attempt<T> {
        let bytes = match self.storage.read_file(path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Attempt::Missing,
            Err(e) => {
                tracing::warn!("Feed '{}': failed to read {}: {}", feed, path.display(), e);
                return Attempt::Rejected;
            }
        };

        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => Attempt::Parsed(value),
            Err(e) => {
                let offset = byte_offset(&bytes, e.line(), e.column());
                tracing::warn!(
                    "Feed '{}': failed to parse {} at line {}, column {} (byte {}, {:?}): {}",
                    feed,
                    path.display(),
                    e.line(),
                    e.column(),
                    offset,
                    e.classify(),
                    e
                );
                if matches!(e.classify(), Category::Syntax | Category::Eof) {
                    self.back_up_corrupted(feed, path);
                }
                Attempt::Rejected
            }
        }
    }

    fn back_up_corrupted(&self, feed: &str, path: &Path) {
        let stamp = chrono::Utc::now().timestamp_millis();
        let backup = unique_backup_path(path, stamp, |candidate| self.storage.exists(candidate));

        match self.storage.copy_file(path, &backup) {
            Ok(()) => tracing::warn!(
                "Feed '{}': corrupted file saved to {}",
                feed,
                backup.display()
            ),
            Err(e) => tracing::error!(
                "Feed '{}': failed to back up corrupted file {}: {}",
                feed,
                path.display(),
                e
            ),
        }
    }
}

/// `<path>.corrupted.<stamp>`, with `-<n>` appended while the name is taken.
pub fn unique_backup_path(path: &Path, stamp: i64, taken: impl Fn(&Path) -> bool) -> PathBuf {
    let mut base = OsString::from(path.as_os_str());
    base.push(format!(".corrupted.{}", stamp));
    let first = PathBuf::from(&base);
    if !taken(&first) {
        return first;
    }

    (1u32..)
        .map(|n| {
            let mut name = base.clone();
            name.push(format!("-{}", n));
            PathBuf::from(name)
        })
        .find(|candidate| !taken(candidate))
        .unwrap_or(first)
}

/// Converts serde_json's 1-based line/column into a byte offset into `bytes`.
pub fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split_inclusive(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(<[u8]>::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(bytes.len())
}
