//! Catalog of trusted news sources.
//!
//! The catalog is read from a JSON file of the form
//! `{"results": [NewsSource, ...]}` the first time it is needed and cached
//! for the lifetime of the [`SourceCatalog`]. Front ends create one catalog
//! and pass it to whatever needs it.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of sources shown in the header listing.
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// One trusted news outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Lower is more prominent. Sources without a priority sort last.
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub total_article: Option<u64>,
    #[serde(default)]
    pub last_fetch: Option<String>,
}

impl NewsSource {
    fn priority_key(&self) -> f64 {
        self.priority.unwrap_or(f64::INFINITY)
    }
}

#[derive(Debug, Deserialize)]
struct SourceFile {
    #[serde(default)]
    results: Vec<NewsSource>,
}

/// Load-once registry of news sources.
#[derive(Debug)]
pub struct SourceCatalog {
    path: PathBuf,
    sources: OnceLock<Vec<NewsSource>>,
}

impl SourceCatalog {
    /// Catalog backed by `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sources: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All sources in file order.
    ///
    /// The file is read on the first successful call; later calls return the
    /// cached list. A failed read is not cached.
    pub fn sources(&self) -> Result<&[NewsSource]> {
        if let Some(sources) = self.sources.get() {
            return Ok(sources);
        }
        let loaded = load(&self.path)?;
        tracing::debug!(path = %self.path.display(), count = loaded.len(), "loaded news sources");
        Ok(self.sources.get_or_init(|| loaded))
    }

    /// The `n` most prominent sources, by ascending priority.
    ///
    /// Ties keep file order.
    pub fn top(&self, n: usize) -> Result<Vec<&NewsSource>> {
        let mut sources: Vec<&NewsSource> = self.sources()?.iter().collect();
        sources.sort_by(|a, b| a.priority_key().total_cmp(&b.priority_key()));
        sources.truncate(n);
        Ok(sources)
    }

    /// Returns true once the file has been read.
    pub fn is_loaded(&self) -> bool {
        self.sources.get().is_some()
    }
}

fn load(path: &Path) -> Result<Vec<NewsSource>> {
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let file: SourceFile = serde_json::from_str(&content).map_err(|e| SourceError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(file.results)
}
