//! Configuration for the content backend.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the content store and API surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory holding issue folders, the pointer file and images.
    pub data_dir: PathBuf,
    /// Issue number used when the pointer file is unreadable.
    pub fallback_issue: u32,
    /// Number of ranked articles returned by the feed endpoints.
    pub feed_limit: usize,
    /// Width applied when the query parameter is missing or invalid.
    pub default_image_width: u32,
    /// Upper bound for requested image widths.
    pub max_image_width: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fallback_issue: 10,
            feed_limit: 20,
            default_image_width: 500,
            max_image_width: 4000,
        }
    }
}

impl ContentConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the environment (`MASTHEAD_DATA_DIR`).
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("MASTHEAD_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the fallback issue number.
    #[must_use]
    pub const fn with_fallback_issue(mut self, issue: u32) -> Self {
        self.fallback_issue = issue;
        self
    }

    /// Set the feed prefix length.
    #[must_use]
    pub const fn with_feed_limit(mut self, limit: usize) -> Self {
        self.feed_limit = limit;
        self
    }

    /// Set the default image width.
    #[must_use]
    pub const fn with_default_image_width(mut self, width: u32) -> Self {
        self.default_image_width = width;
        self
    }
}
