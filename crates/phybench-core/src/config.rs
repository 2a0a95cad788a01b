//! Site configuration.
//!
//! Values come from environment variables with sensible defaults; CLI flags
//! override them.
//!
//! | Variable                    | Default                 |
//! |-----------------------------|-------------------------|
//! | `PHYBENCH_DATA`             | `data/leaderboard.json` |
//! | `PHYBENCH_NEWS`             | `data/news.json`        |
//! | `PHYBENCH_PERFORMANCE_MODE` | `false`                 |
//! | `PHYBENCH_BAR_WIDTH`        | `40`                    |

use serde::{Deserialize, Serialize};

/// Well-known location of the leaderboard data file.
pub const DEFAULT_DATA_SOURCE: &str = "data/leaderboard.json";
pub const DEFAULT_NEWS_SOURCE: &str = "data/news.json";

pub const DEFAULT_BAR_WIDTH: usize = 40;
pub const MIN_BAR_WIDTH: usize = 10;
pub const MAX_BAR_WIDTH: usize = 200;

/// Options injected into the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Plain ASCII output instead of fractional block glyphs.
    pub performance_mode: bool,
    /// Width, in cells, of the longest possible bar (a score of 100).
    pub bar_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            performance_mode: false,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl RenderConfig {
    pub fn with_performance_mode(mut self, on: bool) -> Self {
        self.performance_mode = on;
        self
    }

    /// Set the bar width, clamped to `MIN_BAR_WIDTH..=MAX_BAR_WIDTH`.
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        self
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// File path or `http(s)://` URL of the data file.
    pub data_source: String,
    /// File path or `http(s)://` URL of the news timeline.
    pub news_source: String,
    pub render: RenderConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl SiteConfig {
    /// Create a config from environment variables.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Build from an arbitrary key lookup (the environment, in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_source = lookup("PHYBENCH_DATA")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string());
        let news_source = lookup("PHYBENCH_NEWS")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NEWS_SOURCE.to_string());
        let performance_mode = lookup("PHYBENCH_PERFORMANCE_MODE")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let bar_width = lookup("PHYBENCH_BAR_WIDTH")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_BAR_WIDTH);

        Self {
            data_source,
            news_source,
            render: RenderConfig::default()
                .with_performance_mode(performance_mode)
                .with_bar_width(bar_width),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SiteConfig::from_lookup(|_| None);
        assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
        assert_eq!(config.news_source, DEFAULT_NEWS_SOURCE);
        assert!(!config.render.performance_mode);
        assert_eq!(config.render.bar_width, DEFAULT_BAR_WIDTH);
    }

    #[test]
    fn reads_overrides() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("PHYBENCH_DATA", "https://example.org/leaderboard.json"),
            ("PHYBENCH_PERFORMANCE_MODE", "Yes"),
            ("PHYBENCH_BAR_WIDTH", "64"),
            ("PHYBENCH_NEWS", "/srv/site/news.json"),
        ]));
        assert_eq!(config.news_source, "/srv/site/news.json");
        assert_eq!(config.data_source, "https://example.org/leaderboard.json");
        assert!(config.render.performance_mode);
        assert_eq!(config.render.bar_width, 64);
    }

    #[test]
    fn bar_width_is_clamped_and_garbage_ignored() {
        let wide = SiteConfig::from_lookup(lookup_from(&[("PHYBENCH_BAR_WIDTH", "9999")]));
        assert_eq!(wide.render.bar_width, MAX_BAR_WIDTH);

        let junk = SiteConfig::from_lookup(lookup_from(&[("PHYBENCH_BAR_WIDTH", "wide")]));
        assert_eq!(junk.render.bar_width, DEFAULT_BAR_WIDTH);
    }

    #[test]
    fn blank_data_source_falls_back() {
        let config = SiteConfig::from_lookup(lookup_from(&[("PHYBENCH_DATA", "  ")]));
        assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
    }
}
