//! Explicit presentation configuration.
//!
//! There is no process-wide style state: the page title and palette live in
//! a `PageConfig` built once in `main` (defaults, or a TOML file via
//! `--config`) and passed down to the renderer.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::services::encode::Color;

/// Chart palette. Defaults match the published dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Emphasis rows on category charts, and the trend line.
    pub emphasis: Color,
    /// Non-emphasis rows on the violation chart.
    pub neutral: Color,
    /// Non-emphasis rows on the keyword chart.
    pub muted: Color,
    /// Signed deltas: rising counts (a rising violation count reads as bad,
    /// so this matches the emphasis red).
    pub increase: Color,
    /// Signed deltas: falling counts.
    pub decrease: Color,
    /// Sophistication ratio above threshold.
    pub ratio_above: Color,
    /// Sophistication ratio at or below threshold.
    pub ratio_below: Color,
    /// Grouped-bar series: basic failures.
    pub series_primary: Color,
    /// Grouped-bar series: complex failures.
    pub series_secondary: Color,
    pub grid: Color,
    pub baseline: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            emphasis: Color::new("#dc2626"),
            neutral: Color::new("#475569"),
            muted: Color::new("#64748b"),
            increase: Color::new("#dc2626"),
            decrease: Color::new("#059669"),
            ratio_above: Color::new("#059669"),
            ratio_below: Color::new("#dc2626"),
            series_primary: Color::new("#f87171"),
            series_secondary: Color::new("#1e40af"),
            grid: Color::new("#f1f5f9"),
            baseline: Color::new("#94a3b8"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
    pub theme: Theme,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "When the Witness Goes Silent".to_string(),
            subtitle: "An investigation into 141 FDA warning letter observations reveals a \
                       troubling paradox: the systems designed to guarantee data integrity have \
                       become pharmaceutical manufacturing's most persistent failure."
                .to_string(),
            theme: Theme::default(),
        }
    }
}

pub fn load_page_config(path: Option<&Path>) -> anyhow::Result<PageConfig> {
    let Some(path) = path else {
        return Ok(PageConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read page config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse page config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_matches_published_dashboard() {
        let theme = Theme::default();
        assert_eq!(theme.emphasis.as_str(), "#dc2626");
        assert_eq!(theme.decrease.as_str(), "#059669");
        assert_eq!(theme.increase, theme.emphasis);
    }

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let cfg: PageConfig = toml::from_str(
            r##"
            title = "Custom Title"

            [theme]
            emphasis = "#111111"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.title, "Custom Title");
        assert_eq!(cfg.theme.emphasis.as_str(), "#111111");
        assert_eq!(cfg.theme.neutral, Theme::default().neutral);
        assert_eq!(cfg.subtitle, PageConfig::default().subtitle);
    }
}
