use serde::{Deserialize, Serialize};

use crate::scoring::ScoringParameters;

/// Default Ergast-compatible API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Season to load, e.g. "2025" (default: "current")
    #[serde(default)]
    pub season: Option<String>,

    /// Path to a JSON season snapshot; takes precedence over the API
    #[serde(default)]
    pub snapshot: Option<String>,

    /// Results API root (default: Jolpica)
    #[serde(default)]
    pub api_base_url: Option<String>,

    #[serde(default)]
    pub scoring: Option<ScoringParameters>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            season: Some("current".to_string()),
            snapshot: None,
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            scoring: Some(ScoringParameters::default()),
        }
    }
}

impl Config {
    pub fn season(&self) -> &str {
        self.season.as_deref().unwrap_or("current")
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }
}
