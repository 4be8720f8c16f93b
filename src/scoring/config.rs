use serde::{Deserialize, Serialize};

/// Tunable weights for a fantasy scoring run.
///
/// Any field missing from the config file falls back to its default.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   last_n: 5
///   weight_recent: 0.7
///   weight_season: 0.3
///   volatility_penalty: 0.2
/// ```
///
/// The weights do not need to sum to 1.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringParameters {
    /// Size of the recent-form window in rounds (at least 2)
    pub last_n: usize,

    /// Weight of the normalized recent form
    pub weight_recent: f64,

    /// Weight of the normalized season form
    pub weight_season: f64,

    /// Amount subtracted per unit of normalized volatility
    pub volatility_penalty: f64,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            last_n: 5,
            weight_recent: 0.7,
            weight_season: 0.3,
            volatility_penalty: 0.2,
        }
    }
}

/// Per-run overrides, typically from command line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterOverrides {
    pub last_n: Option<usize>,
    pub weight_recent: Option<f64>,
    pub weight_season: Option<f64>,
    pub volatility_penalty: Option<f64>,
}

impl ScoringParameters {
    /// Return a copy with every present override applied
    pub fn with_overrides(&self, overrides: &ParameterOverrides) -> Self {
        Self {
            last_n: overrides.last_n.unwrap_or(self.last_n),
            weight_recent: overrides.weight_recent.unwrap_or(self.weight_recent),
            weight_season: overrides.weight_season.unwrap_or(self.weight_season),
            volatility_penalty: overrides
                .volatility_penalty
                .unwrap_or(self.volatility_penalty),
        }
    }
}
