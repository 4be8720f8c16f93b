use thiserror::Error;

use super::config::ScoringParameters;

/// Smallest recent-form window that still has a notion of dispersion
pub const MIN_LAST_N: usize = 2;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("scoring.{parameter}: {constraint} (got {value})")]
    InvalidParameter {
        parameter: &'static str,
        constraint: &'static str,
        value: f64,
    },
}

/// Validate scoring parameters before a run.
/// Returns all violations at once (not just the first).
pub fn validate_scoring(params: &ScoringParameters) -> Result<(), Vec<ScoringError>> {
    let mut errors = Vec::new();

    if params.last_n < MIN_LAST_N {
        errors.push(ScoringError::InvalidParameter {
            parameter: "last_n",
            constraint: "must be at least 2",
            value: params.last_n as f64,
        });
    }

    let weights = [
        ("weight_recent", params.weight_recent),
        ("weight_season", params.weight_season),
        ("volatility_penalty", params.volatility_penalty),
    ];
    for (parameter, value) in weights {
        if !value.is_finite() {
            errors.push(ScoringError::InvalidParameter {
                parameter,
                constraint: "must be a finite number",
                value,
            });
        } else if value < 0.0 {
            errors.push(ScoringError::InvalidParameter {
                parameter,
                constraint: "must be non-negative",
                value,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(last_n: usize, recent: f64, season: f64, penalty: f64) -> ScoringParameters {
        ScoringParameters {
            last_n,
            weight_recent: recent,
            weight_season: season,
            volatility_penalty: penalty,
        }
    }

    #[test]
    fn test_valid_parameters() {
        assert!(validate_scoring(&ScoringParameters::default()).is_ok());
    }

    #[test]
    fn test_weights_above_one_allowed() {
        assert!(validate_scoring(&params(2, 3.0, 2.0, 1.5)).is_ok());
    }

    #[test]
    fn test_zero_weights_allowed() {
        assert!(validate_scoring(&params(2, 0.0, 0.0, 0.0)).is_ok());
    }

    #[test]
    fn test_last_n_one_rejected() {
        let errors = validate_scoring(&params(1, 0.7, 0.3, 0.2)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            ScoringError::InvalidParameter {
                parameter: "last_n",
                constraint: "must be at least 2",
                value: 1.0,
            }
        );
        assert!(errors[0].to_string().contains("scoring.last_n"));
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let errors = validate_scoring(&params(5, 0.7, 0.3, -0.1)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("volatility_penalty"));
        assert!(errors[0].to_string().contains("non-negative"));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let errors = validate_scoring(&params(5, f64::NAN, f64::INFINITY, 0.2)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("weight_recent"));
        assert!(errors[1].to_string().contains("weight_season"));
        assert!(errors.iter().all(|e| e.to_string().contains("finite")));
    }

    #[test]
    fn test_collects_all_errors() {
        let errors = validate_scoring(&params(0, -1.0, -1.0, -1.0)).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
