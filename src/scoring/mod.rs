pub mod config;
pub mod engine;
pub mod form;
pub mod ranking;
pub mod validation;
pub mod volatility;

pub use config::*;
pub use engine::{
    compute_fantasy_scores, normalize, score_repository, FantasyScore, ScoreBreakdown,
    ScoredCompetitor, SignalContribution,
};
pub use form::{form_stats, FormStats};
pub use ranking::rank;
pub use validation::{validate_scoring, ScoringError};
pub use volatility::volatility;
