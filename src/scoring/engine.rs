use serde::Serialize;
use tracing::debug;

use super::config::ScoringParameters;
use super::form::{form_stats, recent_window, FormStats};
use super::ranking::rank;
use super::validation::{validate_scoring, ScoringError};
use super::volatility::volatility;
use crate::results::{RaceResult, ResultsRepository};

/// Normalized value given to every competitor when a signal has no spread
pub const NEUTRAL_SIGNAL: f64 = 0.5;

/// Final output record of a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FantasyScore {
    pub competitor_id: String,
    pub fantasy_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalContribution {
    pub label: &'static str, // "Recent", "Season", "Volatility"
    pub raw: f64,            // Value before normalization
    pub normalized: f64,     // Position within the population, [0, 1]
    pub contribution: f64,   // Signed weighted amount added to the score
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub recent: SignalContribution,
    pub season: SignalContribution,
    pub volatility: SignalContribution,
    pub season_total: f64,
    pub rounds: usize,
    pub recent_rounds: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCompetitor {
    pub competitor_id: String,
    pub fantasy_score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCompetitor {
    pub fn to_fantasy_score(&self) -> FantasyScore {
        FantasyScore {
            competitor_id: self.competitor_id.clone(),
            fantasy_score: self.fantasy_score,
        }
    }
}

/// Score every competitor in `results`, which the caller has already cut at
/// the completed round. Empty input gives empty output.
///
/// Parameters are checked before the results are touched.
pub fn compute_fantasy_scores(
    results: &[RaceResult],
    params: &ScoringParameters,
) -> Result<Vec<FantasyScore>, ScoringError> {
    first_violation(params)?;
    let repo = ResultsRepository::from_results(results);
    let ranked = score_repository(&repo, params)?;
    Ok(ranked.iter().map(ScoredCompetitor::to_fantasy_score).collect())
}

/// Validate `params`, then score and rank every competitor in `repo`.
pub fn score_repository(
    repo: &ResultsRepository,
    params: &ScoringParameters,
) -> Result<Vec<ScoredCompetitor>, ScoringError> {
    first_violation(params)?;

    let mut scored = combine(repo, params);
    rank(&mut scored);

    debug!(
        competitors = scored.len(),
        completed_round = repo.completed_round(),
        last_n = params.last_n,
        "Scored competitors"
    );
    Ok(scored)
}

fn first_violation(params: &ScoringParameters) -> Result<(), ScoringError> {
    validate_scoring(params).map_err(|mut errors| errors.remove(0))
}

/// Min-max scale `values` to [0, 1]. A population with no spread (including
/// a single value) maps every entry to 0.5.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return vec![NEUTRAL_SIGNAL; values.len()];
    }
    let span = max - min;
    values.iter().map(|v| (v - min) / span).collect()
}

/// Blend the three signals for every competitor. Output follows the
/// repository's id order; ranking happens separately.
fn combine(repo: &ResultsRepository, params: &ScoringParameters) -> Vec<ScoredCompetitor> {
    let rows: Vec<(&str, FormStats, f64)> = repo
        .iter()
        .map(|(id, results)| {
            let form = form_stats(results, params.last_n);
            let vol = volatility(recent_window(results, params.last_n));
            (id, form, vol)
        })
        .collect();

    let recent: Vec<f64> = rows.iter().map(|(_, f, _)| f.recent_form).collect();
    let season: Vec<f64> = rows.iter().map(|(_, f, _)| f.season_form).collect();
    let vol: Vec<f64> = rows.iter().map(|(_, _, v)| *v).collect();

    let norm_recent = normalize(&recent);
    let norm_season = normalize(&season);
    let norm_vol = normalize(&vol);

    rows.into_iter()
        .enumerate()
        .map(|(i, (id, form, raw_vol))| {
            let recent = SignalContribution {
                label: "Recent",
                raw: form.recent_form,
                normalized: norm_recent[i],
                contribution: params.weight_recent * norm_recent[i],
            };
            let season = SignalContribution {
                label: "Season",
                raw: form.season_form,
                normalized: norm_season[i],
                contribution: params.weight_season * norm_season[i],
            };
            let volatility = SignalContribution {
                label: "Volatility",
                raw: raw_vol,
                normalized: norm_vol[i],
                contribution: -params.volatility_penalty * norm_vol[i],
            };
            let fantasy_score = recent.contribution + season.contribution + volatility.contribution;

            ScoredCompetitor {
                competitor_id: id.to_string(),
                fantasy_score,
                breakdown: ScoreBreakdown {
                    recent,
                    season,
                    volatility,
                    season_total: form.season_total,
                    rounds: form.rounds,
                    recent_rounds: form.recent_rounds,
                },
            }
        })
        .collect()
}
