use anyhow::Result;
use tracing::{info, warn};

use crate::provider::SnapshotSource;
use crate::results::{
    completed_round, effective_round, next_race, total_races, NextRace, RaceResult,
    ResultsRepository, SeasonSnapshot,
};
use crate::scoring::{score_repository, ScoredCompetitor, ScoringParameters};

/// Outcome of the snapshot fetch for this run only.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Online,
    Offline { last_error: String },
}

impl FetchStatus {
    pub fn is_offline(&self) -> bool {
        matches!(self, FetchStatus::Offline { .. })
    }
}

/// Everything one dashboard render needs.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub snapshot: SeasonSnapshot,
    pub completed_round: u32, // Latest round with results
    pub round: u32,           // Boundary used for scoring and result listings
    pub total_races: u32,
    pub next_race: NextRace,
    pub scores: Vec<ScoredCompetitor>,
    pub status: FetchStatus,
}

impl Dashboard {
    /// Empty dashboard shown when the provider could not be reached.
    /// The calendar is unknown, so the next race is too.
    pub fn offline(season: &str, error: String) -> Self {
        Self {
            snapshot: SeasonSnapshot::empty(season),
            completed_round: 0,
            round: 0,
            total_races: 0,
            next_race: NextRace::Unknown,
            scores: Vec::new(),
            status: FetchStatus::Offline { last_error: error },
        }
    }

    /// Results up to the scoring boundary, ordered by round then finishing position
    pub fn results_in_window(&self) -> Vec<&RaceResult> {
        let mut rows: Vec<&RaceResult> = self
            .snapshot
            .results
            .iter()
            .filter(|r| r.round >= 1 && r.round <= self.round)
            .collect();
        rows.sort_by(|a, b| {
            a.round
                .cmp(&b.round)
                .then_with(|| {
                    let a_position = a.position.unwrap_or(u32::MAX);
                    a_position.cmp(&b.position.unwrap_or(u32::MAX))
                })
                .then_with(|| a.competitor_id.cmp(&b.competitor_id))
        });
        rows
    }
}

/// Fetch the season snapshot, derive the season position and score every
/// competitor up to the requested round.
///
/// A provider failure does not fail the run: the dashboard comes back empty
/// and flagged offline. Invalid scoring parameters do fail it.
pub async fn fetch_dashboard(
    source: &SnapshotSource,
    season: &str,
    requested_round: Option<u32>,
    params: &ScoringParameters,
) -> Result<Dashboard> {
    let snapshot = match source.fetch(season).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            let error = format!("{:#}", e);
            warn!(
                season,
                source = %source.describe(),
                error = %error,
                "Results provider unavailable"
            );
            return Ok(Dashboard::offline(season, error));
        }
    };

    Ok(build_dashboard(snapshot, requested_round, params)?)
}

/// Pure part of the run: everything after the snapshot is in hand.
pub fn build_dashboard(
    snapshot: SeasonSnapshot,
    requested_round: Option<u32>,
    params: &ScoringParameters,
) -> Result<Dashboard, crate::scoring::ScoringError> {
    let completed = completed_round(&snapshot.results);
    let round = effective_round(requested_round, completed);
    let total = total_races(&snapshot.schedule);
    let next = next_race(&snapshot.schedule, completed);

    let repo = ResultsRepository::up_to(&snapshot.results, round);
    let scores = score_repository(&repo, params)?;

    info!(
        season = %snapshot.season,
        completed_round = completed,
        round,
        total_races = total,
        competitors = scores.len(),
        "Dashboard ready"
    );

    Ok(Dashboard {
        snapshot,
        completed_round: completed,
        round,
        total_races: total,
        next_race: next,
        scores,
        status: FetchStatus::Online,
    })
}
