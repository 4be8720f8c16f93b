use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

use super::types::RaceResult;

/// Read-only view of a season's results up to a completed round.
///
/// Each competitor with at least one result in range maps to their results
/// ordered by ascending round. Competitors without results in range are
/// absent. The view is never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct ResultsRepository {
    completed_round: u32,
    by_competitor: BTreeMap<String, Vec<RaceResult>>,
}

impl ResultsRepository {
    /// Build a view over `results`, keeping rounds `1..=completed_round`.
    ///
    /// Round 0 entries are dropped. A repeated (competitor, round) pair keeps
    /// its first occurrence. Negative or non-finite points are kept and logged.
    pub fn up_to(results: &[RaceResult], completed_round: u32) -> Self {
        let mut by_competitor: BTreeMap<String, Vec<RaceResult>> = BTreeMap::new();
        let mut seen: HashSet<(&str, u32)> = HashSet::new();
        let mut out_of_window = 0usize;

        for result in results {
            if result.round == 0 {
                warn!(competitor = %result.competitor_id, "Dropping result with round 0");
                continue;
            }
            if result.round > completed_round {
                out_of_window += 1;
                continue;
            }
            if !seen.insert((result.competitor_id.as_str(), result.round)) {
                warn!(
                    competitor = %result.competitor_id,
                    round = result.round,
                    "Duplicate result for round, keeping the first"
                );
                continue;
            }
            if !result.points.is_finite() || result.points < 0.0 {
                warn!(
                    competitor = %result.competitor_id,
                    round = result.round,
                    points = result.points,
                    "Result has invalid points"
                );
            }
            by_competitor
                .entry(result.competitor_id.clone())
                .or_default()
                .push(result.clone());
        }

        for rounds in by_competitor.values_mut() {
            rounds.sort_by_key(|r| r.round);
        }

        debug!(
            completed_round,
            competitors = by_competitor.len(),
            skipped_after_boundary = out_of_window,
            "Built results repository"
        );

        Self {
            completed_round,
            by_competitor,
        }
    }

    /// Build a view over results the caller has already filtered.
    pub fn from_results(results: &[RaceResult]) -> Self {
        let boundary = results.iter().map(|r| r.round).max().unwrap_or(0);
        Self::up_to(results, boundary)
    }

    pub fn completed_round(&self) -> u32 {
        self.completed_round
    }

    /// Competitor ids in ascending order
    pub fn competitors(&self) -> impl Iterator<Item = &str> {
        self.by_competitor.keys().map(String::as_str)
    }

    /// A competitor's results ordered by round, or None if they have none in range
    pub fn results_for(&self, competitor_id: &str) -> Option<&[RaceResult]> {
        self.by_competitor.get(competitor_id).map(Vec::as_slice)
    }

    /// Iterate (competitor id, ordered results) pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RaceResult])> {
        self.by_competitor
            .iter()
            .map(|(id, results)| (id.as_str(), results.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_competitor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_competitor.is_empty()
    }
}
