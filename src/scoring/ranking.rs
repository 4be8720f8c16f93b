use std::cmp::Ordering;

use super::engine::ScoredCompetitor;

/// Ranking order: score descending, then season total points descending,
/// then competitor id ascending. Floats compare by total ordering.
pub fn ranking_order(a: &ScoredCompetitor, b: &ScoredCompetitor) -> Ordering {
    // Primary: score descending
    b.fantasy_score
        .total_cmp(&a.fantasy_score)
        // Tie-breaker: more points over the season first
        .then_with(|| {
            b.breakdown
                .season_total
                .total_cmp(&a.breakdown.season_total)
        })
        .then_with(|| a.competitor_id.cmp(&b.competitor_id))
}

/// Sort scored competitors into final ranking order. Idempotent.
pub fn rank(scored: &mut [ScoredCompetitor]) {
    scored.sort_by(ranking_order);
}
