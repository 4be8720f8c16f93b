use crate::results::RaceResult;

/// Form statistics for one competitor.
#[derive(Debug, Clone, PartialEq)]
pub struct FormStats {
    pub season_form: f64,  // Mean points over every round in the window
    pub recent_form: f64,  // Mean points over the recent window
    pub season_total: f64, // Sum of points, used for tie-breaks
    pub rounds: usize,
    pub recent_rounds: usize,
}

/// The last `min(last_n, len)` results. Expects results ordered by round.
pub fn recent_window(results: &[RaceResult], last_n: usize) -> &[RaceResult] {
    let take = last_n.min(results.len());
    &results[results.len() - take..]
}

/// Compute season and recent form from round-ordered results.
///
/// Fewer results than `last_n` means the recent window is everything
/// available; nothing is padded.
pub fn form_stats(results: &[RaceResult], last_n: usize) -> FormStats {
    let window = recent_window(results, last_n);
    let season_total: f64 = results.iter().map(|r| r.points).sum();
    FormStats {
        season_form: mean(results),
        recent_form: mean(window),
        season_total,
        rounds: results.len(),
        recent_rounds: window.len(),
    }
}

fn mean(results: &[RaceResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.points).sum::<f64>() / results.len() as f64
}
