use crate::results::RaceResult;

/// Population standard deviation of points over `window`.
/// Zero or one data point has no dispersion.
pub fn volatility(window: &[RaceResult]) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }
    let n = window.len() as f64;
    let mean = window.iter().map(|r| r.points).sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|r| (r.points - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}
