use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::fetch::Dashboard;
use crate::results::{leader, NextRace, RaceResult, Standing};
use crate::scoring::{FantasyScore, ScoredCompetitor, SignalContribution};

pub const NO_FANTASY_DATA: &str =
    "No fantasy data yet. Try increasing the completed round or last N.";

pub const NO_STANDINGS: &str = "No standings data.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Fantasy scores are small relative numbers; three decimals separate them
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Points without a trailing ".0" for whole numbers ("25", "0.5")
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked scores as a table: Index, Score, Competitor, Rounds
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column: 7 chars, right-aligned (fits "-0.200")
pub fn format_scored_table(scores: &[ScoredCompetitor], use_colors: bool) -> String {
    if scores.is_empty() {
        return NO_FANTASY_DATA.to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 7;
    let rounds_width = 10; // "  12 rounds"
    let separator = "  ";

    scores
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!(
                "{:>width$}",
                format_score(scored.fantasy_score),
                width = score_width
            );
            let rounds = format!("{} rounds", scored.breakdown.rounds);

            let fixed_width = index_width + 1 + score_width + separator.len() * 2 + rounds_width;
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&scored.competitor_id, width - fixed_width)
                }
                Some(_) => truncate_name(&scored.competitor_id, 20),
                None => scored.competitor_id.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    rounds.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, name, separator, rounds
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_signal(signal: &SignalContribution) -> String {
    format!(
        "{:<10} raw {:>7.2}  norm {:.3}  {:+.3}",
        signal.label, signal.raw, signal.normalized, signal.contribution
    )
}

/// Multi-line score breakdown for one competitor (for --breakdown)
pub fn format_breakdown(scored: &ScoredCompetitor, use_colors: bool) -> String {
    let b = &scored.breakdown;
    let heading = format!(
        "{}  {}",
        scored.competitor_id,
        format_score(scored.fantasy_score)
    );
    let heading = if use_colors {
        heading.bold().to_string()
    } else {
        heading
    };
    format!(
        "{}\n  Rounds: {} (last {} in recent window), {} pts total\n  {}\n  {}\n  {}",
        heading,
        b.rounds,
        b.recent_rounds,
        format_points(b.season_total),
        format_signal(&b.recent),
        format_signal(&b.season),
        format_signal(&b.volatility),
    )
}

/// Format scores as tab-separated values for scripting
/// Columns: rank, competitor, score (no headers, no colors)
pub fn format_tsv(scores: &[ScoredCompetitor]) -> String {
    scores
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            format!(
                "{}\t{}\t{}",
                idx + 1,
                scored.competitor_id,
                format_score(scored.fantasy_score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scores as a JSON array of `{competitor_id, fantasy_score}`
pub fn format_json(scores: &[ScoredCompetitor]) -> Result<String> {
    let records: Vec<FantasyScore> = scores
        .iter()
        .map(ScoredCompetitor::to_fantasy_score)
        .collect();
    serde_json::to_string_pretty(&records).context("Failed to serialize fantasy scores")
}

/// Warning shown when the results provider could not be reached
pub fn format_offline_banner(last_error: &str, use_colors: bool) -> String {
    let title = "Network issue or API unreachable. You're in Offline Mode.";
    let detail = "Some tables may be empty.";
    if use_colors {
        format!(
            "{} {}\n  Last error: {}",
            title.yellow().bold(),
            detail,
            last_error.dimmed()
        )
    } else {
        format!("{} {}\n  Last error: {}", title, detail, last_error)
    }
}

fn format_leader(label: &str, standings: &[Standing]) -> String {
    match leader(standings) {
        Some(s) => format!("{}: {} ({} pts)", label, s.name, format_points(s.points)),
        None => format!("{}: -", label),
    }
}

/// Season KPIs: completed rounds, championship leaders, next race
pub fn format_summary(dashboard: &Dashboard, use_colors: bool) -> String {
    let title = format!("Season {}", dashboard.snapshot.season);
    let title = if use_colors {
        title.bold().to_string()
    } else {
        title
    };

    let next = match &dashboard.next_race {
        NextRace::Upcoming { name, when } => format!("Next race: {} ({})", name, when),
        NextRace::SeasonComplete => "Next race: Season Complete".to_string(),
        NextRace::Unknown => "Next race: TBA".to_string(),
    };

    [
        title,
        format!(
            "Completed rounds: {} of {}",
            dashboard.completed_round, dashboard.total_races
        ),
        format_leader("Drivers' leader", &dashboard.snapshot.driver_standings),
        format_leader("Constructors' leader", &dashboard.snapshot.constructor_standings),
        next,
    ]
    .join("\n")
}

/// Championship table ordered by position, then name.
/// Unclassified entries (no position) are listed last as "-".
pub fn format_standings_table(standings: &[Standing], use_colors: bool) -> String {
    if standings.is_empty() {
        return NO_STANDINGS.to_string();
    }

    let mut rows: Vec<&Standing> = standings.iter().collect();
    rows.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));

    rows.iter()
        .map(|s| {
            let position = if s.position == u32::MAX {
                "-".to_string()
            } else {
                format!("{}.", s.position)
            };
            let points = format!("{:>6}", format_points(s.points));
            let points = if use_colors {
                points.bold().to_string()
            } else {
                points
            };
            format!("{:>4}  {:<24}{} pts", position, s.name, points)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-race results grouped under a round heading
pub fn format_results_table(rows: &[&RaceResult], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No race results.".to_string();
    }

    let mut lines = Vec::new();
    let mut current_round = None;
    for row in rows {
        if current_round != Some(row.round) {
            current_round = Some(row.round);
            let heading = format!("Round {}", row.round);
            lines.push(if use_colors {
                heading.bold().to_string()
            } else {
                heading
            });
        }
        let position = row
            .position
            .map(|p| format!("P{}", p))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "  {:>4}  {:<24}{:>5}",
            position,
            row.competitor_id,
            format_points(row.points)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchStatus;
    use crate::results::SeasonSnapshot;
    use crate::scoring::ScoreBreakdown;

    fn signal(
        label: &'static str,
        raw: f64,
        normalized: f64,
        contribution: f64,
    ) -> SignalContribution {
        SignalContribution {
            label,
            raw,
            normalized,
            contribution,
        }
    }

    fn sample_scored(id: &str, score: f64) -> ScoredCompetitor {
        ScoredCompetitor {
            competitor_id: id.to_string(),
            fantasy_score: score,
            breakdown: ScoreBreakdown {
                recent: signal("Recent", 10.0, 0.5, 0.35),
                season: signal("Season", 10.0, 0.5, 0.15),
                volatility: signal("Volatility", 14.14, 1.0, -0.2),
                season_total: 30.0,
                rounds: 3,
                recent_rounds: 3,
            },
        }
    }

    fn sample_dashboard() -> Dashboard {
        Dashboard {
            snapshot: SeasonSnapshot {
                season: "2025".to_string(),
                schedule: vec![],
                results: vec![],
                driver_standings: vec![
                    Standing { position: 2, name: "piastri".to_string(), points: 90.0 },
                    Standing { position: 1, name: "norris".to_string(), points: 101.0 },
                ],
                constructor_standings: vec![],
            },
            completed_round: 4,
            round: 4,
            total_races: 24,
            next_race: NextRace::Upcoming {
                name: "Bahrain Grand Prix".to_string(),
                when: "2025-04-13 15:00 UTC".to_string(),
            },
            scores: vec![],
            status: FetchStatus::Online,
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.5), "0.500");
        assert_eq!(format_score(-0.2), "-0.200");
        assert_eq!(format_score(0.0), "0.000");
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(25.0), "25");
        assert_eq!(format_points(0.5), "0.5");
        assert_eq!(format_points(0.0), "0");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("norris", 20), "norris");
        assert_eq!(truncate_name("max_verstappen", 10), "max_ver...");
        assert_eq!(truncate_name("hamilton", 3), "ham");
    }

    #[test]
    fn test_format_scored_table_empty() {
        assert_eq!(format_scored_table(&[], false), NO_FANTASY_DATA);
    }

    #[test]
    fn test_format_scored_table_rows() {
        let scores = vec![sample_scored("a", 0.5), sample_scored("b", 0.3)];
        let result = format_scored_table(&scores, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("0.500"));
        assert!(lines[0].contains("a"));
        assert!(lines[0].ends_with("3 rounds"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("0.300"));
    }

    #[test]
    fn test_format_breakdown() {
        let result = format_breakdown(&sample_scored("b", 0.3), false);
        assert!(result.starts_with("b  0.300"));
        assert!(result.contains("Rounds: 3 (last 3 in recent window), 30 pts total"));
        assert!(result.contains("Volatility"));
        assert!(result.contains("-0.200"));
        assert!(result.contains("+0.350"));
    }

    #[test]
    fn test_format_tsv() {
        let scores = vec![sample_scored("a", 0.5), sample_scored("b", 0.3)];
        assert_eq!(format_tsv(&scores), "1\ta\t0.500\n2\tb\t0.300");
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_json() {
        let scores = vec![sample_scored("a", 0.5)];
        let json = format_json(&scores).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["competitor_id"], "a");
        assert_eq!(parsed[0]["fantasy_score"], 0.5);
        assert_eq!(format_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_format_offline_banner() {
        let banner = format_offline_banner("connection refused", false);
        assert!(banner.contains("Offline Mode"));
        assert!(banner.contains("Last error: connection refused"));
    }

    #[test]
    fn test_format_summary() {
        let summary = format_summary(&sample_dashboard(), false);
        assert!(summary.starts_with("Season 2025"));
        assert!(summary.contains("Completed rounds: 4 of 24"));
        assert!(summary.contains("Drivers' leader: norris (101 pts)"));
        assert!(summary.contains("Constructors' leader: -"));
        assert!(summary.contains("Next race: Bahrain Grand Prix (2025-04-13 15:00 UTC)"));
    }

    #[test]
    fn test_format_summary_season_complete() {
        let mut dashboard = sample_dashboard();
        dashboard.next_race = NextRace::SeasonComplete;
        assert!(format_summary(&dashboard, false).contains("Next race: Season Complete"));
    }

    #[test]
    fn test_format_summary_offline_next_race_unknown() {
        let dashboard = Dashboard::offline("2025", "connection refused".to_string());
        let summary = format_summary(&dashboard, false);
        assert!(summary.contains("Completed rounds: 0 of 0"));
        assert!(summary.contains("Next race: TBA"));
        assert!(!summary.contains("Season Complete"));
    }

    #[test]
    fn test_format_results_table() {
        let mut first = RaceResult::new("norris", 1, 25.0);
        first.position = Some(1);
        let second = RaceResult::new("stroll", 1, 0.0);
        let third = RaceResult::new("norris", 2, 18.0);
        let rows = vec![&first, &second, &third];

        let result = format_results_table(&rows, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Round 1");
        assert!(lines[1].contains("P1"));
        assert!(lines[1].contains("norris"));
        assert!(lines[1].ends_with("25"));
        assert!(lines[2].contains("-"));
        assert_eq!(lines[3], "Round 2");
    }

    #[test]
    fn test_format_driver_standings_table() {
        let standings = vec![
            Standing { position: u32::MAX, name: "reserve".to_string(), points: 0.0 },
            Standing { position: 2, name: "piastri".to_string(), points: 90.0 },
            Standing { position: 1, name: "norris".to_string(), points: 101.5 },
        ];
        let result = format_standings_table(&standings, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  1."));
        assert!(lines[0].contains("norris"));
        assert!(lines[0].ends_with("101.5 pts"));
        assert!(lines[1].contains("piastri"));
        assert!(lines[1].ends_with("90 pts"));
        assert!(lines[2].starts_with("   -"));
        assert!(lines[2].contains("reserve"));
    }

    #[test]
    fn test_format_constructor_standings_table() {
        let standings = vec![
            Standing { position: 2, name: "Ferrari".to_string(), points: 61.0 },
            Standing { position: 1, name: "McLaren".to_string(), points: 78.0 },
        ];
        let result = format_standings_table(&standings, false);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].contains("McLaren"));
        assert!(lines[1].contains("Ferrari"));
        assert_eq!(format_standings_table(&[], false), NO_STANDINGS);
    }

    #[test]
    fn test_format_results_table_empty() {
        assert_eq!(format_results_table(&[], false), "No race results.");
    }
}
