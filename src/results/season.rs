use chrono::NaiveTime;

use super::types::{RaceResult, ScheduledRace, Standing};

/// Highest round that has any result, or 0 before the season starts.
pub fn completed_round(results: &[RaceResult]) -> u32 {
    results.iter().map(|r| r.round).max().unwrap_or(0)
}

/// Number of rounds on the calendar (highest scheduled round).
pub fn total_races(schedule: &[ScheduledRace]) -> u32 {
    schedule.iter().map(|r| r.round).max().unwrap_or(0)
}

/// Clamp a requested round to what has actually been run.
pub fn effective_round(requested: Option<u32>, completed: u32) -> u32 {
    match requested {
        Some(round) => round.min(completed),
        None => completed,
    }
}

/// What comes after the completed round.
#[derive(Debug, Clone, PartialEq)]
pub enum NextRace {
    Upcoming { name: String, when: String },
    SeasonComplete,
    Unknown,
}

/// Find the race following `completed_round`.
///
/// The first calendar entry numbered `completed_round + 1` wins. With no such
/// entry the season counts as complete once every scheduled round has run.
pub fn next_race(schedule: &[ScheduledRace], completed_round: u32) -> NextRace {
    // No round can follow u32::MAX
    let Some(target) = completed_round.checked_add(1) else {
        return NextRace::SeasonComplete;
    };
    if let Some(race) = schedule.iter().find(|r| r.round == target) {
        return NextRace::Upcoming {
            name: race.name.clone(),
            when: format_race_when(race),
        };
    }
    if completed_round >= total_races(schedule) {
        NextRace::SeasonComplete
    } else {
        NextRace::Unknown
    }
}

/// Format a race's start as "2025-03-16 04:00 UTC", "2025-03-16" or "TBA"
pub fn format_race_when(race: &ScheduledRace) -> String {
    let Some(date) = race.date else {
        return "TBA".to_string();
    };
    let time = race
        .time
        .as_deref()
        .map(|t| t.trim_end_matches('Z'))
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M:%S").ok());
    match time {
        Some(time) => format!("{} {} UTC", date.format("%Y-%m-%d"), time.format("%H:%M")),
        None => date.format("%Y-%m-%d").to_string(),
    }
}

/// Championship leader: the lowest position in the table.
pub fn leader(standings: &[Standing]) -> Option<&Standing> {
    standings.iter().min_by_key(|s| s.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn race(round: u32, name: &str) -> ScheduledRace {
        ScheduledRace {
            round,
            name: name.to_string(),
            date: None,
            time: None,
        }
    }

    #[test]
    fn test_completed_round_is_highest_result() {
        let results = vec![
            RaceResult::new("a", 1, 10.0),
            RaceResult::new("a", 3, 10.0),
            RaceResult::new("b", 2, 10.0),
        ];
        assert_eq!(completed_round(&results), 3);
        assert_eq!(completed_round(&[]), 0);
    }

    #[test]
    fn test_total_races() {
        let schedule = vec![race(1, "One"), race(3, "Three"), race(2, "Two")];
        assert_eq!(total_races(&schedule), 3);
        assert_eq!(total_races(&[]), 0);
    }

    #[test]
    fn test_effective_round_caps_request() {
        assert_eq!(effective_round(Some(10), 4), 4);
        assert_eq!(effective_round(Some(2), 4), 2);
        assert_eq!(effective_round(None, 4), 4);
    }

    #[test]
    fn test_next_race_upcoming() {
        let mut second = race(2, "Chinese Grand Prix");
        second.date = NaiveDate::from_ymd_opt(2025, 3, 23);
        second.time = Some("07:00:00Z".to_string());
        let schedule = vec![race(1, "Australian Grand Prix"), second];

        assert_eq!(
            next_race(&schedule, 1),
            NextRace::Upcoming {
                name: "Chinese Grand Prix".to_string(),
                when: "2025-03-23 07:00 UTC".to_string(),
            }
        );
    }

    #[test]
    fn test_next_race_first_match_wins() {
        let schedule = vec![race(1, "One"), race(2, "Two"), race(2, "Two again")];
        match next_race(&schedule, 1) {
            NextRace::Upcoming { name, .. } => assert_eq!(name, "Two"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_next_race_season_complete() {
        let schedule = vec![race(1, "One"), race(2, "Two")];
        assert_eq!(next_race(&schedule, 2), NextRace::SeasonComplete);
        // Empty calendar with nothing run also counts as complete
        assert_eq!(next_race(&[], 0), NextRace::SeasonComplete);
    }

    #[test]
    fn test_next_race_gap_in_calendar() {
        let schedule = vec![race(1, "One"), race(3, "Three")];
        assert_eq!(next_race(&schedule, 1), NextRace::Unknown);
    }

    #[test]
    fn test_next_race_after_last_possible_round() {
        let results = vec![RaceResult::new("a", u32::MAX, 1.0)];
        assert_eq!(next_race(&[], completed_round(&results)), NextRace::SeasonComplete);
        let schedule = vec![race(1, "One")];
        assert_eq!(next_race(&schedule, u32::MAX), NextRace::SeasonComplete);
    }

    #[test]
    fn test_format_race_when_variants() {
        let mut r = race(1, "One");
        assert_eq!(format_race_when(&r), "TBA");

        r.date = NaiveDate::from_ymd_opt(2025, 5, 4);
        assert_eq!(format_race_when(&r), "2025-05-04");

        r.time = Some("20:00:00Z".to_string());
        assert_eq!(format_race_when(&r), "2025-05-04 20:00 UTC");

        r.time = Some("garbage".to_string());
        assert_eq!(format_race_when(&r), "2025-05-04");
    }

    #[test]
    fn test_leader_lowest_position() {
        let standings = vec![
            Standing { position: 2, name: "verstappen".to_string(), points: 90.0 },
            Standing { position: 1, name: "norris".to_string(), points: 100.0 },
        ];
        assert_eq!(leader(&standings).unwrap().name, "norris");
        assert!(leader(&[]).is_none());
    }
}
