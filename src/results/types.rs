use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One competitor's outcome in one completed round.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RaceResult {
    pub competitor_id: String,
    pub round: u32,          // 1-based
    pub points: f64,
    #[serde(default)]
    pub position: Option<u32>, // Finishing rank, display only
}

impl RaceResult {
    pub fn new(competitor_id: impl Into<String>, round: u32, points: f64) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            round,
            points,
            position: None,
        }
    }
}

/// One entry of the season calendar.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScheduledRace {
    pub round: u32,
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>, // "HH:MM:SSZ" as published
}

/// A row of the drivers' or constructors' championship table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Standing {
    pub position: u32,
    pub name: String,
    pub points: f64,
}

/// Everything the dashboard knows about a season at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SeasonSnapshot {
    pub season: String,
    #[serde(default)]
    pub schedule: Vec<ScheduledRace>,
    #[serde(default)]
    pub results: Vec<RaceResult>,
    #[serde(default)]
    pub driver_standings: Vec<Standing>,
    #[serde(default)]
    pub constructor_standings: Vec<Standing>,
}

impl SeasonSnapshot {
    /// Empty snapshot used when the provider is unreachable
    pub fn empty(season: &str) -> Self {
        Self {
            season: season.to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parse_minimal() {
        let json = r#"{ "season": "2025" }"#;
        let snapshot: SeasonSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.season, "2025");
        assert!(snapshot.schedule.is_empty());
        assert!(snapshot.results.is_empty());
    }

    #[test]
    fn test_snapshot_parse_full() {
        let json = r#"{
            "season": "2025",
            "schedule": [
                { "round": 1, "name": "Australian Grand Prix",
                  "date": "2025-03-16", "time": "04:00:00Z" },
                { "round": 2, "name": "Chinese Grand Prix" }
            ],
            "results": [
                { "competitor_id": "norris", "round": 1, "points": 25, "position": 1 },
                { "competitor_id": "verstappen", "round": 1, "points": 18 }
            ],
            "driver_standings": [ { "position": 1, "name": "norris", "points": 25 } ],
            "constructor_standings": [ { "position": 1, "name": "McLaren", "points": 25 } ]
        }"#;
        let snapshot: SeasonSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.schedule.len(), 2);
        assert_eq!(
            snapshot.schedule[0].date,
            NaiveDate::from_ymd_opt(2025, 3, 16)
        );
        assert!(snapshot.schedule[1].date.is_none());
        assert_eq!(snapshot.results[0].position, Some(1));
        assert_eq!(snapshot.results[1].position, None);
        assert_eq!(snapshot.constructor_standings[0].name, "McLaren");
    }

    #[test]
    fn test_empty_snapshot_keeps_season() {
        let snapshot = SeasonSnapshot::empty("2024");
        assert_eq!(snapshot.season, "2024");
        assert!(snapshot.driver_standings.is_empty());
    }
}
