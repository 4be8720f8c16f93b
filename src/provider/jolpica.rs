//! Ergast-compatible results API (served by Jolpica).
//!
//! Every numeric field arrives as a string. Rows that fail to parse are
//! skipped with a warning rather than failing the whole fetch.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, warn};

use crate::results::{RaceResult, ScheduledRace, SeasonSnapshot, Standing};

/// The API caps page size at 100 rows
const PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "MRData")]
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RaceData {
    #[serde(default)]
    pub total: Option<String>,
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RaceTable {
    #[serde(rename = "Races", default)]
    pub races: Vec<Race>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Race {
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "Results", default)]
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultRow {
    #[serde(default)]
    pub position: Option<String>,
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Driver {
    #[serde(rename = "driverId")]
    pub driver_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Constructor {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandingsData {
    #[serde(rename = "StandingsTable")]
    pub standings_table: StandingsTable,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandingsTable {
    #[serde(rename = "StandingsLists", default)]
    pub lists: Vec<StandingsList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandingsList {
    #[serde(rename = "DriverStandings", default)]
    pub drivers: Vec<DriverStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    pub constructors: Vec<ConstructorStanding>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DriverStanding {
    #[serde(default)]
    pub position: Option<String>,
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConstructorStanding {
    #[serde(default)]
    pub position: Option<String>,
    pub points: String,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

pub(crate) fn to_schedule(races: Vec<Race>) -> Vec<ScheduledRace> {
    races
        .into_iter()
        .filter_map(|race| {
            let round = match race.round.parse() {
                Ok(r) => r,
                Err(_) => {
                    warn!(
                        round = %race.round,
                        race = %race.race_name,
                        "Skipping race with bad round"
                    );
                    return None;
                }
            };
            let date = race
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
            Some(ScheduledRace {
                round,
                name: race.race_name,
                date,
                time: race.time,
            })
        })
        .collect()
}

pub(crate) fn to_results(races: &[Race]) -> Vec<RaceResult> {
    let mut results = Vec::new();
    for race in races {
        let Ok(round) = race.round.parse::<u32>() else {
            warn!(
                round = %race.round,
                race = %race.race_name,
                "Skipping results with bad round"
            );
            continue;
        };
        for row in &race.results {
            let Ok(points) = row.points.parse::<f64>() else {
                warn!(
                    driver = %row.driver.driver_id,
                    round,
                    points = %row.points,
                    "Skipping result with bad points"
                );
                continue;
            };
            results.push(RaceResult {
                competitor_id: row.driver.driver_id.clone(),
                round,
                points,
                position: row.position.as_deref().and_then(|p| p.parse().ok()),
            });
        }
    }
    results
}

/// Standings without a position (unclassified) sort after everyone else
fn to_standing(position: Option<&str>, name: String, points: &str) -> Standing {
    Standing {
        position: position.and_then(|p| p.parse().ok()).unwrap_or(u32::MAX),
        name,
        points: points.parse().unwrap_or(0.0),
    }
}

pub(crate) fn to_driver_standings(data: StandingsData) -> Vec<Standing> {
    data.standings_table
        .lists
        .into_iter()
        .next()
        .map(|list| {
            list.drivers
                .into_iter()
                .map(|s| to_standing(s.position.as_deref(), s.driver.driver_id, &s.points))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn to_constructor_standings(data: StandingsData) -> Vec<Standing> {
    data.standings_table
        .lists
        .into_iter()
        .next()
        .map(|list| {
            list.constructors
                .into_iter()
                .map(|s| to_standing(s.position.as_deref(), s.constructor.name, &s.points))
                .collect()
        })
        .unwrap_or_default()
}

/// Row count reported by a page; a missing or malformed total means one page
fn parse_total(total: Option<&str>) -> usize {
    total.and_then(|t| t.parse().ok()).unwrap_or(0)
}

/// Offset of the page after the one starting at `offset`, or None once
/// `total` rows have been requested.
fn next_offset(offset: usize, total: usize) -> Option<usize> {
    let next = offset.checked_add(PAGE_SIZE)?;
    (next < total).then_some(next)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Explicitly constructed API client; one per dashboard run.
#[derive(Debug, Clone)]
pub struct JolpicaClient {
    http: Client,
    base_url: String,
}

impl JolpicaClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("racecontrol/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build results HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(3);

        debug!(url, "GET");
        let response = Retry::spawn(retry_strategy, || async {
            self.http
                .get(url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
        })
        .await
        .with_context(|| format!("Results API request failed: {}", url))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Unexpected response shape from {}", url))
    }

    pub async fn fetch_schedule(&self, season: &str) -> Result<Vec<ScheduledRace>> {
        let url = format!("{}/{}.json?limit={}", self.base_url, season, PAGE_SIZE);
        let envelope: Envelope<RaceData> = self.get_json(&url).await?;
        Ok(to_schedule(envelope.data.race_table.races))
    }

    /// Fetch every result row of the season, following pagination.
    pub async fn fetch_results(&self, season: &str) -> Result<Vec<RaceResult>> {
        let mut results = Vec::new();
        let mut offset = 0usize;
        loop {
            let url = format!(
                "{}/{}/results.json?limit={}&offset={}",
                self.base_url, season, PAGE_SIZE, offset
            );
            let envelope: Envelope<RaceData> = self.get_json(&url).await?;
            let total = parse_total(envelope.data.total.as_deref());
            results.extend(to_results(&envelope.data.race_table.races));

            match next_offset(offset, total) {
                Some(next) => offset = next,
                None => break,
            }
        }
        debug!(season, rows = results.len(), "Fetched results");
        Ok(results)
    }

    pub async fn fetch_driver_standings(&self, season: &str) -> Result<Vec<Standing>> {
        let url = format!("{}/{}/driverStandings.json", self.base_url, season);
        let envelope: Envelope<StandingsData> = self.get_json(&url).await?;
        Ok(to_driver_standings(envelope.data))
    }

    pub async fn fetch_constructor_standings(&self, season: &str) -> Result<Vec<Standing>> {
        let url = format!("{}/{}/constructorStandings.json", self.base_url, season);
        let envelope: Envelope<StandingsData> = self.get_json(&url).await?;
        Ok(to_constructor_standings(envelope.data))
    }

    /// Fetch the full season snapshot, issuing the four requests concurrently
    pub async fn fetch_snapshot(&self, season: &str) -> Result<SeasonSnapshot> {
        let (schedule, results, driver_standings, constructor_standings) = tokio::try_join!(
            self.fetch_schedule(season),
            self.fetch_results(season),
            self.fetch_driver_standings(season),
            self.fetch_constructor_standings(season),
        )?;
        Ok(SeasonSnapshot {
            season: season.to_string(),
            schedule,
            results,
            driver_standings,
            constructor_standings,
        })
    }
}
