pub mod repository;
pub mod season;
pub mod types;

pub use repository::ResultsRepository;
pub use season::{completed_round, effective_round, leader, next_race, total_races, NextRace};
pub use types::{RaceResult, ScheduledRace, SeasonSnapshot, Standing};
