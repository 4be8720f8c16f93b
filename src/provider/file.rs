use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

use crate::results::SeasonSnapshot;

/// Load a season snapshot from a JSON file.
///
/// A snapshot recorded for a different season than the one requested is
/// still returned, with a warning.
pub fn load_snapshot(path: &Path, season: &str) -> Result<SeasonSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open season snapshot at {}", path.display()))?;

    let snapshot: SeasonSnapshot = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse season snapshot at {}", path.display()))?;

    if season != "current" && snapshot.season != season {
        warn!(
            requested = season,
            found = %snapshot.season,
            "Snapshot season does not match the requested season"
        );
    }

    debug!(
        path = %path.display(),
        races = snapshot.schedule.len(),
        results = snapshot.results.len(),
        "Loaded season snapshot"
    );
    Ok(snapshot)
}
