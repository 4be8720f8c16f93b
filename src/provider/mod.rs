pub mod file;
pub mod jolpica;

pub use file::load_snapshot;
pub use jolpica::JolpicaClient;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::results::SeasonSnapshot;

/// Where a run gets its season data from.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    File(PathBuf),
    Api(JolpicaClient),
}

impl SnapshotSource {
    /// A configured snapshot file wins over the API
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.snapshot {
            Some(path) => Ok(SnapshotSource::File(PathBuf::from(path))),
            None => Ok(SnapshotSource::Api(JolpicaClient::new(config.api_base_url())?)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SnapshotSource::File(path) => format!("file {}", path.display()),
            SnapshotSource::Api(_) => "results API".to_string(),
        }
    }

    pub async fn fetch(&self, season: &str) -> Result<SeasonSnapshot> {
        match self {
            SnapshotSource::File(path) => load_snapshot(path, season),
            SnapshotSource::Api(client) => client.fetch_snapshot(season).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_path_selects_file_source() {
        let config = Config {
            snapshot: Some("/tmp/season.json".to_string()),
            ..Config::default()
        };
        let source = SnapshotSource::from_config(&config).unwrap();
        assert!(matches!(source, SnapshotSource::File(_)));
        assert_eq!(source.describe(), "file /tmp/season.json");
    }
}
