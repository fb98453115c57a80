use crate::raffle::*;

use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fs;
use std::path::Path;

/// One raffle pool: the three dataset files, the identity column used to
/// match a person across them, and the canonical column list used when a
/// dataset does not exist yet.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    pub name: String,
    #[serde(rename = "participantsFile")]
    pub participants_file: String,
    #[serde(rename = "historyFile")]
    pub history_file: String,
    #[serde(rename = "snapshotFile")]
    pub snapshot_file: String,
    #[serde(rename = "identityColumn")]
    pub identity_column: String,
    pub columns: Vec<String>,
    /// When reading an Excel dataset, the name of the worksheet to use.
    /// The first worksheet is used when not specified.
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RaffleConfig {
    pub pools: Vec<PoolConfig>,
}

impl RaffleConfig {
    /// Resolves a pool by name, or the first configured pool when no name
    /// is given.
    pub fn pool(&self, name: Option<&str>) -> BRaffleResult<&PoolConfig> {
        match name {
            None => self
                .pools
                .first()
                .ok_or_else(|| Box::new(RaffleError::EmptyConfig {})),
            Some(n) => self
                .pools
                .iter()
                .find(|p| p.name == n)
                .ok_or_else(|| {
                    Box::new(RaffleError::UnknownPool {
                        name: n.to_string(),
                    })
                }),
        }
    }
}

pub fn read_config(path: &Path) -> BRaffleResult<RaffleConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.display().to_string(),
    })?;
    let config: RaffleConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {} pool(s) from {:?}", config.pools.len(), path);
    Ok(config)
}

/// The two pools of the original tool, used when no configuration file is
/// present: the employee raffle and the separate admin raffle.
pub fn default_config() -> RaffleConfig {
    RaffleConfig {
        pools: vec![
            PoolConfig {
                name: "participants".to_string(),
                participants_file: "participants.csv".to_string(),
                history_file: "winner_history.csv".to_string(),
                snapshot_file: "original_participants.csv".to_string(),
                identity_column: "FULL NAME".to_string(),
                columns: [
                    "CONTROL NO.",
                    "FULL NAME",
                    "POSITION",
                    "REGION/SOC",
                    "HUB",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                excel_worksheet_name: None,
            },
            PoolConfig {
                name: "admin".to_string(),
                participants_file: "admin.csv".to_string(),
                history_file: "admin_winners.csv".to_string(),
                snapshot_file: "original_admin.csv".to_string(),
                identity_column: "Name".to_string(),
                columns: ["Name", "Role"].iter().map(|s| s.to_string()).collect(),
                excel_worksheet_name: None,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_the_two_original_pools() {
        let config = default_config();
        assert_eq!(config.pools.len(), 2);
        assert_eq!(config.pool(None).unwrap().name, "participants");
        assert_eq!(config.pool(Some("admin")).unwrap().identity_column, "Name");
        assert!(config.pool(Some("guests")).is_err());
    }

    #[test]
    fn parses_a_configuration_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raffle.json");
        std::fs::write(
            &path,
            r#"{
  "pools": [
    {
      "name": "guests",
      "participantsFile": "guests.csv",
      "historyFile": "guest_winners.csv",
      "snapshotFile": "original_guests.xlsx",
      "identityColumn": "Guest",
      "columns": ["Guest", "Table"],
      "excelWorksheetName": "Sheet1"
    }
  ]
}"#,
        )
        .unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.pools.len(), 1);
        let pool = config.pool(Some("guests")).unwrap();
        assert_eq!(pool.snapshot_file, "original_guests.xlsx");
        assert_eq!(pool.excel_worksheet_name.as_deref(), Some("Sheet1"));
    }

    #[test]
    fn missing_configuration_file_is_reported() {
        let res = read_config(Path::new("/nonexistent/raffle.json"));
        assert!(matches!(*res.unwrap_err(), RaffleError::OpeningJson { .. }));
    }
}
