// The persistence adapter: whole-table reads and writes over the dataset
// files, dispatching on the file extension.

use crate::raffle::*;

use log::{debug, warn};
use snafu::prelude::*;
use std::fs;
use std::path::Path;

use raffle_engine::Table;

use crate::raffle::io_csv;
use crate::raffle::io_xlsx;

fn is_excel(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("xlsx") | Some("xlsm") | Some("xls")
    )
}

/// Loads a dataset, failing with `DatasetNotFound` when the file does not
/// exist. This is the mandatory-dataset path (participants, snapshots).
pub fn load(path: &Path, worksheet: Option<&str>) -> BRaffleResult<Table> {
    if !path.exists() {
        return Err(Box::new(RaffleError::DatasetNotFound {
            path: path.display().to_string(),
        }));
    }
    let table = if is_excel(path) {
        io_xlsx::read_xlsx_table(path, worksheet)?
    } else {
        io_csv::read_csv_table(path)?
    };
    debug!(
        "load: {} row(s) from {:?}",
        table.len(),
        path.display().to_string()
    );
    Ok(table)
}

/// Loads a dataset that may not exist yet (winner histories on first run),
/// substituting an empty table with the canonical header.
pub fn load_or_default(
    path: &Path,
    columns: &[String],
    worksheet: Option<&str>,
) -> BRaffleResult<Table> {
    if path.exists() {
        load(path, worksheet)
    } else {
        debug!(
            "load_or_default: {:?} absent, using empty table",
            path.display().to_string()
        );
        Ok(Table::empty(columns))
    }
}

/// Overwrites a dataset file with the given table.
///
/// The table is written to a temporary sibling file and renamed into
/// place, so a concurrent `load` observes either the old or the new
/// content, never a partial write.
pub fn save(path: &Path, table: &Table) -> BRaffleResult<()> {
    if is_excel(path) {
        // Excel files are read-only inputs; mutable state is CSV.
        warn!(
            "save: {:?} has a spreadsheet extension but will be written as CSV",
            path.display().to_string()
        );
    }
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp_path = Path::new(&tmp);
    io_csv::write_csv_table(tmp_path, table)?;
    fs::rename(tmp_path, path).context(IoSnafu {
        path: path.display().to_string(),
    })?;
    debug!(
        "save: wrote {} row(s) to {:?}",
        table.len(),
        path.display().to_string()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            columns: vec!["Name".to_string(), "Role".to_string()],
            rows: vec![
                vec!["Alice".to_string(), "Lead".to_string()],
                vec!["Bob, Jr.".to_string(), "Clerk".to_string()],
            ],
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.csv");
        save(&path, &table()).unwrap();
        let loaded = load(&path, None).unwrap();
        assert_eq!(loaded, table());
    }

    #[test]
    fn save_leaves_no_temporary_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.csv");
        save(&path, &table()).unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["admin.csv".to_string()]);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.csv");
        save(&path, &table()).unwrap();
        let smaller = Table::empty(&table().columns);
        save(&path, &smaller).unwrap();
        let loaded = load(&path, None).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.columns, table().columns);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let res = load(&dir.path().join("absent.csv"), None);
        assert!(matches!(
            *res.unwrap_err(),
            RaffleError::DatasetNotFound { .. }
        ));
    }

    #[test]
    fn load_or_default_substitutes_the_schema() {
        let dir = tempfile::tempdir().unwrap();
        let columns = vec!["Name".to_string(), "Role".to_string()];
        let t = load_or_default(&dir.path().join("absent.csv"), &columns, None).unwrap();
        assert_eq!(t.columns, columns);
        assert!(t.is_empty());
    }
}
