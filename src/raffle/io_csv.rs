// Primitives for reading and writing the CSV datasets.

use crate::raffle::*;

use log::debug;
use snafu::prelude::*;
use std::path::Path;

use raffle_engine::Table;

/// Reads a whole CSV dataset. The first row is the header.
///
/// Rows are read permissively (ragged rows are not rejected here); width
/// validation happens against the pool schema once the table is loaded.
pub fn read_csv_table(path: &Path) -> BRaffleResult<Table> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: path.display().to_string(),
        })?;
    let mut records = rdr.into_records();

    let header = match records.next() {
        Some(r) => r.context(CsvLineParseSnafu { lineno: 1usize })?,
        None => {
            return Err(Box::new(RaffleError::EmptyDataset {
                path: path.display().to_string(),
            }))
        }
    };
    let columns: Vec<String> = header.iter().map(|s| s.to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_table: line {}: {:?}", lineno, line);
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(Table { columns, rows })
}

/// Writes a whole table as CSV, header first.
pub fn write_csv_table(path: &Path, table: &Table) -> BRaffleResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(CsvWriteSnafu {
        path: path.display().to_string(),
    })?;
    wtr.write_record(&table.columns).context(CsvWriteSnafu {
        path: path.display().to_string(),
    })?;
    for row in table.rows.iter() {
        wtr.write_record(row).context(CsvWriteSnafu {
            path: path.display().to_string(),
        })?;
    }
    wtr.flush().map_err(csv::Error::from).context(CsvWriteSnafu {
        path: path.display().to_string(),
    })?;
    Ok(())
}
