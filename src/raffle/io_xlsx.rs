// Primitives for reading Excel datasets. Spreadsheets are inputs only;
// mutable state is written back as CSV by the store.

use crate::raffle::*;

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::{debug, warn};
use snafu::prelude::*;
use std::path::Path;

use raffle_engine::Table;

/// Reads a whole Excel dataset. The first row of the worksheet is the
/// header; the first worksheet is used unless a name is given.
pub fn read_xlsx_table(path: &Path, worksheet: Option<&str>) -> BRaffleResult<Table> {
    let p = path.display().to_string();
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: p.clone() })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(EmptyExcelSnafu { path: p.clone() })?
            .context(OpeningExcelSnafu { path: p.clone() })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path: p.clone() })?
            .context(OpeningExcelSnafu { path: p.clone() })?,
    };

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path: p.clone() })?;
    let columns: Vec<String> = header.iter().map(cell_to_string).collect();
    debug!("read_xlsx_table: header: {:?}", columns);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in iter {
        // Exports commonly carry fully blank trailing rows; skip them.
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            continue;
        }
        rows.push(row.iter().map(cell_to_string).collect());
    }
    Ok(Table { columns, rows })
}

/// Renders one cell as the string it would show in the spreadsheet.
/// Control numbers are often numeric cells; integral floats drop the
/// trailing `.0`.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => String::new(),
        other => {
            warn!("cell_to_string: unhandled cell {:?}", other);
            String::new()
        }
    }
}
