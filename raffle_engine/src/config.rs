// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// An ordered tabular dataset. All cells are strings, following the
/// spreadsheet sources this data comes from.
///
/// The row order is meaningful: the winner history is a chronological log
/// and the participant list keeps its original ordering as rows are
/// removed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// An empty table carrying only the given header.
    pub fn empty(columns: &[String]) -> Table {
        Table {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Checks that every row has the width of the header and that the
    /// identity column exists. Called at load time so that a malformed
    /// dataset fails the action instead of a later cell access.
    pub fn validate(&self, identity_column: &str) -> Result<(), RaffleErrors> {
        if self.column_index(identity_column).is_none() {
            return Err(RaffleErrors::MissingIdentityColumn(
                identity_column.to_string(),
            ));
        }
        let expected = self.columns.len();
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(RaffleErrors::RaggedRow {
                    row: idx + 1,
                    expected,
                    found: row.len(),
                });
            }
        }
        Ok(())
    }
}

/// Errors that prevent a raffle operation from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RaffleErrors {
    /// A draw was requested over a pool with no remaining rows.
    EmptyPool,
    /// The identity column is not part of a table's header.
    MissingIdentityColumn(String),
    /// A row does not have the same number of cells as the header.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Error for RaffleErrors {}

impl Display for RaffleErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaffleErrors::EmptyPool => write!(f, "no eligible participants left in the pool"),
            RaffleErrors::MissingIdentityColumn(name) => {
                write!(f, "identity column {:?} not found in the table header", name)
            }
            RaffleErrors::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {} has {} cells, expected {}", row, found, expected),
        }
    }
}
