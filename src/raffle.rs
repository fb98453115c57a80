use log::{debug, info};

use snafu::{prelude::*, Snafu};

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use raffle_engine::{RaffleErrors, SpinSequence, Table};

pub mod config_reader;
pub mod io_csv;
pub mod io_xlsx;
pub mod render;
pub mod store;

pub use crate::raffle::config_reader::{PoolConfig, RaffleConfig};

#[derive(Debug, Snafu)]
pub enum RaffleError {
    #[snafu(display("Dataset file not found: {path}"))]
    DatasetNotFound { path: String },
    #[snafu(display(
        "Pristine snapshot not found: {path}. The winner history was cleared but the participant list was left untouched"
    ))]
    MissingSnapshot { path: String },
    #[snafu(display("No participants left to draw from in pool {pool:?}"))]
    EmptyPool { pool: String },
    #[snafu(display("No pool named {name:?} in the configuration"))]
    UnknownPool { name: String },
    #[snafu(display("The configuration declares no pools"))]
    EmptyConfig {},
    #[snafu(display("Unknown view kind {kind:?}, expected 'active' or 'history'"))]
    UnknownViewKind { kind: String },
    #[snafu(display("Dataset file {path} has no header row"))]
    EmptyDataset { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error writing CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Excel file {path} has no readable worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening configuration file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON configuration"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("I/O error on {path}"))]
    Io {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    Engine { source: RaffleErrors },
}

pub type RaffleResult<T> = Result<T, RaffleError>;
pub type BRaffleResult<T> = Result<T, Box<RaffleError>>;

/// Presentation options for a draw. The preview frames are cosmetic; a
/// headless caller sets `spin_frames` to zero and gets the same winner.
#[derive(Debug, Clone)]
pub struct DrawOptions {
    pub seed: Option<u64>,
    pub spin_frames: usize,
    pub frame_delay: Duration,
}

impl DrawOptions {
    /// The original tool animated 40 frames at 50ms.
    pub fn animated(seed: Option<u64>) -> DrawOptions {
        DrawOptions {
            seed,
            spin_frames: 40,
            frame_delay: Duration::from_millis(50),
        }
    }

    pub fn headless(seed: Option<u64>) -> DrawOptions {
        DrawOptions {
            seed,
            spin_frames: 0,
            frame_delay: Duration::ZERO,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DrawOutcome {
    pub columns: Vec<String>,
    pub winner: Vec<String>,
    pub remaining: usize,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResetOutcome {
    pub restored: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ViewKind {
    Active,
    History,
}

impl ViewKind {
    pub fn parse(kind: Option<&str>) -> BRaffleResult<ViewKind> {
        match kind {
            None | Some("active") => Ok(ViewKind::Active),
            Some("history") => Ok(ViewKind::History),
            Some(other) => Err(Box::new(RaffleError::UnknownViewKind {
                kind: other.to_string(),
            })),
        }
    }
}

fn path_string(p: &Path) -> String {
    p.display().to_string()
}

/// Loads the participant and history tables for a pool and validates them
/// against the pool's identity column.
fn load_pool_tables(pool: &PoolConfig, data_dir: &Path) -> BRaffleResult<(Table, Table)> {
    let participants_path = data_dir.join(&pool.participants_file);
    let history_path = data_dir.join(&pool.history_file);
    let participants = store::load(&participants_path, pool.excel_worksheet_name.as_deref())?;
    participants
        .validate(&pool.identity_column)
        .context(EngineSnafu)?;
    let history = store::load_or_default(
        &history_path,
        &pool.columns,
        pool.excel_worksheet_name.as_deref(),
    )?;
    history
        .validate(&pool.identity_column)
        .context(EngineSnafu)?;
    Ok((participants, history))
}

/// Runs one complete draw over a pool: loads both datasets, computes the
/// active pool, optionally shows the spin preview, draws one winner and
/// persists the outcome.
///
/// The empty-pool check happens before any write, so a failed draw leaves
/// both files byte-identical.
pub fn run_draw(
    pool: &PoolConfig,
    data_dir: &Path,
    opts: &DrawOptions,
) -> BRaffleResult<DrawOutcome> {
    let (participants, history) = load_pool_tables(pool, data_dir)?;
    let active = raffle_engine::active_pool(&participants, &history, &pool.identity_column)
        .context(EngineSnafu)?;
    debug!(
        "run_draw: pool {:?}: {} active over {} participants",
        pool.name,
        active.len(),
        participants.len()
    );
    if active.is_empty() {
        return Err(Box::new(RaffleError::EmptyPool {
            pool: pool.name.clone(),
        }));
    }

    if opts.spin_frames > 0 {
        spin_preview(&active, &pool.identity_column, opts)?;
    }

    let mut rng = match opts.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let winner = raffle_engine::draw(&active, &mut rng).context(EngineSnafu)?;
    let (new_participants, new_history) =
        raffle_engine::commit(&winner, &participants, &history, &pool.identity_column)
            .context(EngineSnafu)?;

    // History first, then participants, matching the original write order.
    store::save(&data_dir.join(&pool.history_file), &new_history)?;
    store::save(&data_dir.join(&pool.participants_file), &new_participants)?;

    info!(
        "run_draw: pool {:?}: winner recorded, {} participant(s) remaining",
        pool.name,
        new_participants.len()
    );
    Ok(DrawOutcome {
        columns: participants.columns.clone(),
        winner,
        remaining: new_participants.len(),
    })
}

/// Prints the paced preview frames to the standard output, slot-machine
/// style. The samples come from an independent rng and never influence
/// the committed draw.
fn spin_preview(active: &Table, identity_column: &str, opts: &DrawOptions) -> RaffleResult<()> {
    let id_idx = match active.column_index(identity_column) {
        Some(i) => i,
        None => {
            return Err(RaffleError::Engine {
                source: RaffleErrors::MissingIdentityColumn(identity_column.to_string()),
            })
        }
    };
    let rng = StdRng::from_entropy();
    let seq = SpinSequence::new(active, rng, opts.spin_frames).context(EngineSnafu)?;
    for frame in seq {
        print!("\r  >>> {:<40}", frame[id_idx]);
        std::io::stdout().flush().ok();
        std::thread::sleep(opts.frame_delay);
    }
    println!();
    Ok(())
}

/// Resets one pool: truncates the winner history to its header and
/// restores the participant file from the pristine snapshot.
///
/// The history is cleared even when the snapshot is missing; in that case
/// the participant file is left untouched and `MissingSnapshot` is
/// returned. The other pools' files are never opened.
pub fn run_reset(pool: &PoolConfig, data_dir: &Path) -> BRaffleResult<ResetOutcome> {
    let history_path = data_dir.join(&pool.history_file);
    store::save(&history_path, &Table::empty(&pool.columns))?;
    info!(
        "run_reset: pool {:?}: cleared winner history {}",
        pool.name,
        path_string(&history_path)
    );

    let snapshot_path = data_dir.join(&pool.snapshot_file);
    let snapshot = match store::load(&snapshot_path, pool.excel_worksheet_name.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            return match *e {
                RaffleError::DatasetNotFound { path } => {
                    Err(Box::new(RaffleError::MissingSnapshot { path }))
                }
                other => Err(Box::new(other)),
            };
        }
    };
    snapshot
        .validate(&pool.identity_column)
        .context(EngineSnafu)?;
    store::save(&data_dir.join(&pool.participants_file), &snapshot)?;
    info!(
        "run_reset: pool {:?}: restored {} participant(s) from {}",
        pool.name,
        snapshot.len(),
        path_string(&snapshot_path)
    );
    Ok(ResetOutcome {
        restored: snapshot.len(),
    })
}

/// Returns the requested table for display. Never writes.
pub fn run_view(pool: &PoolConfig, data_dir: &Path, kind: ViewKind) -> BRaffleResult<Table> {
    match kind {
        ViewKind::Active => {
            let (participants, history) = load_pool_tables(pool, data_dir)?;
            raffle_engine::active_pool(&participants, &history, &pool.identity_column)
                .context(EngineSnafu)
                .map_err(Box::new)
        }
        ViewKind::History => store::load_or_default(
            &data_dir.join(&pool.history_file),
            &pool.columns,
            pool.excel_worksheet_name.as_deref(),
        ),
    }
}
