use log::{debug, info};

use clap::Parser;
use snafu::ErrorCompat;

use std::path::{Path, PathBuf};
use std::time::Duration;

mod args;
mod raffle;

use crate::args::{Args, Command};
use crate::raffle::{config_reader, render, BRaffleResult, DrawOptions, ViewKind};

fn resolve_config(args: &Args, data_dir: &Path) -> BRaffleResult<config_reader::RaffleConfig> {
    if let Some(path) = &args.config {
        return config_reader::read_config(Path::new(path));
    }
    let default_path = data_dir.join("raffle.json");
    if default_path.exists() {
        config_reader::read_config(&default_path)
    } else {
        debug!("resolve_config: no configuration file, using the built-in pools");
        Ok(config_reader::default_config())
    }
}

fn run(args: &Args) -> BRaffleResult<()> {
    let data_dir = PathBuf::from(args.data_dir.clone().unwrap_or_else(|| ".".to_string()));
    let config = resolve_config(args, &data_dir)?;

    match &args.command {
        Command::Draw {
            pool,
            spin_frames,
            no_spin,
            json,
        } => {
            let pc = config.pool(pool.as_deref())?;
            let opts = if *no_spin {
                DrawOptions::headless(args.seed)
            } else {
                match spin_frames {
                    Some(f) => DrawOptions {
                        seed: args.seed,
                        spin_frames: *f as usize,
                        frame_delay: Duration::from_millis(50),
                    },
                    None => DrawOptions::animated(args.seed),
                }
            };
            let outcome = raffle::run_draw(pc, &data_dir, &opts)?;
            if *json {
                let js = render::record_to_json(&outcome.columns, &outcome.winner);
                println!("{}", js);
            } else {
                println!("WINNER SELECTED!");
                println!("{}", render::render_record(&outcome.columns, &outcome.winner));
                println!();
                println!(
                    "Winner removed from the active list ({} participant(s) remaining).",
                    outcome.remaining
                );
            }
        }
        Command::Reset { pool } => {
            let pc = config.pool(pool.as_deref())?;
            let outcome = raffle::run_reset(pc, &data_dir)?;
            println!(
                "Pool {:?} has been fully reset: {} participant(s) restored, winner history cleared.",
                pc.name, outcome.restored
            );
        }
        Command::View { pool, kind } => {
            let pc = config.pool(pool.as_deref())?;
            let kind = ViewKind::parse(kind.as_deref())?;
            let table = raffle::run_view(pc, &data_dir, kind)?;
            println!("{}", render::render_table(&table));
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    info!("arguments: {:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("An error occurred: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&*e) {
            debug!("trace: {}", bt);
        }
        // The failed action did not corrupt any dataset; rerunning is safe.
        std::process::exit(1);
    }
}
