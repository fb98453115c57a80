use clap::{Parser, Subcommand};

/// This is a raffle drawing program with a persistent winner history.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the raffle pools (names, dataset files,
    /// identity column). When not specified, `raffle.json` in the data directory is used if
    /// present, and a built-in two-pool configuration otherwise.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, default current directory) The directory containing the dataset files.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// (integer, optional) A seed for the random selection. The same seed over the same
    /// active pool yields the same winner. Intended for testing, not for fairness.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Draws one winner from the pool, records it in the winner history and removes every
    /// matching entry from the participant list.
    Draw {
        /// The name of the pool to draw from (default: the first configured pool).
        #[clap(short, long, value_parser)]
        pool: Option<String>,

        /// The number of animated preview frames before the committed draw.
        #[clap(long, value_parser)]
        spin_frames: Option<u64>,

        /// Skips the animated preview entirely. The outcome is unaffected.
        #[clap(long, takes_value = false)]
        no_spin: bool,

        /// Prints the winner record as JSON instead of text.
        #[clap(long, takes_value = false)]
        json: bool,
    },

    /// Restores the participant list from the pristine snapshot and clears the winner
    /// history. Only touches the named pool.
    Reset {
        /// The name of the pool to reset (default: the first configured pool).
        #[clap(short, long, value_parser)]
        pool: Option<String>,
    },

    /// Renders the active participant list or the winner history without modifying anything.
    View {
        /// The name of the pool to display (default: the first configured pool).
        #[clap(short, long, value_parser)]
        pool: Option<String>,

        /// (active or history, default active) Which table to display.
        #[clap(short, long, value_parser)]
        kind: Option<String>,
    },
}
