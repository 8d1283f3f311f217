use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "ledger-walker")]
#[command(about = "Blind maze solver that only remembers which way it left each cell")]
pub struct Args {
    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,

    /// Maze file to load (`#` wall, `.` free, `S` start, `E` exit)
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Rows of rooms in a generated maze
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Columns of rooms in a generated maze
    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    /// Seed for the generated maze (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extra walls knocked out of a generated maze to create cycles
    #[arg(long, default_value_t = 0)]
    pub loops: usize,

    /// Delay between moves in milliseconds (0 = no delay)
    #[arg(short, long, default_value_t = 0)]
    pub delay: u64,

    /// Simulated time for a move to take effect in milliseconds
    #[arg(short, long, default_value_t = 0)]
    pub animation: u64,

    /// How long to wait for a move confirmation in milliseconds
    #[arg(short, long, default_value_t = 5000)]
    pub timeout: u64,

    /// Give up after this many moves
    #[arg(long)]
    pub max_steps: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve the maze once
    Solve {
        /// Ledger backend remembering the departures
        #[arg(short, long, value_enum, default_value_t = LedgerKind::Dense)]
        ledger: LedgerKind,
    },

    /// Solve the same maze with every ledger backend and compare
    Benchmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LedgerKind {
    /// Growable buffer centred on the start
    Dense,

    /// Hash map keyed by coordinate
    Sparse,
}

impl LedgerKind {
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Dense, Self::Sparse].into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dense => "Dense",
            Self::Sparse => "Sparse",
        }
    }
}
