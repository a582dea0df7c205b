use clap::Parser;
use tracing::Level;

use connect4_minimax::position::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Play Connect 4 on a small board against an exhaustive minimax agent
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    /// Number of columns (at most 7)
    #[clap(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Number of rows (at most 6)
    #[clap(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Let the AI play for player 1
    #[clap(long)]
    pub ai_one: bool,

    /// Let the AI play for player 2
    #[clap(long)]
    pub ai_two: bool,

    /// Starting moves as 1-indexed column digits, e.g. "1223"
    #[clap(long, default_value = "")]
    pub moves: String,

    /// Print the score of every column before the AI moves
    #[clap(long)]
    pub analyse: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
