//! Command-line interface for strictly_quarto.

use crate::config::SeatKind;
use clap::Parser;
use std::path::PathBuf;

/// Strictly Quarto - play Quarto in the terminal
///
/// Flags override values from the config file.
#[derive(Parser, Debug)]
#[command(name = "strictly_quarto")]
#[command(about = "Play Quarto against an agent or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "quarto.toml")]
    pub config: PathBuf,

    /// Who plays as Player 1
    #[arg(long, value_enum)]
    pub player1: Option<SeatKind>,

    /// Who plays as Player 2
    #[arg(long, value_enum)]
    pub player2: Option<SeatKind>,

    /// Log file (the terminal belongs to the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Milliseconds between controller ticks
    #[arg(long)]
    pub tick_ms: Option<u64>,
}
