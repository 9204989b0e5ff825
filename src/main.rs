//! Command-line front end for the tabletop robot.
//!
//! Reads commands from stdin (or a file), prints REPORT output to stdout and
//! diagnostics to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tabletop_robot::{
    CommandInterpreter, DEFAULT_BOARD_SIZE, InterpreterConfig, Robot, SessionOptions, run_session,
};

/// Drive a toy robot around a square tabletop.
///
/// Commands: PLACE x,y,F | MOVE | LEFT | RIGHT | REPORT | EXIT
#[derive(Parser, Debug)]
#[command(name = "tabletop-robot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Side length of the board.
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: u32,

    /// Read commands from this file instead of stdin.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Log every state change and the board after each REPORT.
    #[arg(short, long)]
    verbose: bool,

    /// Skip the welcome banner.
    #[arg(long)]
    no_banner: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = InterpreterConfig {
        board_size: cli.size,
        ..Default::default()
    };
    let mut interpreter = CommandInterpreter::new(config);
    interpreter.populate_standard_keywords();

    let mut board = interpreter
        .new_board()
        .context("could not create the board")?;
    let mut robot = Robot::new();

    let stdout = io::stdout();
    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("could not open command file {}", path.display()))?;
            run_session(
                BufReader::new(file),
                stdout.lock(),
                &interpreter,
                &mut board,
                &mut robot,
                SessionOptions::default(),
            )
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            run_session(
                stdin.lock(),
                stdout.lock(),
                &interpreter,
                &mut board,
                &mut robot,
                SessionOptions {
                    interactive,
                    banner: interactive && !cli.no_banner,
                },
            )
        }
    }
    .context("failed while processing commands")?;

    tracing::info!(
        lines = summary.lines,
        accepted = summary.accepted,
        rejected = summary.rejected,
        reports = summary.reports,
        "session ended"
    );
    Ok(())
}
