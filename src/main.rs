//! `mcu-tetris` binary.
//!
//! - `replay <trace.json> [--out <file>]`: run a trace against the game loop and
//!   print one JSON line per eventful pass, then a summary line
//! - `live` (default): play in the terminal, which acts as the serial link

use std::fs;

use anyhow::{Context, Result};

use mcu_tetris::cli::{parse_args, CliCommand, USAGE};
use mcu_tetris::logging::{self, LogConfig};
use mcu_tetris::term::{self, LiveConfig, SerialBridge, TerminalSession};
use mcu_tetris::trace::{replay, Trace};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let log_config = LogConfig::from_env()?;
    logging::init(&match command {
        CliCommand::Live => log_config.for_terminal(),
        _ => log_config,
    })?;

    match command {
        CliCommand::Replay { trace, out } => {
            let trace = Trace::load(&trace)?;
            let lines = replay(&trace)?.to_json_lines()?;
            match out {
                Some(path) => fs::write(&path, lines)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", lines),
            }
            Ok(())
        }
        CliCommand::Live => run_live(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn run_live() -> Result<()> {
    let config = LiveConfig::from_env();
    let bridge = SerialBridge::stdin();

    let mut session = TerminalSession::new();
    session.enter()?;

    let result = term::run(&mut session, &bridge, &config);

    // Always try to restore terminal state.
    let _ = session.exit();

    let games = result?;
    println!("played {} game(s)", games);
    Ok(())
}
