//! Command-line parsing for the `mcu-tetris` binary.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const USAGE: &str = "usage: mcu-tetris replay <trace.json> [--out <file>]\n       mcu-tetris live";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Replay a trace and print the log as JSON lines
    Replay { trace: PathBuf, out: Option<PathBuf> },
    /// Play in the terminal
    Live,
    Help,
}

pub fn parse_args(args: &[String]) -> Result<CliCommand> {
    let Some(first) = args.first() else {
        return Ok(CliCommand::Live);
    };

    match first.as_str() {
        "live" => {
            if let Some(extra) = args.get(1) {
                return Err(anyhow!("live: unknown argument: {}", extra));
            }
            Ok(CliCommand::Live)
        }
        "replay" => parse_replay_args(&args[1..]),
        "-h" | "--help" | "help" => Ok(CliCommand::Help),
        other => Err(anyhow!("unknown command: {}\n{}", other, USAGE)),
    }
}

fn parse_replay_args(args: &[String]) -> Result<CliCommand> {
    let mut trace: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --out"))?;
                out = Some(PathBuf::from(v));
            }
            other if other.starts_with("--") => {
                return Err(anyhow!("replay: unknown argument: {}", other));
            }
            path => {
                if trace.is_some() {
                    return Err(anyhow!("replay: more than one trace given: {}", path));
                }
                trace = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let trace = trace.ok_or_else(|| anyhow!("replay: missing trace file\n{}", USAGE))?;
    Ok(CliCommand::Replay { trace, out })
}
