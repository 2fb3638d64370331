//! Trace file format.
//!
//! A trace is a JSON document of timed inputs replayed against the scripted
//! platform:
//!
//! ```text
//! {
//!   "end_tick": 2000,
//!   "board": {"width": 8, "depth": 16},
//!   "events": [
//!     {"at": 100, "type": "serial", "text": "\u001b[D"},
//!     {"at": 250, "type": "button", "id": 1},
//!     {"at": 400, "type": "joystick", "x": 900, "y": 500}
//!   ]
//! }
//! ```
//!
//! Replay output is one JSON object per line: a [`LogEntry`] for every pass
//! that did something, then a closing [`SummaryRecord`].

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use mcu_tetris_engine::{Iteration, SessionSummary};
use mcu_tetris_types::{LoopState, ADC_MAX};
use serde::{Deserialize, Serialize};

use crate::board::ScriptedBoardConfig;

fn default_tick_step() -> u64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Last tick to run (inclusive) unless the game ends first
    pub end_tick: u64,
    /// Milliseconds the clock advances between passes
    #[serde(default = "default_tick_step")]
    pub tick_step: u64,
    #[serde(default)]
    pub board: ScriptedBoardConfig,
    /// Polls the ADC reports busy after each conversion start
    #[serde(default)]
    pub adc_busy_polls: u32,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Tick at which the input arrives
    pub at: u64,
    #[serde(flatten)]
    pub input: TraceInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceInput {
    /// Push-button press (0 right, 1 hard drop, 2 rotate, 3 left)
    Button { id: u8 },
    /// Bytes received on the serial line
    Serial { text: String },
    /// Stick moved to raw readings; held until the next joystick event
    Joystick { x: u16, y: u16 },
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self> {
        let trace: Trace = serde_json::from_str(json).context("failed to parse trace")?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read trace {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid trace {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_step == 0 {
            bail!("tick_step must be at least 1");
        }
        if self.board.width == 0 || self.board.depth == 0 {
            bail!("board must be at least 1x1");
        }
        for event in &self.events {
            if let TraceInput::Joystick { x, y } = event.input {
                if x > ADC_MAX || y > ADC_MAX {
                    bail!(
                        "joystick reading at tick {} out of range (max {})",
                        event.at,
                        ADC_MAX
                    );
                }
            }
        }
        Ok(())
    }

    /// Events in arrival order. Events sharing a tick keep their file order.
    pub fn sorted_events(&self) -> Vec<&TraceEvent> {
        let mut events: Vec<&TraceEvent> = self.events.iter().collect();
        events.sort_by_key(|event| event.at);
        events
    }
}

/// One pass of the loop that dispatched a command or ran a drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub tick: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<&'static str>,
    pub state: &'static str,
    pub score: u32,
    pub cleared_rows: u8,
}

impl LogEntry {
    pub fn from_iteration(iteration: &Iteration, score: u32, cleared_rows: u8) -> Self {
        Self {
            tick: iteration.now,
            command: (!iteration.command.is_none()).then(|| iteration.command.as_str()),
            source: iteration.source.map(|source| source.as_str()),
            action: iteration.action.map(|outcome| outcome.as_str()),
            gravity: iteration.gravity.map(|outcome| outcome.as_str()),
            state: iteration.state.as_str(),
            score,
            cleared_rows,
        }
    }
}

/// Final line of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub state: &'static str,
    pub last_tick: u64,
    pub score: u32,
    pub cleared_rows: u8,
    pub iterations: u64,
}

impl SummaryRecord {
    pub fn new(state: LoopState, last_tick: u64, summary: SessionSummary) -> Self {
        Self {
            state: state.as_str(),
            last_tick,
            score: summary.score,
            cleared_rows: summary.cleared_rows,
            iterations: summary.iterations,
        }
    }
}
