//! Host-side harness for the game loop.
//!
//! - [`board`]: a scripted single-well board standing in for the playfield
//! - [`platform`]: timer, button/serial queues and ADC driven from the host
//! - [`format`]: the JSON trace and log-line formats
//! - [`replay`]: deterministic replay of a trace against the loop
//!
//! ```
//! use mcu_tetris_trace::{replay, Trace};
//!
//! let trace = Trace::from_json(r#"{"end_tick": 600}"#).unwrap();
//! let report = replay(&trace).unwrap();
//! assert_eq!(report.entries[0].gravity, Some("dropped"));
//! ```

pub mod board;
pub mod format;
pub mod platform;
pub mod replay;

pub use board::{ScriptedBoard, ScriptedBoardConfig};
pub use format::{LogEntry, SummaryRecord, Trace, TraceEvent, TraceInput};
pub use platform::ScriptedPlatform;
pub use replay::{replay, ReplayReport};
