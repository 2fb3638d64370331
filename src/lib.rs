//! MCU Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `mcu_tetris::{types,core,input,engine,term,trace}`
//! and hosts the binary's logging backend and argument parsing.

pub mod cli;
pub mod logging;

pub use mcu_tetris_core as core;
pub use mcu_tetris_engine as engine;
pub use mcu_tetris_input as input;
pub use mcu_tetris_term as term;
pub use mcu_tetris_trace as trace;
pub use mcu_tetris_types as types;
