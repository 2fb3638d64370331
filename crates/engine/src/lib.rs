//! Game loop engine - the cooperative control loop of the game.
//!
//! This crate composes the tick clock, the input multiplexer, the gravity
//! scheduler and the score tracker into [`GameLoop`], and defines the traits
//! through which the loop reaches the outside world:
//!
//! - [`Board`]: piece movement, collision and fixing (external collaborator)
//! - [`SideDisplay`]: displays refreshed once per pass
//! - [`Platform`]: clock + input queues + ADC + side display, as one bound
//!
//! # Example
//!
//! ```ignore
//! let mut game = GameLoop::new();
//! loop {
//!     game.new_game(&mut platform, &mut board);
//!     let summary = game.play_game(&mut platform, &mut board);
//!     show_game_over(summary);
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod game_loop;

pub use mcu_tetris_input as input;
pub use mcu_tetris_types as types;

pub use board::{Board, Platform, SideDisplay};
pub use game_loop::{GameLoop, Iteration, Outcome, SessionSummary};
