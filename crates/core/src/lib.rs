//! Core timing and bookkeeping module - pure, deterministic, and testable
//!
//! This crate holds the pieces of the control loop that own state but touch no
//! peripheral: the tick clock, the score tracker and the gravity scheduler. It
//! has no dependency on input decoding or on the board collaborator, and it is
//! `no_std` so the same code links into firmware and into host tests.
//!
//! # Module Structure
//!
//! - [`clock`]: interrupt-advanced millisecond counter with tear-free reads
//! - [`score`]: score and cleared-row counters with saturating row count
//! - [`gravity`]: drop interval, drop-due decision and pause accounting
//!
//! # Example
//!
//! ```
//! use mcu_tetris_core::{DropScheduler, ScoreTracker};
//!
//! let mut score = ScoreTracker::new();
//! let mut gravity = DropScheduler::new();
//! gravity.start(0);
//!
//! assert!(!gravity.is_due(599, score.get_cleared_rows()));
//! assert!(gravity.is_due(600, score.get_cleared_rows()));
//!
//! // Ten cleared rows halve the interval.
//! for _ in 0..10 {
//!     score.increment_cleared_rows();
//! }
//! gravity.mark_dropped(600);
//! assert!(gravity.is_due(900, score.get_cleared_rows()));
//! ```

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod gravity;
pub mod score;

pub use mcu_tetris_types as types;

// Re-export commonly used types for convenience
pub use clock::{Clock, TickClock};
pub use gravity::{drop_interval_ms, is_drop_due, DropScheduler, PauseState};
pub use score::ScoreTracker;
