//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the control core.
//! All types are plain data with no external dependencies and no allocation,
//! making them usable in firmware, in the host simulator and in test harnesses.
//!
//! # Game Timing Constants
//!
//! Timing values are in clock ticks (one tick = one millisecond):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 600 | Gravity interval with no cleared rows |
//! | `DROP_STEP_MS` | 30 | Interval reduction per cleared row |
//! | `DROP_INTERVAL_FLOOR_MS` | 30 | Minimum gravity interval |
//! | `JOYSTICK_DEBOUNCE_MS` | 150 | Left/right/down tilt debounce |
//! | `JOYSTICK_UP_DEBOUNCE_MS` | 300 | Up tilt (rotate) debounce |
//!
//! # Drop Intervals by Cleared Rows
//!
//! | Rows | Interval |
//! |------|----------|
//! | 0 | 600ms |
//! | 5 | 450ms |
//! | 10 | 300ms |
//! | 18 | 60ms |
//! | 19+ | 30ms (floor) |
//!
//! # Examples
//!
//! ```
//! use mcu_tetris_types::{ButtonId, Command, MAX_CLEARED_ROWS};
//!
//! assert_eq!(ButtonId::new(3).command(), Command::MoveLeft);
//! assert_eq!(Command::from_escape_final(b'A'), Command::Rotate);
//! assert_eq!(MAX_CLEARED_ROWS, 99);
//! ```

#![cfg_attr(not(test), no_std)]

/// ASCII escape, first byte of an ANSI cursor-key sequence.
pub const ESCAPE_BYTE: u8 = 0x1B;

/// Second byte of an ANSI cursor-key sequence.
pub const CSI_BRACKET: u8 = b'[';

/// Gravity interval with zero cleared rows.
pub const BASE_DROP_MS: u64 = 600;

/// Gravity speed-up per cleared row.
pub const DROP_STEP_MS: u64 = 30;

/// Gravity never gets faster than this, however many rows are cleared.
pub const DROP_INTERVAL_FLOOR_MS: u64 = 30;

/// Cleared-row counter saturates here (two seven-segment digits).
pub const MAX_CLEARED_ROWS: u8 = 99;

/// Full-scale reading of the 10-bit joystick ADC.
pub const ADC_MAX: u16 = 1023;

/// Joystick reading assumed before the first conversion of an axis.
pub const JOYSTICK_CENTRE: u16 = 500;

/// Axis reading above which the stick counts as tilted right/up.
pub const JOYSTICK_HIGH_THRESHOLD: u16 = 850;

/// Axis reading below which the stick counts as tilted left/down.
pub const JOYSTICK_LOW_THRESHOLD: u16 = 150;

/// Debounce window for left, right and down tilts.
pub const JOYSTICK_DEBOUNCE_MS: u64 = 150;

/// Debounce window for the up tilt (rotate).
pub const JOYSTICK_UP_DEBOUNCE_MS: u64 = 300;

/// Upper bound on conversion-complete polls before an ADC sample is abandoned.
pub const ADC_MAX_POLLS: u32 = 64;

/// Upper bound on rows a single hard drop may fall.
pub const HARD_DROP_ROW_LIMIT: u16 = 255;

/// Capacity of the interrupt-fed push-button queue.
pub const BUTTON_QUEUE_LEN: usize = 4;

/// Capacity of the interrupt-fed serial receive buffer.
pub const SERIAL_QUEUE_LEN: usize = 64;


/// One logical game command, resolved once per loop iteration.
///
/// Produced by the input multiplexer and consumed immediately by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    /// Move the active piece one column left
    MoveLeft,
    /// Move the active piece one column right
    MoveRight,
    /// Rotate the active piece
    Rotate,
    /// Drop one row; fix the piece if it cannot fall
    SoftDrop,
    /// Drop until blocked, then fix
    HardDrop,
    /// Pause or resume the game
    TogglePause,
    /// Nothing to do this iteration
    #[default]
    None,
}

impl Command {
    /// Map the final byte of an `ESC [ x` cursor-key sequence.
    pub fn from_escape_final(byte: u8) -> Self {
        match byte {
            b'D' => Command::MoveLeft,
            b'C' => Command::MoveRight,
            b'A' => Command::Rotate,
            b'B' => Command::SoftDrop,
            _ => Command::None,
        }
    }

    /// Map a serial byte that is not part of an escape sequence.
    pub fn from_plain_byte(byte: u8) -> Self {
        match byte {
            b' ' => Command::HardDrop,
            b'p' | b'P' => Command::TogglePause,
            _ => Command::None,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Command::None
    }

    /// Whether the command may be honoured while the game is paused.
    pub fn allowed_while_paused(&self) -> bool {
        matches!(self, Command::TogglePause)
    }

    /// Lower camelCase name, used in traces and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
            Command::None => "none",
        }
    }
}

/// Index of a push-button as reported by the button queue.
///
/// Buttons are numbered right to left on the board:
/// - **B0**: move right
/// - **B1**: hard drop
/// - **B2**: rotate
/// - **B3**: move left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(u8);

impl ButtonId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn command(&self) -> Command {
        match self.0 {
            0 => Command::MoveRight,
            1 => Command::HardDrop,
            2 => Command::Rotate,
            3 => Command::MoveLeft,
            _ => Command::None,
        }
    }
}

/// Joystick axis selected for an ADC conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The axis converted on the following iteration.
    pub fn other(&self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// ADC multiplexer channel wired to this axis.
    pub fn channel(&self) -> u8 {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }
}

/// Sideways movement passed to the board collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
}

/// Logical joystick tilt direction, each with its own debounce gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TiltDirection {
    Left,
    Right,
    Up,
    Down,
}

impl TiltDirection {
    /// Gate evaluation order; the first direction that fires wins.
    pub const ALL: [TiltDirection; 4] = [
        TiltDirection::Left,
        TiltDirection::Right,
        TiltDirection::Up,
        TiltDirection::Down,
    ];

    pub fn debounce_ms(&self) -> u64 {
        match self {
            TiltDirection::Up => JOYSTICK_UP_DEBOUNCE_MS,
            _ => JOYSTICK_DEBOUNCE_MS,
        }
    }

    pub fn command(&self) -> Command {
        match self {
            TiltDirection::Left => Command::MoveLeft,
            TiltDirection::Right => Command::MoveRight,
            TiltDirection::Up => Command::Rotate,
            TiltDirection::Down => Command::SoftDrop,
        }
    }

    /// Slot of this direction in a per-direction array.
    pub fn slot(&self) -> usize {
        match self {
            TiltDirection::Left => 0,
            TiltDirection::Right => 1,
            TiltDirection::Up => 2,
            TiltDirection::Down => 3,
        }
    }
}

/// Top-level state of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopState {
    #[default]
    Initializing,
    Playing,
    Paused,
    GameOver,
}

impl LoopState {
    pub fn is_over(&self) -> bool {
        matches!(self, LoopState::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::Initializing => "initializing",
            LoopState::Playing => "playing",
            LoopState::Paused => "paused",
            LoopState::GameOver => "gameOver",
        }
    }
}
