//! Scripted board - a stand-in for the real playfield.
//!
//! The real board (piece shapes, collision, row clearing) is not part of the
//! control core. The simulator and the tests only need something that answers
//! the [`Board`] contract plausibly, so this board models a single well:
//!
//! - the active piece occupies one cell and spawns at the top, mid-width
//! - it can fall until it lands on the stack of fixed pieces
//! - every fix grows the stack by one; every `clear_every`-th fix clears a row
//! - the game ends when a fix leaves no room at the top for the next piece

use log::debug;
use mcu_tetris_core::ScoreTracker;
use mcu_tetris_engine::Board;
use mcu_tetris_types::MoveDirection;
use serde::{Deserialize, Serialize};

/// Shape of the scripted well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedBoardConfig {
    pub width: u8,
    pub depth: u8,
    /// Clear a row after this many fixes (0 = never)
    pub clear_every: u32,
    pub points_per_row: u32,
}

impl Default for ScriptedBoardConfig {
    fn default() -> Self {
        Self {
            width: 8,
            depth: 16,
            clear_every: 3,
            points_per_row: 100,
        }
    }
}

impl ScriptedBoardConfig {
    /// Create from environment variables, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over any key lookup. Unset, unparsable and
    /// zero-sized dimensions keep the default.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let width = var("MCU_TETRIS_BOARD_WIDTH")
            .and_then(|s| s.parse().ok())
            .filter(|&w| w > 0)
            .unwrap_or(defaults.width);
        let depth = var("MCU_TETRIS_BOARD_DEPTH")
            .and_then(|s| s.parse().ok())
            .filter(|&d| d > 0)
            .unwrap_or(defaults.depth);
        let clear_every = var("MCU_TETRIS_CLEAR_EVERY")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.clear_every);
        let points_per_row = var("MCU_TETRIS_POINTS_PER_ROW")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.points_per_row);

        Self {
            width,
            depth,
            clear_every,
            points_per_row,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedBoard {
    config: ScriptedBoardConfig,
    column: u8,
    row: u8,
    rotation: u8,
    stack: u8,
    fixes: u32,
}

impl ScriptedBoard {
    pub fn new(config: ScriptedBoardConfig) -> Self {
        let mut board = Self {
            config,
            column: 0,
            row: 0,
            rotation: 0,
            stack: 0,
            fixes: 0,
        };
        board.init_game();
        board
    }

    pub fn config(&self) -> &ScriptedBoardConfig {
        &self.config
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    /// Rows the active piece has fallen since it spawned.
    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Height of the stack of fixed pieces.
    pub fn stack(&self) -> u8 {
        self.stack
    }

    pub fn fixes(&self) -> u32 {
        self.fixes
    }

    fn spawn(&mut self) -> bool {
        self.column = self.config.width / 2;
        self.row = 0;
        self.rotation = 0;
        self.stack < self.config.depth
    }
}

impl Board for ScriptedBoard {
    fn init_game(&mut self) {
        self.stack = 0;
        self.fixes = 0;
        self.spawn();
    }

    fn attempt_move(&mut self, direction: MoveDirection) -> bool {
        match direction {
            MoveDirection::Left if self.column > 0 => {
                self.column -= 1;
                true
            }
            MoveDirection::Right if self.column + 1 < self.config.width => {
                self.column += 1;
                true
            }
            _ => false,
        }
    }

    fn attempt_rotation(&mut self) -> bool {
        self.rotation = (self.rotation + 1) % 4;
        true
    }

    fn attempt_drop_one_row(&mut self) -> bool {
        let floor = self.config.depth.saturating_sub(self.stack + 1);
        if self.row < floor {
            self.row += 1;
            true
        } else {
            false
        }
    }

    fn fix_block_and_spawn_next(&mut self, score: &mut ScoreTracker) -> bool {
        self.fixes += 1;
        self.stack = self.stack.saturating_add(1);

        let clear_every = self.config.clear_every;
        if clear_every > 0 && self.fixes % clear_every == 0 {
            self.stack -= 1;
            score.add_to_score(self.config.points_per_row);
            score.increment_cleared_rows();
            debug!("row cleared, {} total", score.get_cleared_rows());
        }

        self.spawn()
    }
}
