//! Contracts the game loop consumes from its collaborators.
//!
//! Board geometry, collision, line clearing and every kind of rendering live
//! outside the control core; the loop only sees these traits.

use mcu_tetris_core::{Clock, ScoreTracker};

use crate::input::{AnalogInput, InputQueues};
use crate::types::MoveDirection;

/// Playfield and active piece.
///
/// Every `attempt_*` returns whether the action was legal; `false` means the
/// board is unchanged.
pub trait Board {
    /// Clear the playfield and spawn the first piece.
    fn init_game(&mut self);

    /// Draw the next-piece preview.
    fn print_block_preview(&mut self) {}

    fn attempt_move(&mut self, direction: MoveDirection) -> bool;

    fn attempt_rotation(&mut self) -> bool;

    fn attempt_drop_one_row(&mut self) -> bool;

    /// Commit the active piece and spawn the next one.
    ///
    /// Completed rows are reported through `score`. Returns `false` when the
    /// next piece has nowhere to go, which ends the game.
    fn fix_block_and_spawn_next(&mut self, score: &mut ScoreTracker) -> bool;
}

impl<B: Board + ?Sized> Board for &mut B {
    fn init_game(&mut self) {
        (**self).init_game()
    }

    fn print_block_preview(&mut self) {
        (**self).print_block_preview()
    }

    fn attempt_move(&mut self, direction: MoveDirection) -> bool {
        (**self).attempt_move(direction)
    }

    fn attempt_rotation(&mut self) -> bool {
        (**self).attempt_rotation()
    }

    fn attempt_drop_one_row(&mut self) -> bool {
        (**self).attempt_drop_one_row()
    }

    fn fix_block_and_spawn_next(&mut self, score: &mut ScoreTracker) -> bool {
        (**self).fix_block_and_spawn_next(score)
    }
}

/// Displays refreshed once per loop iteration (seven-segment row counter,
/// status line). The default does nothing.
pub trait SideDisplay {
    fn refresh(&mut self, _score: &ScoreTracker) {}
}

/// Everything the loop reads from the hardware.
pub trait Platform: Clock + InputQueues + AnalogInput + SideDisplay {}

impl<T: Clock + InputQueues + AnalogInput + SideDisplay + ?Sized> Platform for T {}
