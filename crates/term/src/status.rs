//! Status line: the host's stand-in for the seven-segment row counter. It
//! shows the counters the game loop last handed to `SideDisplay::refresh`.

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Print, SetAttribute},
    terminal, QueueableCommand,
};
use mcu_tetris_core::ScoreTracker;
use mcu_tetris_types::LoopState;

const HELP: &str = "arrows move/rotate/drop  space hard drop  p pause  q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub score: u32,
    pub cleared_rows: u8,
    pub state: LoopState,
    pub games: u32,
}

impl StatusLine {
    pub fn new(score: &ScoreTracker, state: LoopState, games: u32) -> Self {
        Self {
            score: score.get_score(),
            cleared_rows: score.get_cleared_rows(),
            state,
            games,
        }
    }

    pub fn text(&self) -> String {
        let state = match self.state {
            LoopState::Initializing => "starting",
            LoopState::Playing => "playing",
            LoopState::Paused => "PAUSED",
            LoopState::GameOver => "GAME OVER - press any key",
        };
        format!(
            "game {}  score {:>6}  rows {:>2}  {}",
            self.games, self.score, self.cleared_rows, state
        )
    }

    /// Encode the status and help lines at the top of the screen.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.queue(SetAttribute(Attribute::Bold))?;
        out.queue(Print(self.text()))?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.queue(SetAttribute(Attribute::Dim))?;
        out.queue(Print(HELP))?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}
