//! Live mode: the game loop driven by the real clock and the terminal.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::info;
use mcu_tetris_engine::GameLoop;
use mcu_tetris_trace::{ScriptedBoard, ScriptedBoardConfig, ScriptedPlatform};
use mcu_tetris_types::LoopState;

use crate::serial::{LinkEvent, SerialBridge};
use crate::session::TerminalSession;
use crate::status::StatusLine;

/// Live-mode settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveConfig {
    pub board: ScriptedBoardConfig,
    /// Sleep between loop iterations
    pub pass_sleep_ms: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            board: ScriptedBoardConfig::default(),
            pass_sleep_ms: 1,
        }
    }
}

impl LiveConfig {
    /// Create from environment variables.
    ///
    /// Board shape comes from [`ScriptedBoardConfig::from_env`];
    /// `MCU_TETRIS_PASS_SLEEP_MS` sets the pause between passes (default 1).
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let pass_sleep_ms = var("MCU_TETRIS_PASS_SLEEP_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        Self {
            board: ScriptedBoardConfig::from_vars(&var),
            pass_sleep_ms,
        }
    }
}

/// Play sessions until the user quits or the input closes. Returns the number
/// of games started.
pub fn run(term: &mut TerminalSession, bridge: &SerialBridge, config: &LiveConfig) -> Result<u32> {
    let started = Instant::now();
    let sleep = Duration::from_millis(config.pass_sleep_ms);

    let mut platform = ScriptedPlatform::new();
    let mut board = ScriptedBoard::new(config.board.clone());
    let mut game = GameLoop::new();
    let mut games = 0;

    loop {
        platform.set_now(elapsed_ms(started));
        game.new_game(&mut platform, &mut board);
        games += 1;
        term.invalidate();

        loop {
            match bridge.drain_into(platform.inputs()) {
                LinkEvent::Quit | LinkEvent::Closed => return Ok(games),
                LinkEvent::Idle | LinkEvent::Received(_) => {}
            }

            platform.set_now(elapsed_ms(started));
            let iteration = game.step(&mut platform, &mut board);
            term.draw_status(&status_line(&platform, iteration.state, games))?;

            if iteration.state == LoopState::GameOver {
                break;
            }
            thread::sleep(sleep);
        }

        let summary = game.summary();
        info!(
            "game {} over: score {}, {} rows, {} passes",
            games, summary.score, summary.cleared_rows, summary.iterations
        );
        match bridge.wait_for_key() {
            LinkEvent::Quit | LinkEvent::Closed => return Ok(games),
            LinkEvent::Idle | LinkEvent::Received(_) => {}
        }
    }
}

/// The counters the last pass handed to the side display, one pass behind
/// the score.
fn status_line(platform: &ScriptedPlatform, state: LoopState, games: u32) -> StatusLine {
    StatusLine::new(platform.displayed_score(), state, games)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mcu_tetris_types::ButtonId;

    use super::*;

    #[test]
    fn default_config() {
        let config = LiveConfig::default();
        assert_eq!(config.board, ScriptedBoardConfig::default());
        assert_eq!(config.pass_sleep_ms, 1);
    }

    #[test]
    fn config_vars_fall_back_to_defaults() {
        let vars: HashMap<&str, &str> = [
            ("MCU_TETRIS_PASS_SLEEP_MS", "soon"),
            ("MCU_TETRIS_BOARD_DEPTH", "0"),
        ]
        .into_iter()
        .collect();
        let config = LiveConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config, LiveConfig::default());

        let vars: HashMap<&str, &str> = [
            ("MCU_TETRIS_PASS_SLEEP_MS", "16"),
            ("MCU_TETRIS_BOARD_WIDTH", "5"),
        ]
        .into_iter()
        .collect();
        let config = LiveConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.pass_sleep_ms, 16);
        assert_eq!(config.board.width, 5);
    }

    #[test]
    fn status_line_follows_side_display() {
        let mut platform = ScriptedPlatform::new();
        let mut board = ScriptedBoard::new(ScriptedBoardConfig {
            clear_every: 1,
            ..ScriptedBoardConfig::default()
        });
        let mut game = GameLoop::new();
        game.new_game(&mut platform, &mut board);
        assert_eq!(status_line(&platform, game.state(), 1).score, 0);

        platform.set_now(10);
        platform.press_button(ButtonId::new(1));
        let iteration = game.step(&mut platform, &mut board);
        assert_eq!(game.score().get_score(), 100);
        // Refreshed before the fix landed.
        assert_eq!(status_line(&platform, iteration.state, 1).score, 0);

        platform.set_now(11);
        let iteration = game.step(&mut platform, &mut board);
        let status = status_line(&platform, iteration.state, 1);
        assert_eq!(status.score, 100);
        assert_eq!(status.cleared_rows, 1);
    }
}
