//! Game loop controller - one cooperative iteration at a time
//!
//! Each call to [`GameLoop::step`] performs one pass of the loop:
//!
//! 1. read the clock once; every decision in the pass uses that snapshot
//! 2. refresh the side displays
//! 3. convert one joystick axis
//! 4. resolve at most one command from buttons, serial and joystick
//! 5. dispatch it to the board
//! 6. run the gravity timer, independently of step 5
//!
//! A soft drop counts as a drop attempt and restarts the gravity interval, so a
//! timer drop never follows it in the same pass. A hard drop leaves the
//! interval alone: when the timer is due in the same pass, the freshly spawned
//! piece falls one row right after the fix.

use log::{debug, info, warn};
use mcu_tetris_core::{DropScheduler, PauseState, ScoreTracker};

use crate::board::{Board, Platform};
use crate::input::{InputMultiplexer, InputSource};
use crate::types::{Command, LoopState, MoveDirection, HARD_DROP_ROW_LIMIT};

/// Result of a board action or a pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Move or rotation accepted
    Moved,
    /// Move or rotation refused by the board
    Blocked,
    /// Piece fell one row
    Dropped,
    /// Piece committed and the next one spawned
    Fixed,
    /// Piece committed and the next one had no room
    GameOver,
    Paused,
    Resumed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Moved => "moved",
            Outcome::Blocked => "blocked",
            Outcome::Dropped => "dropped",
            Outcome::Fixed => "fixed",
            Outcome::GameOver => "gameOver",
            Outcome::Paused => "paused",
            Outcome::Resumed => "resumed",
        }
    }

    fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Outcome::Moved
        } else {
            Outcome::Blocked
        }
    }
}

/// What happened during one pass of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    /// Clock snapshot used for the whole pass
    pub now: u64,
    pub command: Command,
    pub source: Option<InputSource>,
    /// Outcome of dispatching `command`
    pub action: Option<Outcome>,
    /// Outcome of the timer-driven drop, if one was due
    pub gravity: Option<Outcome>,
    /// State after the pass
    pub state: LoopState,
}

impl Iteration {
    fn idle(now: u64, state: LoopState) -> Self {
        Self {
            now,
            command: Command::None,
            source: None,
            action: None,
            gravity: None,
            state,
        }
    }

    /// Nothing was dispatched and no drop was due.
    pub fn is_quiet(&self) -> bool {
        self.action.is_none() && self.gravity.is_none()
    }
}

/// Final counters of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub cleared_rows: u8,
    pub iterations: u64,
}

/// State of one game session.
#[derive(Debug, Clone, Default)]
pub struct GameLoop {
    state: LoopState,
    score: ScoreTracker,
    input: InputMultiplexer,
    gravity: DropScheduler,
    iterations: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn input(&self) -> &InputMultiplexer {
        &self.input
    }

    pub fn gravity(&self) -> &DropScheduler {
        &self.gravity
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score.get_score(),
            cleared_rows: self.score.get_cleared_rows(),
            iterations: self.iterations,
        }
    }

    /// Start a session: reset board, counters and input state, flush pending
    /// input, and arm the gravity timer a full interval from now.
    pub fn new_game<P, B>(&mut self, platform: &mut P, board: &mut B)
    where
        P: Platform + ?Sized,
        B: Board + ?Sized,
    {
        board.init_game();
        self.score.reset();
        platform.empty_button_queue();
        platform.clear_serial_input();
        self.input.reset();

        let now = platform.now_ticks();
        self.gravity.start(now);
        board.print_block_preview();

        self.iterations = 0;
        self.state = LoopState::Playing;
        info!("new game at tick {}", now);
    }

    /// Run one pass of the loop. A no-op outside Playing/Paused.
    pub fn step<P, B>(&mut self, platform: &mut P, board: &mut B) -> Iteration
    where
        P: Platform + ?Sized,
        B: Board + ?Sized,
    {
        let now = platform.now_ticks();
        if !matches!(self.state, LoopState::Playing | LoopState::Paused) {
            return Iteration::idle(now, self.state);
        }
        self.iterations += 1;

        platform.refresh(&self.score);
        self.input.sample_joystick(platform);

        let resolved = self
            .input
            .resolve_with_source(platform, now, self.gravity.is_paused());
        let (command, source) = match resolved {
            Some((command, source)) => (command, Some(source)),
            None => (Command::None, None),
        };

        let action = self.dispatch(command, now, board);
        if let Some(outcome) = action {
            debug!("tick {}: {} -> {}", now, command.as_str(), outcome.as_str());
        }

        let gravity = if self.state.is_over() {
            None
        } else {
            self.apply_gravity(now, board)
        };

        Iteration {
            now,
            command,
            source,
            action,
            gravity,
            state: self.state,
        }
    }

    /// Step until the session ends. Starts a session first if none is running.
    pub fn play_game<P, B>(&mut self, platform: &mut P, board: &mut B) -> SessionSummary
    where
        P: Platform + ?Sized,
        B: Board + ?Sized,
    {
        if self.state == LoopState::Initializing {
            self.new_game(platform, board);
        }
        while !self.step(platform, board).state.is_over() {}
        self.summary()
    }

    /// [`GameLoop::new_game`] followed by [`GameLoop::play_game`].
    pub fn run_session<P, B>(&mut self, platform: &mut P, board: &mut B) -> SessionSummary
    where
        P: Platform + ?Sized,
        B: Board + ?Sized,
    {
        self.new_game(platform, board);
        self.play_game(platform, board)
    }

    fn dispatch<B: Board + ?Sized>(&mut self, command: Command, now: u64, board: &mut B) -> Option<Outcome> {
        match command {
            Command::None => None,
            Command::MoveLeft => Some(Outcome::from_accepted(board.attempt_move(MoveDirection::Left))),
            Command::MoveRight => Some(Outcome::from_accepted(board.attempt_move(MoveDirection::Right))),
            Command::Rotate => Some(Outcome::from_accepted(board.attempt_rotation())),
            Command::SoftDrop => {
                let outcome = self.drop_or_fix(board);
                if outcome != Outcome::GameOver {
                    self.gravity.mark_dropped(now);
                }
                Some(outcome)
            }
            Command::HardDrop => {
                let mut rows = 0;
                while rows < HARD_DROP_ROW_LIMIT && board.attempt_drop_one_row() {
                    rows += 1;
                }
                if rows == HARD_DROP_ROW_LIMIT {
                    warn!("hard drop stopped after {} rows", rows);
                }
                Some(self.fix(board))
            }
            Command::TogglePause => match self.gravity.toggle_pause(now) {
                PauseState::Paused { .. } => {
                    self.state = LoopState::Paused;
                    Some(Outcome::Paused)
                }
                PauseState::Running => {
                    self.state = LoopState::Playing;
                    Some(Outcome::Resumed)
                }
            },
        }
    }

    fn apply_gravity<B: Board + ?Sized>(&mut self, now: u64, board: &mut B) -> Option<Outcome> {
        if !self.gravity.is_due(now, self.score.get_cleared_rows()) {
            return None;
        }
        let outcome = self.drop_or_fix(board);
        if outcome != Outcome::GameOver {
            self.gravity.mark_dropped(now);
        }
        debug!("tick {}: gravity -> {}", now, outcome.as_str());
        Some(outcome)
    }

    fn drop_or_fix<B: Board + ?Sized>(&mut self, board: &mut B) -> Outcome {
        if board.attempt_drop_one_row() {
            Outcome::Dropped
        } else {
            self.fix(board)
        }
    }

    fn fix<B: Board + ?Sized>(&mut self, board: &mut B) -> Outcome {
        if board.fix_block_and_spawn_next(&mut self.score) {
            Outcome::Fixed
        } else {
            self.state = LoopState::GameOver;
            info!(
                "game over: score {}, {} rows",
                self.score.get_score(),
                self.score.get_cleared_rows()
            );
            Outcome::GameOver
        }
    }
}
