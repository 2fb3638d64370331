//! Incremental ANSI cursor-key decoder for the serial link.
//!
//! Cursor keys arrive as three bytes, `ESC [ X`, and each loop iteration reads
//! at most one byte, so the decoder state has to survive between iterations.
//! A byte that breaks a sequence resets the decoder and is then handled as
//! ordinary input in the same call.

use log::trace;

use crate::types::{Command, CSI_BRACKET, ESCAPE_BYTE};

/// Position inside a cursor-key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeParseState {
    #[default]
    Idle,
    SawEscape,
    SawBracket,
}

/// Serial byte decoder carried across loop iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EscapeDecoder {
    state: EscapeParseState,
}

impl EscapeDecoder {
    pub const fn new() -> Self {
        Self {
            state: EscapeParseState::Idle,
        }
    }

    pub fn state(&self) -> EscapeParseState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = EscapeParseState::Idle;
    }

    /// Feed one serial byte, returning the command it completes (if any).
    pub fn feed(&mut self, byte: u8) -> Command {
        match (self.state, byte) {
            (EscapeParseState::Idle, ESCAPE_BYTE) => {
                self.state = EscapeParseState::SawEscape;
                Command::None
            }
            (EscapeParseState::SawEscape, CSI_BRACKET) => {
                self.state = EscapeParseState::SawBracket;
                Command::None
            }
            (EscapeParseState::SawBracket, final_byte) => {
                self.state = EscapeParseState::Idle;
                Command::from_escape_final(final_byte)
            }
            (EscapeParseState::SawEscape, other) => {
                trace!("escape sequence aborted by byte {:#04x}", other);
                self.state = EscapeParseState::Idle;
                Command::from_plain_byte(other)
            }
            (EscapeParseState::Idle, other) => Command::from_plain_byte(other),
        }
    }
}
