//! Input multiplexer - one command per loop iteration.
//!
//! Precedence within an iteration:
//!
//! 1. A pending push-button event wins. The serial queue is not read, so any
//!    pending byte is picked up on a later iteration.
//! 2. Otherwise one serial byte is read and fed through the escape decoder.
//! 3. If neither produced a command, the joystick gates are evaluated.
//!
//! While paused, buttons and bytes are still consumed (the escape decoder keeps
//! its place) but only [`Command::TogglePause`] gets through, and the joystick
//! gates are left alone so their debounce windows are not spent.

use log::debug;

use crate::escape::{EscapeDecoder, EscapeParseState};
use crate::joystick::{AnalogInput, Joystick};
use crate::queue::InputQueues;
use crate::types::Command;

/// Where the command of an iteration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Button,
    Serial,
    Joystick,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputSource::Button => "button",
            InputSource::Serial => "serial",
            InputSource::Joystick => "joystick",
        }
    }
}

/// Decoder and joystick state that persist across iterations of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputMultiplexer {
    escape: EscapeDecoder,
    joystick: Joystick,
}

impl InputMultiplexer {
    pub const fn new() -> Self {
        Self {
            escape: EscapeDecoder::new(),
            joystick: Joystick::new(),
        }
    }

    /// Forget partial sequences, readings and debounce history.
    pub fn reset(&mut self) {
        self.escape.reset();
        self.joystick.reset();
    }

    pub fn escape_state(&self) -> EscapeParseState {
        self.escape.state()
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn joystick_mut(&mut self) -> &mut Joystick {
        &mut self.joystick
    }

    /// Convert one joystick axis (alternating between calls).
    pub fn sample_joystick<A: AnalogInput + ?Sized>(&mut self, adc: &mut A) {
        self.joystick.sample(adc);
    }

    /// Resolve at most one command from the pending inputs.
    pub fn resolve_command<Q: InputQueues + ?Sized>(
        &mut self,
        queues: &mut Q,
        now: u64,
        paused: bool,
    ) -> Command {
        self.resolve_with_source(queues, now, paused)
            .map(|(command, _)| command)
            .unwrap_or(Command::None)
    }

    /// Like [`InputMultiplexer::resolve_command`], also reporting the source.
    pub fn resolve_with_source<Q: InputQueues + ?Sized>(
        &mut self,
        queues: &mut Q,
        now: u64,
        paused: bool,
    ) -> Option<(Command, InputSource)> {
        let (command, source) = if let Some(button) = queues.poll_button() {
            (button.command(), InputSource::Button)
        } else {
            let from_serial = queues
                .poll_serial_byte()
                .map(|byte| self.escape.feed(byte))
                .unwrap_or(Command::None);

            if !from_serial.is_none() {
                (from_serial, InputSource::Serial)
            } else if paused {
                return None;
            } else {
                let tilt = self.joystick.poll_direction(now)?;
                (tilt.command(), InputSource::Joystick)
            }
        };

        if command.is_none() || (paused && !command.allowed_while_paused()) {
            if !command.is_none() {
                debug!("{} from {:?} ignored while paused", command.as_str(), source);
            }
            return None;
        }
        Some((command, source))
    }
}
