//! Scripted platform - host stand-in for timer, button ISR, UART ISR and ADC.

use mcu_tetris_core::{Clock, ScoreTracker, TickClock};
use mcu_tetris_engine::SideDisplay;
use mcu_tetris_input::{AnalogInput, InputQueues, QueuedInputs};
use mcu_tetris_types::{Axis, ButtonId, JOYSTICK_CENTRE};

/// Host platform whose inputs are pushed by a driver (trace replay, terminal)
/// between loop iterations, the way the ISRs push on the device.
pub struct ScriptedPlatform {
    clock: TickClock,
    inputs: QueuedInputs,
    stick: [u16; 2],
    selected: Axis,
    adc_busy_polls: u32,
    busy_left: u32,
    refreshes: u64,
    last_score: ScoreTracker,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self {
            clock: TickClock::new(),
            inputs: QueuedInputs::new(),
            stick: [JOYSTICK_CENTRE; 2],
            selected: Axis::Horizontal,
            adc_busy_polls: 0,
            busy_left: 0,
            refreshes: 0,
            last_score: ScoreTracker::new(),
        }
    }

    /// Report the ADC busy for `polls` polls after each conversion start.
    pub fn with_adc_busy_polls(mut self, polls: u32) -> Self {
        self.adc_busy_polls = polls;
        self
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn set_now(&self, ticks: u64) {
        self.clock.set(ticks);
    }

    pub fn advance(&self, ms: u64) {
        self.clock.advance(ms);
    }

    pub fn inputs(&self) -> &QueuedInputs {
        &self.inputs
    }

    /// Button interrupt. Returns `false` if the queue was full.
    pub fn press_button(&self, id: ButtonId) -> bool {
        self.inputs.buttons.push(id)
    }

    /// UART receive interrupt. Returns the number of bytes queued.
    pub fn receive_serial(&self, bytes: &[u8]) -> usize {
        self.inputs.push_serial(bytes)
    }

    /// Hold the stick at raw readings `x` (horizontal) and `y` (vertical).
    pub fn set_joystick(&mut self, x: u16, y: u16) {
        self.stick = [x, y];
    }

    pub fn joystick(&self) -> (u16, u16) {
        (self.stick[0], self.stick[1])
    }

    /// Side-display refreshes so far.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Counters as of the latest refresh.
    pub fn displayed_score(&self) -> &ScoreTracker {
        &self.last_score
    }
}

impl Default for ScriptedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ScriptedPlatform {
    fn now_ticks(&self) -> u64 {
        self.clock.now_ticks()
    }
}

impl InputQueues for ScriptedPlatform {
    fn poll_button(&mut self) -> Option<ButtonId> {
        self.inputs.buttons.pop()
    }

    fn poll_serial_byte(&mut self) -> Option<u8> {
        self.inputs.serial.pop()
    }

    fn empty_button_queue(&mut self) {
        self.inputs.buttons.clear();
    }

    fn clear_serial_input(&mut self) {
        self.inputs.serial.clear();
    }
}

impl AnalogInput for ScriptedPlatform {
    fn start_conversion(&mut self, axis: Axis) {
        self.selected = axis;
        self.busy_left = self.adc_busy_polls;
    }

    fn poll_conversion(&mut self) -> Option<u16> {
        if self.busy_left > 0 {
            self.busy_left -= 1;
            return None;
        }
        Some(self.stick[self.selected.channel() as usize])
    }
}

impl SideDisplay for ScriptedPlatform {
    fn refresh(&mut self, score: &ScoreTracker) {
        self.refreshes += 1;
        self.last_score = *score;
    }
}
