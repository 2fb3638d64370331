//! Dual-axis analog joystick: sampling and tilt detection.
//!
//! Only one axis is converted per loop iteration, alternating, so that a pass
//! never waits for two conversions. The axis not sampled this pass is read from
//! its previous conversion, at most one iteration old.
//!
//! Each tilt direction has its own debounce gate. A direction fires when its
//! threshold holds and more than its window has elapsed since it last fired.

use log::warn;

use crate::types::{
    Axis, TiltDirection, ADC_MAX_POLLS, JOYSTICK_CENTRE, JOYSTICK_HIGH_THRESHOLD,
    JOYSTICK_LOW_THRESHOLD,
};

/// ADC peripheral as seen by the joystick sampler.
pub trait AnalogInput {
    /// Select `axis` and start a single conversion.
    fn start_conversion(&mut self, axis: Axis);

    /// Result of the running conversion, or `None` while still busy.
    fn poll_conversion(&mut self) -> Option<u16>;
}

/// Convert one axis, waiting at most `ADC_MAX_POLLS` polls for the result.
pub fn sample_adc<A: AnalogInput + ?Sized>(adc: &mut A, axis: Axis) -> Option<u16> {
    adc.start_conversion(axis);
    (0..ADC_MAX_POLLS).find_map(|_| adc.poll_conversion())
}

/// Latest readings plus per-direction debounce state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joystick {
    horizontal: u16,
    vertical: u16,
    next_axis: Axis,
    last_fired: [Option<u64>; 4],
}

impl Joystick {
    pub const fn new() -> Self {
        Self {
            horizontal: JOYSTICK_CENTRE,
            vertical: JOYSTICK_CENTRE,
            next_axis: Axis::Horizontal,
            last_fired: [None; 4],
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn horizontal(&self) -> u16 {
        self.horizontal
    }

    pub fn vertical(&self) -> u16 {
        self.vertical
    }

    /// Axis converted by the next call to [`Joystick::sample`].
    pub fn next_axis(&self) -> Axis {
        self.next_axis
    }

    /// Convert the next axis in turn. A timed-out conversion keeps the old
    /// reading; the turn still passes to the other axis.
    pub fn sample<A: AnalogInput + ?Sized>(&mut self, adc: &mut A) {
        let axis = self.next_axis;
        match sample_adc(adc, axis) {
            Some(value) => self.set_reading(axis, value),
            None => warn!("adc conversion on {:?} timed out, keeping previous reading", axis),
        }
        self.next_axis = axis.other();
    }

    /// Overwrite one reading directly.
    pub fn set_reading(&mut self, axis: Axis, value: u16) {
        match axis {
            Axis::Horizontal => self.horizontal = value,
            Axis::Vertical => self.vertical = value,
        }
    }

    /// Whether the stick is past the threshold for `direction`, ignoring debounce.
    pub fn is_tilted(&self, direction: TiltDirection) -> bool {
        match direction {
            TiltDirection::Left => self.horizontal < JOYSTICK_LOW_THRESHOLD,
            TiltDirection::Right => self.horizontal > JOYSTICK_HIGH_THRESHOLD,
            TiltDirection::Up => self.vertical > JOYSTICK_HIGH_THRESHOLD,
            TiltDirection::Down => self.vertical < JOYSTICK_LOW_THRESHOLD,
        }
    }

    /// Threshold and debounce check for one direction; records `now` on fire.
    pub fn check(&mut self, direction: TiltDirection, now: u64) -> bool {
        if !self.is_tilted(direction) {
            return false;
        }
        let slot = direction.slot();
        let ready = match self.last_fired[slot] {
            None => true,
            Some(last) => now.saturating_sub(last) > direction.debounce_ms(),
        };
        if ready {
            self.last_fired[slot] = Some(now);
        }
        ready
    }

    /// First direction (left, right, up, down) that fires at `now`.
    pub fn poll_direction(&mut self, now: u64) -> Option<TiltDirection> {
        TiltDirection::ALL
            .into_iter()
            .find(|&direction| self.check(direction, now))
    }

    pub fn last_fired(&self, direction: TiltDirection) -> Option<u64> {
        self.last_fired[direction.slot()]
    }
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ADC stub: reports busy for `busy_polls` polls, then the axis value.
    struct StubAdc {
        values: [u16; 2],
        busy_polls: u32,
        remaining: u32,
        selected: Option<Axis>,
        conversions: Vec<Axis>,
    }

    impl StubAdc {
        fn new(horizontal: u16, vertical: u16) -> Self {
            Self {
                values: [horizontal, vertical],
                busy_polls: 0,
                remaining: 0,
                selected: None,
                conversions: Vec::new(),
            }
        }
    }

    impl AnalogInput for StubAdc {
        fn start_conversion(&mut self, axis: Axis) {
            self.selected = Some(axis);
            self.remaining = self.busy_polls;
            self.conversions.push(axis);
        }

        fn poll_conversion(&mut self) -> Option<u16> {
            if self.remaining > 0 {
                self.remaining -= 1;
                return None;
            }
            self.selected.map(|axis| self.values[axis.channel() as usize])
        }
    }

    #[test]
    fn test_axes_alternate_starting_horizontal() {
        let mut adc = StubAdc::new(900, 100);
        let mut js = Joystick::new();

        js.sample(&mut adc);
        assert_eq!(js.horizontal(), 900);
        assert_eq!(js.vertical(), JOYSTICK_CENTRE, "vertical not converted yet");

        js.sample(&mut adc);
        assert_eq!(js.vertical(), 100);

        js.sample(&mut adc);
        assert_eq!(
            adc.conversions,
            vec![Axis::Horizontal, Axis::Vertical, Axis::Horizontal]
        );
    }

    #[test]
    fn test_sample_waits_for_conversion_complete() {
        let mut adc = StubAdc::new(1000, 0);
        adc.busy_polls = 10;
        assert_eq!(sample_adc(&mut adc, Axis::Horizontal), Some(1000));
    }

    #[test]
    fn test_sample_gives_up_after_bounded_wait() {
        let mut adc = StubAdc::new(1000, 0);
        adc.busy_polls = ADC_MAX_POLLS;
        assert_eq!(sample_adc(&mut adc, Axis::Horizontal), None);

        let mut js = Joystick::new();
        js.sample(&mut adc);
        assert_eq!(js.horizontal(), JOYSTICK_CENTRE, "stale reading kept");
        assert_eq!(js.next_axis(), Axis::Vertical, "turn still passes on");
    }

    #[test]
    fn test_sample_completes_on_last_allowed_poll() {
        let mut adc = StubAdc::new(42, 0);
        adc.busy_polls = ADC_MAX_POLLS - 1;
        assert_eq!(sample_adc(&mut adc, Axis::Horizontal), Some(42));
    }

    #[test]
    fn test_thresholds() {
        let mut js = Joystick::new();
        assert!(TiltDirection::ALL.iter().all(|&d| !js.is_tilted(d)));

        js.set_reading(Axis::Horizontal, 851);
        assert!(js.is_tilted(TiltDirection::Right));
        js.set_reading(Axis::Horizontal, 850);
        assert!(!js.is_tilted(TiltDirection::Right));
        js.set_reading(Axis::Horizontal, 149);
        assert!(js.is_tilted(TiltDirection::Left));
        js.set_reading(Axis::Horizontal, 150);
        assert!(!js.is_tilted(TiltDirection::Left));

        js.set_reading(Axis::Vertical, 900);
        assert!(js.is_tilted(TiltDirection::Up));
        js.set_reading(Axis::Vertical, 20);
        assert!(js.is_tilted(TiltDirection::Down));
    }

    #[test]
    fn test_horizontal_debounce_window() {
        let mut js = Joystick::new();
        js.set_reading(Axis::Horizontal, 900);

        assert_eq!(js.poll_direction(0), Some(TiltDirection::Right));
        assert_eq!(js.poll_direction(100), None);
        assert_eq!(js.poll_direction(150), None, "window is exclusive");
        assert_eq!(js.poll_direction(151), Some(TiltDirection::Right));
        assert_eq!(js.last_fired(TiltDirection::Right), Some(151));
    }

    #[test]
    fn test_up_uses_longer_window() {
        let mut js = Joystick::new();
        js.set_reading(Axis::Vertical, 1000);

        assert_eq!(js.poll_direction(1000), Some(TiltDirection::Up));
        assert_eq!(js.poll_direction(1151), None);
        assert_eq!(js.poll_direction(1300), None);
        assert_eq!(js.poll_direction(1301), Some(TiltDirection::Up));
    }

    #[test]
    fn test_directions_debounce_independently() {
        let mut js = Joystick::new();
        js.set_reading(Axis::Horizontal, 900);
        assert!(js.check(TiltDirection::Right, 0));

        js.set_reading(Axis::Horizontal, 50);
        assert!(js.check(TiltDirection::Left, 10), "left has its own gate");
        assert!(!js.check(TiltDirection::Left, 100));
    }

    #[test]
    fn test_failed_threshold_does_not_touch_gate() {
        let mut js = Joystick::new();
        assert!(!js.check(TiltDirection::Down, 5));
        assert_eq!(js.last_fired(TiltDirection::Down), None);
    }

    #[test]
    fn test_first_firing_direction_wins() {
        let mut js = Joystick::new();
        js.set_reading(Axis::Horizontal, 100);
        js.set_reading(Axis::Vertical, 100);

        assert_eq!(js.poll_direction(0), Some(TiltDirection::Left));
        assert_eq!(js.last_fired(TiltDirection::Down), None, "later gates not evaluated");
        // Left is debouncing, so down gets its turn.
        assert_eq!(js.poll_direction(1), Some(TiltDirection::Down));
    }
}
