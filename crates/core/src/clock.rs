//! Clock module - millisecond tick counter shared with the timer interrupt
//!
//! The timer interrupt is the only writer. The loop reads the counter once per
//! iteration and uses that snapshot for every decision in the iteration.
//!
//! The counter is 64 bits wide, which no 8/16/32-bit core can load in one
//! instruction, so reads and writes go through a critical section instead of a
//! plain load.

use core::cell::Cell;

use critical_section::Mutex;

/// Source of the current tick count.
pub trait Clock {
    fn now_ticks(&self) -> u64;
}

/// Interrupt-advanced tick counter, suitable for a `static`.
///
/// ```
/// use mcu_tetris_core::clock::{Clock, TickClock};
///
/// static TICKS: TickClock = TickClock::new();
///
/// // Timer compare-match interrupt:
/// TICKS.tick();
///
/// assert_eq!(TICKS.now_ticks(), 1);
/// ```
pub struct TickClock {
    ticks: Mutex<Cell<u64>>,
}

impl TickClock {
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Advance by one millisecond. Called from the timer interrupt.
    pub fn tick(&self) {
        self.advance(1);
    }

    pub fn advance(&self, ms: u64) {
        critical_section::with(|cs| {
            let cell = self.ticks.borrow(cs);
            cell.set(cell.get().wrapping_add(ms));
        });
    }

    pub fn set(&self, ticks: u64) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(ticks));
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickClock {
    fn now_ticks(&self) -> u64 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ticks(&self) -> u64 {
        (**self).now_ticks()
    }
}
