//! Gravity module - drop scheduling with pause-aware bookkeeping
//!
//! Gravity speeds up as rows are cleared:
//!
//! ```text
//! interval(rows) = max(600 - 30 * rows, 30)
//! ```
//!
//! The subtraction saturates, so a large row count can never produce a zero,
//! negative or wrapped interval; from 19 cleared rows on the interval stays at
//! [`DROP_INTERVAL_FLOOR_MS`].
//!
//! While paused no comparison is made. Resuming shifts `last_drop_time` forward
//! by the time spent paused, so paused time never counts toward the interval.

use log::info;

use crate::types::{BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS};

/// Gravity interval in ticks for the given cleared-row count.
pub fn drop_interval_ms(cleared_rows: u8) -> u64 {
    BASE_DROP_MS
        .saturating_sub(DROP_STEP_MS * cleared_rows as u64)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Whether a gravity drop is due at `now`.
///
/// Pure decision point: never due while paused.
pub fn is_drop_due(now: u64, last_drop_time: u64, cleared_rows: u8, paused: bool) -> bool {
    !paused && now >= last_drop_time.saturating_add(drop_interval_ms(cleared_rows))
}

/// Running or paused, with the tick at which the pause began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseState {
    #[default]
    Running,
    Paused {
        since: u64,
    },
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        matches!(self, PauseState::Paused { .. })
    }
}

/// Tracks the last drop time and the pause state of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropScheduler {
    last_drop_time: u64,
    pause: PauseState,
}

impl DropScheduler {
    pub const fn new() -> Self {
        Self {
            last_drop_time: 0,
            pause: PauseState::Running,
        }
    }

    /// Begin a session at `now`: running, with no drop due for a full interval.
    pub fn start(&mut self, now: u64) {
        self.last_drop_time = now;
        self.pause = PauseState::Running;
    }

    pub fn last_drop_time(&self) -> u64 {
        self.last_drop_time
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Whether a gravity drop is due at `now` for this session.
    pub fn is_due(&self, now: u64, cleared_rows: u8) -> bool {
        is_drop_due(now, self.last_drop_time, cleared_rows, self.is_paused())
    }

    /// Record a drop attempt (successful or not) at `now`.
    pub fn mark_dropped(&mut self, now: u64) {
        self.last_drop_time = now;
    }

    /// Freeze the timer. No-op if already paused.
    pub fn pause(&mut self, now: u64) {
        if let PauseState::Running = self.pause {
            self.pause = PauseState::Paused { since: now };
            info!("paused at tick {}", now);
        }
    }

    /// Unfreeze the timer, excluding the paused span. No-op if running.
    pub fn resume(&mut self, now: u64) {
        if let PauseState::Paused { since } = self.pause {
            let paused_for = now.saturating_sub(since);
            self.last_drop_time = self.last_drop_time.saturating_add(paused_for);
            self.pause = PauseState::Running;
            info!("resumed at tick {} after {}ms", now, paused_for);
        }
    }

    /// Flip between running and paused; returns the new state.
    pub fn toggle_pause(&mut self, now: u64) -> PauseState {
        if self.is_paused() {
            self.resume(now);
        } else {
            self.pause(now);
        }
        self.pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_interval_ms() {
        assert_eq!(drop_interval_ms(0), 600);
        assert_eq!(drop_interval_ms(1), 570);
        assert_eq!(drop_interval_ms(10), 300);
        assert_eq!(drop_interval_ms(18), 60);
    }

    #[test]
    fn test_drop_interval_clamps_at_floor() {
        assert_eq!(drop_interval_ms(19), DROP_INTERVAL_FLOOR_MS);
        assert_eq!(drop_interval_ms(20), DROP_INTERVAL_FLOOR_MS);
        assert_eq!(drop_interval_ms(21), DROP_INTERVAL_FLOOR_MS);
        assert_eq!(drop_interval_ms(99), DROP_INTERVAL_FLOOR_MS);
        assert_eq!(drop_interval_ms(u8::MAX), DROP_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn test_drop_interval_is_monotonic_and_positive() {
        let mut prev = u64::MAX;
        for rows in 0..=u8::MAX {
            let interval = drop_interval_ms(rows);
            assert!(interval > 0);
            assert!(interval <= prev);
            prev = interval;
        }
    }

    #[test]
    fn test_is_drop_due_boundary() {
        assert!(!is_drop_due(599, 0, 0, false));
        assert!(is_drop_due(600, 0, 0, false));
        assert!(is_drop_due(10_000, 0, 0, false));
        assert!(!is_drop_due(10_000, 0, 0, true));

        assert!(!is_drop_due(1299, 1000, 10, false));
        assert!(is_drop_due(1300, 1000, 10, false));
    }

    #[test]
    fn test_start_resets_pause_and_reference() {
        let mut s = DropScheduler::new();
        s.pause(5);
        s.start(1000);
        assert!(!s.is_paused());
        assert_eq!(s.last_drop_time(), 1000);
        assert!(!s.is_due(1599, 0));
        assert!(s.is_due(1600, 0));
    }

    #[test]
    fn test_pause_excludes_paused_time() {
        let mut s = DropScheduler::new();
        s.start(0);

        // Pause at 400 (200ms before the drop would be due), resume at 5400.
        s.pause(400);
        assert!(!s.is_due(1000, 0), "never due while paused");
        s.resume(5400);

        assert_eq!(s.last_drop_time(), 5000);
        assert!(!s.is_due(5599, 0));
        assert!(s.is_due(5600, 0));
    }

    #[test]
    fn test_double_pause_keeps_first_timestamp() {
        let mut s = DropScheduler::new();
        s.start(0);
        s.pause(100);
        s.pause(300);
        assert_eq!(s.pause_state(), PauseState::Paused { since: 100 });
        s.resume(200);
        assert_eq!(s.last_drop_time(), 100);
        s.resume(900);
        assert_eq!(s.last_drop_time(), 100);
    }

    #[test]
    fn test_toggle_pause_round_trip() {
        let mut s = DropScheduler::new();
        s.start(50);
        assert_eq!(s.toggle_pause(60), PauseState::Paused { since: 60 });
        assert_eq!(s.toggle_pause(160), PauseState::Running);
        assert_eq!(s.last_drop_time(), 150);
    }

    #[test]
    fn test_mark_dropped_moves_reference() {
        let mut s = DropScheduler::new();
        s.start(0);
        assert!(s.is_due(600, 0));
        s.mark_dropped(600);
        assert!(!s.is_due(1199, 0));
        assert!(s.is_due(1200, 0));
    }
}
