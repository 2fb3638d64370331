//! Score module - score and cleared-row counters for one game session
//!
//! The two counters are only reachable through [`ScoreTracker`]'s accessors.
//! The tracker is owned by the session and reset at the start of every game.

use crate::types::MAX_CLEARED_ROWS;

/// Accumulated score and cleared-row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
    cleared_rows: u8,
}

impl ScoreTracker {
    pub const fn new() -> Self {
        Self {
            score: 0,
            cleared_rows: 0,
        }
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn reset_cleared_rows(&mut self) {
        self.cleared_rows = 0;
    }

    /// Reset both counters for a new game.
    pub fn reset(&mut self) {
        self.reset_score();
        self.reset_cleared_rows();
    }

    /// Add points. Overflow wraps.
    pub fn add_to_score(&mut self, amount: u32) {
        self.score = self.score.wrapping_add(amount);
    }

    /// Count one cleared row, saturating at [`MAX_CLEARED_ROWS`].
    pub fn increment_cleared_rows(&mut self) {
        if self.cleared_rows < MAX_CLEARED_ROWS {
            self.cleared_rows += 1;
        }
    }

    pub fn get_score(&self) -> u32 {
        self.score
    }

    pub fn get_cleared_rows(&self) -> u8 {
        self.cleared_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_zeroed() {
        let t = ScoreTracker::new();
        assert_eq!(t.get_score(), 0);
        assert_eq!(t.get_cleared_rows(), 0);
        assert_eq!(t, ScoreTracker::default());
    }

    #[test]
    fn test_add_to_score_is_cumulative() {
        let mut split = ScoreTracker::new();
        split.add_to_score(40);
        split.add_to_score(1200);

        let mut once = ScoreTracker::new();
        once.add_to_score(1240);

        assert_eq!(split.get_score(), once.get_score());
        assert_eq!(split.get_score(), 1240);
    }

    #[test]
    fn test_add_to_score_wraps_instead_of_panicking() {
        let mut t = ScoreTracker::new();
        t.add_to_score(u32::MAX);
        t.add_to_score(2);
        assert_eq!(t.get_score(), 1);
    }

    #[test]
    fn test_cleared_rows_saturate_at_cap() {
        let mut t = ScoreTracker::new();
        let mut prev = 0;
        for _ in 0..250 {
            t.increment_cleared_rows();
            let now = t.get_cleared_rows();
            assert!(now <= MAX_CLEARED_ROWS);
            assert!(now >= prev, "cleared rows must never decrease");
            prev = now;
        }
        assert_eq!(t.get_cleared_rows(), 99);
    }

    #[test]
    fn test_reset_clears_both_counters() {
        let mut t = ScoreTracker::new();
        t.add_to_score(500);
        t.increment_cleared_rows();
        t.increment_cleared_rows();

        t.reset_cleared_rows();
        assert_eq!(t.get_cleared_rows(), 0);
        assert_eq!(t.get_score(), 500);

        t.increment_cleared_rows();
        t.reset();
        assert_eq!(t.get_score(), 0);
        assert_eq!(t.get_cleared_rows(), 0);
    }
}
