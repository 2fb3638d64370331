//! Deterministic trace replay.
//!
//! The clock starts at 0 and only moves between passes, by `tick_step`.
//! Before each pass the events due at that tick are delivered, the way the
//! ISRs would have queued them. Replaying the same trace always yields the
//! same log.

use anyhow::Result;
use log::{debug, info};
use mcu_tetris_engine::{GameLoop, Iteration};
use mcu_tetris_types::{ButtonId, LoopState};

use crate::board::ScriptedBoard;
use crate::format::{LogEntry, SummaryRecord, Trace, TraceInput};
use crate::platform::ScriptedPlatform;

/// Output of a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub entries: Vec<LogEntry>,
    pub summary: SummaryRecord,
}

impl ReplayReport {
    /// Entries then the summary, one JSON object per line.
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        out.push_str(&serde_json::to_string(&self.summary)?);
        out.push('\n');
        Ok(out)
    }
}

pub fn replay(trace: &Trace) -> Result<ReplayReport> {
    trace.validate()?;

    let mut platform = ScriptedPlatform::new().with_adc_busy_polls(trace.adc_busy_polls);
    let mut board = ScriptedBoard::new(trace.board.clone());
    let mut game = GameLoop::new();

    platform.set_now(0);
    game.new_game(&mut platform, &mut board);

    let mut events = trace.sorted_events().into_iter().peekable();
    let mut entries = Vec::new();
    let mut tick = 0;
    let mut last_state = game.state();

    loop {
        platform.set_now(tick);
        while let Some(event) = events.next_if(|event| event.at <= tick) {
            deliver(&mut platform, &event.input);
        }

        let iteration = game.step(&mut platform, &mut board);
        if !iteration.is_quiet() || iteration.state != last_state {
            entries.push(entry(&iteration, &game));
        }
        last_state = iteration.state;

        if iteration.state == LoopState::GameOver {
            break;
        }
        match tick.checked_add(trace.tick_step) {
            Some(next) if next <= trace.end_tick => tick = next,
            _ => break,
        }
    }

    let summary = SummaryRecord::new(game.state(), tick, game.summary());
    info!(
        "replay finished at tick {} ({}), score {}",
        tick, summary.state, summary.score
    );
    Ok(ReplayReport { entries, summary })
}

fn entry(iteration: &Iteration, game: &GameLoop) -> LogEntry {
    let score = game.score();
    LogEntry::from_iteration(iteration, score.get_score(), score.get_cleared_rows())
}

fn deliver(platform: &mut ScriptedPlatform, input: &TraceInput) {
    match input {
        TraceInput::Button { id } => {
            platform.press_button(ButtonId::new(*id));
        }
        TraceInput::Serial { text } => {
            let queued = platform.receive_serial(text.as_bytes());
            if queued < text.len() {
                debug!("serial overrun, {} of {} bytes queued", queued, text.len());
            }
        }
        TraceInput::Joystick { x, y } => platform.set_joystick(*x, *y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(json: &str) -> ReplayReport {
        replay(&Trace::from_json(json).unwrap()).unwrap()
    }

    #[test]
    fn test_idle_trace_only_logs_gravity() {
        let report = run(r#"{"end_tick": 1800}"#);
        let ticks: Vec<_> = report.entries.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![600, 1200, 1800]);
        assert!(report
            .entries
            .iter()
            .all(|e| e.gravity == Some("dropped") && e.command.is_none()));
        assert_eq!(report.summary.state, "playing");
        assert_eq!(report.summary.last_tick, 1800);
        assert_eq!(report.summary.iterations, 1801);
    }

    #[test]
    fn test_serial_escape_sequence_moves_left() {
        let report = run(r#"{"end_tick": 10, "events": [{"at": 5, "type": "serial", "text": "\u001b[D"}]}"#);
        assert_eq!(report.entries.len(), 1);
        let entry = &report.entries[0];
        assert_eq!(entry.tick, 7, "one byte per pass");
        assert_eq!(entry.command, Some("moveLeft"));
        assert_eq!(entry.source, Some("serial"));
        assert_eq!(entry.action, Some("moved"));
    }

    #[test]
    fn test_hard_drop_does_not_restart_gravity() {
        let report = run(r#"{"end_tick": 600, "events": [{"at": 100, "type": "button", "id": 1}]}"#);
        let ticks: Vec<_> = report.entries.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![100, 600]);
        assert_eq!(report.entries[0].action, Some("fixed"));
        assert_eq!(report.entries[1].gravity, Some("dropped"));
    }

    #[test]
    fn test_pause_shifts_gravity() {
        let report = run(
            r#"{"end_tick": 5600, "events": [
                {"at": 400, "type": "serial", "text": "p"},
                {"at": 5400, "type": "serial", "text": "p"}
            ]}"#,
        );
        let ticks: Vec<_> = report.entries.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![400, 5400, 5600]);
        assert_eq!(report.entries[0].state, "paused");
        assert_eq!(report.entries[1].action, Some("resumed"));
        assert_eq!(report.entries[2].gravity, Some("dropped"));
    }

    #[test]
    fn test_hard_drops_until_game_over() {
        let events: Vec<String> = (0..5)
            .map(|i| format!(r#"{{"at": {}, "type": "button", "id": 1}}"#, 10 + i * 10))
            .collect();
        let json = format!(
            r#"{{"end_tick": 10000, "board": {{"depth": 3, "clear_every": 0}}, "events": [{}]}}"#,
            events.join(",")
        );
        let report = run(&json);

        assert_eq!(report.summary.state, "gameOver");
        assert_eq!(report.summary.last_tick, 30);
        let last = report.entries.last().unwrap();
        assert_eq!(last.action, Some("gameOver"));
        assert_eq!(last.gravity, None);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let json = r#"{
            "end_tick": 3000,
            "adc_busy_polls": 2,
            "events": [
                {"at": 0, "type": "joystick", "x": 900, "y": 500},
                {"at": 320, "type": "joystick", "x": 500, "y": 100},
                {"at": 700, "type": "joystick", "x": 500, "y": 500},
                {"at": 900, "type": "serial", "text": " p p"},
                {"at": 1500, "type": "button", "id": 2}
            ]
        }"#;
        let first = run(json).to_json_lines().unwrap();
        let second = run(json).to_json_lines().unwrap();
        assert_eq!(first, second);
        assert!(first.lines().count() > 1);
    }

    #[test]
    fn test_json_lines_end_with_summary() {
        let lines = run(r#"{"end_tick": 600}"#).to_json_lines().unwrap();
        let last: serde_json::Value = serde_json::from_str(lines.lines().last().unwrap()).unwrap();
        assert_eq!(last["state"], "playing");
        assert_eq!(last["iterations"], 601);
    }
}
