//! Match phase, countdown clock, scoring and goal detection
//!
//! The countdown is an accumulator advanced by the frame tick itself, so the
//! clock and the simulation can never drift apart and there is no second
//! timer to leak on restart.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Field, Score, Team};
use crate::consts::MATCH_DURATION_SECS;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Main menu, nothing ticks
    Menu,
    /// Active gameplay
    Running,
    /// Match frozen, clock stopped
    Paused,
    /// Clock ran out
    Ended,
}

/// Final result from the home team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

impl MatchOutcome {
    pub fn from_score(score: Score) -> Self {
        use std::cmp::Ordering;
        match score.home.cmp(&score.away) {
            Ordering::Greater => MatchOutcome::Win,
            Ordering::Less => MatchOutcome::Loss,
            Ordering::Equal => MatchOutcome::Draw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Win => "YOU WIN!",
            MatchOutcome::Loss => "YOU LOSE!",
            MatchOutcome::Draw => "DRAW!",
        }
    }

    /// "Final score: 2 x 1 - YOU WIN!"
    pub fn summary(&self, score: Score) -> String {
        format!("Final score: {} - {}", score, self.label())
    }
}

/// What the clock did during one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockUpdate {
    /// Less than a second accrued
    Unchanged,
    /// Whole seconds came off the clock
    Ticked { seconds_remaining: u32 },
    /// The clock hit zero and the match ended (reported once)
    Expired,
}

/// Phase, clock and score of the current match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,
    /// Whole seconds left on the clock
    pub clock_seconds: u32,
    /// Real time accrued toward the next clock decrement
    pub clock_accumulator: f32,
    pub score: Score,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::Menu,
            clock_seconds: MATCH_DURATION_SECS,
            clock_accumulator: 0.0,
            score: Score::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Whether the clock has run out on the current match
    pub fn is_finished(&self) -> bool {
        self.clock_seconds == 0
    }

    /// Menu -> running.
    ///
    /// A match left mid-play picks up where it was; one that already ran out
    /// starts over at 0-0 with a full clock.
    pub fn start(&mut self) -> bool {
        if self.phase != MatchPhase::Menu {
            return false;
        }
        if self.is_finished() {
            self.reset();
        } else {
            self.phase = MatchPhase::Running;
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != MatchPhase::Running {
            return false;
        }
        self.phase = MatchPhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != MatchPhase::Paused {
            return false;
        }
        self.phase = MatchPhase::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            MatchPhase::Running => self.pause(),
            MatchPhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Any phase -> menu
    pub fn exit_to_menu(&mut self) -> bool {
        if self.phase == MatchPhase::Menu {
            return false;
        }
        self.phase = MatchPhase::Menu;
        true
    }

    /// Fresh match: 0-0, full clock, running. Drops any partial second.
    pub fn reset(&mut self) {
        self.score = Score::default();
        self.clock_seconds = MATCH_DURATION_SECS;
        self.clock_accumulator = 0.0;
        self.phase = MatchPhase::Running;
    }

    /// Accrue elapsed real time and take whole seconds off the clock.
    ///
    /// Only runs while the match is running. Reaching zero moves the match to
    /// `Ended`, so `Expired` is reported exactly once per match.
    pub fn advance_clock(&mut self, elapsed: f32) -> ClockUpdate {
        if !self.is_running() || !elapsed.is_finite() || elapsed <= 0.0 {
            return ClockUpdate::Unchanged;
        }

        self.clock_accumulator += elapsed;
        let mut ticked = false;
        while self.clock_accumulator >= 1.0 && self.clock_seconds > 0 {
            self.clock_accumulator -= 1.0;
            self.clock_seconds -= 1;
            ticked = true;
        }

        if self.clock_seconds == 0 {
            self.phase = MatchPhase::Ended;
            self.clock_accumulator = 0.0;
            log::info!(
                target: "game",
                "Match over: {}",
                MatchOutcome::from_score(self.score).summary(self.score)
            );
            return ClockUpdate::Expired;
        }

        if ticked {
            ClockUpdate::Ticked {
                seconds_remaining: self.clock_seconds,
            }
        } else {
            ClockUpdate::Unchanged
        }
    }

    /// Credit a goal and return the new score
    pub fn record_goal(&mut self, team: Team) -> Score {
        self.score.increment(team);
        log::info!(target: "game", "GOAL for {}! {}", team.as_str(), self.score);
        self.score
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_score(self.score)
    }

    /// HUD line: "1 x 0 (42s)"
    pub fn hud_text(&self) -> String {
        format!("{} ({}s)", self.score, self.clock_seconds)
    }
}

/// Which team (if any) scores with the ball at `position`.
///
/// The ball has to be inside the goal mouth laterally and past a goal line.
/// Home attacks the far end (negative z), away attacks the near end.
pub fn detect_goal(position: Vec3, field: &Field) -> Option<Team> {
    if position.x.abs() >= field.goal_half_width {
        return None;
    }
    if position.z < -field.half_length {
        Some(Team::Home)
    } else if position.z > field.half_length {
        Some(Team::Away)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> MatchState {
        let mut m = MatchState::new();
        assert!(m.start());
        m
    }

    #[test]
    fn test_phase_transitions() {
        let mut m = MatchState::new();
        assert_eq!(m.phase, MatchPhase::Menu);
        assert!(!m.pause());
        assert!(!m.resume());

        assert!(m.start());
        assert_eq!(m.phase, MatchPhase::Running);
        assert!(m.toggle_pause());
        assert_eq!(m.phase, MatchPhase::Paused);
        assert!(!m.start());
        assert!(m.toggle_pause());
        assert_eq!(m.phase, MatchPhase::Running);

        assert!(m.exit_to_menu());
        assert_eq!(m.phase, MatchPhase::Menu);
    }

    #[test]
    fn test_start_after_full_time_begins_a_new_match() {
        let mut m = running();
        m.record_goal(Team::Away);
        m.advance_clock(MATCH_DURATION_SECS as f32);
        assert_eq!(m.phase, MatchPhase::Ended);

        assert!(m.exit_to_menu());
        assert!(m.start());
        assert_eq!(m.phase, MatchPhase::Running);
        assert_eq!(m.score, Score::default());
        assert_eq!(m.clock_seconds, MATCH_DURATION_SECS);
        assert_eq!(m.advance_clock(1.0 / 60.0), ClockUpdate::Unchanged);
    }

    #[test]
    fn test_start_from_menu_mid_match_keeps_score() {
        let mut m = running();
        m.record_goal(Team::Home);
        m.advance_clock(10.0);
        m.exit_to_menu();

        assert!(m.start());
        assert_eq!(m.score, Score { home: 1, away: 0 });
        assert_eq!(m.clock_seconds, MATCH_DURATION_SECS - 10);
    }

    #[test]
    fn test_clock_ends_match_exactly_once() {
        let mut m = running();
        let mut expired = 0;
        let mut ticks = Vec::new();
        for _ in 0..60 {
            match m.advance_clock(1.0) {
                ClockUpdate::Expired => expired += 1,
                ClockUpdate::Ticked { seconds_remaining } => ticks.push(seconds_remaining),
                ClockUpdate::Unchanged => {}
            }
        }
        assert_eq!(expired, 1);
        assert_eq!(ticks.len(), 59);
        assert_eq!(ticks[0], 59);
        assert_eq!(m.phase, MatchPhase::Ended);
        assert_eq!(m.clock_seconds, 0);

        // Further time changes nothing
        assert_eq!(m.advance_clock(5.0), ClockUpdate::Unchanged);
        assert_eq!(m.phase, MatchPhase::Ended);
    }

    #[test]
    fn test_clock_accumulates_partial_frames() {
        let mut m = running();
        for _ in 0..59 {
            m.advance_clock(1.0 / 60.0);
        }
        assert_eq!(m.clock_seconds, 60);
        // A few more frames cross the one-second mark
        let mut ticked = false;
        for _ in 0..3 {
            if let ClockUpdate::Ticked { seconds_remaining } = m.advance_clock(1.0 / 60.0) {
                assert_eq!(seconds_remaining, 59);
                ticked = true;
            }
        }
        assert!(ticked);
    }

    #[test]
    fn test_clock_frozen_while_paused() {
        let mut m = running();
        m.pause();
        assert_eq!(m.advance_clock(10.0), ClockUpdate::Unchanged);
        assert_eq!(m.clock_seconds, 60);
        assert_eq!(m.clock_accumulator, 0.0);
    }

    #[test]
    fn test_clock_ignores_bad_elapsed() {
        let mut m = running();
        assert_eq!(m.advance_clock(f32::NAN), ClockUpdate::Unchanged);
        assert_eq!(m.advance_clock(-1.0), ClockUpdate::Unchanged);
        assert_eq!(m.clock_accumulator, 0.0);
    }

    #[test]
    fn test_reset_restores_full_match() {
        let mut m = running();
        m.record_goal(Team::Away);
        m.advance_clock(30.5);
        m.reset();
        assert_eq!(m.score, Score::default());
        assert_eq!(m.clock_seconds, MATCH_DURATION_SECS);
        assert_eq!(m.clock_accumulator, 0.0);
        assert_eq!(m.phase, MatchPhase::Running);
    }

    #[test]
    fn test_goal_detection() {
        let field = Field::standard();
        assert_eq!(detect_goal(Vec3::new(0.0, 0.3, -14.5), &field), Some(Team::Home));
        assert_eq!(detect_goal(Vec3::new(1.5, 0.3, 14.2), &field), Some(Team::Away));
        // Outside the mouth
        assert_eq!(detect_goal(Vec3::new(5.0, 0.3, -14.5), &field), None);
        // Inside the mouth but not over the line
        assert_eq!(detect_goal(Vec3::new(0.0, 0.3, -13.9), &field), None);
    }

    #[test]
    fn test_outcome_summary() {
        let score = Score { home: 1, away: 3 };
        let outcome = MatchOutcome::from_score(score);
        assert_eq!(outcome, MatchOutcome::Loss);
        assert_eq!(outcome.summary(score), "Final score: 1 x 3 - YOU LOSE!");
        assert_eq!(MatchOutcome::from_score(Score::default()), MatchOutcome::Draw);
    }

    #[test]
    fn test_hud_text() {
        let mut m = running();
        m.record_goal(Team::Home);
        assert_eq!(m.hud_text(), "1 x 0 (60s)");
    }
}
