//! Audio cues using Web Audio API
//!
//! Procedurally generated sounds, no external files needed. Driven by the
//! match hooks, so the simulation never calls into audio.

use glam::Vec3;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{KickKind, MatchHooks, MatchOutcome, MatchPhase, Score, Team};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Ball struck (shot, pass or AI shot)
    Kick,
    /// Goal celebration
    Goal,
    /// Referee whistle (kickoff, full time)
    Whistle,
}

/// Output level for every cue (0.0 - 1.0)
const MASTER_VOLUME: f32 = 0.8;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    muted: bool,
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn play(&self, cue: SoundCue) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Kick => self.play_kick(ctx, MASTER_VOLUME),
            SoundCue::Goal => self.play_goal(ctx, MASTER_VOLUME),
            SoundCue::Whistle => self.play_whistle(ctx, MASTER_VOLUME),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Kick - short low thump
    fn play_kick(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Goal - rising major arpeggio
    fn play_goal(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) else {
                continue;
            };
            let start = t + i as f64 * 0.1;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.35, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.4)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.45).ok();
        }
    }

    /// Whistle - two warbling high blasts
    fn play_whistle(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for blast in 0..2 {
            let Some((osc, gain)) = self.create_osc(ctx, 2800.0, OscillatorType::Square) else {
                return;
            };
            let start = t + blast as f64 * 0.3;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.15, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                .ok();
            // Pea rattle
            for step in 0..10 {
                let f = if step % 2 == 0 { 2800.0 } else { 2500.0 };
                osc.frequency()
                    .set_value_at_time(f, start + step as f64 * 0.025)
                    .ok();
            }
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.27).ok();
        }
    }
}

impl MatchHooks for AudioManager {
    fn goal_scored(&mut self, _team: Team, _score: Score) {
        self.play(SoundCue::Goal);
    }

    fn match_ended(&mut self, _score: Score, _outcome: MatchOutcome) {
        self.play(SoundCue::Whistle);
    }

    fn kick(&mut self, _kind: KickKind, _position: Vec3) {
        self.play(SoundCue::Kick);
    }

    fn phase_changed(&mut self, from: MatchPhase, to: MatchPhase) {
        // Kickoff whistle, not on resume
        if to == MatchPhase::Running && from != MatchPhase::Paused {
            self.play(SoundCue::Whistle);
        }
    }
}
