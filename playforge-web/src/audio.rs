//! Procedural audio cue engine
//!
//! Synthesizes every gameplay cue from oscillator primitives via the Web
//! Audio API - no audio assets. One `AudioContext` is acquired lazily per
//! simulator session and released when the simulator closes. If the
//! environment has no audio capability the engine degrades silently; cues
//! are an enhancement, never allowed to block gameplay.

use playforge_game::Cue;
use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

/// Per-session cue synthesizer. Fire-and-forget: callers never await a cue.
pub struct AudioEngine {
    ctx: Option<AudioContext>,
    unavailable: bool,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    /// Create an engine without touching the audio backend. The context is
    /// acquired on the first cue, which in practice follows a user gesture.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ctx: None,
            unavailable: false,
        }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.unavailable {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    self.unavailable = true;
                    log::warn!("Failed to create AudioContext - cues disabled");
                }
            }
        }
        self.ctx.as_ref()
    }

    /// Synthesize and immediately play the cue for a gameplay event.
    pub fn play(&mut self, cue: Cue) {
        let Some(ctx) = self.context() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Roll => play_roll(ctx),
            Cue::Move => play_move(ctx),
            Cue::Card => play_card(ctx),
            Cue::Tile => play_tile(ctx),
            Cue::Win => play_win(ctx),
        }
    }

    /// Release the audio context. Further cues re-acquire lazily.
    pub fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.close();
    }
}

/// Create an oscillator wired through a gain envelope to the destination.
fn create_osc(
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

/// Dice roll - three descending square-wave pulses simulating a rattle
fn play_roll(ctx: &AudioContext) {
    for (i, freq) in [320.0, 260.0, 200.0].iter().enumerate() {
        let delay = i as f64 * 0.06;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Square) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.05)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.06).ok();
        }
    }
}

/// Token move - sine sweep from 600Hz down to 100Hz
fn play_move(ctx: &AudioContext) {
    let Some((osc, gain)) = create_osc(ctx, 600.0, OscillatorType::Sine) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(0.25, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
        .ok();
    osc.frequency().set_value_at_time(600.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(100.0, t + 0.15)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.2).ok();
}

/// Card draw - quick rising triangle flourish, low volume
fn play_card(ctx: &AudioContext) {
    let Some((osc, gain)) = create_osc(ctx, 800.0, OscillatorType::Triangle) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(0.1, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.1)
        .ok();
    osc.frequency().set_value_at_time(800.0, t).ok();
    osc.frequency()
        .linear_ramp_to_value_at_time(1200.0, t + 0.1)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.12).ok();
}

/// Tile landing - long sine chime at 880Hz
fn play_tile(ctx: &AudioContext) {
    let Some((osc, gain)) = create_osc(ctx, 880.0, OscillatorType::Sine) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(0.2, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.8)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.85).ok();
}

/// Win fanfare - ascending C major arpeggio, staggered 100ms apart
fn play_win(ctx: &AudioContext) {
    for (i, freq) in [523.25, 659.25, 783.99, 1046.50].iter().enumerate() {
        let delay = i as f64 * 0.1;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Triangle) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }
}
