//! Audio feedback using the Web Audio API
//!
//! Short procedurally generated beeps - no external files needed.

use crate::sim::{GameEvent, ScoreCategory};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Clean water collected
    Collect,
    /// Tool pack collected
    Complete,
    /// Contaminant touched
    Error,
    /// Mission complete
    Victory,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Scored { category, .. } => Some(match category {
                ScoreCategory::Collect => SoundEffect::Collect,
                ScoreCategory::Complete => SoundEffect::Complete,
                ScoreCategory::Error => SoundEffect::Error,
            }),
            GameEvent::Victory { .. } => Some(SoundEffect::Victory),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    /// Beep sequence as (frequency Hz, start offset s, duration s)
    pub fn beeps(self) -> &'static [(f32, f64, f64)] {
        match self {
            SoundEffect::Collect => &[(880.0, 0.0, 0.08)],
            SoundEffect::Complete => &[(660.0, 0.0, 0.14), (880.0, 0.12, 0.06)],
            SoundEffect::Error => &[(220.0, 0.0, 0.18)],
            SoundEffect::Victory => &[(660.0, 0.0, 0.12), (880.0, 0.12, 0.12), (1320.0, 0.24, 0.2)],
            SoundEffect::GameOver => &[(330.0, 0.0, 0.2), (220.0, 0.2, 0.3)],
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use manager::AudioManager;

#[cfg(target_arch = "wasm32")]
mod manager {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Pick up changed volume/mute preferences
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let t = ctx.current_time();
            for &(freq, offset, duration) in effect.beeps() {
                self.beep(ctx, freq, t + offset, duration);
            }
        }

        /// Create a sine oscillator wired through a gain node
        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Gentle attack, hold, quick release
        fn beep(&self, ctx: &AudioContext, freq: f32, start: f64, duration: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, freq) else {
                return;
            };
            let peak = 0.12 * self.volume;

            gain.gain().set_value_at_time(0.0001, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(peak, start + 0.01)
                .ok();
            gain.gain().set_value_at_time(peak, start + duration).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, start + duration + 0.04)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + duration + 0.06).ok();
        }
    }
}
