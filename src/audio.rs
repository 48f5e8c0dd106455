//! Audio system using Web Audio API
//!
//! Each collision plays a short sine ping. Pings go through a compressor into
//! a stereo ping-pong delay, so rapid bounces smear into an echo.

use crate::consts::*;
use crate::sim::CollisionEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits the drawn segment
    SegmentHit,
    /// Ball hits a screen edge
    WallHit,
}

impl SoundEffect {
    /// Tone frequency (Hz) and duration (seconds)
    pub fn tone(self) -> (f32, f64) {
        match self {
            SoundEffect::SegmentHit => (SEGMENT_TONE_HZ, TONE_DURATION),
            SoundEffect::WallHit => (WALL_TONE_HZ, TONE_DURATION),
        }
    }
}

impl From<CollisionEvent> for SoundEffect {
    fn from(event: CollisionEvent) -> Self {
        match event {
            CollisionEvent::Segment => SoundEffect::SegmentHit,
            CollisionEvent::Wall(_) => SoundEffect::WallHit,
        }
    }
}

/// Ping-pong delay settings
pub mod delay {
    /// Left channel delay (seconds)
    pub const LEFT: f32 = 0.15;
    /// Right channel delay (seconds)
    pub const RIGHT: f32 = 0.2;
    /// Fraction fed back from right into left
    pub const FEEDBACK: f32 = 0.3;
    /// Echo level
    pub const WET: f32 = 0.5;
    /// Direct signal level
    pub const DRY: f32 = 1.0;
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, DynamicsCompressorNode, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, delay};

    /// Audio manager for the demo
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Head of the effects chain; every tone connects here
        input: Option<DynamicsCompressorNode>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }

            let input = ctx.as_ref().and_then(|ctx| {
                let chain = build_effects_chain(ctx);
                if chain.is_none() {
                    log::warn!("Failed to build effects chain - audio disabled");
                }
                chain
            });

            Self {
                ctx,
                input,
                volume: 0.8,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set output volume (0.0 - 1.0, 0 silences)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }

            let (Some(ctx), Some(input)) = (&self.ctx, &self.input) else {
                return;
            };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let (freq, duration) = effect.tone();
            self.play_ping(ctx, input, freq, duration);
        }

        /// Create an oscillator with gain envelope feeding the effects chain
        fn create_osc(
            &self,
            ctx: &AudioContext,
            input: &DynamicsCompressorNode,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(input).ok()?;

            Some((osc, gain))
        }

        /// Short sine ping
        fn play_ping(&self, ctx: &AudioContext, input: &DynamicsCompressorNode, freq: f32, duration: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, input, freq, OscillatorType::Sine) else {
                log::debug!("Dropped {} Hz ping", freq);
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.volume * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }
    }

    /// Compressor into a stereo ping-pong delay into the destination
    ///
    /// Returns the compressor, which is the chain's input.
    fn build_effects_chain(ctx: &AudioContext) -> Option<DynamicsCompressorNode> {
        let compressor = ctx.create_dynamics_compressor().ok()?;
        compressor.threshold().set_value(-20.0);
        compressor.knee().set_value(5.0);
        compressor.ratio().set_value(4.0);
        compressor.attack().set_value(0.001);
        compressor.release().set_value(0.25);

        let dry = ctx.create_gain().ok()?;
        dry.gain().set_value(delay::DRY);
        let wet = ctx.create_gain().ok()?;
        wet.gain().set_value(delay::WET);
        let feedback = ctx.create_gain().ok()?;
        feedback.gain().set_value(delay::FEEDBACK);

        let left = ctx.create_delay_with_max_delay_time(1.0).ok()?;
        left.delay_time().set_value(delay::LEFT);
        let right = ctx.create_delay_with_max_delay_time(1.0).ok()?;
        right.delay_time().set_value(delay::RIGHT);

        let merger = ctx.create_channel_merger_with_number_of_inputs(2).ok()?;
        let destination = ctx.destination();

        // Dry path
        compressor.connect_with_audio_node(&dry).ok()?;
        dry.connect_with_audio_node(&destination).ok()?;

        // Left -> right -> feedback -> left, each tap to its own channel
        compressor.connect_with_audio_node(&left).ok()?;
        left.connect_with_audio_node(&right).ok()?;
        right.connect_with_audio_node(&feedback).ok()?;
        feedback.connect_with_audio_node(&left).ok()?;
        left.connect_with_audio_node_and_output_and_input(&merger, 0, 0)
            .ok()?;
        right
            .connect_with_audio_node_and_output_and_input(&merger, 0, 1)
            .ok()?;
        merger.connect_with_audio_node(&wet).ok()?;
        wet.connect_with_audio_node(&destination).ok()?;

        Some(compressor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WallSide;

    #[test]
    fn test_collision_tones() {
        let segment = SoundEffect::from(CollisionEvent::Segment);
        let wall = SoundEffect::from(CollisionEvent::Wall(WallSide::Top));
        assert_eq!(segment, SoundEffect::SegmentHit);
        assert_eq!(wall, SoundEffect::WallHit);
        assert_eq!(segment.tone(), (440.0, 0.05));
        assert_eq!(wall.tone(), (880.0, 0.05));
    }
}
