//! Click feedback tones
//!
//! Two short Web Audio cues synthesized from an oscillator and a gain
//! envelope, no sample assets. Native builds get silent stubs.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, OscillatorType};

/// Feedback cue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Correct target clicked
    Confirm,
    /// Wrong target clicked
    Error,
}

/// Oscillator recipe for one cue
#[cfg(target_arch = "wasm32")]
struct Tone {
    waveform: OscillatorType,
    freq: f32,
    /// Exponential sweep target; `None` holds `freq` for the whole cue
    sweep_to: Option<f32>,
    /// Seconds
    duration: f64,
}

#[cfg(target_arch = "wasm32")]
impl SoundEffect {
    fn tone(self) -> Tone {
        match self {
            // Clean high beep
            SoundEffect::Confirm => Tone {
                waveform: OscillatorType::Sine,
                freq: 800.0,
                sweep_to: None,
                duration: 0.1,
            },
            // Buzzy downward sweep
            SoundEffect::Error => Tone {
                waveform: OscillatorType::Sawtooth,
                freq: 200.0,
                sweep_to: Some(100.0),
                duration: 0.2,
            },
        }
    }
}

/// Peak gain shared by every cue
#[cfg(target_arch = "wasm32")]
const TONE_GAIN: f32 = 0.3;
/// Exponential ramps cannot hit zero; this is close enough to silence
#[cfg(target_arch = "wasm32")]
const TONE_FLOOR: f32 = 0.01;

/// Owns the audio context and the mute flag
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("AudioContext unavailable, continuing without sound");
        }
        Self { ctx, muted: false }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self { muted: false }
    }

    /// Flip the mute flag; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Play one cue, best effort
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Contexts start suspended until a user gesture; a click counts
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        let _ = Self::spawn_tone(ctx, effect.tone());
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, _effect: SoundEffect) {}

    /// Wire oscillator -> gain -> destination and schedule one envelope.
    /// A failure at any node drops the cue silently.
    #[cfg(target_arch = "wasm32")]
    fn spawn_tone(ctx: &AudioContext, tone: Tone) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(tone.waveform);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let start = ctx.current_time();
        let end = start + tone.duration;

        osc.frequency().set_value_at_time(tone.freq, start).ok()?;
        if let Some(target) = tone.sweep_to {
            osc.frequency()
                .exponential_ramp_to_value_at_time(target, end)
                .ok()?;
        }
        gain.gain().set_value_at_time(TONE_GAIN, start).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(TONE_FLOOR, end)
            .ok()?;

        osc.start().ok()?;
        osc.stop_with_when(end).ok()?;
        Some(())
    }
}
