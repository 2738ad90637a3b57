//! Cue-to-tone table
//!
//! The simulation only raises cues. Hosts that want sound look up a short
//! procedural beep here and synthesize it however their platform allows.

use serde::Serialize;

use crate::sim::CueEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A single beep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    /// Hz
    pub freq: f32,
    pub duration_secs: f32,
    /// Gain (0.0 - 1.0)
    pub volume: f32,
    pub waveform: Waveform,
}

impl Tone {
    const fn new(freq: f32, duration_secs: f32, volume: f32, waveform: Waveform) -> Self {
        Self {
            freq,
            duration_secs,
            volume,
            waveform,
        }
    }

    /// Beep for a cue
    pub fn for_cue(cue: &CueEvent) -> Self {
        match *cue {
            CueEvent::Jump { pitch, .. } => Tone::new(pitch, 0.06, 0.045, Waveform::Sine),
            CueEvent::Land => Tone::new(320.0, 0.04, 0.02, Waveform::Triangle),
            CueEvent::ShieldBreak { pitch } => Tone::new(pitch, 0.07, 0.06, Waveform::Triangle),
            CueEvent::CoinPickup { pitch } => Tone::new(pitch, 0.05, 0.05, Waveform::Square),
            CueEvent::PowerUpPickup { pitch, .. } => Tone::new(pitch, 0.12, 0.05, Waveform::Sine),
            CueEvent::GameOver { pitch } => Tone::new(pitch, 0.12, 0.06, Waveform::Sawtooth),
        }
    }

    /// Scale by a master volume
    pub fn with_volume(mut self, master: f32) -> Self {
        self.volume *= master.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cue::{COIN_PITCH, GAME_OVER_PITCH};

    #[test]
    fn test_tone_uses_cue_pitch() {
        let tone = Tone::for_cue(&CueEvent::jump(1, 1));
        assert_eq!(tone.freq, 770.0);
        assert_eq!(tone.waveform, Waveform::Sine);

        let tone = Tone::for_cue(&CueEvent::CoinPickup { pitch: COIN_PITCH });
        assert_eq!(tone.waveform, Waveform::Square);

        let tone = Tone::for_cue(&CueEvent::GameOver {
            pitch: GAME_OVER_PITCH,
        });
        assert_eq!(tone.freq, 240.0);
    }

    #[test]
    fn test_volume_scaling() {
        let tone = Tone::for_cue(&CueEvent::Land).with_volume(0.5);
        assert!((tone.volume - 0.01).abs() < 1e-6);
        let muted = Tone::for_cue(&CueEvent::Land).with_volume(-3.0);
        assert_eq!(muted.volume, 0.0);
    }
}
