//! Discrete cue events for the audio collaborator

use serde::{Deserialize, Serialize};

use super::entity::PowerUpKind;

/// Base pitch of the jump cue; each remaining jump adds `JUMP_PITCH_STEP`
pub const JUMP_PITCH: f32 = 720.0;
pub const JUMP_PITCH_STEP: f32 = 50.0;
pub const COIN_PITCH: f32 = 980.0;
pub const POWER_UP_PITCH: f32 = 680.0;
pub const SHIELD_BREAK_PITCH: f32 = 480.0;
pub const SHIELD_BREAK_FLYER_PITCH: f32 = 500.0;
pub const GAME_OVER_PITCH: f32 = 240.0;

/// Something the player should hear about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cue", rename_all = "kebab-case")]
pub enum CueEvent {
    /// `jump` is 1 for the ground jump, 2 for the air jump
    Jump { jump: u8, pitch: f32 },
    Land,
    ShieldBreak { pitch: f32 },
    CoinPickup { pitch: f32 },
    PowerUpPickup { kind: PowerUpKind, pitch: f32 },
    GameOver { pitch: f32 },
}

impl CueEvent {
    /// Jump cue for the jump that left `jumps_left` jumps in the budget
    pub fn jump(jump: u8, jumps_left: u8) -> Self {
        CueEvent::Jump {
            jump,
            pitch: JUMP_PITCH + JUMP_PITCH_STEP * jumps_left as f32,
        }
    }

    /// Stable cue name
    pub fn name(&self) -> &'static str {
        match self {
            CueEvent::Jump { .. } => "jump",
            CueEvent::Land => "land",
            CueEvent::ShieldBreak { .. } => "shield-break",
            CueEvent::CoinPickup { .. } => "coin-pickup",
            CueEvent::PowerUpPickup { .. } => "powerup-pickup",
            CueEvent::GameOver { .. } => "game-over",
        }
    }

    /// Optional pitch hint (Hz)
    pub fn pitch(&self) -> Option<f32> {
        match *self {
            CueEvent::Jump { pitch, .. }
            | CueEvent::ShieldBreak { pitch }
            | CueEvent::CoinPickup { pitch }
            | CueEvent::PowerUpPickup { pitch, .. }
            | CueEvent::GameOver { pitch } => Some(pitch),
            CueEvent::Land => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_pitch_varies_by_jump() {
        let first = CueEvent::jump(1, 1);
        let second = CueEvent::jump(2, 0);
        assert_eq!(first.pitch(), Some(770.0));
        assert_eq!(second.pitch(), Some(720.0));
        assert_eq!(first.name(), "jump");
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_string(&CueEvent::ShieldBreak { pitch: 480.0 }).unwrap();
        assert_eq!(json, r#"{"cue":"shield-break","pitch":480.0}"#);
        assert_eq!(CueEvent::Land.pitch(), None);
    }
}
