use serde::{Deserialize, Serialize};

/// Coarse controller mode driven by gesture detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Idle,
    Flying,
}

impl GameState {
    /// Wire value consumed by the actuator (0 = idle, 1 = flying).
    pub fn wire_value(&self) -> i32 {
        match self {
            GameState::Idle => 0,
            GameState::Flying => 1,
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self, GameState::Flying)
    }
}

/// Size in bytes of one encoded control record.
pub const WIRE_SIZE: usize = 24;

/// Six-field control record sent to the actuator every frame.
///
/// `pitch` is carried for wire compatibility only; the motion engine never
/// computes it and it stays zero. Wing targets are clamped to [-15, 90]
/// degrees by the controller; `body_height` is capped at 8 with no lower
/// bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlFrame {
    /// Body roll in degrees, unclamped.
    pub roll: f64,
    /// Always zero, preserved for the six-field wire layout.
    pub pitch: f64,
    pub game_state: GameState,
    /// Left wing angle target in degrees.
    pub left_wing_target: f64,
    /// Right wing angle target in degrees.
    pub right_wing_target: f64,
    /// Unit-less body height, upper-clamped at 8.
    pub body_height: f64,
}

impl Default for ControlFrame {
    fn default() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
            game_state: GameState::Idle,
            left_wing_target: 0.0,
            right_wing_target: 0.0,
            body_height: 0.0,
        }
    }
}

impl ControlFrame {
    /// Field order consumed by the actuator. Floats truncate toward zero.
    pub fn to_wire(&self) -> [i32; 6] {
        [
            self.roll as i32,
            self.pitch as i32,
            self.game_state.wire_value(),
            self.left_wing_target as i32,
            self.right_wing_target as i32,
            self.body_height as i32,
        ]
    }

    /// Encode into the fixed 24-byte record, native byte order.
    pub fn encode(&self) -> [u8; WIRE_SIZE] {
        let mut buf = [0u8; WIRE_SIZE];
        for (slot, word) in buf.chunks_exact_mut(4).zip(self.to_wire()) {
            slot.copy_from_slice(&word.to_ne_bytes());
        }
        buf
    }
}
