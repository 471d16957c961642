use crate::control::GameState;
use tracing::debug;

/// Debounced detector for a subject facing away from the camera.
///
/// Facing the camera, the subject's left shoulder appears at a larger x
/// than the right one; the inverted ordering means the subject has turned
/// their back. Holding the inverted ordering for more than `hold_frames`
/// consecutive frames (about one second at the pipeline's frame rate)
/// requests a reset. The counter only runs while flying.
#[derive(Debug)]
pub struct OrientationResetDetector {
    hold_frames: u32,
    backface_frames: u32,
}

impl OrientationResetDetector {
    pub fn new(hold_frames: u32) -> Self {
        Self {
            hold_frames,
            backface_frames: 0,
        }
    }

    /// Feed one frame of shoulder x positions. Returns true when the reset
    /// should fire; any forward-facing frame or idle frame clears the count.
    pub fn observe(
        &mut self,
        left_shoulder_x: f64,
        right_shoulder_x: f64,
        state: GameState,
    ) -> bool {
        if state == GameState::Idle {
            self.backface_frames = 0;
            return false;
        }

        if left_shoulder_x < right_shoulder_x {
            self.backface_frames += 1;
        } else {
            self.backface_frames = 0;
        }

        let fired = self.backface_frames > self.hold_frames;
        if fired {
            debug!(
                "Backface held for {} frames, requesting reset",
                self.backface_frames
            );
        }
        fired
    }

    /// Consecutive backface frames seen so far.
    pub fn backface_frames(&self) -> u32 {
        self.backface_frames
    }
}
