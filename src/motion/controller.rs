use crate::config::MotionConfig;
use crate::control::{ControlFrame, GameState};
use crate::geometry::Vec2;
use crate::motion::jump::JumpDetector;
use crate::motion::orientation::OrientationResetDetector;
use crate::skeleton::{Joint, JointName, Skeleton};
use tracing::{debug, trace};

/// Horizontal reference for the left arm and the body roll.
const HORIZONTAL: Vec2 = Vec2 { x: 1.0, y: 0.0 };
/// Mirrored horizontal reference for the right arm.
const HORIZONTAL_MIRRORED: Vec2 = Vec2 { x: -1.0, y: 0.0 };

/// Offset added to the raw arm angle before clamping, degrees.
const WING_ANGLE_OFFSET: f64 = 30.0;
/// Wing target clamp bounds, degrees.
const WING_ANGLE_MIN: f64 = -15.0;
const WING_ANGLE_MAX: f64 = 90.0;

/// Scale mapping the nose-to-neck ratio onto body height units.
const BODY_HEIGHT_SCALE: f64 = 16.0;
/// Upper bound on body height. There is no lower bound.
const BODY_HEIGHT_MAX: f64 = 8.0;

/// Picks the subject to track out of the skeletons reported for one frame.
pub trait SubjectSelector: Send {
    fn select<'a>(&self, skeletons: &'a [Skeleton]) -> Option<&'a Skeleton>;
}

/// Default policy: the pose pipeline lists the dominant subject first.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstSubject;

impl SubjectSelector for FirstSubject {
    fn select<'a>(&self, skeletons: &'a [Skeleton]) -> Option<&'a Skeleton> {
        skeletons.first()
    }
}

/// Gesture state machine and geometric estimators.
///
/// One instance owns all mutable interpretation state for one tracked
/// session: the last control frame, the shoulder measure window, and the
/// backface debounce counter. Feed it frames in capture order from a single
/// task; the detectors assume a gap-free monotone sequence.
pub struct MotionController {
    frame: ControlFrame,
    jump: JumpDetector,
    reset: OrientationResetDetector,
    selector: Box<dyn SubjectSelector>,
    frames_processed: u64,
}

impl MotionController {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            frame: ControlFrame::default(),
            jump: JumpDetector::new(config.history_capacity, config.jump_threshold_factor),
            reset: OrientationResetDetector::new(config.reset_hold_frames),
            selector: Box::new(FirstSubject),
            frames_processed: 0,
        }
    }

    /// Replace the subject selection policy.
    pub fn with_selector(mut self, selector: Box<dyn SubjectSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn game_state(&self) -> GameState {
        self.frame.game_state
    }

    /// Last control frame produced (or the initial one before any frame).
    pub fn control_frame(&self) -> &ControlFrame {
        &self.frame
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Interpret one frame of skeletons and return the updated control
    /// frame.
    ///
    /// Nothing in here is an error: an empty frame holds the previous
    /// output entirely, and missing joints hold the fields they feed while
    /// the rest recompute.
    pub fn process_frame(&mut self, skeletons: &[Skeleton]) -> ControlFrame {
        self.frames_processed += 1;

        let Some(subject) = self.selector.select(skeletons) else {
            trace!("No subject in frame, holding last control frame");
            return self.frame.clone();
        };

        let left_shoulder = subject.joint(JointName::LeftShoulder);
        let right_shoulder = subject.joint(JointName::RightShoulder);
        let left_elbow = subject.joint(JointName::LeftElbow);
        let right_elbow = subject.joint(JointName::RightElbow);
        let nose = subject.joint(JointName::Nose);
        let neck = subject.joint(JointName::Neck);

        // Sustained backface resets the game no matter which arm joints are
        // visible this frame.
        if let (Some(ls), Some(rs)) = (left_shoulder, right_shoulder) {
            if self.reset.observe(ls.x, rs.x, self.frame.game_state) {
                debug!("Orientation reset, back to idle");
                self.frame.game_state = GameState::Idle;
            }
        }

        if let (Some(le), Some(re), Some(ls), Some(rs)) =
            (left_elbow, right_elbow, left_shoulder, right_shoulder)
        {
            // Wing targets from each arm's shoulder-to-elbow direction.
            let left_arm = arm_vector(ls, le);
            self.frame.left_wing_target =
                clamp_wing(left_arm.signed_angle_to(HORIZONTAL).to_degrees() + WING_ANGLE_OFFSET);

            let right_arm = arm_vector(rs, re);
            self.frame.right_wing_target = clamp_wing(
                HORIZONTAL_MIRRORED.signed_angle_to(right_arm).to_degrees() + WING_ANGLE_OFFSET,
            );

            // Body roll from the elbow-to-elbow span.
            let span = Vec2::new(le.x - re.x, le.y - re.y).normalized();
            self.frame.roll = span.signed_angle_to(HORIZONTAL).to_degrees();

            let shoulder_dist = (rs.x - ls.x).abs();

            if let (Some(nose), Some(neck)) = (nose, neck) {
                self.frame.body_height = body_height(nose, neck, shoulder_dist);
            }

            if self.jump_scan_allowed(ls, rs, nose, neck) {
                let measure = (ls.y + rs.y) * 2.0;
                if self.jump.observe(measure, shoulder_dist) {
                    debug!("Jump detected, taking off");
                    self.frame.game_state = GameState::Flying;
                }
            }

            trace!(
                "Frame interpreted: roll {:.1}, wings {:.1}/{:.1}, height {:.2}, state {:?}",
                self.frame.roll,
                self.frame.left_wing_target,
                self.frame.right_wing_target,
                self.frame.body_height,
                self.frame.game_state
            );
        }

        self.frame.clone()
    }

    /// The jump scan needs the nose and neck for its turning guard, and is
    /// suppressed while flying when the shoulders close up horizontally
    /// (the subject is turning, not jumping). A suppressed frame leaves the
    /// measure window untouched.
    fn jump_scan_allowed(
        &self,
        ls: Joint,
        rs: Joint,
        nose: Option<Joint>,
        neck: Option<Joint>,
    ) -> bool {
        let (Some(nose), Some(neck)) = (nose, neck) else {
            return false;
        };
        if self.frame.game_state == GameState::Flying {
            // Signed on purpose: the separation collapses through zero as
            // the subject turns.
            let separation = ls.x - rs.x;
            if separation > (nose.y - neck.y).abs() / 2.0 {
                return false;
            }
        }
        true
    }
}

fn arm_vector(shoulder: Joint, elbow: Joint) -> Vec2 {
    Vec2::new(elbow.x - shoulder.x, elbow.y - shoulder.y).normalized()
}

fn clamp_wing(angle_deg: f64) -> f64 {
    angle_deg.clamp(WING_ANGLE_MIN, WING_ANGLE_MAX)
}

fn body_height(nose: Joint, neck: Joint, shoulder_dist: f64) -> f64 {
    let vertical = (nose.y - neck.y).abs();
    ((vertical / shoulder_dist - 0.5) * BODY_HEIGHT_SCALE).min(BODY_HEIGHT_MAX)
}
