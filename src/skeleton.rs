use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keypoint vocabulary reported by the pose pipeline (COCO layout plus neck).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    Neck,
}

impl JointName {
    /// Every joint name the pipeline can report.
    pub const ALL: [JointName; 18] = [
        JointName::Nose,
        JointName::LeftEye,
        JointName::RightEye,
        JointName::LeftEar,
        JointName::RightEar,
        JointName::LeftShoulder,
        JointName::RightShoulder,
        JointName::LeftElbow,
        JointName::RightElbow,
        JointName::LeftWrist,
        JointName::RightWrist,
        JointName::LeftHip,
        JointName::RightHip,
        JointName::LeftKnee,
        JointName::RightKnee,
        JointName::LeftAnkle,
        JointName::RightAnkle,
        JointName::Neck,
    ];

    /// Snake case name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::Nose => "nose",
            JointName::LeftEye => "left_eye",
            JointName::RightEye => "right_eye",
            JointName::LeftEar => "left_ear",
            JointName::RightEar => "right_ear",
            JointName::LeftShoulder => "left_shoulder",
            JointName::RightShoulder => "right_shoulder",
            JointName::LeftElbow => "left_elbow",
            JointName::RightElbow => "right_elbow",
            JointName::LeftWrist => "left_wrist",
            JointName::RightWrist => "right_wrist",
            JointName::LeftHip => "left_hip",
            JointName::RightHip => "right_hip",
            JointName::LeftKnee => "left_knee",
            JointName::RightKnee => "right_knee",
            JointName::LeftAnkle => "left_ankle",
            JointName::RightAnkle => "right_ankle",
            JointName::Neck => "neck",
        }
    }

    /// Parse a wire name, `None` for names outside the vocabulary.
    pub fn from_name(name: &str) -> Option<JointName> {
        JointName::ALL.iter().copied().find(|j| j.as_str() == name)
    }
}

/// Single detected keypoint. Coordinates are normalized to [0, 1] image
/// space with y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub x: f64,
    pub y: f64,
}

impl Joint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Named joint positions for one subject in one frame. Joints the pipeline
/// failed to detect are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton {
    joints: HashMap<JointName, Joint>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_joint(&mut self, name: JointName, joint: Joint) {
        self.joints.insert(name, joint);
    }

    /// Position of the named joint, `None` when it was not detected.
    pub fn joint(&self, name: JointName) -> Option<Joint> {
        self.joints.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

impl FromIterator<(JointName, Joint)> for Skeleton {
    fn from_iter<T: IntoIterator<Item = (JointName, Joint)>>(iter: T) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}
