pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod history;
pub mod motion;
pub mod sender;
pub mod skeleton;
pub mod source;
pub mod stopwatch;

pub use app::SessionStats;
pub use config::{MotionConfig, PosepilotConfig, SenderConfig, SystemConfig};
pub use control::{ControlFrame, GameState, WIRE_SIZE};
pub use error::{PosepilotError, Result, SenderError, SourceError};
pub use geometry::Vec2;
pub use history::SampleWindow;
pub use motion::{
    FirstSubject, JumpDetector, MotionController, OrientationResetDetector, SubjectSelector,
};
pub use sender::{ControlSender, ControlSink, NullSink};
pub use skeleton::{Joint, JointName, Skeleton};
pub use source::SkeletonSource;
pub use stopwatch::Stopwatch;
