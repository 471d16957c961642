pub mod controller;
pub mod jump;
pub mod orientation;

pub use controller::{FirstSubject, MotionController, SubjectSelector};
pub use jump::JumpDetector;
pub use orientation::OrientationResetDetector;
