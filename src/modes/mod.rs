pub mod autopilot;
pub mod demo;
pub mod play;

pub use autopilot::Autopilot;
pub use demo::DemoMode;
pub use play::PlayMode;
