//! Timed motion over a sampled path

pub mod player;
pub mod timeline;

pub use player::ToolpathPlayer;
pub use timeline::{MotionSegment, PathTimeline};
