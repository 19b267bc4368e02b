//! # cutsim Simulator
//!
//! Toolpath parsing, timed playback, swept-volume geometry, and
//! heightfield compositing for cutsim. The pipeline runs G-code text
//! through the parser into a motion timeline, builds per-segment swept
//! geometry for the configured cutter, and composites it into a
//! time-gated heightfield that the surface mesh shades for display.

pub mod context;
pub mod gcode;
pub mod path;
pub mod raster;
pub mod surface;
pub mod sweep;

pub use context::SimulationContext;
pub use gcode::{ArcDirection, GcodeParser, PathPoint};
pub use path::{MotionSegment, PathTimeline, ToolpathPlayer};
pub use raster::{Heightfield, Rasterizer};
pub use surface::{SurfaceMesh, SurfaceVertex};
pub use sweep::{GeometryTransform, PathGeometryBuilder, SweptGeometry, SweptVertex};
