//! # cutsim
//!
//! Subtractive machining simulator. Given a cutter toolpath (G-code or a
//! pre-sampled path), cutsim computes a height field representing the
//! stock surface after material removal, scrubbable along a time axis.
//!
//! ## Architecture
//!
//! cutsim is organized as a workspace:
//!
//! 1. **cutsim-core** - configuration, cutter model, errors, constants
//! 2. **cutsim-simulator** - parser, timeline, swept geometry,
//!    rasterizer, surface mesh, simulation context
//! 3. **cutsim** - this crate: logging bootstrap and the demo binary

pub use cutsim_core::{CutterProfile, Error, ParseError, Result, SimError, SimulationConfig};

pub use cutsim_simulator::{
    ArcDirection, GcodeParser, GeometryTransform, Heightfield, MotionSegment,
    PathGeometryBuilder, PathPoint, PathTimeline, Rasterizer, SimulationContext, SurfaceMesh,
    SurfaceVertex, SweptGeometry, SweptVertex, ToolpathPlayer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output and RUST_LOG
/// environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
