//! Shared defaults for the simulation pipeline

/// Heightfield resolution (cells per side), independent of path size
pub const DEFAULT_RESOLUTION: usize = 1024;

/// Feed rate (units/min) assumed when a program never specifies F
pub const DEFAULT_FEED_RATE: f32 = 1000.0;

/// Arc sampling precision in path length units
pub const DEFAULT_ARC_PRECISION: f32 = 0.1;

/// Staging buffer budget for swept geometry uploads, in bytes
pub const DEFAULT_STAGING_BUDGET_BYTES: usize = 2 * 1024 * 1024;

/// Default cutter diameter in path length units
pub const DEFAULT_CUTTER_DIAMETER: f32 = 0.125;

/// Included angle treated as a flat (cylindrical) cutter
pub const FLAT_INCLUDED_ANGLE_DEG: f32 = 180.0;

/// Half-circle subdivision count for conical sweep fans
pub const DEFAULT_HALF_CIRCLE_SEGMENTS: usize = 5;

/// Bounding box padding around the path, in cutter diameters
pub const BOUNDS_PADDING_DIAMETERS: f32 = 4.0;
