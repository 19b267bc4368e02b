//! Caller-owned simulation context
//!
//! Owns every piece of pipeline state — timeline, swept geometry,
//! rasterizer with its staging buffer, heightfield, surface topology,
//! and the view/time cursor — with no process-wide singletons.
//! Mutations only set dirty flags; `tick()` performs at most one
//! recomposition and one re-shade per call, however many mutations
//! happened since the last tick.

use glam::{Mat4, Vec3};
use tracing::debug;

use cutsim_core::error::{Error, SimError};
use cutsim_core::{CutterProfile, SimulationConfig};

use crate::gcode::{GcodeParser, PathPoint};
use crate::path::{PathTimeline, ToolpathPlayer};
use crate::raster::{Heightfield, Rasterizer};
use crate::surface::{SurfaceMesh, SurfaceVertex};
use crate::sweep::{PathGeometryBuilder, SweptGeometry};

/// Zoom factors at or below this are rejected
const MIN_ZOOM: f32 = 1e-9;

/// One simulation run: path, cutter, view state, and derived buffers
pub struct SimulationContext {
    config: SimulationConfig,
    player: ToolpathPlayer,
    geometry: SweptGeometry,
    rasterizer: Rasterizer,
    heightfield: Heightfield,
    surface: SurfaceMesh,
    shaded: Vec<SurfaceVertex>,
    rotation: Mat4,
    zoom: f32,
    stop_at_time: f32,
    needs_composite: bool,
    needs_shade: bool,
}

impl SimulationContext {
    /// Validate the configuration and allocate the fixed resources.
    ///
    /// Fails before any frame can be produced; a context is never left
    /// partially initialized.
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let rasterizer = Rasterizer::new(config.resolution, config.staging_budget_bytes)?;
        let heightfield = Heightfield::new(config.resolution);
        let surface = SurfaceMesh::new(config.resolution);
        Ok(Self {
            geometry: SweptGeometry::empty(config.stock_top_z),
            player: ToolpathPlayer::default(),
            rasterizer,
            heightfield,
            surface,
            shaded: Vec::new(),
            rotation: Mat4::IDENTITY,
            zoom: 1.0,
            stop_at_time: f32::INFINITY,
            needs_composite: true,
            needs_shade: true,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Parse G-code text and load the resulting path
    pub fn load_gcode(&mut self, text: &str) -> Result<(), Error> {
        let parser = GcodeParser::with_arc_precision(self.config.arc_precision);
        let points = parser.parse(text)?;
        self.load_path(&points);
        Ok(())
    }

    /// Load a pre-sampled path and rebuild all derived state
    pub fn load_path(&mut self, points: &[PathPoint]) {
        let timeline = PathTimeline::from_points(points);
        let builder = PathGeometryBuilder::new(
            self.config.cutter,
            self.config.stock_top_z,
            self.config.half_circle_segments,
        );
        self.geometry = builder.build(&timeline);
        debug!(
            points = points.len(),
            total_time = timeline.total_time(),
            triangles = self.geometry.triangle_count(),
            "path loaded"
        );
        self.player = ToolpathPlayer::new(timeline);
        self.needs_composite = true;
    }

    /// Replace the path and cutter parameters in one step
    pub fn set_path(&mut self, points: &[PathPoint], stock_top_z: f32, cutter: CutterProfile) {
        self.config.stock_top_z = stock_top_z;
        self.config.cutter = cutter.normalized();
        self.load_path(points);
    }

    /// Current time cursor in seconds
    pub fn stop_at_time(&self) -> f32 {
        self.stop_at_time
    }

    /// Move the time cursor; the heightfield recomposites on next tick
    pub fn set_stop_at_time(&mut self, time: f32) {
        self.stop_at_time = time;
        self.needs_composite = true;
    }

    pub fn rotation(&self) -> Mat4 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Mat4) {
        self.rotation = rotation;
        self.needs_shade = true;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor; non-positive values are rejected and the
    /// previous zoom is kept.
    pub fn set_zoom(&mut self, zoom: f32) -> Result<(), SimError> {
        if zoom <= MIN_ZOOM {
            return Err(SimError::InvalidZoom { value: zoom });
        }
        self.zoom = zoom;
        self.needs_shade = true;
        Ok(())
    }

    /// Total program duration in seconds
    pub fn total_time(&self) -> f32 {
        self.player.total_time()
    }

    /// Interpolated cutter tip position at the current time cursor
    pub fn cutter_position(&self) -> Vec3 {
        self.player
            .position_at(self.stop_at_time)
            .unwrap_or(Vec3::ZERO)
    }

    /// The composited heightfield as of the last tick
    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    /// Playback access for readouts
    pub fn player(&self) -> &ToolpathPlayer {
        &self.player
    }

    /// Run one frame: recomposite and re-shade only if dirty, then
    /// return the shaded surface.
    pub fn tick(&mut self) -> &[SurfaceVertex] {
        if self.needs_composite {
            self.rasterizer.composite(
                &self.geometry,
                self.player.timeline(),
                self.stop_at_time,
                &mut self.heightfield,
            );
            self.needs_composite = false;
            self.needs_shade = true;
        }
        if self.needs_shade {
            self.surface
                .shade(&self.heightfield, self.geometry.transform(), &mut self.shaded);
            self.needs_shade = false;
        }
        &self.shaded
    }
}
