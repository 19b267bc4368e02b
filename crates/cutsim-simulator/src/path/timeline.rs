//! Motion timeline built from sampled path points

use glam::Vec3;
use tracing::debug;

use crate::gcode::PathPoint;

/// One timed motion between two consecutive path points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSegment {
    pub start: Vec3,
    pub end: Vec3,
    /// Feed rate in units per minute
    pub feed: f32,
    /// Seconds from program start when the motion begins
    pub start_time: f32,
    /// Seconds from program start when the motion completes
    pub end_time: f32,
}

/// Contiguous timeline over a sampled path.
///
/// Segment `i` runs from point `i-1` to point `i`; the first segment is
/// degenerate (start == end) and anchors the timeline at t = 0. Each
/// segment's start time equals the previous segment's end time.
#[derive(Debug, Clone, Default)]
pub struct PathTimeline {
    segments: Vec<MotionSegment>,
    total_time: f32,
}

impl PathTimeline {
    /// Build the timeline, accumulating `distance / feed * 60` seconds
    /// per motion.
    pub fn from_points(points: &[PathPoint]) -> Self {
        let mut segments = Vec::with_capacity(points.len());
        let mut time = 0.0f32;

        for (i, point) in points.iter().enumerate() {
            let prev = points[i.saturating_sub(1)];
            let start = prev.position();
            let end = point.position();
            let distance = start.distance(end);
            // a non-positive feed cannot advance time
            let duration = if point.feed > 0.0 {
                distance / point.feed * 60.0
            } else {
                0.0
            };
            let start_time = time;
            time += duration;
            segments.push(MotionSegment {
                start,
                end,
                feed: point.feed,
                start_time,
                end_time: time,
            });
        }

        debug!(segments = segments.len(), total_time = time, "timeline built");
        Self {
            segments,
            total_time: time,
        }
    }

    pub fn segments(&self) -> &[MotionSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total program duration in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Axis-aligned bounds over every point of the path
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.segments.first()?;
        let mut min = first.start;
        let mut max = first.start;
        for segment in &self.segments {
            min = min.min(segment.start).min(segment.end);
            max = max.max(segment.start).max(segment.end);
        }
        Some((min, max))
    }
}
