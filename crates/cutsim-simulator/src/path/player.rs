//! Time-indexed playback over a motion timeline

use glam::Vec3;

use super::timeline::PathTimeline;

/// Read-only playback cursor: maps a time to the cutter tip position
#[derive(Debug, Clone, Default)]
pub struct ToolpathPlayer {
    timeline: PathTimeline,
}

impl ToolpathPlayer {
    pub fn new(timeline: PathTimeline) -> Self {
        Self { timeline }
    }

    pub fn timeline(&self) -> &PathTimeline {
        &self.timeline
    }

    /// Total program duration in seconds
    pub fn total_time(&self) -> f32 {
        self.timeline.total_time()
    }

    /// Cutter tip position at `time`, or `None` for an empty path.
    ///
    /// Binary search over segment end times; times before the path clamp
    /// to the first point and times past the end to the last.
    pub fn position_at(&self, time: f32) -> Option<Vec3> {
        let segments = self.timeline.segments();
        let i = segments.partition_point(|s| s.end_time < time);
        let Some(segment) = segments.get(i) else {
            return segments.last().map(|s| s.end);
        };

        let duration = segment.end_time - segment.start_time;
        let ratio = if duration == 0.0 {
            0.0
        } else {
            ((time - segment.start_time) / duration).clamp(0.0, 1.0)
        };
        // segment boundaries must come back exact, not lerp-approximated
        if ratio <= 0.0 {
            return Some(segment.start);
        }
        if ratio >= 1.0 {
            return Some(segment.end);
        }
        Some(segment.start.lerp(segment.end, ratio))
    }
}
