//! Playback position lookup

use cutsim_simulator::{PathPoint, PathTimeline, ToolpathPlayer};
use glam::Vec3;

fn player_over(points: &[[f32; 4]]) -> ToolpathPlayer {
    let points: Vec<PathPoint> = points.iter().map(|&p| PathPoint::from(p)).collect();
    ToolpathPlayer::new(PathTimeline::from_points(&points))
}

#[test]
fn test_segment_end_times_map_to_exact_endpoints() {
    let player = player_over(&[
        [0.0, 0.0, 0.0, 60.0],
        [10.0, 0.0, 0.0, 60.0],
        [10.0, 7.0, -2.0, 120.0],
    ]);

    let segments: Vec<_> = player.timeline().segments().to_vec();
    for (k, segment) in segments.iter().enumerate() {
        let position = player
            .position_at(segment.end_time)
            .expect("non-empty path");
        assert_eq!(
            position, segment.end,
            "position at segment {k} end time must be its exact endpoint"
        );
    }
}

#[test]
fn test_times_outside_the_path_clamp() {
    let player = player_over(&[
        [1.0, 2.0, 0.0, 60.0],
        [11.0, 2.0, 0.0, 60.0],
    ]);

    assert_eq!(
        player.position_at(-1.0),
        Some(Vec3::new(1.0, 2.0, 0.0)),
        "times before the path return the first point"
    );
    let total = player.total_time();
    assert_eq!(
        player.position_at(total + 1.0),
        Some(Vec3::new(11.0, 2.0, 0.0)),
        "times past the end return the last point"
    );
}

#[test]
fn test_interior_times_interpolate_linearly() {
    let player = player_over(&[
        [0.0, 0.0, 0.0, 60.0],
        [10.0, 0.0, -5.0, 60.0],
    ]);
    // the motion covers sqrt(125) units at F60
    let total = player.total_time();

    let mid = player.position_at(total / 2.0).expect("non-empty path");
    assert!((mid.x - 5.0).abs() < 1e-3);
    assert!((mid.z + 2.5).abs() < 1e-3);
}

#[test]
fn test_zero_duration_segment_does_not_divide_by_zero() {
    // two identical points: the second segment has zero duration
    let player = player_over(&[
        [3.0, 3.0, 0.0, 60.0],
        [3.0, 3.0, 0.0, 60.0],
    ]);

    let position = player.position_at(0.0).expect("non-empty path");
    assert_eq!(position, Vec3::new(3.0, 3.0, 0.0));
    assert!(position.x.is_finite());
}

#[test]
fn test_empty_path_has_no_position() {
    let player = ToolpathPlayer::new(PathTimeline::from_points(&[]));
    assert_eq!(player.position_at(0.0), None);
    assert_eq!(player.total_time(), 0.0);
}
