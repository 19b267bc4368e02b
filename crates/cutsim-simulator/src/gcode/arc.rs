//! Arc geometry: center-format conversion and sampling
//!
//! G2/G3 arcs arrive either with I/J center offsets or an R radius. Both
//! reduce to a center point; the arc is then expanded into points spaced
//! no farther apart than the configured precision.

use std::f32::consts::TAU;

use cutsim_core::error::ParseError;

/// Arc travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// G2
    Clockwise,
    /// G3
    CounterClockwise,
}

/// Signed sweep from `start_angle` to `end_angle`.
///
/// Clockwise arcs sweep negative, counter-clockwise positive; 2π is
/// added or removed so the sign always matches the direction.
pub fn signed_sweep(start_angle: f32, end_angle: f32, direction: ArcDirection) -> f32 {
    let mut delta = end_angle - start_angle;
    match direction {
        ArcDirection::Clockwise => {
            if delta >= 0.0 {
                delta -= TAU;
            }
        }
        ArcDirection::CounterClockwise => {
            if delta <= 0.0 {
                delta += TAU;
            }
        }
    }
    delta
}

/// Convert an R-format arc to I/J center offsets.
///
/// The center lies on the perpendicular bisector of the chord, at height
/// `sqrt(R² − (chord/2)²)` from the midpoint; the direction flag picks
/// the side. Fails when the radius cannot span the chord.
pub fn convert_r_to_ij(
    start: (f32, f32),
    end: (f32, f32),
    radius: f32,
    direction: ArcDirection,
    line: usize,
) -> Result<(f32, f32), ParseError> {
    let chord_x = end.0 - start.0;
    let chord_y = end.1 - start.1;
    let chord = (chord_x * chord_x + chord_y * chord_y).sqrt();

    if chord == 0.0 {
        return Err(ParseError::Other {
            message: format!("R-format arc with coincident endpoints at line {line}"),
        });
    }
    if 2.0 * radius < chord {
        return Err(ParseError::DegenerateArc {
            line,
            radius,
            chord,
        });
    }

    let mid_x = (start.0 + end.0) / 2.0;
    let mid_y = (start.1 + end.1) / 2.0;
    let half = chord / 2.0;
    let height = (radius * radius - half * half).max(0.0).sqrt();

    // unit perpendicular, left of the chord direction
    let perp_x = -chord_y / chord;
    let perp_y = chord_x / chord;
    let side = match direction {
        ArcDirection::Clockwise => -1.0,
        ArcDirection::CounterClockwise => 1.0,
    };

    let center_x = mid_x + side * height * perp_x;
    let center_y = mid_y + side * height * perp_y;
    Ok((center_x - start.0, center_y - start.1))
}

/// Expand an arc into sampled points.
///
/// Emits `ceil(arc_length / precision)` points, ending at the arc's end
/// angle, with Z interpolated linearly across the sweep. The start point
/// is not emitted; it is already on the path.
pub fn sample_arc(
    start: (f32, f32, f32),
    end: (f32, f32, f32),
    center: (f32, f32),
    direction: ArcDirection,
    precision: f32,
) -> Vec<(f32, f32, f32)> {
    let radius = ((start.0 - center.0).powi(2) + (start.1 - center.1).powi(2)).sqrt();
    let start_angle = (start.1 - center.1).atan2(start.0 - center.0);
    let end_angle = (end.1 - center.1).atan2(end.0 - center.0);
    let sweep = signed_sweep(start_angle, end_angle, direction);

    let arc_length = (sweep * radius).abs();
    let steps = (arc_length / precision).ceil() as usize;

    let mut points = Vec::with_capacity(steps);
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let angle = start_angle + sweep * t;
        points.push((
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
            start.2 + (end.2 - start.2) * t,
        ));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn sweep_sign_matches_direction() {
        // quarter arc from +X to +Y
        let cw = signed_sweep(0.0, FRAC_PI_2, ArcDirection::Clockwise);
        let ccw = signed_sweep(0.0, FRAC_PI_2, ArcDirection::CounterClockwise);
        assert!(cw < 0.0, "clockwise sweep must be negative, got {cw}");
        assert!(ccw > 0.0, "counter-clockwise sweep must be positive, got {ccw}");
        assert!((cw + 3.0 * FRAC_PI_2).abs() < 1e-6);
        assert!((ccw - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn r_conversion_reproduces_equidistant_center() {
        // 90 degree arc of radius 5 between axis-aligned points
        let start = (5.0, 0.0);
        let end = (0.0, 5.0);
        let (i, j) = convert_r_to_ij(start, end, 5.0, ArcDirection::CounterClockwise, 1)
            .expect("radius spans the chord");
        let center = (start.0 + i, start.1 + j);

        let d_start = ((start.0 - center.0).powi(2) + (start.1 - center.1).powi(2)).sqrt();
        let d_end = ((end.0 - center.0).powi(2) + (end.1 - center.1).powi(2)).sqrt();
        assert!((d_start - 5.0).abs() < 1e-4, "start not at radius: {d_start}");
        assert!((d_end - 5.0).abs() < 1e-4, "end not at radius: {d_end}");
    }

    #[test]
    fn r_conversion_rejects_radius_below_half_chord() {
        let result = convert_r_to_ij((0.0, 0.0), (10.0, 0.0), 4.0, ArcDirection::Clockwise, 7);
        match result {
            Err(ParseError::DegenerateArc { line, .. }) => assert_eq!(line, 7),
            other => panic!("expected DegenerateArc, got {other:?}"),
        }
    }

    #[test]
    fn samples_end_on_the_arc_endpoint() {
        let start = (1.0, 0.0, 0.0);
        let end = (-1.0, 0.0, -2.0);
        let points = sample_arc(start, end, (0.0, 0.0), ArcDirection::CounterClockwise, 0.1);
        assert_eq!(points.len(), (PI / 0.1).ceil() as usize);

        let last = points.last().copied().expect("non-empty sampling");
        assert!((last.0 - end.0).abs() < 0.1);
        assert!((last.1 - end.1).abs() < 0.1);
        assert!((last.2 - end.2).abs() < 1e-5, "Z interpolates to the endpoint");
    }
}
