//! Cutter profile model
//!
//! A cutter is described by its diameter, included tip angle, and shank
//! height. An included angle of 180 degrees is a flat (cylindrical) end
//! mill; anything below 180 is a conical V-bit whose effective height is
//! derived from the diameter and angle.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CUTTER_DIAMETER, FLAT_INCLUDED_ANGLE_DEG};

/// Cutter geometry for a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutterProfile {
    /// Cutter diameter in path length units
    pub diameter: f32,
    /// Included tip angle in degrees; 180 = flat end mill
    pub included_angle_deg: f32,
    /// Shank height; ignored and recomputed for conical cutters
    pub shank_height: f32,
}

impl Default for CutterProfile {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_CUTTER_DIAMETER,
            included_angle_deg: FLAT_INCLUDED_ANGLE_DEG,
            shank_height: 1.0,
        }
    }
}

impl CutterProfile {
    /// Create a flat (cylindrical) cutter
    pub fn flat(diameter: f32, shank_height: f32) -> Self {
        Self {
            diameter,
            included_angle_deg: FLAT_INCLUDED_ANGLE_DEG,
            shank_height,
        }
    }

    /// Create a conical (V-bit) cutter
    pub fn conical(diameter: f32, included_angle_deg: f32) -> Self {
        Self {
            diameter,
            included_angle_deg,
            shank_height: 0.0,
        }
        .normalized()
    }

    /// Clamp the included angle into the supported range.
    ///
    /// Angles that are non-positive or above 180 degrees are treated as
    /// flat, matching the simulation configuration contract.
    pub fn normalized(mut self) -> Self {
        if self.included_angle_deg <= 0.0 || self.included_angle_deg > FLAT_INCLUDED_ANGLE_DEG {
            self.included_angle_deg = FLAT_INCLUDED_ANGLE_DEG;
        }
        self
    }

    /// True when the cutter is a V-bit rather than a flat end mill
    pub fn is_conical(&self) -> bool {
        self.included_angle_deg < FLAT_INCLUDED_ANGLE_DEG
    }

    /// Cutter radius
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    /// Half of the included angle, in radians
    pub fn half_angle_rad(&self) -> f32 {
        self.included_angle_deg.to_radians() / 2.0
    }

    /// Effective cutter height.
    ///
    /// For conical cutters the height follows from radius and angle,
    /// overriding any supplied shank height.
    pub fn height(&self) -> f32 {
        if self.is_conical() {
            self.radius() / self.half_angle_rad().tan()
        } else {
            self.shank_height
        }
    }
}
