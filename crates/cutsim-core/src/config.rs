//! Simulation configuration
//!
//! All knobs recognized by the simulation pipeline, serializable so the
//! surrounding application can persist them as JSON.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ARC_PRECISION, DEFAULT_HALF_CIRCLE_SEGMENTS, DEFAULT_RESOLUTION,
    DEFAULT_STAGING_BUDGET_BYTES,
};
use crate::cutter::CutterProfile;
use crate::error::SimError;

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Z coordinate of the uncut stock top surface
    pub stock_top_z: f32,
    /// Cutter geometry
    pub cutter: CutterProfile,
    /// Heightfield resolution (cells per side)
    pub resolution: usize,
    /// Arc sampling precision in path length units
    pub arc_precision: f32,
    /// Staging buffer budget for geometry uploads, in bytes
    pub staging_budget_bytes: usize,
    /// Half-circle subdivision count for conical sweep fans
    pub half_circle_segments: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            stock_top_z: 0.0,
            cutter: CutterProfile::default(),
            resolution: DEFAULT_RESOLUTION,
            arc_precision: DEFAULT_ARC_PRECISION,
            staging_budget_bytes: DEFAULT_STAGING_BUDGET_BYTES,
            half_circle_segments: DEFAULT_HALF_CIRCLE_SEGMENTS,
        }
    }
}

impl SimulationConfig {
    /// Check that the configuration can produce frames.
    ///
    /// Called once at context construction; a rejected configuration must
    /// never reach the compositing stage.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.resolution < 2 {
            return Err(SimError::InvalidConfig {
                reason: format!("resolution {} is below the 2-cell minimum", self.resolution),
            });
        }
        if !(self.cutter.diameter > 0.0) {
            return Err(SimError::InvalidConfig {
                reason: format!("cutter diameter {} must be positive", self.cutter.diameter),
            });
        }
        if !(self.arc_precision > 0.0) {
            return Err(SimError::InvalidConfig {
                reason: format!("arc precision {} must be positive", self.arc_precision),
            });
        }
        if self.half_circle_segments == 0 {
            return Err(SimError::InvalidConfig {
                reason: "half_circle_segments must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_diameter_is_rejected() {
        let mut config = SimulationConfig::default();
        config.cutter.diameter = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SimulationConfig {
            stock_top_z: 1.5,
            cutter: CutterProfile::conical(3.175, 60.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: SimulationConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.stock_top_z, 1.5);
        assert_eq!(back.cutter, config.cutter);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"stock_top_z": -2.0}"#).unwrap();
        assert_eq!(config.stock_top_z, -2.0);
        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
    }
}
