//! Data-driven game balance
//!
//! Loaded from JSON by the host; every field has a default so partial files work.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics, blade and power-state parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration (units/s²), scaled by the score speed factor
    pub gravity: f32,
    /// Horizontal velocity multiplier applied once per frame
    pub air_damping: f32,
    /// Objects younger than this are never culled (ms)
    pub cull_grace_ms: f64,
    /// Longest frame step the simulation will integrate (seconds)
    pub max_frame_dt: f32,

    // === Blade ===
    /// Samples kept in the trail
    pub trail_capacity: usize,
    /// Samples closer than this to the previous one are dropped
    pub min_sample_spacing: f32,
    /// Resampling step between raw pointer samples
    pub resample_step: f32,
    /// Trail fade-out after release (ms)
    pub fade_duration_ms: f64,
    /// Hit radius as a fraction of object size
    pub hit_radius_factor: f32,

    // === Powers ===
    pub time_slow_scale: f32,
    pub time_slow_duration_ms: f64,
    pub frenzy_duration_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            air_damping: 0.996,
            cull_grace_ms: 500.0,
            max_frame_dt: 0.1,

            trail_capacity: 6,
            min_sample_spacing: 3.0,
            resample_step: 24.0,
            fade_duration_ms: 200.0,
            hit_radius_factor: 0.9,

            time_slow_scale: 0.4,
            time_slow_duration_ms: 5000.0,
            frenzy_duration_ms: 5000.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f64) -> Result<(), TuningError> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                })
            }
        }

        positive("cull_grace_ms", self.cull_grace_ms)?;
        positive("max_frame_dt", self.max_frame_dt as f64)?;
        positive("resample_step", self.resample_step as f64)?;
        positive("fade_duration_ms", self.fade_duration_ms)?;
        positive("hit_radius_factor", self.hit_radius_factor as f64)?;
        positive("time_slow_duration_ms", self.time_slow_duration_ms)?;
        positive("frenzy_duration_ms", self.frenzy_duration_ms)?;

        if self.min_sample_spacing < 0.0 {
            return Err(TuningError::Invalid {
                field: "min_sample_spacing",
                reason: "must not be negative",
            });
        }
        if self.trail_capacity < 2 {
            return Err(TuningError::Invalid {
                field: "trail_capacity",
                reason: "needs at least two samples for hit testing",
            });
        }
        if !(self.air_damping > 0.0 && self.air_damping <= 1.0) {
            return Err(TuningError::Invalid {
                field: "air_damping",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.time_slow_scale > 0.0 && self.time_slow_scale <= 1.0) {
            return Err(TuningError::Invalid {
                field: "time_slow_scale",
                reason: "must be in (0, 1]",
            });
        }
        Ok(())
    }
}
