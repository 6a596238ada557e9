//! Tunables for the blade construction pipeline.

use serde::{Deserialize, Serialize};

/// Construction settings. The defaults were tuned empirically and can be
/// overridden per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Equal-angle segments used to approximate a variable-pitch helix.
    pub variable_pitch_segments: usize,
    /// Radial bands used to approximate a tapered blade.
    pub taper_bands: usize,
    /// Overlap between adjacent taper bands, as a fraction of the radial span.
    pub taper_band_overlap: f64,
    /// Maximum flights built in preview mode.
    pub preview_flight_cap: usize,
    /// Minimum |normal · axis| for a planar neighbour to count as an end cap.
    pub end_cap_parallel_threshold: f64,
    /// Minimum length for a shaft basis vector before falling back.
    pub basis_tolerance: f64,
    /// Minimum length for a radial direction built from the basis.
    pub direction_tolerance: f64,
    /// Variable-pitch segments with smaller turn or axial delta are skipped.
    pub segment_tolerance: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            variable_pitch_segments: 24,
            taper_bands: 6,
            taper_band_overlap: 0.015,
            preview_flight_cap: 2,
            end_cap_parallel_threshold: 0.995,
            basis_tolerance: 1e-6,
            direction_tolerance: 1e-9,
            segment_tolerance: 1e-9,
        }
    }
}

impl BuildConfig {
    /// Check that the settings describe a buildable configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variable_pitch_segments == 0 {
            return Err(ConfigError::ZeroCount {
                setting: "variable_pitch_segments",
            });
        }
        if self.taper_bands == 0 {
            return Err(ConfigError::ZeroCount {
                setting: "taper_bands",
            });
        }
        if self.preview_flight_cap == 0 {
            return Err(ConfigError::ZeroCount {
                setting: "preview_flight_cap",
            });
        }
        if !(0.0..0.5).contains(&self.taper_band_overlap) {
            return Err(ConfigError::OutOfRange {
                setting: "taper_band_overlap",
                value: self.taper_band_overlap,
            });
        }
        if !(0.0..=1.0).contains(&self.end_cap_parallel_threshold) {
            return Err(ConfigError::OutOfRange {
                setting: "end_cap_parallel_threshold",
                value: self.end_cap_parallel_threshold,
            });
        }
        Ok(())
    }
}

/// Errors from an invalid [`BuildConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{setting} must be at least 1")]
    ZeroCount { setting: &'static str },

    #[error("{setting} is out of range: {value}")]
    OutOfRange { setting: &'static str, value: f64 },
}
