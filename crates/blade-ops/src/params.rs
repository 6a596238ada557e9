use serde::{Deserialize, Serialize};

use screw_types::{PitchMode, ThicknessMode};

use crate::helix::HelixProfile;

/// Validated, immutable parameters for one blade build.
///
/// Produced by the validator in `blade-engine`; every invariant listed on
/// the fields has been checked by the time a value of this type exists.
/// Lengths are millimetres, angles radians unless suffixed `_deg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeParameters {
    pub shaft_radius: f64,
    /// Shaft radius plus hub clearance.
    pub inner_radius: f64,
    /// Strictly greater than `inner_radius`.
    pub outer_radius: f64,
    /// Axial length. Derived from turns and mean pitch in variable mode.
    pub length: f64,
    /// > 0.
    pub turns: f64,
    pub hub_thickness: f64,
    /// Equal to `hub_thickness` unless tapered, then ≤ `hub_thickness`.
    pub tip_thickness: f64,
    pub thickness_mode: ThicknessMode,
    /// In [0, 120].
    pub bucket_wrap_deg: f64,
    pub bucket_wrap: f64,
    pub start_angle: f64,
    /// +1.0 right-handed, -1.0 left-handed.
    pub handed_sign: f64,
    /// ≥ 1. Already capped in preview mode.
    pub flights: usize,
    pub pitch_mode: PitchMode,
    pub pitch_start: f64,
    pub pitch_end: f64,
    /// Always false in preview mode.
    pub join_to_shaft: bool,
    /// Only used for derived metrics.
    pub rpm: f64,
    pub preview: bool,
}

impl BladeParameters {
    pub fn tapered(&self) -> bool {
        self.thickness_mode == ThicknessMode::Tapered
    }

    pub fn variable_pitch(&self) -> bool {
        self.pitch_mode == PitchMode::Variable
    }

    pub fn radial_span(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    pub fn mean_pitch(&self) -> f64 {
        0.5 * (self.pitch_start + self.pitch_end)
    }

    pub fn helix_profile(&self) -> HelixProfile {
        HelixProfile {
            turns: self.turns,
            pitch_start: self.pitch_start,
            pitch_end: self.pitch_end,
            handed_sign: self.handed_sign,
            variable: self.variable_pitch(),
        }
    }
}
