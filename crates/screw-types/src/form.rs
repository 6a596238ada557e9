use serde::{Deserialize, Serialize};

use crate::modes::*;

/// Raw values of every blade input on the command form.
///
/// Lengths are millimetres, `start_angle` is radians and
/// `bucket_wrap_deg` is degrees. Nothing here is validated; see the
/// validator in `blade-engine` for the checks that turn this into
/// build parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BladeForm {
    pub start_end: StartEnd,
    pub outer_radius: f64,
    pub blade_length: f64,
    pub turns: f64,
    /// Hub thickness. Also the full-span thickness in constant mode.
    pub blade_thickness: f64,
    pub hub_clearance: f64,
    pub bucket_wrap_deg: f64,
    pub start_angle: f64,
    pub handedness: Handedness,
    pub flight_preset: FlightPreset,
    pub flights: i32,
    pub operation: BodyOperation,
    pub pitch_mode: PitchMode,
    pub pitch_start: f64,
    pub pitch_end: f64,
    pub thickness_mode: ThicknessMode,
    pub tip_thickness: f64,
    pub rpm: f64,
}

impl Default for BladeForm {
    fn default() -> Self {
        Self {
            start_end: StartEnd::End1,
            outer_radius: 80.0,
            blade_length: 600.0,
            turns: 3.5,
            blade_thickness: 3.0,
            hub_clearance: 2.0,
            bucket_wrap_deg: 35.0,
            start_angle: 0.0,
            handedness: Handedness::Right,
            flight_preset: FlightPreset::Double,
            flights: 2,
            operation: BodyOperation::NewBody,
            pitch_mode: PitchMode::Constant,
            pitch_start: 170.0,
            pitch_end: 120.0,
            thickness_mode: ThicknessMode::Constant,
            tip_thickness: 2.0,
            rpm: 60.0,
        }
    }
}

impl BladeForm {
    /// Length implied by turns and mean pitch in variable-pitch mode.
    pub fn implied_variable_length(&self) -> f64 {
        self.turns * 0.5 * (self.pitch_start + self.pitch_end)
    }
}

/// Identifier of a single input on the command form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    ShaftFace,
    StartEnd,
    OuterRadius,
    BladeLength,
    Turns,
    TurnsSlider,
    BladeThickness,
    HubClearance,
    BucketWrapDeg,
    BucketWrapSlider,
    StartAngle,
    Handedness,
    FlightPreset,
    Flights,
    Operation,
    PitchMode,
    PitchStart,
    PitchEnd,
    ThicknessMode,
    TipThickness,
    Rpm,
    SavedPreset,
    PresetName,
    SavePreset,
}

impl FormField {
    /// Fields whose change can alter the implied variable-pitch length.
    pub fn affects_variable_length(self) -> bool {
        matches!(
            self,
            FormField::PitchMode
                | FormField::PitchStart
                | FormField::PitchEnd
                | FormField::Turns
                | FormField::TurnsSlider
        )
    }
}
