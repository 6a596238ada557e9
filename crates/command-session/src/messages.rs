use serde::{Deserialize, Serialize};

use host_kernel::{BodyId, FaceId};
use screw_types::*;

use crate::controls::{LinkedControls, Visibility};
use crate::state::SessionState;

/// A single edited input and its new value, as reported by the host form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum InputChange {
    ShaftFace(Option<FaceId>),
    StartEnd(StartEnd),
    OuterRadius(f64),
    BladeLength(f64),
    Turns(f64),
    TurnsSlider(f64),
    BladeThickness(f64),
    HubClearance(f64),
    BucketWrapDeg(f64),
    BucketWrapSlider(f64),
    StartAngle(f64),
    Handedness(Handedness),
    FlightPreset(FlightPreset),
    Flights(i32),
    Operation(BodyOperation),
    PitchMode(PitchMode),
    PitchStart(f64),
    PitchEnd(f64),
    ThicknessMode(ThicknessMode),
    TipThickness(f64),
    Rpm(f64),
    /// A label from the preset dropdown.
    SavedPreset(String),
    PresetName(String),
    /// The save-preset button was pressed.
    SavePreset,
}

impl InputChange {
    pub fn field(&self) -> FormField {
        match self {
            InputChange::ShaftFace(_) => FormField::ShaftFace,
            InputChange::StartEnd(_) => FormField::StartEnd,
            InputChange::OuterRadius(_) => FormField::OuterRadius,
            InputChange::BladeLength(_) => FormField::BladeLength,
            InputChange::Turns(_) => FormField::Turns,
            InputChange::TurnsSlider(_) => FormField::TurnsSlider,
            InputChange::BladeThickness(_) => FormField::BladeThickness,
            InputChange::HubClearance(_) => FormField::HubClearance,
            InputChange::BucketWrapDeg(_) => FormField::BucketWrapDeg,
            InputChange::BucketWrapSlider(_) => FormField::BucketWrapSlider,
            InputChange::StartAngle(_) => FormField::StartAngle,
            InputChange::Handedness(_) => FormField::Handedness,
            InputChange::FlightPreset(_) => FormField::FlightPreset,
            InputChange::Flights(_) => FormField::Flights,
            InputChange::Operation(_) => FormField::Operation,
            InputChange::PitchMode(_) => FormField::PitchMode,
            InputChange::PitchStart(_) => FormField::PitchStart,
            InputChange::PitchEnd(_) => FormField::PitchEnd,
            InputChange::ThicknessMode(_) => FormField::ThicknessMode,
            InputChange::TipThickness(_) => FormField::TipThickness,
            InputChange::Rpm(_) => FormField::Rpm,
            InputChange::SavedPreset(_) => FormField::SavedPreset,
            InputChange::PresetName(_) => FormField::PresetName,
            InputChange::SavePreset => FormField::SavePreset,
        }
    }

    /// The changes that load every key present in `data` into the form,
    /// in form order.
    pub fn from_preset(data: &PresetData) -> Vec<InputChange> {
        let mut changes = Vec::new();
        let mut push = |value: Option<InputChange>| changes.extend(value);
        push(data.start_end.map(InputChange::StartEnd));
        push(data.outer_radius.map(InputChange::OuterRadius));
        push(data.blade_length.map(InputChange::BladeLength));
        push(data.turns.map(InputChange::Turns));
        push(data.blade_thickness.map(InputChange::BladeThickness));
        push(data.hub_clearance.map(InputChange::HubClearance));
        push(data.bucket_wrap_deg.map(InputChange::BucketWrapDeg));
        push(data.start_angle.map(InputChange::StartAngle));
        push(data.handedness.map(InputChange::Handedness));
        push(data.flight_preset.map(InputChange::FlightPreset));
        push(data.flights.map(InputChange::Flights));
        push(data.operation.map(InputChange::Operation));
        push(data.pitch_mode.map(InputChange::PitchMode));
        push(data.pitch_start.map(InputChange::PitchStart));
        push(data.pitch_end.map(InputChange::PitchEnd));
        push(data.thickness_mode.map(InputChange::ThicknessMode));
        push(data.tip_thickness.map(InputChange::TipThickness));
        push(data.rpm.map(InputChange::Rpm));
        changes
    }
}

/// Messages from the host command to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostToSession {
    // -- Form --
    InputChanged { change: InputChange },

    // -- Command events --
    /// Check whether the current inputs would build.
    ValidateInputs,

    /// Build a preview blade.
    Preview,

    /// Build the final blade and finish the command.
    Execute,

    /// The user dismissed the command.
    Cancel,
}

/// Messages from the session back to the host command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionToHost {
    /// The form (or its derived widgets) changed and should be redrawn.
    FormUpdated { view: FormView },

    /// Result of an input validation request.
    InputsValidated { valid: bool },

    /// Result of a preview build.
    PreviewBuilt { valid: bool },

    /// The final blade was created.
    BladeCreated {
        name: String,
        body: BodyId,
        flights: usize,
        joined_to_shaft: bool,
    },

    /// The command has closed.
    Closed,

    /// A failure the host should show to the user.
    Error { message: String, fatal: bool },
}

/// Everything the host needs to redraw the command form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub state: SessionState,
    pub form: BladeForm,
    pub shaft: Option<FaceId>,
    pub controls: LinkedControls,
    pub visibility: Visibility,
    pub derived_text: String,
    pub preset_labels: Vec<String>,
    pub selected_preset: String,
    pub preset_name: String,
    pub preset_status: String,
}
