use serde::{Deserialize, Serialize};

use crate::form::BladeForm;
use crate::modes::*;

/// A partial set of form values stored under a preset name.
///
/// Keys that are absent leave the corresponding form value untouched when
/// the preset is applied. Unknown keys in a preset file are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_end: Option<StartEnd>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blade_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turns: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blade_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub_clearance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_wrap_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handedness: Option<Handedness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_preset: Option<FlightPreset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flights: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<BodyOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_mode: Option<PitchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_mode: Option<ThicknessMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip_thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpm: Option<f64>,
}

impl PresetData {
    /// Capture every value of the form.
    pub fn from_form(form: &BladeForm) -> Self {
        Self {
            start_end: Some(form.start_end),
            outer_radius: Some(form.outer_radius),
            blade_length: Some(form.blade_length),
            turns: Some(form.turns),
            blade_thickness: Some(form.blade_thickness),
            hub_clearance: Some(form.hub_clearance),
            bucket_wrap_deg: Some(form.bucket_wrap_deg),
            start_angle: Some(form.start_angle),
            handedness: Some(form.handedness),
            flight_preset: Some(form.flight_preset),
            flights: Some(form.flights),
            operation: Some(form.operation),
            pitch_mode: Some(form.pitch_mode),
            pitch_start: Some(form.pitch_start),
            pitch_end: Some(form.pitch_end),
            thickness_mode: Some(form.thickness_mode),
            tip_thickness: Some(form.tip_thickness),
            rpm: Some(form.rpm),
        }
    }

    /// Overwrite the form values this preset carries.
    pub fn apply_to(&self, form: &mut BladeForm) {
        fn set<T: Copy>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        set(&mut form.start_end, self.start_end);
        set(&mut form.outer_radius, self.outer_radius);
        set(&mut form.blade_length, self.blade_length);
        set(&mut form.turns, self.turns);
        set(&mut form.blade_thickness, self.blade_thickness);
        set(&mut form.hub_clearance, self.hub_clearance);
        set(&mut form.bucket_wrap_deg, self.bucket_wrap_deg);
        set(&mut form.start_angle, self.start_angle);
        set(&mut form.handedness, self.handedness);
        set(&mut form.flight_preset, self.flight_preset);
        set(&mut form.flights, self.flights);
        set(&mut form.operation, self.operation);
        set(&mut form.pitch_mode, self.pitch_mode);
        set(&mut form.pitch_start, self.pitch_start);
        set(&mut form.pitch_end, self.pitch_end);
        set(&mut form.thickness_mode, self.thickness_mode);
        set(&mut form.tip_thickness, self.tip_thickness);
        set(&mut form.rpm, self.rpm);
    }

    pub fn is_empty(&self) -> bool {
        *self == PresetData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_present_keys() {
        let mut form = BladeForm::default();
        let preset = PresetData {
            flights: Some(3),
            bucket_wrap_deg: Some(45.0),
            ..PresetData::default()
        };
        preset.apply_to(&mut form);
        assert_eq!(form.flights, 3);
        assert_eq!(form.bucket_wrap_deg, 45.0);
        assert_eq!(form.outer_radius, BladeForm::default().outer_radius);
    }

    #[test]
    fn absent_keys_are_not_serialized() {
        let preset = PresetData {
            turns: Some(4.0),
            ..PresetData::default()
        };
        let json = serde_json::to_string(&preset).unwrap();
        assert_eq!(json, r#"{"turns":4.0}"#);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let preset: PresetData =
            serde_json::from_str(r#"{"turns": 2.5, "legacyField": true}"#).unwrap();
        assert_eq!(preset.turns, Some(2.5));
        assert!(preset.flights.is_none());
    }
}
