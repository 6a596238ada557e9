//! Presets that ship with the generator. Lengths are millimetres.

use screw_types::{FlightPreset, PitchMode, PresetData, ThicknessMode};

/// Every built-in preset, sorted by name.
pub fn builtin_presets() -> Vec<(&'static str, PresetData)> {
    vec![
        (
            "1-flight standard",
            PresetData {
                flight_preset: Some(FlightPreset::Single),
                flights: Some(1),
                bucket_wrap_deg: Some(35.0),
                thickness_mode: Some(ThicknessMode::Constant),
                ..PresetData::default()
            },
        ),
        (
            "2-flight standard",
            PresetData {
                flight_preset: Some(FlightPreset::Double),
                flights: Some(2),
                bucket_wrap_deg: Some(35.0),
                thickness_mode: Some(ThicknessMode::Constant),
                ..PresetData::default()
            },
        ),
        (
            "3-flight irrigation",
            PresetData {
                flight_preset: Some(FlightPreset::Triple),
                flights: Some(3),
                bucket_wrap_deg: Some(45.0),
                pitch_mode: Some(PitchMode::Variable),
                pitch_start: Some(120.0),
                pitch_end: Some(90.0),
                thickness_mode: Some(ThicknessMode::Tapered),
                tip_thickness: Some(2.0),
                ..PresetData::default()
            },
        ),
        (
            "prototype thin-wall",
            PresetData {
                thickness_mode: Some(ThicknessMode::Tapered),
                blade_thickness: Some(4.0),
                tip_thickness: Some(2.0),
                bucket_wrap_deg: Some(30.0),
                pitch_mode: Some(PitchMode::Variable),
                pitch_start: Some(160.0),
                pitch_end: Some(120.0),
                ..PresetData::default()
            },
        ),
    ]
}

pub fn builtin_preset(name: &str) -> Option<PresetData> {
    builtin_presets()
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, data)| data)
}
