use serde::{Deserialize, Serialize};

/// Which shaft end cap the blade starts from.
///
/// Both options are auto-detected from the planar faces adjacent to the
/// selected cylinder; `End1` picks the cap with the smallest axial
/// projection, `End2` the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StartEnd {
    #[default]
    #[serde(rename = "End 1 (auto)")]
    End1,
    #[serde(rename = "End 2 (auto)")]
    End2,
}

impl StartEnd {
    pub const ALL: [StartEnd; 2] = [StartEnd::End1, StartEnd::End2];

    pub fn label(self) -> &'static str {
        match self {
            StartEnd::End1 => "End 1 (auto)",
            StartEnd::End2 => "End 2 (auto)",
        }
    }

    /// True when the start cap is the one furthest along the cylinder axis.
    pub fn prefers_max(self) -> bool {
        matches!(self, StartEnd::End2)
    }
}

/// Chirality of the helix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Handedness {
    #[default]
    #[serde(rename = "Right-handed")]
    Right,
    #[serde(rename = "Left-handed")]
    Left,
}

impl Handedness {
    pub const ALL: [Handedness; 2] = [Handedness::Right, Handedness::Left];

    pub fn label(self) -> &'static str {
        match self {
            Handedness::Right => "Right-handed",
            Handedness::Left => "Left-handed",
        }
    }

    /// +1.0 for right-handed, -1.0 for left-handed.
    pub fn sign(self) -> f64 {
        match self {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        }
    }
}

/// Whether pitch is constant along the blade or ramps linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PitchMode {
    #[default]
    #[serde(rename = "Constant pitch")]
    Constant,
    #[serde(rename = "Variable pitch (taper)")]
    Variable,
}

impl PitchMode {
    pub const ALL: [PitchMode; 2] = [PitchMode::Constant, PitchMode::Variable];

    pub fn label(self) -> &'static str {
        match self {
            PitchMode::Constant => "Constant pitch",
            PitchMode::Variable => "Variable pitch (taper)",
        }
    }

    /// Short tag used in body names.
    pub fn tag(self) -> &'static str {
        match self {
            PitchMode::Constant => "CP",
            PitchMode::Variable => "VP",
        }
    }
}

/// Blade thickness profile from hub to tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThicknessMode {
    #[default]
    #[serde(rename = "Constant thickness")]
    Constant,
    #[serde(rename = "Tapered hub -> tip")]
    Tapered,
}

impl ThicknessMode {
    pub const ALL: [ThicknessMode; 2] = [ThicknessMode::Constant, ThicknessMode::Tapered];

    pub fn label(self) -> &'static str {
        match self {
            ThicknessMode::Constant => "Constant thickness",
            ThicknessMode::Tapered => "Tapered hub -> tip",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ThicknessMode::Constant => "Const",
            ThicknessMode::Tapered => "Taper",
        }
    }
}

/// What to do with the finished blade body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyOperation {
    #[default]
    #[serde(rename = "New Blade Body")]
    NewBody,
    #[serde(rename = "Join Blade To Shaft")]
    JoinToShaft,
}

impl BodyOperation {
    pub const ALL: [BodyOperation; 2] = [BodyOperation::NewBody, BodyOperation::JoinToShaft];

    pub fn label(self) -> &'static str {
        match self {
            BodyOperation::NewBody => "New Blade Body",
            BodyOperation::JoinToShaft => "Join Blade To Shaft",
        }
    }
}

/// Quick-pick for the flight count spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlightPreset {
    #[serde(rename = "1 Blade")]
    Single,
    #[default]
    #[serde(rename = "2 Blades")]
    Double,
    #[serde(rename = "3 Blades")]
    Triple,
    #[serde(rename = "4 Blades")]
    Quad,
    #[serde(rename = "Custom")]
    Custom,
}

impl FlightPreset {
    pub const ALL: [FlightPreset; 5] = [
        FlightPreset::Single,
        FlightPreset::Double,
        FlightPreset::Triple,
        FlightPreset::Quad,
        FlightPreset::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FlightPreset::Single => "1 Blade",
            FlightPreset::Double => "2 Blades",
            FlightPreset::Triple => "3 Blades",
            FlightPreset::Quad => "4 Blades",
            FlightPreset::Custom => "Custom",
        }
    }

    /// The flight count this preset pins, or `None` for `Custom`.
    pub fn count(self) -> Option<i32> {
        match self {
            FlightPreset::Single => Some(1),
            FlightPreset::Double => Some(2),
            FlightPreset::Triple => Some(3),
            FlightPreset::Quad => Some(4),
            FlightPreset::Custom => None,
        }
    }

    pub fn for_count(flights: i32) -> Self {
        match flights {
            1 => FlightPreset::Single,
            2 => FlightPreset::Double,
            3 => FlightPreset::Triple,
            4 => FlightPreset::Quad,
            _ => FlightPreset::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_preset_round_trips_known_counts() {
        for n in 1..=4 {
            assert_eq!(FlightPreset::for_count(n).count(), Some(n));
        }
        assert_eq!(FlightPreset::for_count(5), FlightPreset::Custom);
        assert_eq!(FlightPreset::for_count(0), FlightPreset::Custom);
    }

    #[test]
    fn labels_match_serde_names() {
        let json = serde_json::to_string(&Handedness::Left).unwrap();
        assert_eq!(json, format!("\"{}\"", Handedness::Left.label()));
        let json = serde_json::to_string(&ThicknessMode::Tapered).unwrap();
        assert_eq!(json, format!("\"{}\"", ThicknessMode::Tapered.label()));
        let parsed: PitchMode = serde_json::from_str("\"Variable pitch (taper)\"").unwrap();
        assert_eq!(parsed, PitchMode::Variable);
    }

    #[test]
    fn handedness_sign() {
        assert_eq!(Handedness::Right.sign(), 1.0);
        assert_eq!(Handedness::Left.sign(), -1.0);
    }
}
