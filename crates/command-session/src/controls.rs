//! Widgets that mirror form values: sliders and visibility flags.

use serde::{Deserialize, Serialize};

use screw_types::{BladeForm, PitchMode, ThicknessMode};

/// Initial upper bound of the turns slider. Grows to fit larger spinner values.
pub const TURNS_SLIDER_MAX: f64 = 20.0;

/// Smallest gap between shaft radius and the suggested outer radius, mm.
pub const MIN_SUGGESTED_SPAN: f64 = 10.0;

/// Outer radius offered when a shaft of `shaft_radius` is selected.
pub fn suggested_outer_radius(shaft_radius: f64) -> f64 {
    shaft_radius + MIN_SUGGESTED_SPAN.max(0.25 * shaft_radius)
}

/// Slider mirrors of the turns and bucket-wrap spinners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedControls {
    pub turns_slider: f64,
    pub turns_slider_max: f64,
    pub wrap_slider: f64,
}

impl LinkedControls {
    pub fn for_form(form: &BladeForm) -> Self {
        let mut controls = Self {
            turns_slider: form.turns,
            turns_slider_max: TURNS_SLIDER_MAX,
            wrap_slider: form.bucket_wrap_deg,
        };
        controls.follow_turns(form.turns);
        controls
    }

    /// Move the turns slider to `turns`, widening its range if needed.
    pub fn follow_turns(&mut self, turns: f64) {
        if turns > self.turns_slider_max {
            self.turns_slider_max = turns;
        }
        self.turns_slider = turns;
    }

    pub fn follow_wrap(&mut self, wrap_deg: f64) {
        self.wrap_slider = wrap_deg;
    }

    /// Bring both sliders in line with the spinners.
    pub fn sync(&mut self, form: &BladeForm) {
        self.follow_turns(form.turns);
        self.follow_wrap(form.bucket_wrap_deg);
    }
}

/// Which mode-dependent inputs are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    pub blade_length: bool,
    pub pitch_start_end: bool,
    pub tip_thickness: bool,
}

impl Visibility {
    pub fn for_form(form: &BladeForm) -> Self {
        let variable = form.pitch_mode == PitchMode::Variable;
        Self {
            blade_length: !variable,
            pitch_start_end: variable,
            tip_thickness: form.thickness_mode == ThicknessMode::Tapered,
        }
    }
}
