//! Derived engineering feedback shown under the form.
//!
//! Flow figures assume the annulus between hub and outer radius fills to
//! the estimated efficiency once per revolution. The efficiency itself is
//! a ranking heuristic with no physical model behind it.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use blade_ops::BladeParameters;
use screw_types::{format_length, MM3_PER_LITRE};

/// Text shown before a shaft face is selected.
pub const NO_SHAFT_TEXT: &str = "Select shaft face to view derived values.";

/// Quantities derived from validated blade parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub hub_radius: f64,
    pub axial_length: f64,
    pub pitch_start: f64,
    pub pitch_end: f64,
    /// Pitch over outer diameter at the start and end of the blade.
    pub pitch_ratio_start: f64,
    pub pitch_ratio_end: f64,
    /// Helix angle at the outer edge, degrees.
    pub helix_angle_start_deg: f64,
    pub helix_angle_end_deg: f64,
    pub rpm: f64,
    pub theoretical_flow_l_min: f64,
    pub fill_efficiency: f64,
    pub useful_flow_l_min: f64,
}

fn clamp(value: f64, low: f64, high: f64) -> f64 {
    value.min(high).max(low)
}

fn pitch_ratio(pitch: f64, outer_radius: f64) -> f64 {
    pitch / (2.0 * outer_radius).max(1e-6)
}

/// Estimated bucket fill efficiency in [0.20, 0.92].
///
/// Rewards bucket wrap, a mean pitch near 0.9 outer diameters, and a wide
/// radial span relative to the outer radius.
pub fn estimated_fill_efficiency(params: &BladeParameters) -> f64 {
    let ratio = pitch_ratio(params.mean_pitch(), params.outer_radius);
    let wrap_factor = clamp(params.bucket_wrap_deg / 120.0, 0.0, 1.0);
    let span_factor = clamp(
        params.radial_span() / params.outer_radius.max(1e-6),
        0.0,
        1.0,
    );
    let ratio_term = (-(ratio - 0.9).powi(2) / 0.35).exp();
    clamp(
        0.30 + 0.22 * wrap_factor + 0.28 * ratio_term + 0.15 * span_factor,
        0.20,
        0.92,
    )
}

/// Compute the derived metrics of a validated blade.
pub fn derived_metrics(params: &BladeParameters) -> DerivedMetrics {
    let outer = params.outer_radius;
    let annulus = PI * (outer.powi(2) - params.inner_radius.powi(2));
    let volume_per_rev = annulus * params.mean_pitch();
    let theoretical_flow = volume_per_rev * params.rpm / MM3_PER_LITRE;
    let fill_efficiency = estimated_fill_efficiency(params);

    DerivedMetrics {
        hub_radius: params.inner_radius,
        axial_length: params.length,
        pitch_start: params.pitch_start,
        pitch_end: params.pitch_end,
        pitch_ratio_start: pitch_ratio(params.pitch_start, outer),
        pitch_ratio_end: pitch_ratio(params.pitch_end, outer),
        helix_angle_start_deg: params.pitch_start.atan2(TAU * outer).to_degrees(),
        helix_angle_end_deg: params.pitch_end.atan2(TAU * outer).to_degrees(),
        rpm: params.rpm,
        theoretical_flow_l_min: theoretical_flow,
        fill_efficiency,
        useful_flow_l_min: theoretical_flow * fill_efficiency,
    }
}

impl DerivedMetrics {
    /// The seven display lines.
    pub fn lines(&self) -> [String; 7] {
        [
            format!("Hub radius:        {}", format_length(self.hub_radius)),
            format!("Axial length:      {}", format_length(self.axial_length)),
            format!(
                "Pitch start/end:   {} / {}",
                format_length(self.pitch_start),
                format_length(self.pitch_end)
            ),
            format!(
                "Pitch ratio:       {:.2} -> {:.2}",
                self.pitch_ratio_start, self.pitch_ratio_end
            ),
            format!(
                "Helix angle:       {:.1}° -> {:.1}° (outer edge)",
                self.helix_angle_start_deg, self.helix_angle_end_deg
            ),
            format!(
                "Theoretical flow:  {:.2} L/min @ {:.0} RPM",
                self.theoretical_flow_l_min, self.rpm
            ),
            format!(
                "Est. useful flow:  {:.2} L/min (eff. {:.0}%, heuristic)",
                self.useful_flow_l_min,
                self.fill_efficiency * 100.0
            ),
        ]
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}
