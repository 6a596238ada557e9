//! Form validation.
//!
//! Checks run in a fixed order and the first violation is reported, so the
//! user always sees the same message for the same form.

use blade_ops::{BladeParameters, BuildConfig};
use screw_types::{BladeForm, BodyOperation, PitchMode, ThicknessMode};

use crate::types::ValidationError;

/// Validate `form` against a shaft of radius `shaft_radius`.
///
/// In preview mode the flight count is capped at
/// `config.preview_flight_cap` and the blade is never joined to the shaft.
pub fn validate_form(
    form: &BladeForm,
    shaft_radius: f64,
    preview: bool,
    config: &BuildConfig,
) -> Result<BladeParameters, ValidationError> {
    if form.turns.is_nan() || form.turns <= 0.0 {
        return Err(ValidationError::TurnsNotPositive);
    }
    if form.flights < 1 {
        return Err(ValidationError::NoFlights);
    }
    if form.hub_clearance.is_nan() || form.hub_clearance < 0.0 {
        return Err(ValidationError::NegativeClearance);
    }
    let hub_thickness = form.blade_thickness;
    if hub_thickness.is_nan() || hub_thickness <= 0.0 {
        return Err(ValidationError::ThicknessNotPositive);
    }
    if !(0.0..=120.0).contains(&form.bucket_wrap_deg) {
        return Err(ValidationError::WrapOutOfRange);
    }
    if form.rpm.is_nan() || form.rpm < 0.0 {
        return Err(ValidationError::NegativeRpm);
    }

    let inner_radius = shaft_radius + form.hub_clearance;
    let outer_radius = form.outer_radius;
    if outer_radius.is_nan() || outer_radius <= inner_radius {
        return Err(ValidationError::OuterRadiusTooSmall {
            outer: outer_radius,
            inner: inner_radius,
        });
    }

    let tapered = form.thickness_mode == ThicknessMode::Tapered;
    let tip_thickness = if tapered {
        let tip = form.tip_thickness;
        if tip.is_nan() || tip <= 0.0 {
            return Err(ValidationError::TipNotPositive);
        }
        if tip > hub_thickness {
            return Err(ValidationError::TipExceedsHub);
        }
        tip
    } else {
        hub_thickness
    };

    let radial_span = outer_radius - inner_radius;
    if hub_thickness.max(tip_thickness) >= radial_span {
        return Err(ValidationError::ThicknessExceedsSpan { span: radial_span });
    }

    let (length, pitch_start, pitch_end) = match form.pitch_mode {
        PitchMode::Variable => {
            let (p0, p1) = (form.pitch_start, form.pitch_end);
            if p0.is_nan() || p1.is_nan() || p0 <= 0.0 || p1 <= 0.0 {
                return Err(ValidationError::PitchNotPositive);
            }
            (form.turns * 0.5 * (p0 + p1), p0, p1)
        }
        PitchMode::Constant => {
            let length = form.blade_length;
            if length.is_nan() || length <= 0.0 {
                return Err(ValidationError::LengthNotPositive);
            }
            let pitch = length / form.turns;
            (length, pitch, pitch)
        }
    };

    // flights >= 1 was checked above
    let mut flights = form.flights as usize;
    let mut join_to_shaft = form.operation == BodyOperation::JoinToShaft;
    if preview {
        flights = flights.min(config.preview_flight_cap);
        join_to_shaft = false;
    }

    Ok(BladeParameters {
        shaft_radius,
        inner_radius,
        outer_radius,
        length,
        turns: form.turns,
        hub_thickness,
        tip_thickness,
        thickness_mode: form.thickness_mode,
        bucket_wrap_deg: form.bucket_wrap_deg,
        bucket_wrap: form.bucket_wrap_deg.to_radians(),
        start_angle: form.start_angle,
        handed_sign: form.handedness.sign(),
        flights,
        pitch_mode: form.pitch_mode,
        pitch_start,
        pitch_end,
        join_to_shaft,
        rpm: form.rpm,
        preview,
    })
}
