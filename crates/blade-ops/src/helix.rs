//! Helix guide wires.
//!
//! The host helix constructor encodes handedness differently depending on
//! the build: some accept negative turns, some negative pitch, some only a
//! reversed axis. [`HelixBuilder`] probes once, caches the convention that
//! worked, and applies it to every later request.

use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use host_kernel::{HostKernel, WireId};

use crate::config::BuildConfig;
use crate::frame::ShaftFrame;
use crate::math::{point_array, vec_array};
use crate::types::HelixError;

/// How the host helix constructor expresses left-handedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelixSignMode {
    /// Negative turns.
    TurnsSign,
    /// Negative pitch.
    PitchSign,
    /// Reversed axis with positive pitch and turns.
    FlipAxis,
}

/// A right-handed helix request. Pitch and turns are positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixSpec {
    pub axis_point: Point3<f64>,
    pub axis: Vector3<f64>,
    pub start_point: Point3<f64>,
    pub pitch: f64,
    pub turns: f64,
}

/// Session-scoped helix constructor with a cached sign convention.
#[derive(Debug, Clone, Default)]
pub struct HelixBuilder {
    mode: Option<HelixSignMode>,
}

impl HelixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder with the convention already known. Skips probing.
    pub fn with_mode(mode: HelixSignMode) -> Self {
        Self { mode: Some(mode) }
    }

    pub fn mode(&self) -> Option<HelixSignMode> {
        self.mode
    }

    /// Forget the cached convention. The next request probes again.
    pub fn reset(&mut self) {
        self.mode = None;
    }

    /// Return the cached convention, probing the kernel on first use.
    ///
    /// Probes, in order: negative turns, negative pitch, reversed axis.
    /// The first request that yields a wire fixes the mode.
    pub fn negotiate(
        &mut self,
        kernel: &mut dyn HostKernel,
        spec: &HelixSpec,
    ) -> Result<HelixSignMode, HelixError> {
        if let Some(mode) = self.mode {
            return Ok(mode);
        }
        let pitch = spec.pitch.abs();
        let axis_point = point_array(&spec.axis_point);
        let start_point = point_array(&spec.start_point);
        let axis = vec_array(&spec.axis);
        let flipped = vec_array(&-spec.axis);

        let probes = [
            (HelixSignMode::TurnsSign, axis, pitch, -1.0),
            (HelixSignMode::PitchSign, axis, -pitch, 1.0),
            (HelixSignMode::FlipAxis, flipped, pitch, 1.0),
        ];
        for (mode, axis_vector, pitch, turns) in probes {
            match kernel.create_helix_wire(axis_point, axis_vector, start_point, pitch, turns, 0.0) {
                Ok(_) => {
                    debug!(?mode, "helix sign convention detected");
                    self.mode = Some(mode);
                    return Ok(mode);
                }
                Err(e) => debug!(?mode, error = %e, "helix probe rejected"),
            }
        }
        Err(HelixError::Unsupported)
    }

    /// Create one helix wire with handedness `handed_sign` (+1 right, -1 left).
    pub fn create(
        &mut self,
        kernel: &mut dyn HostKernel,
        spec: &HelixSpec,
        handed_sign: f64,
    ) -> Result<WireId, HelixError> {
        let mode = self.negotiate(kernel, spec)?;
        let (axis, pitch, turns) = match mode {
            HelixSignMode::TurnsSign => (spec.axis, spec.pitch, spec.turns * handed_sign),
            HelixSignMode::PitchSign => (spec.axis, spec.pitch * handed_sign, spec.turns),
            HelixSignMode::FlipAxis if handed_sign < 0.0 => (-spec.axis, spec.pitch, spec.turns),
            HelixSignMode::FlipAxis => (spec.axis, spec.pitch, spec.turns),
        };
        let wire = kernel.create_helix_wire(
            point_array(&spec.axis_point),
            vec_array(&axis),
            point_array(&spec.start_point),
            pitch,
            turns,
            0.0,
        )?;
        Ok(wire)
    }

    /// One constant-pitch helix at `radius`, starting at `phase` on the
    /// start cap and running `turns` turns along the frame axis.
    pub fn constant_pitch_helix(
        &mut self,
        kernel: &mut dyn HostKernel,
        frame: &ShaftFrame,
        profile: &HelixProfile,
        radius: f64,
        phase: f64,
        config: &BuildConfig,
    ) -> Result<WireId, HelixError> {
        let direction = frame
            .radial_direction(phase, config.direction_tolerance)
            .ok_or(HelixError::DegenerateDirection)?;
        let spec = HelixSpec {
            axis_point: frame.start_center,
            axis: frame.axis_direction,
            start_point: frame.start_center + direction * radius,
            pitch: profile.pitch_start,
            turns: profile.turns,
        };
        self.create(kernel, &spec, profile.handed_sign)
    }

    /// A chain of constant-pitch segments approximating a linearly varying
    /// pitch. Segments the kernel rejects are skipped; an empty chain is an
    /// error.
    pub fn variable_pitch_helix(
        &mut self,
        kernel: &mut dyn HostKernel,
        frame: &ShaftFrame,
        profile: &HelixProfile,
        radius: f64,
        phase: f64,
        config: &BuildConfig,
    ) -> Result<Vec<WireId>, HelixError> {
        let segments = variable_pitch_segments(
            profile.turns,
            profile.pitch_start,
            profile.pitch_end,
            config.variable_pitch_segments,
            config.segment_tolerance,
        );

        let mut wires = Vec::with_capacity(segments.len());
        for segment in &segments {
            let angle = phase + profile.handed_sign * segment.start_angle;
            let direction = frame
                .radial_direction(angle, config.direction_tolerance)
                .ok_or(HelixError::DegenerateDirection)?;
            let center = frame.point_on_axis(segment.start_z);
            let spec = HelixSpec {
                axis_point: center,
                axis: frame.axis_direction,
                start_point: center + direction * radius,
                pitch: segment.pitch,
                turns: segment.turns,
            };
            match self.create(kernel, &spec, profile.handed_sign) {
                Ok(wire) => wires.push(wire),
                Err(HelixError::Kernel(e)) => {
                    warn!(segment = segment.index, error = %e, "variable-pitch segment skipped");
                }
                Err(e) => return Err(e),
            }
        }

        if wires.is_empty() {
            return Err(HelixError::NoSegments);
        }
        Ok(wires)
    }
}

/// The helix shape shared by every guide of one blade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixProfile {
    pub turns: f64,
    /// Pitch at the start cap. The only pitch used in constant mode.
    pub pitch_start: f64,
    pub pitch_end: f64,
    pub handed_sign: f64,
    /// Build segment chains instead of a single helix per guide.
    pub variable: bool,
}

/// A sample of a variable-pitch helix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixStation {
    /// Swept angle from the start, radians.
    pub angle: f64,
    /// Axial distance from the start cap.
    pub z: f64,
}

/// `segments + 1` evenly spaced stations of a helix whose pitch ramps
/// linearly from `pitch_start` to `pitch_end`.
pub fn variable_pitch_stations(
    turns: f64,
    pitch_start: f64,
    pitch_end: f64,
    segments: usize,
) -> Vec<HelixStation> {
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            HelixStation {
                angle: TAU * turns * t,
                z: turns * (pitch_start * t + 0.5 * (pitch_end - pitch_start) * t * t),
            }
        })
        .collect()
}

/// One constant-pitch piece of a variable-pitch helix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchSegment {
    pub index: usize,
    pub start_angle: f64,
    pub start_z: f64,
    pub turns: f64,
    pub pitch: f64,
}

/// Split a variable-pitch helix into constant-pitch segments, dropping
/// those whose turn or axial delta is below `tolerance`.
pub fn variable_pitch_segments(
    turns: f64,
    pitch_start: f64,
    pitch_end: f64,
    segments: usize,
    tolerance: f64,
) -> Vec<PitchSegment> {
    let stations = variable_pitch_stations(turns, pitch_start, pitch_end, segments);
    stations
        .windows(2)
        .enumerate()
        .filter_map(|(index, pair)| {
            let seg_turns = (pair[1].angle - pair[0].angle) / TAU;
            let seg_z = pair[1].z - pair[0].z;
            if seg_turns < tolerance || seg_z < tolerance {
                debug!(index, seg_turns, seg_z, "degenerate pitch segment");
                return None;
            }
            Some(PitchSegment {
                index,
                start_angle: pair[0].angle,
                start_z: pair[0].z,
                turns: seg_turns,
                pitch: seg_z / seg_turns,
            })
        })
        .collect()
}
