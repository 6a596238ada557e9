//! Ruled blade surfaces between two helical guides.

use tracing::debug;

use host_kernel::{HostKernel, TempBodyId};

use crate::config::BuildConfig;
use crate::frame::ShaftFrame;
use crate::helix::{HelixBuilder, HelixProfile};
use crate::types::{HelixError, SurfaceEdge, SurfaceError};

/// Phase of the blade edge at radial fraction `fraction` of the span.
///
/// Bucket wrap twists the blade so the outer edge leads the hub edge by
/// `wrap` radians in the direction of rotation.
pub fn phase_at_fraction(base_phase: f64, handed_sign: f64, wrap: f64, fraction: f64) -> f64 {
    base_phase + handed_sign * wrap * fraction
}

/// Where one guide helix starts: its radius and the phase on the start cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideRing {
    pub radius: f64,
    pub phase: f64,
}

/// Rule a temporary surface between two guide helices.
///
/// Constant pitch uses one helix per side. Variable pitch builds a segment
/// chain per side, rules matching segments, and stitches the patches into
/// one body. Any failed patch or stitch fails the whole surface.
pub fn build_surface_between(
    kernel: &mut dyn HostKernel,
    helix: &mut HelixBuilder,
    frame: &ShaftFrame,
    profile: &HelixProfile,
    a: GuideRing,
    b: GuideRing,
    config: &BuildConfig,
) -> Result<TempBodyId, SurfaceError> {
    if profile.variable {
        variable_surface(kernel, helix, frame, profile, a, b, config)
    } else {
        constant_surface(kernel, helix, frame, profile, a, b, config)
    }
}

fn constant_surface(
    kernel: &mut dyn HostKernel,
    helix: &mut HelixBuilder,
    frame: &ShaftFrame,
    profile: &HelixProfile,
    a: GuideRing,
    b: GuideRing,
    config: &BuildConfig,
) -> Result<TempBodyId, SurfaceError> {
    let guide = |side: SurfaceEdge| move |source: HelixError| SurfaceError::GuideWire { side, source };
    let wire_a = helix
        .constant_pitch_helix(kernel, frame, profile, a.radius, a.phase, config)
        .map_err(guide(SurfaceEdge::Inner))?;
    let wire_b = helix
        .constant_pitch_helix(kernel, frame, profile, b.radius, b.phase, config)
        .map_err(guide(SurfaceEdge::Outer))?;
    kernel
        .create_ruled_surface(wire_a, wire_b)
        .map_err(|source| SurfaceError::RuledSurface { segment: 0, source })
}

fn variable_surface(
    kernel: &mut dyn HostKernel,
    helix: &mut HelixBuilder,
    frame: &ShaftFrame,
    profile: &HelixProfile,
    a: GuideRing,
    b: GuideRing,
    config: &BuildConfig,
) -> Result<TempBodyId, SurfaceError> {
    let chain_a = helix.variable_pitch_helix(kernel, frame, profile, a.radius, a.phase, config)?;
    let chain_b = helix.variable_pitch_helix(kernel, frame, profile, b.radius, b.phase, config)?;

    let pairs = chain_a.len().min(chain_b.len());
    if pairs == 0 {
        return Err(SurfaceError::NoSegmentPairs);
    }
    if chain_a.len() != chain_b.len() {
        debug!(a = chain_a.len(), b = chain_b.len(), "guide chains differ in length");
    }

    let mut patches = Vec::with_capacity(pairs);
    for (segment, (wa, wb)) in chain_a.iter().zip(&chain_b).enumerate() {
        let patch = kernel
            .create_ruled_surface(*wa, *wb)
            .map_err(|source| SurfaceError::RuledSurface { segment, source })?;
        patches.push(patch);
    }

    let stitched = patches[0];
    for (patch, tool) in patches.iter().enumerate().skip(1) {
        kernel
            .union_temp_bodies(stitched, *tool)
            .map_err(|source| SurfaceError::Stitch { patch, source })?;
    }
    debug!(patches = patches.len(), "variable-pitch surface stitched");
    Ok(stitched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn phase_is_linear_in_fraction() {
        let wrap = 35f64.to_radians();
        assert_relative_eq!(phase_at_fraction(0.2, 1.0, wrap, 0.0), 0.2);
        assert_relative_eq!(phase_at_fraction(0.2, 1.0, wrap, 1.0), 0.2 + wrap);
        assert_relative_eq!(phase_at_fraction(0.2, -1.0, wrap, 0.5), 0.2 - 0.5 * wrap);
    }
}
