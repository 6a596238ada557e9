//! Flight assembly: surface → persisted body → thickened solid.
//!
//! A constant-thickness flight is one ruled surface across the full radial
//! span, thickened by the hub thickness. A tapered flight is approximated
//! by overlapping radial bands, each thickened by the thickness at its
//! midpoint, then joined back into one solid.

use tracing::{debug, info, instrument, warn};

use host_kernel::{BodyId, ComponentId, DesignType, FeatureOperation, HostKernel, KernelError, TempBodyId};

use crate::config::BuildConfig;
use crate::frame::ShaftFrame;
use crate::helix::HelixBuilder;
use crate::params::BladeParameters;
use crate::surface::{build_surface_between, phase_at_fraction, GuideRing};
use crate::types::{BuildError, BuildStep, FlightOutput, StepError};

/// One radial band of a tapered flight, as fractions of the radial span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperBand {
    /// 1-based band number.
    pub index: usize,
    /// Nominal band start and end.
    pub t0: f64,
    pub t1: f64,
    /// Start and end extended by the overlap, clamped to [0, 1].
    pub t0e: f64,
    pub t1e: f64,
    /// Midpoint of the nominal band; sets its thickness.
    pub t_mid: f64,
}

/// Split the radial span into `bands` equal bands with `overlap` added on
/// both sides of each so neighbouring solids intersect and join cleanly.
pub fn taper_bands(bands: usize, overlap: f64) -> Vec<TaperBand> {
    (0..bands)
        .map(|i| {
            let t0 = i as f64 / bands as f64;
            let t1 = (i + 1) as f64 / bands as f64;
            TaperBand {
                index: i + 1,
                t0,
                t1,
                t0e: (t0 - overlap).max(0.0),
                t1e: (t1 + overlap).min(1.0),
                t_mid: 0.5 * (t0 + t1),
            }
        })
        .collect()
}

/// Linear hub-to-tip thickness at fraction `t_mid`.
pub fn band_thickness(hub: f64, tip: f64, t_mid: f64) -> f64 {
    hub + (tip - hub) * t_mid
}

fn at_flight<E: Into<StepError>>(flight: usize, step: BuildStep) -> impl FnOnce(E) -> BuildError {
    move |e| BuildError::Flight {
        flight,
        step,
        source: e.into(),
    }
}

fn at_band<E: Into<StepError>>(
    flight: usize,
    band: usize,
    bands: usize,
    step: BuildStep,
) -> impl FnOnce(E) -> BuildError {
    move |e| BuildError::Band {
        flight,
        band,
        bands,
        step,
        source: e.into(),
    }
}

/// Commit a temporary body to `component` under `name`.
///
/// Parametric documents only accept new bodies inside a base feature edit,
/// so the body is wrapped in one named after it.
pub(crate) fn persist_temp_body(
    kernel: &mut dyn HostKernel,
    component: ComponentId,
    temp: TempBodyId,
    name: &str,
) -> Result<BodyId, StepError> {
    let body = match kernel.design_type() {
        DesignType::Parametric => {
            let feature = kernel.begin_base_feature(component, name)?;
            kernel.add_body_to_base_feature(component, temp, feature)?;
            let bodies = kernel.finish_base_feature(feature)?;
            *bodies.last().ok_or_else(|| StepError::NoBodies {
                name: name.to_string(),
            })?
        }
        DesignType::Direct => kernel.add_body(component, temp)?,
    };
    kernel.rename_body(body, name)?;
    Ok(body)
}

/// Thicken a persisted surface symmetrically into a new solid body and
/// drop the surface.
fn thicken_surface_body(
    kernel: &mut dyn HostKernel,
    component: ComponentId,
    surface: BodyId,
    thickness: f64,
    flight: usize,
    label: &str,
) -> Result<BodyId, StepError> {
    let out = kernel.thicken(component, surface, thickness, true, FeatureOperation::NewBody)?;
    let solid = *out
        .bodies
        .first()
        .ok_or_else(|| KernelError::no_result("thickenFeatures.add"))?;
    kernel.rename_feature(out.feature, &format!("Arch Flight {flight} Thicken ({label})"))?;

    if let Err(e) = kernel.delete_body(surface) {
        warn!(error = %e, "could not delete flight surface, hiding it");
        if let Err(e) = kernel.set_body_visible(surface, false) {
            warn!(error = %e, "could not hide flight surface");
        }
    }

    kernel.rename_body(solid, &format!("Archimedean Flight {flight} ({label})"))?;
    Ok(solid)
}

/// Join `tools` into `target` and name the combine feature.
pub(crate) fn join_into(
    kernel: &mut dyn HostKernel,
    component: ComponentId,
    target: BodyId,
    tools: &[BodyId],
    feature_name: &str,
) -> Result<BodyId, KernelError> {
    if tools.is_empty() {
        return Ok(target);
    }
    let out = kernel.join_bodies(component, target, tools)?;
    kernel.rename_feature(out.feature, feature_name)?;
    Ok(out.bodies.first().copied().unwrap_or(target))
}

/// Build one flight at `phase`. `index` is 0-based; names use `index + 1`.
#[instrument(skip(kernel, helix, frame, params, config), fields(flight = index + 1))]
pub fn build_flight(
    kernel: &mut dyn HostKernel,
    helix: &mut HelixBuilder,
    frame: &ShaftFrame,
    params: &BladeParameters,
    phase: f64,
    index: usize,
    config: &BuildConfig,
) -> Result<FlightOutput, BuildError> {
    let flight = index + 1;
    let (body, name) = if params.tapered() {
        tapered_flight(kernel, helix, frame, params, phase, flight, config)?
    } else {
        constant_flight(kernel, helix, frame, params, phase, flight, config)?
    };
    info!(flight, ?body, %name, "flight built");
    Ok(FlightOutput {
        index: flight,
        phase,
        body,
        name,
    })
}

fn constant_flight(
    kernel: &mut dyn HostKernel,
    helix: &mut HelixBuilder,
    frame: &ShaftFrame,
    params: &BladeParameters,
    phase: f64,
    flight: usize,
    config: &BuildConfig,
) -> Result<(BodyId, String), BuildError> {
    let inner = GuideRing {
        radius: params.inner_radius,
        phase: phase_at_fraction(phase, params.handed_sign, params.bucket_wrap, 0.0),
    };
    let outer = GuideRing {
        radius: params.outer_radius,
        phase: phase_at_fraction(phase, params.handed_sign, params.bucket_wrap, 1.0),
    };
    let profile = params.helix_profile();
    let temp = build_surface_between(kernel, helix, frame, &profile, inner, outer, config)
        .map_err(at_flight(flight, BuildStep::Surface))?;

    let surface_name = format!("Arch Flight Surface {flight} ({})", params.pitch_mode.tag());
    let surface = persist_temp_body(kernel, frame.component, temp, &surface_name)
        .map_err(at_flight(flight, BuildStep::PersistSurface))?;

    let label = "full span";
    let solid = thicken_surface_body(
        kernel,
        frame.component,
        surface,
        params.hub_thickness,
        flight,
        label,
    )
    .map_err(at_flight(flight, BuildStep::Thicken))?;
    Ok((solid, format!("Archimedean Flight {flight} ({label})")))
}

fn tapered_flight(
    kernel: &mut dyn HostKernel,
    helix: &mut HelixBuilder,
    frame: &ShaftFrame,
    params: &BladeParameters,
    phase: f64,
    flight: usize,
    config: &BuildConfig,
) -> Result<(BodyId, String), BuildError> {
    let bands = taper_bands(config.taper_bands, config.taper_band_overlap);
    let count = bands.len();
    let span = params.radial_span();
    let profile = params.helix_profile();

    let mut solids = Vec::with_capacity(count);
    for band in &bands {
        let ring = |t: f64| GuideRing {
            radius: params.inner_radius + span * t,
            phase: phase_at_fraction(phase, params.handed_sign, params.bucket_wrap, t),
        };
        let temp = build_surface_between(
            kernel,
            helix,
            frame,
            &profile,
            ring(band.t0e),
            ring(band.t1e),
            config,
        )
        .map_err(at_band(flight, band.index, count, BuildStep::Surface))?;

        let surface_name = format!("Arch Flight Surface {flight} Band {}", band.index);
        let surface = persist_temp_body(kernel, frame.component, temp, &surface_name)
            .map_err(at_band(flight, band.index, count, BuildStep::PersistSurface))?;

        let thickness = band_thickness(params.hub_thickness, params.tip_thickness, band.t_mid);
        let label = format!("band {}/{count}", band.index);
        debug!(band = band.index, thickness, "thickening taper band");
        let solid = thicken_surface_body(kernel, frame.component, surface, thickness, flight, &label)
            .map_err(at_band(flight, band.index, count, BuildStep::Thicken))?;
        solids.push(solid);
    }

    let Some((&first, rest)) = solids.split_first() else {
        return Err(BuildError::Flight {
            flight,
            step: BuildStep::Surface,
            source: StepError::Kernel(KernelError::no_result("taper bands")),
        });
    };
    let body = join_into(
        kernel,
        frame.component,
        first,
        rest,
        &format!("Join Flight {flight} Taper Bands"),
    )
    .map_err(at_flight(flight, BuildStep::JoinBands))?;

    let name = format!("Archimedean Flight {flight}");
    kernel
        .rename_body(body, &name)
        .map_err(at_flight(flight, BuildStep::Rename))?;
    Ok((body, name))
}
