use std::f64::consts::TAU;

use tracing::{info, instrument};

use host_kernel::HostKernel;

use crate::config::BuildConfig;
use crate::flight::{build_flight, join_into};
use crate::frame::ShaftFrame;
use crate::helix::HelixBuilder;
use crate::params::BladeParameters;
use crate::types::{BladeOutput, BuildError, BuildStep, StepError};

/// Hub-edge phase of each of `flights` flights, evenly spaced from `start`.
pub fn flight_phases(start: f64, flights: usize) -> Vec<f64> {
    (0..flights)
        .map(|i| start + TAU * i as f64 / flights as f64)
        .collect()
}

/// Name of the finished blade body, e.g.
/// `Archimedean Blade (2F, CP, Const, 3.50 turns)`.
pub fn blade_body_name(params: &BladeParameters) -> String {
    format!(
        "Archimedean Blade ({}F, {}, {}, {:.2} turns)",
        params.flights,
        params.pitch_mode.tag(),
        params.thickness_mode.tag(),
        params.turns
    )
}

fn at_blade<E: Into<StepError>>(step: BuildStep) -> impl FnOnce(E) -> BuildError {
    move |e| BuildError::Blade {
        step,
        source: e.into(),
    }
}

/// Build every flight, join them into one blade, and optionally join the
/// blade into the shaft.
///
/// Bodies created before a failure stay in the document.
#[instrument(skip_all, fields(flights = params.flights, preview = params.preview))]
pub fn compose_blade(
    kernel: &mut dyn HostKernel,
    helix: &mut HelixBuilder,
    frame: &ShaftFrame,
    params: &BladeParameters,
    config: &BuildConfig,
) -> Result<BladeOutput, BuildError> {
    let mut flights = Vec::with_capacity(params.flights);
    for (index, phase) in flight_phases(params.start_angle, params.flights)
        .into_iter()
        .enumerate()
    {
        flights.push(build_flight(kernel, helix, frame, params, phase, index, config)?);
    }

    let Some((first, rest)) = flights.split_first() else {
        return Err(BuildError::Blade {
            step: BuildStep::JoinFlights,
            source: StepError::Kernel(host_kernel::KernelError::no_result("no flights")),
        });
    };
    let tools: Vec<_> = rest.iter().map(|f| f.body).collect();
    let blade = join_into(
        kernel,
        frame.component,
        first.body,
        &tools,
        &format!("Join {} Flights", params.flights),
    )
    .map_err(at_blade(BuildStep::JoinFlights))?;

    let name = blade_body_name(params);
    kernel
        .rename_body(blade, &name)
        .map_err(at_blade(BuildStep::Rename))?;
    info!(?blade, %name, "blade composed");

    let mut body = blade;
    if params.join_to_shaft {
        body = join_into(
            kernel,
            frame.component,
            frame.shaft_body,
            &[blade],
            "Join Archimedean Blade To Shaft",
        )
        .map_err(at_blade(BuildStep::JoinShaft))?;
        info!(shaft = ?frame.shaft_body, "blade joined to shaft");
    }

    Ok(BladeOutput {
        body,
        component: frame.component,
        name,
        flights,
        joined_to_shaft: params.join_to_shaft,
    })
}
