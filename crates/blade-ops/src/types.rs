use std::fmt;

use host_kernel::{BodyId, ComponentId, KernelError};
use serde::{Deserialize, Serialize};

/// Errors from resolving the shaft frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Assembly occurrence selections are not supported. Select source-component geometry.")]
    AssemblyProxy,

    #[error("Selected shaft face must be cylindrical (found {found} face).")]
    NotCylindrical { found: String },

    #[error("Unable to auto-detect shaft end face. Ensure planar shaft end caps are adjacent to the selected cylinder.")]
    NoEndCaps,

    #[error("Could not resolve shaft basis vectors for helical direction.")]
    DegenerateBasis,
}

/// Errors from building helix guide wires.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HelixError {
    /// None of the sign conventions produced a wire. The host cannot build
    /// helices at all, so retrying with other parameters is pointless.
    #[error("createHelixWire is not working in this host build.")]
    Unsupported,

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Could not resolve shaft basis vectors for helical direction.")]
    DegenerateDirection,

    #[error("Variable-pitch helix: no wire segments were created.")]
    NoSegments,
}

/// Which guide of a ruled surface failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEdge {
    /// The guide at the first radius, nearest the hub.
    Inner,
    /// The guide at the second radius.
    Outer,
}

impl fmt::Display for SurfaceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceEdge::Inner => write!(f, "first"),
            SurfaceEdge::Outer => write!(f, "second"),
        }
    }
}

/// Errors from building a ruled blade surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Helix(#[from] HelixError),

    #[error("Failed to build {side} constant-pitch guide wire: {source}")]
    GuideWire {
        side: SurfaceEdge,
        #[source]
        source: HelixError,
    },

    #[error("Failed to create ruled surface between guides (segment {segment}): {source}")]
    RuledSurface {
        segment: usize,
        #[source]
        source: KernelError,
    },

    #[error("Variable-pitch surface: no matched segment pairs.")]
    NoSegmentPairs,

    #[error("Variable-pitch surface: failed to stitch segment patch {patch}: {source}")]
    Stitch {
        patch: usize,
        #[source]
        source: KernelError,
    },
}

impl SurfaceError {
    /// True when the failure came from the helix capability probe.
    pub fn is_capability_failure(&self) -> bool {
        matches!(
            self,
            SurfaceError::Helix(HelixError::Unsupported)
                | SurfaceError::GuideWire {
                    source: HelixError::Unsupported,
                    ..
                }
        )
    }
}

/// Pipeline step that failed while building a blade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStep {
    Surface,
    PersistSurface,
    Thicken,
    JoinBands,
    JoinFlights,
    JoinShaft,
    Rename,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildStep::Surface => "surface construction",
            BuildStep::PersistSurface => "adding surface body",
            BuildStep::Thicken => "thicken",
            BuildStep::JoinBands => "joining taper bands",
            BuildStep::JoinFlights => "joining flights",
            BuildStep::JoinShaft => "joining blade to shaft",
            BuildStep::Rename => "renaming",
        };
        f.write_str(s)
    }
}

/// Cause of a failed pipeline step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("Failed to add temporary body \"{name}\" to component.")]
    NoBodies { name: String },
}

/// A failed blade build, with the flight, band and step it failed in.
///
/// Flight and band numbers are 1-based, matching body names.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("flight {flight}: {step} failed: {source}")]
    Flight {
        flight: usize,
        step: BuildStep,
        #[source]
        source: StepError,
    },

    #[error("flight {flight}, band {band}/{bands}: {step} failed: {source}")]
    Band {
        flight: usize,
        band: usize,
        bands: usize,
        step: BuildStep,
        #[source]
        source: StepError,
    },

    #[error("blade: {step} failed: {source}")]
    Blade {
        step: BuildStep,
        #[source]
        source: StepError,
    },
}

impl BuildError {
    pub fn step(&self) -> BuildStep {
        match self {
            BuildError::Flight { step, .. }
            | BuildError::Band { step, .. }
            | BuildError::Blade { step, .. } => *step,
        }
    }

    pub fn source_error(&self) -> &StepError {
        match self {
            BuildError::Flight { source, .. }
            | BuildError::Band { source, .. }
            | BuildError::Blade { source, .. } => source,
        }
    }

    /// True when the host cannot build helices at all.
    pub fn is_capability_failure(&self) -> bool {
        matches!(self.source_error(), StepError::Surface(e) if e.is_capability_failure())
    }
}

/// One finished flight solid.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOutput {
    /// 1-based flight number.
    pub index: usize,
    /// Phase angle of the flight's hub edge, radians.
    pub phase: f64,
    pub body: BodyId,
    pub name: String,
}

/// The finished blade.
#[derive(Debug, Clone, PartialEq)]
pub struct BladeOutput {
    /// The blade body, or the shaft body when the blade was joined into it.
    pub body: BodyId,
    pub component: ComponentId,
    pub name: String,
    pub flights: Vec<FlightOutput>,
    pub joined_to_shaft: bool,
}
