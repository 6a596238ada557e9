use blade_ops::{BuildError, ConfigError, FrameError};
use screw_types::format_length;

fn mm(value: &f64) -> String {
    format_length(*value)
}

/// A form value that fails the blade's guard rails.
///
/// Messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Select the cylindrical shaft face.")]
    NoShaft,

    #[error("Turns must be greater than zero.")]
    TurnsNotPositive,

    #[error("Flights must be at least 1.")]
    NoFlights,

    #[error("Hub clearance cannot be negative.")]
    NegativeClearance,

    #[error("Blade thickness must be greater than zero.")]
    ThicknessNotPositive,

    #[error("Bucket wrap must be between 0° and 120°.")]
    WrapOutOfRange,

    #[error("RPM cannot be negative.")]
    NegativeRpm,

    #[error("Outer radius ({}) must exceed shaft radius + clearance ({}).", mm(.outer), mm(.inner))]
    OuterRadiusTooSmall { outer: f64, inner: f64 },

    #[error("Tip thickness must be greater than zero.")]
    TipNotPositive,

    #[error("Tip thickness cannot exceed hub thickness in tapered mode.")]
    TipExceedsHub,

    #[error("Blade thickness must be less than blade radial span ({}).", mm(.span))]
    ThicknessExceedsSpan { span: f64 },

    #[error("Pitch start and end must be greater than zero in variable mode.")]
    PitchNotPositive,

    #[error("Blade length must be greater than zero.")]
    LengthNotPositive,
}

/// Errors from the blade engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Failed to create Archimedean blade: {0}")]
    Build(#[from] BuildError),

    #[error("invalid build configuration: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// True when the host cannot build the blade whatever the inputs are.
    pub fn is_fatal(&self) -> bool {
        match self {
            EngineError::Build(e) => e.is_capability_failure(),
            EngineError::Config(_) => true,
            _ => false,
        }
    }

    /// True for problems the user can fix by editing the form or selection.
    pub fn is_input_error(&self) -> bool {
        matches!(self, EngineError::Validation(_) | EngineError::Frame(_))
    }
}
