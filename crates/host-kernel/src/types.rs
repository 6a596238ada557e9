use serde::{Deserialize, Serialize};

macro_rules! host_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);
    };
}

host_id!(
    /// A B-Rep face in the host document.
    FaceId
);
host_id!(
    /// A B-Rep edge in the host document.
    EdgeId
);
host_id!(
    /// A body committed to the host document.
    BodyId
);
host_id!(
    /// A component that owns bodies and features.
    ComponentId
);
host_id!(
    /// A timeline feature (thicken, combine, base feature).
    FeatureId
);
host_id!(
    /// A transient wire produced by the temporary B-Rep manager.
    /// NEVER persisted; only valid until the build that created it ends.
    WireId
);
host_id!(
    /// A transient surface or solid held by the temporary B-Rep manager.
    TempBodyId
);

/// Whether the document records a parametric timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignType {
    /// Timeline-based; bodies must be added through a base feature edit.
    Parametric,
    /// No history; bodies are added directly.
    Direct,
}

/// Feature operation requested from thicken/combine features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureOperation {
    NewBody,
    Join,
}

/// Underlying surface geometry of a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SurfaceGeometry {
    Cylinder {
        origin: [f64; 3],
        axis: [f64; 3],
        radius: f64,
    },
    Plane {
        origin: [f64; 3],
        normal: [f64; 3],
    },
    Other {
        kind: String,
    },
}

impl SurfaceGeometry {
    pub fn kind_name(&self) -> &str {
        match self {
            SurfaceGeometry::Cylinder { .. } => "cylindrical",
            SurfaceGeometry::Plane { .. } => "planar",
            SurfaceGeometry::Other { kind } => kind,
        }
    }
}

/// Bodies produced by a timeline feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOutput {
    pub feature: FeatureId,
    pub bodies: Vec<BodyId>,
}

/// Errors from host kernel operations.
///
/// Most host calls signal failure by returning nothing; the adapter maps
/// that to `NoResult` naming the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("{operation} returned no result")]
    NoResult { operation: String },

    #[error("face not found: {id:?}")]
    FaceNotFound { id: FaceId },

    #[error("body not found: {id:?}")]
    BodyNotFound { id: BodyId },

    #[error("wire not found: {id:?}")]
    WireNotFound { id: WireId },

    #[error("temporary body not found: {id:?}")]
    TempBodyNotFound { id: TempBodyId },

    #[error("feature not found: {id:?}")]
    FeatureNotFound { id: FeatureId },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("kernel error: {message}")]
    Other { message: String },
}

impl KernelError {
    pub fn no_result(operation: impl Into<String>) -> Self {
        KernelError::NoResult {
            operation: operation.into(),
        }
    }
}
