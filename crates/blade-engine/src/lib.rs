pub mod metrics;
pub mod types;
pub mod validate;

use tracing::{info, instrument, warn};

use blade_ops::{
    compose_blade, resolve_shaft_frame, shaft_radius, BladeOutput, BladeParameters, BuildConfig,
    HelixBuilder, KernelBundle, ShaftFrame,
};
use host_kernel::{FaceId, HostIntrospect};
use screw_types::BladeForm;

pub use crate::metrics::{derived_metrics, estimated_fill_efficiency, DerivedMetrics, NO_SHAFT_TEXT};
pub use crate::types::{EngineError, ValidationError};
pub use crate::validate::validate_form;

/// The blade engine.
///
/// Owns the session's helix builder, so the host's helix sign convention
/// is probed at most once per engine, and runs the validate → frame →
/// compose pipeline.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    helix: HelixBuilder,
    config: BuildConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with non-default construction settings.
    pub fn with_config(config: BuildConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            helix: HelixBuilder::new(),
            config,
        })
    }

    /// Replace the helix builder, e.g. with one whose sign mode is known.
    pub fn with_helix(mut self, helix: HelixBuilder) -> Self {
        self.helix = helix;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn helix(&self) -> &HelixBuilder {
        &self.helix
    }

    /// Forget the detected helix sign convention.
    pub fn reset_sign_mode(&mut self) {
        self.helix.reset();
    }

    /// Resolve the shaft frame and validate the form against it.
    pub fn validate(
        &self,
        introspect: &dyn HostIntrospect,
        face: Option<FaceId>,
        form: &BladeForm,
        preview: bool,
    ) -> Result<(ShaftFrame, BladeParameters), EngineError> {
        let face = face.ok_or(ValidationError::NoShaft)?;
        let frame = resolve_shaft_frame(introspect, face, form.start_end, &self.config)?;
        let params = validate_form(form, frame.radius, preview, &self.config)?;
        Ok((frame, params))
    }

    /// True when the form would build.
    pub fn is_valid(&self, introspect: &dyn HostIntrospect, face: Option<FaceId>, form: &BladeForm) -> bool {
        self.validate(introspect, face, form, false).is_ok()
    }

    /// Build the full blade.
    #[instrument(skip_all)]
    pub fn build(
        &mut self,
        kb: &mut dyn KernelBundle,
        face: Option<FaceId>,
        form: &BladeForm,
    ) -> Result<BladeOutput, EngineError> {
        self.run(kb, face, form, false)
    }

    /// Build a preview blade. Failures are logged and reported as `false`.
    #[instrument(skip_all)]
    pub fn preview(&mut self, kb: &mut dyn KernelBundle, face: Option<FaceId>, form: &BladeForm) -> bool {
        match self.run(kb, face, form, true) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, fatal = e.is_fatal(), "preview failed");
                false
            }
        }
    }

    fn run(
        &mut self,
        kb: &mut dyn KernelBundle,
        face: Option<FaceId>,
        form: &BladeForm,
        preview: bool,
    ) -> Result<BladeOutput, EngineError> {
        let (frame, params) = self.validate(kb.as_introspect(), face, form, preview)?;
        let out = compose_blade(kb.as_kernel(), &mut self.helix, &frame, &params, &self.config)?;
        info!(name = %out.name, preview, flights = out.flights.len(), "blade built");
        Ok(out)
    }

    /// Derived-metrics text for the current form, or the reason it cannot
    /// be computed.
    pub fn derived_text(&self, introspect: &dyn HostIntrospect, face: Option<FaceId>, form: &BladeForm) -> String {
        if face.is_none() {
            return NO_SHAFT_TEXT.to_string();
        }
        match self.validate(introspect, face, form, false) {
            Ok((_, params)) => derived_metrics(&params).render(),
            Err(e) => e.to_string(),
        }
    }

    /// Radius of the selected shaft face, if it is a usable cylinder.
    pub fn shaft_radius(&self, introspect: &dyn HostIntrospect, face: FaceId) -> Option<f64> {
        shaft_radius(introspect, face).ok()
    }
}
