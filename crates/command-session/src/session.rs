use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use blade_engine::{Engine, NO_SHAFT_TEXT};
use blade_ops::{BladeOutput, KernelBundle};
use host_kernel::{FaceId, HostIntrospect};
use preset_store::{normalize_name, PresetError, PresetSelection, PresetStore, MANUAL_LABEL};
use screw_types::*;

use crate::controls::{suggested_outer_radius, LinkedControls, Visibility};
use crate::errors::SessionError;
use crate::messages::{FormView, InputChange};
use crate::state::SessionState;

/// One open blade command: the form, its linked widgets, and the engine
/// that builds from it.
///
/// Created when the host opens the command and dropped when it closes.
/// Nothing here outlives the command except the helix sign convention,
/// which the add-in recovers from [`CommandSession::engine`].
pub struct CommandSession {
    id: Uuid,
    state: SessionState,
    engine: Engine,
    presets: PresetStore,
    form: BladeForm,
    shaft: Option<FaceId>,
    controls: LinkedControls,
    outer_radius_user_edited: bool,
    applying_preset: bool,
    derived_text: String,
    selected_preset: String,
    preset_name: String,
    preset_status: String,
}

impl CommandSession {
    pub fn new(engine: Engine, presets: PresetStore) -> Self {
        let form = BladeForm::default();
        let session = Self {
            id: Uuid::new_v4(),
            state: SessionState::Configuring,
            engine,
            presets,
            controls: LinkedControls::for_form(&form),
            form,
            shaft: None,
            outer_radius_user_edited: false,
            applying_preset: false,
            derived_text: NO_SHAFT_TEXT.to_string(),
            selected_preset: MANUAL_LABEL.to_string(),
            preset_name: String::new(),
            preset_status: String::new(),
        };
        info!(session = %session.id, "blade command opened");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn form(&self) -> &BladeForm {
        &self.form
    }

    pub fn shaft(&self) -> Option<FaceId> {
        self.shaft
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn controls(&self) -> &LinkedControls {
        &self.controls
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::for_form(&self.form)
    }

    pub fn derived_text(&self) -> &str {
        &self.derived_text
    }

    pub fn preset_status(&self) -> &str {
        &self.preset_status
    }

    pub fn selected_preset(&self) -> &str {
        &self.selected_preset
    }

    pub fn outer_radius_user_edited(&self) -> bool {
        self.outer_radius_user_edited
    }

    /// Snapshot of everything the host draws.
    pub fn view(&self) -> FormView {
        FormView {
            state: self.state,
            form: self.form.clone(),
            shaft: self.shaft,
            controls: self.controls,
            visibility: self.visibility(),
            derived_text: self.derived_text.clone(),
            preset_labels: self.presets.dropdown_labels(),
            selected_preset: self.selected_preset.clone(),
            preset_name: self.preset_name.clone(),
            preset_status: self.preset_status.clone(),
        }
    }

    // ── Form events ──────────────────────────────────────────────────────

    /// Apply one input edit, run the linked-control rules, and refresh the
    /// derived text.
    ///
    /// Editing while a preview is shown discards it and returns the command
    /// to `Configuring`.
    pub fn input_changed(
        &mut self,
        introspect: &dyn HostIntrospect,
        change: InputChange,
    ) -> Result<(), SessionError> {
        self.state.advance(SessionState::Configuring, "edit inputs")?;
        self.handle_change(introspect, change);
        self.refresh_derived(introspect);
        Ok(())
    }

    fn handle_change(&mut self, introspect: &dyn HostIntrospect, change: InputChange) {
        let field = change.field();
        debug!(?field, applying_preset = self.applying_preset, "input changed");
        match change {
            InputChange::ShaftFace(face) => {
                self.shaft = face;
                if !self.applying_preset {
                    self.outer_radius_user_edited = false;
                }
                self.suggest_outer_radius(introspect, true);
            }
            InputChange::StartEnd(v) => self.form.start_end = v,
            InputChange::OuterRadius(v) => {
                self.form.outer_radius = v;
                if !self.applying_preset {
                    self.outer_radius_user_edited = true;
                }
            }
            InputChange::BladeLength(v) => self.form.blade_length = v,
            InputChange::Turns(v) => {
                self.form.turns = v;
                self.controls.follow_turns(v);
            }
            InputChange::TurnsSlider(v) => {
                self.controls.turns_slider = v;
                self.form.turns = v;
            }
            InputChange::BladeThickness(v) => self.form.blade_thickness = v,
            InputChange::HubClearance(v) => self.form.hub_clearance = v,
            InputChange::BucketWrapDeg(v) => {
                self.form.bucket_wrap_deg = v;
                self.controls.follow_wrap(v);
            }
            InputChange::BucketWrapSlider(v) => {
                self.controls.wrap_slider = v;
                self.form.bucket_wrap_deg = v;
            }
            InputChange::StartAngle(v) => self.form.start_angle = v,
            InputChange::Handedness(v) => self.form.handedness = v,
            InputChange::FlightPreset(preset) => {
                self.form.flight_preset = preset;
                if let Some(count) = preset.count() {
                    self.form.flights = count;
                }
            }
            InputChange::Flights(n) => {
                self.form.flights = n;
                self.form.flight_preset = FlightPreset::for_count(n);
            }
            InputChange::Operation(v) => self.form.operation = v,
            InputChange::PitchMode(v) => self.form.pitch_mode = v,
            InputChange::PitchStart(v) => self.form.pitch_start = v,
            InputChange::PitchEnd(v) => self.form.pitch_end = v,
            InputChange::ThicknessMode(v) => self.form.thickness_mode = v,
            InputChange::TipThickness(v) => self.form.tip_thickness = v,
            InputChange::Rpm(v) => self.form.rpm = v,
            InputChange::SavedPreset(label) => {
                self.selected_preset = label;
                if !self.applying_preset {
                    self.select_preset(introspect);
                }
            }
            InputChange::PresetName(name) => self.preset_name = name,
            InputChange::SavePreset => {
                if let Err(e) = self.save_preset(introspect) {
                    debug!(error = %e, "preset not saved");
                }
            }
        }
        if field.affects_variable_length() {
            self.sync_variable_length();
        }
    }

    /// In variable-pitch mode the length input shows turns × mean pitch.
    fn sync_variable_length(&mut self) {
        if self.form.pitch_mode != PitchMode::Variable {
            return;
        }
        let implied = self.form.implied_variable_length();
        if implied > 0.0 {
            self.form.blade_length = implied;
        }
    }

    fn refresh_derived(&mut self, introspect: &dyn HostIntrospect) {
        self.derived_text = self.engine.derived_text(introspect, self.shaft, &self.form);
    }

    /// Fill the outer radius from the selected shaft.
    ///
    /// Without `force`, a radius the user typed is kept. With `force` the
    /// suggestion always wins and the user-edited mark is cleared. Returns
    /// whether the radius was changed.
    pub fn suggest_outer_radius(&mut self, introspect: &dyn HostIntrospect, force: bool) -> bool {
        if self.outer_radius_user_edited && !force {
            return false;
        }
        let Some(radius) = self.shaft.and_then(|face| self.engine.shaft_radius(introspect, face)) else {
            return false;
        };
        self.form.outer_radius = suggested_outer_radius(radius);
        if force {
            self.outer_radius_user_edited = false;
        }
        true
    }

    // ── Presets ──────────────────────────────────────────────────────────

    fn select_preset(&mut self, introspect: &dyn HostIntrospect) {
        let selection = PresetSelection::from_label(&self.selected_preset);
        match self.presets.lookup(&selection) {
            Some(data) if !data.is_empty() => {
                self.load_preset(introspect, &data);
                self.preset_status = format!("Applied preset: {}", self.selected_preset);
                info!(preset = %self.selected_preset, "preset applied");
            }
            _ if selection == PresetSelection::Manual => {
                self.preset_status = "Manual mode.".to_string();
            }
            _ => {}
        }
    }

    /// Push every key of `data` through the normal change handling with the
    /// re-entrancy guard raised, then run the sync steps once.
    fn load_preset(&mut self, introspect: &dyn HostIntrospect, data: &PresetData) {
        self.applying_preset = true;
        for change in InputChange::from_preset(data) {
            self.handle_change(introspect, change);
        }
        self.sync_variable_length();
        self.controls.sync(&self.form);
        if data.outer_radius.is_some() {
            self.outer_radius_user_edited = true;
        }
        self.applying_preset = false;
    }

    /// Save the current form under the preset name field.
    ///
    /// The status line is updated either way. On success the new user preset
    /// becomes the dropdown selection.
    pub fn save_preset(&mut self, introspect: &dyn HostIntrospect) -> Result<String, SessionError> {
        let result = self.try_save_preset(introspect);
        self.preset_status = match &result {
            Ok(name) => format!("Saved preset: {name}"),
            Err(e) => format!("Preset save failed: {e}"),
        };
        result
    }

    fn try_save_preset(&mut self, introspect: &dyn HostIntrospect) -> Result<String, SessionError> {
        if normalize_name(&self.preset_name).is_empty() {
            return Err(PresetError::EmptyName.into());
        }
        self.engine.validate(introspect, self.shaft, &self.form, false)?;
        let name = self
            .presets
            .save(&self.preset_name, PresetData::from_form(&self.form))?;
        self.selected_preset = PresetSelection::User(name.clone()).label();
        Ok(name)
    }

    // ── Command events ───────────────────────────────────────────────────

    /// True when the current inputs would build.
    pub fn validate(&self, introspect: &dyn HostIntrospect) -> bool {
        self.state.is_open() && self.engine.is_valid(introspect, self.shaft, &self.form)
    }

    /// Build a capped preview blade. Build failures come back as `false`.
    #[instrument(skip_all, fields(session = %self.id))]
    pub fn preview(&mut self, kb: &mut dyn KernelBundle) -> Result<bool, SessionError> {
        self.state.advance(SessionState::Previewing, "preview")?;
        Ok(self.engine.preview(kb, self.shaft, &self.form))
    }

    /// Build the final blade. Success closes the command; on failure the
    /// command returns to `Configuring` so the inputs can be corrected.
    #[instrument(skip_all, fields(session = %self.id))]
    pub fn execute(&mut self, kb: &mut dyn KernelBundle) -> Result<BladeOutput, SessionError> {
        self.state.advance(SessionState::Executing, "execute")?;
        match self.engine.build(kb, self.shaft, &self.form) {
            Ok(out) => {
                self.state.advance(SessionState::Closed, "finish")?;
                info!(name = %out.name, "blade command finished");
                Ok(out)
            }
            Err(e) => {
                self.state.advance(SessionState::Configuring, "recover")?;
                error!(error = %e, fatal = e.is_fatal(), "blade command failed");
                Err(e.into())
            }
        }
    }

    /// Close the command without building.
    pub fn close(&mut self) {
        if self.state != SessionState::Closed {
            info!(session = %self.id, from = %self.state, "blade command closed");
            self.state = SessionState::Closed;
        }
    }
}
