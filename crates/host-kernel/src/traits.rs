use crate::types::*;

/// Mutating operations the blade generator consumes from the host CAD
/// application. Implemented by the host adapter and by `MockKernel`.
pub trait HostKernel {
    /// Create a helix wire in the temporary B-Rep manager.
    ///
    /// Which of `pitch`, `turns` or `axis_vector` carries handedness is
    /// host-build dependent; callers negotiate it once per session.
    fn create_helix_wire(
        &mut self,
        axis_point: [f64; 3],
        axis_vector: [f64; 3],
        start_point: [f64; 3],
        pitch: f64,
        turns: f64,
        taper_angle: f64,
    ) -> Result<WireId, KernelError>;

    /// Rule a surface between two wires.
    fn create_ruled_surface(&mut self, a: WireId, b: WireId) -> Result<TempBodyId, KernelError>;

    /// Union `tool` into `target` in place. Used to stitch surface patches.
    fn union_temp_bodies(&mut self, target: TempBodyId, tool: TempBodyId) -> Result<(), KernelError>;

    /// Document type of the active design.
    fn design_type(&self) -> DesignType;

    /// Add a temporary body directly to a component (direct-modeling documents).
    fn add_body(&mut self, component: ComponentId, body: TempBodyId) -> Result<BodyId, KernelError>;

    /// Create a base feature and enter its edit mode.
    fn begin_base_feature(&mut self, component: ComponentId, name: &str) -> Result<FeatureId, KernelError>;

    /// Add a temporary body to a base feature that is being edited.
    fn add_body_to_base_feature(
        &mut self,
        component: ComponentId,
        body: TempBodyId,
        feature: FeatureId,
    ) -> Result<(), KernelError>;

    /// Leave base feature edit mode and return the bodies it owns.
    fn finish_base_feature(&mut self, feature: FeatureId) -> Result<Vec<BodyId>, KernelError>;

    /// Thicken a surface body into a solid.
    fn thicken(
        &mut self,
        component: ComponentId,
        surface: BodyId,
        thickness: f64,
        both_sides: bool,
        operation: FeatureOperation,
    ) -> Result<FeatureOutput, KernelError>;

    /// Combine `tools` into `target`. Tool bodies are consumed.
    fn join_bodies(
        &mut self,
        component: ComponentId,
        target: BodyId,
        tools: &[BodyId],
    ) -> Result<FeatureOutput, KernelError>;

    fn rename_feature(&mut self, feature: FeatureId, name: &str) -> Result<(), KernelError>;

    fn rename_body(&mut self, body: BodyId, name: &str) -> Result<(), KernelError>;

    fn delete_body(&mut self, body: BodyId) -> Result<(), KernelError>;

    fn set_body_visible(&mut self, body: BodyId, visible: bool) -> Result<(), KernelError>;
}

/// Read-only topology and geometry queries on the host document.
pub trait HostIntrospect {
    /// Surface geometry underlying a face.
    fn face_geometry(&self, face: FaceId) -> Result<SurfaceGeometry, KernelError>;

    /// Edges bounding a face.
    fn face_edges(&self, face: FaceId) -> Vec<EdgeId>;

    /// Faces sharing an edge.
    fn edge_faces(&self, edge: EdgeId) -> Vec<FaceId>;

    /// A representative point lying on the face.
    fn point_on_face(&self, face: FaceId) -> Result<[f64; 3], KernelError>;

    /// True when the face was selected through an assembly occurrence
    /// rather than the component that owns it.
    fn is_assembly_proxy(&self, face: FaceId) -> bool;

    /// The body a face belongs to.
    fn face_body(&self, face: FaceId) -> Result<BodyId, KernelError>;

    /// The component a body belongs to.
    fn body_component(&self, body: BodyId) -> Result<ComponentId, KernelError>;

    fn body_name(&self, body: BodyId) -> Option<String>;
}
