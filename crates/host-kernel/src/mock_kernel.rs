//! Deterministic host kernel double for tests, implementing `HostKernel` and `HostIntrospect`.
//!
//! Models just enough of a host document to drive the blade pipeline:
//! a shaft fixture with a cylindrical face and two planar end caps, a
//! temporary B-Rep manager for wires and ruled surfaces, and timeline
//! features for thicken, combine and base-feature edits. The helix
//! constructor can emulate each of the host sign conventions, and any
//! operation can be told to start failing after N successful calls.

use std::collections::HashMap;

use tracing::debug;

use crate::traits::{HostIntrospect, HostKernel};
use crate::types::*;

/// How the mock helix constructor encodes handedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelixConvention {
    /// Negative turns are accepted; pitch must be positive.
    TurnsSign,
    /// Negative pitch is accepted; turns must be positive.
    PitchSign,
    /// Only positive pitch and turns are accepted; callers flip the axis.
    FlipAxis,
    /// Every helix request fails.
    Broken,
}

/// Operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    Helix,
    RuledSurface,
    UnionTemp,
    AddBody,
    Thicken,
    Join,
}

/// One accepted call to `create_helix_wire`.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixCall {
    pub axis_point: [f64; 3],
    pub axis_vector: [f64; 3],
    pub start_point: [f64; 3],
    pub pitch: f64,
    pub turns: f64,
}

/// What a mock document body holds.
#[derive(Debug, Clone, PartialEq)]
pub enum MockBodyKind {
    Shaft,
    /// A surface made of `patches` ruled patches.
    Surface { patches: usize },
    Solid { thickness: f64 },
}

/// A body in the mock document.
#[derive(Debug, Clone)]
pub struct MockBody {
    pub name: String,
    pub component: ComponentId,
    pub kind: MockBodyKind,
    pub visible: bool,
    pub deleted: bool,
    /// Bodies that were joined into this one.
    pub merged: Vec<BodyId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFeatureKind {
    Base,
    Thicken,
    Combine,
}

/// A timeline feature in the mock document.
#[derive(Debug, Clone)]
pub struct MockFeature {
    pub name: String,
    pub kind: MockFeatureKind,
    pub bodies: Vec<BodyId>,
    editing: bool,
}

#[derive(Debug, Clone)]
struct MockFace {
    geometry: SurfaceGeometry,
    edges: Vec<EdgeId>,
    point: [f64; 3],
    body: BodyId,
    proxy: bool,
}

#[derive(Debug, Clone)]
struct MockTempBody {
    patches: usize,
    consumed: bool,
}

/// Geometry of a shaft fixture.
#[derive(Debug, Clone)]
pub struct ShaftSpec {
    pub origin: [f64; 3],
    pub axis: [f64; 3],
    pub radius: f64,
    pub length: f64,
    /// Report the cylinder as selected through an assembly occurrence.
    pub assembly_proxy: bool,
}

impl Default for ShaftSpec {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            axis: [0.0, 0.0, 1.0],
            radius: 10.0,
            length: 200.0,
            assembly_proxy: false,
        }
    }
}

/// Handles to the entities making up a shaft fixture.
#[derive(Debug, Clone)]
pub struct ShaftFixture {
    pub face: FaceId,
    pub body: BodyId,
    pub component: ComponentId,
    /// Cap at `origin`, then cap at `origin + axis * length`.
    pub end_caps: [FaceId; 2],
}

/// Deterministic test double for the host kernel.
pub struct MockKernel {
    next_id: u64,
    convention: HelixConvention,
    design_type: DesignType,
    faces: HashMap<FaceId, MockFace>,
    edges: HashMap<EdgeId, Vec<FaceId>>,
    bodies: HashMap<BodyId, MockBody>,
    body_order: Vec<BodyId>,
    wires: HashMap<WireId, HelixCall>,
    temp_bodies: HashMap<TempBodyId, MockTempBody>,
    features: HashMap<FeatureId, MockFeature>,
    feature_order: Vec<FeatureId>,
    fail_after: HashMap<MockOp, usize>,
    op_counts: HashMap<MockOp, usize>,
    helix_calls: Vec<HelixCall>,
    helix_attempts: usize,
    ruled_pairs: Vec<(WireId, WireId)>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self::with_convention(HelixConvention::TurnsSign)
    }

    pub fn with_convention(convention: HelixConvention) -> Self {
        Self {
            next_id: 1,
            convention,
            design_type: DesignType::Parametric,
            faces: HashMap::new(),
            edges: HashMap::new(),
            bodies: HashMap::new(),
            body_order: Vec::new(),
            wires: HashMap::new(),
            temp_bodies: HashMap::new(),
            features: HashMap::new(),
            feature_order: Vec::new(),
            fail_after: HashMap::new(),
            op_counts: HashMap::new(),
            helix_calls: Vec::new(),
            helix_attempts: 0,
            ruled_pairs: Vec::new(),
        }
    }

    pub fn set_design_type(&mut self, design_type: DesignType) {
        self.design_type = design_type;
    }

    /// Let `op` succeed `successes` more times, then fail every later call.
    pub fn fail_after(&mut self, op: MockOp, successes: usize) {
        let already = self.op_counts.get(&op).copied().unwrap_or(0);
        self.fail_after.insert(op, already + successes);
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Count a call to `op`, returning an error if it is scripted to fail.
    fn tick(&mut self, op: MockOp, name: &str) -> Result<(), KernelError> {
        let count = self.op_counts.entry(op).or_insert(0);
        if let Some(&limit) = self.fail_after.get(&op) {
            if *count >= limit {
                debug!(?op, "scripted mock failure");
                return Err(KernelError::no_result(name));
            }
        }
        *count += 1;
        Ok(())
    }

    // ── Fixture construction ─────────────────────────────────────────────

    pub fn add_component(&mut self) -> ComponentId {
        ComponentId(self.alloc())
    }

    fn insert_body(&mut self, component: ComponentId, name: &str, kind: MockBodyKind) -> BodyId {
        let id = BodyId(self.alloc());
        self.bodies.insert(
            id,
            MockBody {
                name: name.to_string(),
                component,
                kind,
                visible: true,
                deleted: false,
                merged: Vec::new(),
            },
        );
        self.body_order.push(id);
        id
    }

    /// Add a bare face to `body`. Connect it to neighbours with [`MockKernel::connect`].
    pub fn add_face(&mut self, body: BodyId, geometry: SurfaceGeometry, point: [f64; 3]) -> FaceId {
        let id = FaceId(self.alloc());
        self.faces.insert(
            id,
            MockFace {
                geometry,
                edges: Vec::new(),
                point,
                body,
                proxy: false,
            },
        );
        id
    }

    /// Create an edge shared by two faces.
    pub fn connect(&mut self, a: FaceId, b: FaceId) -> EdgeId {
        let edge = EdgeId(self.alloc());
        self.edges.insert(edge, vec![a, b]);
        for face in [a, b] {
            if let Some(f) = self.faces.get_mut(&face) {
                f.edges.push(edge);
            }
        }
        edge
    }

    /// Build a closed cylindrical shaft: one cylinder face and two planar caps.
    pub fn add_shaft(&mut self, spec: &ShaftSpec) -> ShaftFixture {
        let component = self.add_component();
        let body = self.insert_body(component, "Shaft", MockBodyKind::Shaft);

        let axis = normalize(spec.axis);
        let radial = perpendicular(axis);
        let at = |t: f64, r: f64| {
            [
                spec.origin[0] + axis[0] * t + radial[0] * r,
                spec.origin[1] + axis[1] * t + radial[1] * r,
                spec.origin[2] + axis[2] * t + radial[2] * r,
            ]
        };

        let face = self.add_face(
            body,
            SurfaceGeometry::Cylinder {
                origin: spec.origin,
                axis,
                radius: spec.radius,
            },
            at(spec.length * 0.5, spec.radius),
        );
        if let Some(f) = self.faces.get_mut(&face) {
            f.proxy = spec.assembly_proxy;
        }

        let near = self.add_face(
            body,
            SurfaceGeometry::Plane {
                origin: spec.origin,
                normal: [-axis[0], -axis[1], -axis[2]],
            },
            at(0.0, spec.radius * 0.5),
        );
        let far = self.add_face(
            body,
            SurfaceGeometry::Plane {
                origin: at(spec.length, 0.0),
                normal: axis,
            },
            at(spec.length, spec.radius * 0.5),
        );
        self.connect(face, near);
        self.connect(face, far);

        ShaftFixture {
            face,
            body,
            component,
            end_caps: [near, far],
        }
    }

    // ── Inspection ───────────────────────────────────────────────────────

    pub fn helix_calls(&self) -> &[HelixCall] {
        &self.helix_calls
    }

    /// Number of helix requests, including rejected ones.
    pub fn helix_attempts(&self) -> usize {
        self.helix_attempts
    }

    pub fn ruled_pairs(&self) -> &[(WireId, WireId)] {
        &self.ruled_pairs
    }

    pub fn wire(&self, id: WireId) -> Option<&HelixCall> {
        self.wires.get(&id)
    }

    pub fn body(&self, id: BodyId) -> Option<&MockBody> {
        self.bodies.get(&id)
    }

    /// Bodies that have not been deleted or consumed, in creation order.
    pub fn live_bodies(&self) -> Vec<(BodyId, &MockBody)> {
        self.body_order
            .iter()
            .filter_map(|id| self.bodies.get(id).map(|b| (*id, b)))
            .filter(|(_, b)| !b.deleted)
            .collect()
    }

    pub fn find_body(&self, name: &str) -> Option<BodyId> {
        self.live_bodies()
            .into_iter()
            .find(|(_, b)| b.name == name)
            .map(|(id, _)| id)
    }

    /// Features in timeline order.
    pub fn features(&self) -> Vec<&MockFeature> {
        self.feature_order
            .iter()
            .filter_map(|id| self.features.get(id))
            .collect()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.features().into_iter().map(|f| f.name.clone()).collect()
    }

    fn live_body_mut(&mut self, id: BodyId) -> Result<&mut MockBody, KernelError> {
        match self.bodies.get_mut(&id) {
            Some(b) if !b.deleted => Ok(b),
            _ => Err(KernelError::BodyNotFound { id }),
        }
    }

    fn push_feature(&mut self, name: String, kind: MockFeatureKind, bodies: Vec<BodyId>, editing: bool) -> FeatureId {
        let id = FeatureId(self.alloc());
        self.features.insert(
            id,
            MockFeature {
                name,
                kind,
                bodies,
                editing,
            },
        );
        self.feature_order.push(id);
        id
    }

    fn take_temp(&mut self, id: TempBodyId) -> Result<usize, KernelError> {
        match self.temp_bodies.get_mut(&id) {
            Some(t) if !t.consumed => {
                t.consumed = true;
                Ok(t.patches)
            }
            _ => Err(KernelError::TempBodyNotFound { id }),
        }
    }

    fn accepts_helix(&self, axis: [f64; 3], pitch: f64, turns: f64) -> bool {
        let finite = [pitch, turns, axis[0], axis[1], axis[2]].iter().all(|v| v.is_finite());
        if !finite || pitch == 0.0 || turns == 0.0 || length(axis) < 1e-12 {
            return false;
        }
        match self.convention {
            HelixConvention::TurnsSign => pitch > 0.0,
            HelixConvention::PitchSign => turns > 0.0,
            HelixConvention::FlipAxis => pitch > 0.0 && turns > 0.0,
            HelixConvention::Broken => false,
        }
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl HostKernel for MockKernel {
    fn create_helix_wire(
        &mut self,
        axis_point: [f64; 3],
        axis_vector: [f64; 3],
        start_point: [f64; 3],
        pitch: f64,
        turns: f64,
        _taper_angle: f64,
    ) -> Result<WireId, KernelError> {
        self.helix_attempts += 1;
        if !self.accepts_helix(axis_vector, pitch, turns) {
            return Err(KernelError::no_result("createHelixWire"));
        }
        self.tick(MockOp::Helix, "createHelixWire")?;

        let call = HelixCall {
            axis_point,
            axis_vector,
            start_point,
            pitch,
            turns,
        };
        let id = WireId(self.alloc());
        self.helix_calls.push(call.clone());
        self.wires.insert(id, call);
        Ok(id)
    }

    fn create_ruled_surface(&mut self, a: WireId, b: WireId) -> Result<TempBodyId, KernelError> {
        for w in [a, b] {
            if !self.wires.contains_key(&w) {
                return Err(KernelError::WireNotFound { id: w });
            }
        }
        self.tick(MockOp::RuledSurface, "createRuledSurface")?;
        let id = TempBodyId(self.alloc());
        self.temp_bodies.insert(
            id,
            MockTempBody {
                patches: 1,
                consumed: false,
            },
        );
        self.ruled_pairs.push((a, b));
        Ok(id)
    }

    fn union_temp_bodies(&mut self, target: TempBodyId, tool: TempBodyId) -> Result<(), KernelError> {
        if !self.temp_bodies.get(&target).is_some_and(|t| !t.consumed) {
            return Err(KernelError::TempBodyNotFound { id: target });
        }
        self.tick(MockOp::UnionTemp, "booleanOperation")?;
        let patches = self.take_temp(tool)?;
        if let Some(t) = self.temp_bodies.get_mut(&target) {
            t.patches += patches;
        }
        Ok(())
    }

    fn design_type(&self) -> DesignType {
        self.design_type
    }

    fn add_body(&mut self, component: ComponentId, body: TempBodyId) -> Result<BodyId, KernelError> {
        if self.design_type == DesignType::Parametric {
            return Err(KernelError::NotSupported {
                operation: "direct body add in a parametric design".to_string(),
            });
        }
        self.tick(MockOp::AddBody, "bRepBodies.add")?;
        let patches = self.take_temp(body)?;
        let name = format!("Body{}", self.body_order.len() + 1);
        Ok(self.insert_body(component, &name, MockBodyKind::Surface { patches }))
    }

    fn begin_base_feature(&mut self, _component: ComponentId, name: &str) -> Result<FeatureId, KernelError> {
        Ok(self.push_feature(name.to_string(), MockFeatureKind::Base, Vec::new(), true))
    }

    fn add_body_to_base_feature(
        &mut self,
        component: ComponentId,
        body: TempBodyId,
        feature: FeatureId,
    ) -> Result<(), KernelError> {
        if !self.features.get(&feature).is_some_and(|f| f.editing) {
            return Err(KernelError::FeatureNotFound { id: feature });
        }
        self.tick(MockOp::AddBody, "bRepBodies.add")?;
        let patches = self.take_temp(body)?;
        let name = format!("Body{}", self.body_order.len() + 1);
        let id = self.insert_body(component, &name, MockBodyKind::Surface { patches });
        if let Some(f) = self.features.get_mut(&feature) {
            f.bodies.push(id);
        }
        Ok(())
    }

    fn finish_base_feature(&mut self, feature: FeatureId) -> Result<Vec<BodyId>, KernelError> {
        let f = self
            .features
            .get_mut(&feature)
            .ok_or(KernelError::FeatureNotFound { id: feature })?;
        f.editing = false;
        Ok(f.bodies.clone())
    }

    fn thicken(
        &mut self,
        component: ComponentId,
        surface: BodyId,
        thickness: f64,
        _both_sides: bool,
        _operation: FeatureOperation,
    ) -> Result<FeatureOutput, KernelError> {
        match self.bodies.get(&surface) {
            Some(b) if !b.deleted && matches!(b.kind, MockBodyKind::Surface { .. }) => {}
            _ => return Err(KernelError::BodyNotFound { id: surface }),
        }
        if thickness.is_nan() || thickness <= 0.0 {
            return Err(KernelError::no_result("thickenFeatures.add"));
        }
        self.tick(MockOp::Thicken, "thickenFeatures.add")?;
        let name = format!("Body{}", self.body_order.len() + 1);
        let solid = self.insert_body(component, &name, MockBodyKind::Solid { thickness });
        let feature = self.push_feature(
            format!("Thicken{}", self.feature_order.len() + 1),
            MockFeatureKind::Thicken,
            vec![solid],
            false,
        );
        Ok(FeatureOutput {
            feature,
            bodies: vec![solid],
        })
    }

    fn join_bodies(
        &mut self,
        _component: ComponentId,
        target: BodyId,
        tools: &[BodyId],
    ) -> Result<FeatureOutput, KernelError> {
        self.live_body_mut(target)?;
        for &tool in tools {
            if tool == target {
                return Err(KernelError::Other {
                    message: "target body cannot also be a tool body".to_string(),
                });
            }
            self.live_body_mut(tool)?;
        }
        self.tick(MockOp::Join, "combineFeatures.add")?;
        for &tool in tools {
            self.live_body_mut(tool)?.deleted = true;
        }
        self.live_body_mut(target)?.merged.extend_from_slice(tools);
        let feature = self.push_feature(
            format!("Combine{}", self.feature_order.len() + 1),
            MockFeatureKind::Combine,
            vec![target],
            false,
        );
        Ok(FeatureOutput {
            feature,
            bodies: vec![target],
        })
    }

    fn rename_feature(&mut self, feature: FeatureId, name: &str) -> Result<(), KernelError> {
        let f = self
            .features
            .get_mut(&feature)
            .ok_or(KernelError::FeatureNotFound { id: feature })?;
        f.name = name.to_string();
        Ok(())
    }

    fn rename_body(&mut self, body: BodyId, name: &str) -> Result<(), KernelError> {
        self.live_body_mut(body)?.name = name.to_string();
        Ok(())
    }

    fn delete_body(&mut self, body: BodyId) -> Result<(), KernelError> {
        self.live_body_mut(body)?.deleted = true;
        Ok(())
    }

    fn set_body_visible(&mut self, body: BodyId, visible: bool) -> Result<(), KernelError> {
        self.live_body_mut(body)?.visible = visible;
        Ok(())
    }
}

impl HostIntrospect for MockKernel {
    fn face_geometry(&self, face: FaceId) -> Result<SurfaceGeometry, KernelError> {
        self.faces
            .get(&face)
            .map(|f| f.geometry.clone())
            .ok_or(KernelError::FaceNotFound { id: face })
    }

    fn face_edges(&self, face: FaceId) -> Vec<EdgeId> {
        self.faces.get(&face).map(|f| f.edges.clone()).unwrap_or_default()
    }

    fn edge_faces(&self, edge: EdgeId) -> Vec<FaceId> {
        self.edges.get(&edge).cloned().unwrap_or_default()
    }

    fn point_on_face(&self, face: FaceId) -> Result<[f64; 3], KernelError> {
        self.faces
            .get(&face)
            .map(|f| f.point)
            .ok_or(KernelError::FaceNotFound { id: face })
    }

    fn is_assembly_proxy(&self, face: FaceId) -> bool {
        self.faces.get(&face).is_some_and(|f| f.proxy)
    }

    fn face_body(&self, face: FaceId) -> Result<BodyId, KernelError> {
        self.faces
            .get(&face)
            .map(|f| f.body)
            .ok_or(KernelError::FaceNotFound { id: face })
    }

    fn body_component(&self, body: BodyId) -> Result<ComponentId, KernelError> {
        self.bodies
            .get(&body)
            .map(|b| b.component)
            .ok_or(KernelError::BodyNotFound { id: body })
    }

    fn body_name(&self, body: BodyId) -> Option<String> {
        self.bodies.get(&body).map(|b| b.name.clone())
    }
}

fn length(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = length(v);
    if len > 1e-12 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Any unit vector perpendicular to `axis`.
fn perpendicular(axis: [f64; 3]) -> [f64; 3] {
    let cross = |a: [f64; 3], b: [f64; 3]| {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    };
    let p = cross(axis, [1.0, 0.0, 0.0]);
    if length(p) > 1e-6 {
        normalize(p)
    } else {
        normalize(cross(axis, [0.0, 1.0, 0.0]))
    }
}
