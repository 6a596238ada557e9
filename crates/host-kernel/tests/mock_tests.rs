use host_kernel::mock_kernel::{MockBodyKind, MockFeatureKind};
use host_kernel::*;

fn wire(kernel: &mut MockKernel, pitch: f64, turns: f64) -> Result<WireId, KernelError> {
    kernel.create_helix_wire(
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [10.0, 0.0, 0.0],
        pitch,
        turns,
        0.0,
    )
}

// ── Helix conventions ──────────────────────────────────────────────────────

#[test]
fn turns_sign_accepts_negative_turns_only() {
    let mut kernel = MockKernel::with_convention(HelixConvention::TurnsSign);
    assert!(wire(&mut kernel, 10.0, -1.0).is_ok());
    assert!(wire(&mut kernel, -10.0, 1.0).is_err());
}

#[test]
fn pitch_sign_accepts_negative_pitch_only() {
    let mut kernel = MockKernel::with_convention(HelixConvention::PitchSign);
    assert!(wire(&mut kernel, 10.0, -1.0).is_err());
    assert!(wire(&mut kernel, -10.0, 1.0).is_ok());
}

#[test]
fn flip_axis_rejects_all_negatives() {
    let mut kernel = MockKernel::with_convention(HelixConvention::FlipAxis);
    assert!(wire(&mut kernel, 10.0, -1.0).is_err());
    assert!(wire(&mut kernel, -10.0, 1.0).is_err());
    assert!(wire(&mut kernel, 10.0, 1.0).is_ok());
}

#[test]
fn broken_kernel_never_builds_helices() {
    let mut kernel = MockKernel::with_convention(HelixConvention::Broken);
    assert!(wire(&mut kernel, 10.0, 1.0).is_err());
    assert_eq!(kernel.helix_attempts(), 1);
    assert!(kernel.helix_calls().is_empty());
}

#[test]
fn zero_turns_is_rejected() {
    let mut kernel = MockKernel::new();
    assert!(wire(&mut kernel, 10.0, 0.0).is_err());
}

// ── Shaft fixture ──────────────────────────────────────────────────────────

#[test]
fn shaft_fixture_has_cylinder_and_two_caps() {
    let mut kernel = MockKernel::new();
    let shaft = kernel.add_shaft(&ShaftSpec::default());

    let geometry = kernel.face_geometry(shaft.face).unwrap();
    assert!(matches!(geometry, SurfaceGeometry::Cylinder { radius, .. } if radius == 10.0));

    let mut neighbours: Vec<FaceId> = kernel
        .face_edges(shaft.face)
        .into_iter()
        .flat_map(|e| kernel.edge_faces(e))
        .filter(|f| *f != shaft.face)
        .collect();
    neighbours.sort();
    let mut caps = shaft.end_caps.to_vec();
    caps.sort();
    assert_eq!(neighbours, caps);

    assert_eq!(kernel.face_body(shaft.face).unwrap(), shaft.body);
    assert_eq!(kernel.body_component(shaft.body).unwrap(), shaft.component);
    assert!(!kernel.is_assembly_proxy(shaft.face));
}

// ── Temporary bodies and features ──────────────────────────────────────────

#[test]
fn union_accumulates_patches_and_consumes_tool() {
    let mut kernel = MockKernel::new();
    kernel.set_design_type(DesignType::Direct);
    let shaft = kernel.add_shaft(&ShaftSpec::default());
    let a = wire(&mut kernel, 10.0, 1.0).unwrap();
    let b = wire(&mut kernel, 10.0, 1.0).unwrap();
    let s1 = kernel.create_ruled_surface(a, b).unwrap();
    let s2 = kernel.create_ruled_surface(a, b).unwrap();

    kernel.union_temp_bodies(s1, s2).unwrap();
    assert!(kernel.union_temp_bodies(s1, s2).is_err(), "tool was consumed");

    let body = kernel.add_body(shaft.component, s1).unwrap();
    assert_eq!(
        kernel.body(body).unwrap().kind,
        MockBodyKind::Surface { patches: 2 }
    );
}

#[test]
fn parametric_design_requires_base_feature() {
    let mut kernel = MockKernel::new();
    let shaft = kernel.add_shaft(&ShaftSpec::default());
    let a = wire(&mut kernel, 10.0, 1.0).unwrap();
    let surface = kernel.create_ruled_surface(a, a).unwrap();

    assert!(matches!(
        kernel.add_body(shaft.component, surface),
        Err(KernelError::NotSupported { .. })
    ));

    let feature = kernel.begin_base_feature(shaft.component, "Base").unwrap();
    kernel
        .add_body_to_base_feature(shaft.component, surface, feature)
        .unwrap();
    let bodies = kernel.finish_base_feature(feature).unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(kernel.features()[0].kind, MockFeatureKind::Base);
}

#[test]
fn join_consumes_tool_bodies() {
    let mut kernel = MockKernel::new();
    kernel.set_design_type(DesignType::Direct);
    let shaft = kernel.add_shaft(&ShaftSpec::default());
    let w = wire(&mut kernel, 10.0, 1.0).unwrap();

    let mut solids = Vec::new();
    for _ in 0..3 {
        let temp = kernel.create_ruled_surface(w, w).unwrap();
        let surface = kernel.add_body(shaft.component, temp).unwrap();
        let out = kernel
            .thicken(shaft.component, surface, 2.0, true, FeatureOperation::NewBody)
            .unwrap();
        solids.push(out.bodies[0]);
    }

    let out = kernel
        .join_bodies(shaft.component, solids[0], &solids[1..])
        .unwrap();
    assert_eq!(out.bodies, vec![solids[0]]);
    assert!(kernel.body(solids[1]).unwrap().deleted);
    assert_eq!(kernel.body(solids[0]).unwrap().merged, solids[1..].to_vec());
}

#[test]
fn scripted_failure_starts_after_successes() {
    let mut kernel = MockKernel::new();
    kernel.fail_after(MockOp::RuledSurface, 1);
    let w = wire(&mut kernel, 10.0, 1.0).unwrap();
    assert!(kernel.create_ruled_surface(w, w).is_ok());
    let err = kernel.create_ruled_surface(w, w).unwrap_err();
    assert_eq!(err, KernelError::no_result("createRuledSurface"));
}

#[test]
fn ids_serialize_transparently() {
    let json = serde_json::to_string(&FaceId(42)).unwrap();
    assert_eq!(json, "42");
}
