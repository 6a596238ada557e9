use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use blade_ops::*;
use host_kernel::mock_kernel::MockBodyKind;
use host_kernel::*;
use screw_types::{PitchMode, StartEnd, ThicknessMode};

fn shaft(kernel: &mut MockKernel) -> ShaftFixture {
    kernel.add_shaft(&ShaftSpec::default())
}

fn frame(kernel: &MockKernel, shaft: &ShaftFixture) -> ShaftFrame {
    resolve_shaft_frame(kernel, shaft.face, StartEnd::End1, &BuildConfig::default()).unwrap()
}

fn params() -> BladeParameters {
    BladeParameters {
        shaft_radius: 10.0,
        inner_radius: 12.0,
        outer_radius: 40.0,
        length: 350.0,
        turns: 3.5,
        hub_thickness: 3.0,
        tip_thickness: 3.0,
        thickness_mode: ThicknessMode::Constant,
        bucket_wrap_deg: 35.0,
        bucket_wrap: 35f64.to_radians(),
        start_angle: 0.0,
        handed_sign: 1.0,
        flights: 2,
        pitch_mode: PitchMode::Constant,
        pitch_start: 100.0,
        pitch_end: 100.0,
        join_to_shaft: false,
        rpm: 60.0,
        preview: false,
    }
}

fn tapered(flights: usize) -> BladeParameters {
    BladeParameters {
        thickness_mode: ThicknessMode::Tapered,
        tip_thickness: 2.0,
        flights,
        ..params()
    }
}

fn variable(flights: usize) -> BladeParameters {
    BladeParameters {
        pitch_mode: PitchMode::Variable,
        pitch_start: 120.0,
        pitch_end: 80.0,
        flights,
        ..params()
    }
}

fn compose(kernel: &mut MockKernel, p: &BladeParameters) -> Result<BladeOutput, BuildError> {
    let s = shaft(kernel);
    let f = frame(kernel, &s);
    let mut helix = HelixBuilder::new();
    compose_blade(kernel, &mut helix, &f, p, &BuildConfig::default())
}

// ── Shaft frame ────────────────────────────────────────────────────────────

#[test]
fn frame_from_end1_points_along_axis() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let f = frame(&kernel, &s);

    assert_relative_eq!(f.axis_direction, Vector3::z(), epsilon = 1e-12);
    assert_relative_eq!(f.start_center, Point3::origin(), epsilon = 1e-12);
    assert_relative_eq!(f.basis_u, Vector3::y(), epsilon = 1e-12);
    assert_relative_eq!(f.basis_v, -Vector3::x(), epsilon = 1e-12);
    assert_eq!(f.radius, 10.0);
    assert_eq!(f.shaft_body, s.body);
    assert_eq!(f.component, s.component);
}

#[test]
fn frame_from_end2_reverses_axis() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let f = resolve_shaft_frame(&kernel, s.face, StartEnd::End2, &BuildConfig::default()).unwrap();

    assert_relative_eq!(f.axis_direction, -Vector3::z(), epsilon = 1e-12);
    assert_relative_eq!(f.start_center, Point3::new(0.0, 0.0, 200.0), epsilon = 1e-12);
    assert_relative_eq!(f.basis_v, Vector3::x(), epsilon = 1e-12);
}

#[test]
fn frame_basis_is_orthonormal_for_oblique_shaft() {
    let mut kernel = MockKernel::new();
    let s = kernel.add_shaft(&ShaftSpec {
        origin: [5.0, -3.0, 1.0],
        axis: [1.0, 2.0, -0.5],
        radius: 7.5,
        ..ShaftSpec::default()
    });
    for end in StartEnd::ALL {
        let f = resolve_shaft_frame(&kernel, s.face, end, &BuildConfig::default()).unwrap();
        assert_relative_eq!(f.axis_direction.norm(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(f.basis_u.norm(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(f.basis_v.norm(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(f.basis_u.dot(&f.axis_direction), 0.0, epsilon = 1e-9);
        assert_relative_eq!(f.basis_v.dot(&f.axis_direction), 0.0, epsilon = 1e-9);
        assert_relative_eq!(f.basis_u.dot(&f.basis_v), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn frame_rejects_assembly_proxy() {
    let mut kernel = MockKernel::new();
    let s = kernel.add_shaft(&ShaftSpec {
        assembly_proxy: true,
        ..ShaftSpec::default()
    });
    let err = resolve_shaft_frame(&kernel, s.face, StartEnd::End1, &BuildConfig::default()).unwrap_err();
    assert_eq!(err, FrameError::AssemblyProxy);
}

#[test]
fn frame_rejects_planar_face() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let err = resolve_shaft_frame(&kernel, s.end_caps[0], StartEnd::End1, &BuildConfig::default())
        .unwrap_err();
    assert!(matches!(err, FrameError::NotCylindrical { ref found } if found == "planar"));
}

#[test]
fn frame_without_caps_fails() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let bare = kernel.add_face(
        s.body,
        SurfaceGeometry::Cylinder {
            origin: [0.0, 0.0, 0.0],
            axis: [0.0, 0.0, 1.0],
            radius: 10.0,
        },
        [10.0, 0.0, 5.0],
    );
    let err = resolve_shaft_frame(&kernel, bare, StartEnd::End1, &BuildConfig::default()).unwrap_err();
    assert_eq!(err, FrameError::NoEndCaps);
}

#[test]
fn tilted_neighbour_is_not_an_end_cap() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let chamfer = kernel.add_face(
        s.body,
        SurfaceGeometry::Plane {
            origin: [0.0, 0.0, -50.0],
            normal: [0.0, 0.7071, -0.7071],
        },
        [0.0, 5.0, -50.0],
    );
    kernel.connect(s.face, chamfer);
    let f = frame(&kernel, &s);
    assert_relative_eq!(f.start_center, Point3::origin(), epsilon = 1e-12);
}

#[test]
fn face_point_on_axis_falls_back_to_perpendicular() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let degenerate = kernel.add_face(
        s.body,
        SurfaceGeometry::Cylinder {
            origin: [0.0, 0.0, 0.0],
            axis: [0.0, 0.0, 1.0],
            radius: 10.0,
        },
        [0.0, 0.0, 50.0],
    );
    kernel.connect(degenerate, s.end_caps[0]);
    let f = resolve_shaft_frame(&kernel, degenerate, StartEnd::End1, &BuildConfig::default()).unwrap();
    assert_relative_eq!(f.basis_u.norm(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(f.basis_u.dot(&f.axis_direction), 0.0, epsilon = 1e-12);
}

#[test]
fn shaft_radius_reads_cylinder() {
    let mut kernel = MockKernel::new();
    let s = kernel.add_shaft(&ShaftSpec {
        radius: 22.5,
        ..ShaftSpec::default()
    });
    assert_eq!(shaft_radius(&kernel, s.face).unwrap(), 22.5);
}

// ── Helix sign negotiation ─────────────────────────────────────────────────

fn probe_spec() -> HelixSpec {
    HelixSpec {
        axis_point: Point3::origin(),
        axis: Vector3::z(),
        start_point: Point3::new(12.0, 0.0, 0.0),
        pitch: 50.0,
        turns: 2.0,
    }
}

#[test]
fn probe_detects_each_convention() {
    let cases = [
        (HelixConvention::TurnsSign, HelixSignMode::TurnsSign, 1),
        (HelixConvention::PitchSign, HelixSignMode::PitchSign, 2),
        (HelixConvention::FlipAxis, HelixSignMode::FlipAxis, 3),
    ];
    for (convention, expected, attempts) in cases {
        let mut kernel = MockKernel::with_convention(convention);
        let mut helix = HelixBuilder::new();
        assert_eq!(helix.negotiate(&mut kernel, &probe_spec()).unwrap(), expected);
        assert_eq!(kernel.helix_attempts(), attempts);
        assert_eq!(helix.mode(), Some(expected));
    }
}

#[test]
fn probe_failure_is_unsupported() {
    let mut kernel = MockKernel::with_convention(HelixConvention::Broken);
    let mut helix = HelixBuilder::new();
    assert_eq!(
        helix.create(&mut kernel, &probe_spec(), 1.0).unwrap_err(),
        HelixError::Unsupported
    );
    assert_eq!(kernel.helix_attempts(), 3);
    assert_eq!(helix.mode(), None);
}

#[test]
fn mode_is_probed_once() {
    let mut kernel = MockKernel::with_convention(HelixConvention::PitchSign);
    let mut helix = HelixBuilder::new();
    helix.create(&mut kernel, &probe_spec(), 1.0).unwrap();
    let after_first = kernel.helix_attempts();
    helix.create(&mut kernel, &probe_spec(), -1.0).unwrap();
    assert_eq!(kernel.helix_attempts(), after_first + 1);
}

#[test]
fn injected_mode_skips_probe() {
    let mut kernel = MockKernel::with_convention(HelixConvention::FlipAxis);
    let mut helix = HelixBuilder::with_mode(HelixSignMode::FlipAxis);
    helix.create(&mut kernel, &probe_spec(), 1.0).unwrap();
    assert_eq!(kernel.helix_attempts(), 1);
}

#[test]
fn reset_forces_new_probe() {
    let mut kernel = MockKernel::new();
    let mut helix = HelixBuilder::new();
    helix.negotiate(&mut kernel, &probe_spec()).unwrap();
    helix.reset();
    assert_eq!(helix.mode(), None);
    helix.negotiate(&mut kernel, &probe_spec()).unwrap();
    assert_eq!(kernel.helix_attempts(), 2);
}

#[test]
fn left_hand_applies_convention() {
    let mut kernel = MockKernel::with_convention(HelixConvention::TurnsSign);
    let mut helix = HelixBuilder::new();
    helix.create(&mut kernel, &probe_spec(), -1.0).unwrap();
    let call = kernel.helix_calls().last().unwrap();
    assert_eq!((call.pitch, call.turns), (50.0, -2.0));

    let mut kernel = MockKernel::with_convention(HelixConvention::PitchSign);
    let mut helix = HelixBuilder::new();
    helix.create(&mut kernel, &probe_spec(), -1.0).unwrap();
    let call = kernel.helix_calls().last().unwrap();
    assert_eq!((call.pitch, call.turns), (-50.0, 2.0));

    let mut kernel = MockKernel::with_convention(HelixConvention::FlipAxis);
    let mut helix = HelixBuilder::new();
    helix.create(&mut kernel, &probe_spec(), -1.0).unwrap();
    let call = kernel.helix_calls().last().unwrap();
    assert_eq!(call.axis_vector, [0.0, 0.0, -1.0]);
    assert_eq!((call.pitch, call.turns), (50.0, 2.0));
}

#[test]
fn right_hand_flip_axis_keeps_axis() {
    let mut kernel = MockKernel::with_convention(HelixConvention::FlipAxis);
    let mut helix = HelixBuilder::with_mode(HelixSignMode::FlipAxis);
    helix.create(&mut kernel, &probe_spec(), 1.0).unwrap();
    assert_eq!(kernel.helix_calls()[0].axis_vector, [0.0, 0.0, 1.0]);
}

// ── Helix geometry ─────────────────────────────────────────────────────────

#[test]
fn constant_helix_starts_on_inner_radius() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let f = frame(&kernel, &s);
    let mut helix = HelixBuilder::with_mode(HelixSignMode::TurnsSign);
    let p = params();
    let wire = helix
        .constant_pitch_helix(&mut kernel, &f, &p.helix_profile(), 12.0, 0.0, &BuildConfig::default())
        .unwrap();
    let call = kernel.wire(wire).unwrap();
    assert_relative_eq!(call.start_point[1], 12.0, epsilon = 1e-12);
    assert_eq!(call.axis_point, [0.0, 0.0, 0.0]);
    assert_eq!(call.pitch, 100.0);
    assert_eq!(call.turns, 3.5);
}

#[test]
fn variable_helix_offsets_segments_along_axis() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let f = frame(&kernel, &s);
    let mut helix = HelixBuilder::with_mode(HelixSignMode::TurnsSign);
    let p = variable(1);
    let config = BuildConfig::default();
    let wires = helix
        .variable_pitch_helix(&mut kernel, &f, &p.helix_profile(), 20.0, 0.0, &config)
        .unwrap();
    assert_eq!(wires.len(), config.variable_pitch_segments);

    let segments = variable_pitch_segments(3.5, 120.0, 80.0, config.variable_pitch_segments, 1e-9);
    for (wire, seg) in wires.iter().zip(&segments) {
        let call = kernel.wire(*wire).unwrap();
        assert_relative_eq!(call.axis_point[2], seg.start_z, epsilon = 1e-9);
        assert_relative_eq!(call.pitch, seg.pitch, epsilon = 1e-9);
        let r = (call.start_point[0].powi(2) + call.start_point[1].powi(2)).sqrt();
        assert_relative_eq!(r, 20.0, epsilon = 1e-9);
    }
}

#[test]
fn handedness_mirrors_angle_but_not_axial_position() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let f = frame(&kernel, &s);
    let config = BuildConfig::default();
    let right = variable(1).helix_profile();
    let left = HelixProfile {
        handed_sign: -1.0,
        ..right
    };

    let mut helix = HelixBuilder::with_mode(HelixSignMode::TurnsSign);
    let right_wires = helix
        .variable_pitch_helix(&mut kernel, &f, &right, 20.0, 0.0, &config)
        .unwrap();
    let left_wires = helix
        .variable_pitch_helix(&mut kernel, &f, &left, 20.0, 0.0, &config)
        .unwrap();
    assert_eq!(right_wires.len(), left_wires.len());

    for (r, l) in right_wires.iter().zip(&left_wires) {
        let r = kernel.wire(*r).unwrap();
        let l = kernel.wire(*l).unwrap();
        assert_relative_eq!(r.axis_point[2], l.axis_point[2], epsilon = 1e-12);
        assert_relative_eq!(r.pitch, l.pitch, epsilon = 1e-12);
        // basis u = +y, basis v = -x: the v component flips, the u component does not.
        assert_relative_eq!(r.start_point[1], l.start_point[1], epsilon = 1e-9);
        assert_relative_eq!(r.start_point[0], -l.start_point[0], epsilon = 1e-9);
        assert_relative_eq!(r.turns, -l.turns, epsilon = 1e-12);
    }
}

#[test]
fn variable_helix_skips_rejected_segments() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let f = frame(&kernel, &s);
    kernel.fail_after(MockOp::Helix, 10);
    let mut helix = HelixBuilder::with_mode(HelixSignMode::TurnsSign);
    let wires = helix
        .variable_pitch_helix(&mut kernel, &f, &variable(1).helix_profile(), 20.0, 0.0, &BuildConfig::default())
        .unwrap();
    assert_eq!(wires.len(), 10);
}

#[test]
fn variable_helix_with_no_wires_fails() {
    let mut kernel = MockKernel::new();
    let s = shaft(&mut kernel);
    let f = frame(&kernel, &s);
    kernel.fail_after(MockOp::Helix, 0);
    let mut helix = HelixBuilder::with_mode(HelixSignMode::TurnsSign);
    let err = helix
        .variable_pitch_helix(&mut kernel, &f, &variable(1).helix_profile(), 20.0, 0.0, &BuildConfig::default())
        .unwrap_err();
    assert_eq!(err, HelixError::NoSegments);
}

// ── Blade composition ──────────────────────────────────────────────────────

#[test]
fn constant_blade_names_and_joins() {
    let mut kernel = MockKernel::new();
    let out = compose(&mut kernel, &params()).unwrap();

    assert_eq!(out.name, "Archimedean Blade (2F, CP, Const, 3.50 turns)");
    assert_eq!(kernel.find_body(&out.name), Some(out.body));
    assert_eq!(out.flights.len(), 2);
    assert_eq!(out.flights[0].name, "Archimedean Flight 1 (full span)");
    assert!(!out.joined_to_shaft);

    let features = kernel.feature_names();
    for expected in [
        "Arch Flight Surface 1 (CP)",
        "Arch Flight 1 Thicken (full span)",
        "Arch Flight Surface 2 (CP)",
        "Arch Flight 2 Thicken (full span)",
        "Join 2 Flights",
    ] {
        assert!(features.iter().any(|f| f == expected), "missing feature {expected}");
    }

    // shaft + blade; surfaces deleted, flight 2 consumed by the join
    assert_eq!(kernel.live_bodies().len(), 2);
    assert_eq!(kernel.body(out.body).unwrap().merged, vec![out.flights[1].body]);
}

#[test]
fn flights_are_phase_shifted() {
    let mut kernel = MockKernel::new();
    let out = compose(
        &mut kernel,
        &BladeParameters {
            flights: 3,
            ..params()
        },
    )
    .unwrap();
    let phases: Vec<f64> = out.flights.iter().map(|f| f.phase).collect();
    for (p, expected) in phases.iter().zip(flight_phases(0.0, 3)) {
        assert_relative_eq!(*p, expected);
    }
}

#[test]
fn tapered_flight_is_built_from_bands() {
    let mut kernel = MockKernel::new();
    let out = compose(&mut kernel, &tapered(1)).unwrap();

    assert_eq!(out.name, "Archimedean Blade (1F, CP, Taper, 3.50 turns)");
    assert_eq!(out.flights[0].name, "Archimedean Flight 1");
    let features = kernel.feature_names();
    assert!(features.iter().any(|f| f == "Arch Flight Surface 1 Band 6"));
    assert!(features.iter().any(|f| f == "Arch Flight 1 Thicken (band 1/6)"));
    assert!(features.iter().any(|f| f == "Join Flight 1 Taper Bands"));
    assert!(!features.iter().any(|f| f.starts_with("Join 1 Flights")));

    let blade = kernel.body(out.body).unwrap();
    assert_eq!(blade.merged.len(), 5);
    assert_eq!(
        blade.kind,
        MockBodyKind::Solid {
            thickness: band_thickness(3.0, 2.0, 1.0 / 12.0)
        }
    );
}

#[test]
fn variable_pitch_surface_is_stitched_from_segments() {
    let mut kernel = MockKernel::new();
    let out = compose(&mut kernel, &variable(1)).unwrap();
    assert_eq!(out.name, "Archimedean Blade (1F, VP, Const, 3.50 turns)");
    assert_eq!(kernel.ruled_pairs().len(), BuildConfig::default().variable_pitch_segments);
    assert!(kernel.feature_names().iter().any(|f| f == "Arch Flight Surface 1 (VP)"));
}

#[test]
fn join_to_shaft_merges_blade() {
    let mut kernel = MockKernel::new();
    let out = compose(
        &mut kernel,
        &BladeParameters {
            join_to_shaft: true,
            ..params()
        },
    )
    .unwrap();
    assert!(out.joined_to_shaft);
    let shaft_body = kernel.body(out.body).unwrap();
    assert_eq!(shaft_body.kind, MockBodyKind::Shaft);
    assert_eq!(shaft_body.merged.len(), 1);
    assert!(kernel
        .feature_names()
        .iter()
        .any(|f| f == "Join Archimedean Blade To Shaft"));
}

#[test]
fn direct_design_adds_bodies_directly() {
    let mut kernel = MockKernel::new();
    kernel.set_design_type(DesignType::Direct);
    let out = compose(&mut kernel, &params()).unwrap();
    assert!(!kernel.features().iter().any(|f| f.kind == host_kernel::mock_kernel::MockFeatureKind::Base));
    assert_eq!(kernel.find_body(&out.name), Some(out.body));
}

// ── Failure context ────────────────────────────────────────────────────────

#[test]
fn thicken_failure_names_flight() {
    let mut kernel = MockKernel::new();
    kernel.fail_after(MockOp::Thicken, 1);
    let err = compose(&mut kernel, &params()).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Flight {
            flight: 2,
            step: BuildStep::Thicken,
            ..
        }
    ));
    // no rollback
    assert!(kernel.find_body("Archimedean Flight 1 (full span)").is_some());
}

#[test]
fn band_failure_names_band() {
    let mut kernel = MockKernel::new();
    kernel.fail_after(MockOp::RuledSurface, 2);
    let err = compose(&mut kernel, &tapered(1)).unwrap_err();
    match err {
        BuildError::Band {
            flight,
            band,
            bands,
            step,
            source,
        } => {
            assert_eq!((flight, band, bands), (1, 3, 6));
            assert_eq!(step, BuildStep::Surface);
            assert!(matches!(
                source,
                StepError::Surface(SurfaceError::RuledSurface { segment: 0, .. })
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn stitch_failure_aborts_surface() {
    let mut kernel = MockKernel::new();
    kernel.fail_after(MockOp::UnionTemp, 3);
    let err = compose(&mut kernel, &variable(1)).unwrap_err();
    assert!(matches!(
        err.source_error(),
        StepError::Surface(SurfaceError::Stitch { patch: 4, .. })
    ));
    assert_eq!(err.step(), BuildStep::Surface);
}

#[test]
fn broken_helix_is_capability_failure() {
    let mut kernel = MockKernel::with_convention(HelixConvention::Broken);
    let err = compose(&mut kernel, &params()).unwrap_err();
    assert!(err.is_capability_failure());
    assert!(err.to_string().contains("createHelixWire"));
}

#[test]
fn join_failure_is_blade_level() {
    let mut kernel = MockKernel::new();
    kernel.fail_after(MockOp::Join, 0);
    let err = compose(&mut kernel, &params()).unwrap_err();
    assert_eq!(err.step(), BuildStep::JoinFlights);
    assert!(!err.is_capability_failure());
}
