//! Shaft frame resolution.
//!
//! Turns a selected cylindrical face into the local helical frame every
//! other construction step works in: a signed axis, an orthonormal radial
//! basis and the centre of the end cap the blade starts from.

use std::collections::HashSet;

use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

use host_kernel::{BodyId, ComponentId, FaceId, HostIntrospect, SurfaceGeometry};
use screw_types::StartEnd;

use crate::config::BuildConfig;
use crate::math::{axis_projection, point3, safe_perpendicular, unit_direction_from_angle, vec3};
use crate::types::FrameError;

/// Local coordinate frame of the selected shaft. Immutable per build.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaftFrame {
    /// A point on the cylinder axis.
    pub origin: Point3<f64>,
    /// Unit axis, pointing from the start cap into the shaft.
    pub axis_direction: Vector3<f64>,
    /// Unit radial direction at phase 0.
    pub basis_u: Vector3<f64>,
    /// `axis_direction × basis_u`.
    pub basis_v: Vector3<f64>,
    /// Centre of the start cap, on the axis.
    pub start_center: Point3<f64>,
    pub radius: f64,
    pub shaft_body: BodyId,
    pub component: ComponentId,
}

impl ShaftFrame {
    /// Unit radial direction at `angle` radians from `basis_u`.
    pub fn radial_direction(&self, angle: f64, tolerance: f64) -> Option<Vector3<f64>> {
        unit_direction_from_angle(&self.basis_u, &self.basis_v, angle, tolerance)
    }

    /// Point `axial` along the axis from the start centre.
    pub fn point_on_axis(&self, axial: f64) -> Point3<f64> {
        self.start_center + self.axis_direction * axial
    }
}

struct Cylinder {
    origin: Point3<f64>,
    axis: Vector3<f64>,
    radius: f64,
}

fn cylinder_of(introspect: &dyn HostIntrospect, face: FaceId) -> Result<Cylinder, FrameError> {
    if introspect.is_assembly_proxy(face) {
        return Err(FrameError::AssemblyProxy);
    }
    match introspect.face_geometry(face)? {
        SurfaceGeometry::Cylinder {
            origin,
            axis,
            radius,
        } => {
            let axis = vec3(axis);
            let len = axis.norm();
            if len < 1e-12 {
                return Err(FrameError::DegenerateBasis);
            }
            Ok(Cylinder {
                origin: point3(origin),
                axis: axis / len,
                radius,
            })
        }
        other => Err(FrameError::NotCylindrical {
            found: other.kind_name().to_string(),
        }),
    }
}

/// Radius of the selected shaft face, checked the same way as the frame.
pub fn shaft_radius(introspect: &dyn HostIntrospect, face: FaceId) -> Result<f64, FrameError> {
    Ok(cylinder_of(introspect, face)?.radius)
}

/// Planar faces adjacent to `face` whose normal is (anti)parallel to `axis`.
fn end_cap_candidates(
    introspect: &dyn HostIntrospect,
    face: FaceId,
    axis: &Vector3<f64>,
    threshold: f64,
) -> Vec<FaceId> {
    let mut seen = HashSet::new();
    let mut caps = Vec::new();
    for edge in introspect.face_edges(face) {
        for neighbour in introspect.edge_faces(edge) {
            if neighbour == face || seen.contains(&neighbour) {
                continue;
            }
            let Ok(SurfaceGeometry::Plane { normal, .. }) = introspect.face_geometry(neighbour) else {
                continue;
            };
            let normal = vec3(normal);
            let len = normal.norm();
            if len < 1e-12 || (normal / len).dot(axis).abs() < threshold {
                continue;
            }
            seen.insert(neighbour);
            caps.push(neighbour);
        }
    }
    caps
}

/// Resolve the helical frame of a selected shaft face.
///
/// The start cap is the adjacent planar face with the smallest (`End1`) or
/// largest (`End2`) projection on the cylinder axis. For `End2` the axis is
/// reversed so the blade always grows into the shaft.
#[instrument(skip(introspect, config))]
pub fn resolve_shaft_frame(
    introspect: &dyn HostIntrospect,
    face: FaceId,
    start_end: StartEnd,
    config: &BuildConfig,
) -> Result<ShaftFrame, FrameError> {
    let cylinder = cylinder_of(introspect, face)?;
    let axis = cylinder.axis;

    let caps = end_cap_candidates(introspect, face, &axis, config.end_cap_parallel_threshold);
    let mut projections = Vec::with_capacity(caps.len());
    for cap in &caps {
        let p = point3(introspect.point_on_face(*cap)?);
        projections.push(axis_projection(&cylinder.origin, &axis, &p));
    }
    let pick = if start_end.prefers_max() {
        projections.iter().copied().reduce(f64::max)
    } else {
        projections.iter().copied().reduce(f64::min)
    };
    let start_scalar = pick.ok_or(FrameError::NoEndCaps)?;
    debug!(candidates = caps.len(), start_scalar, "end cap resolved");

    let axis_direction = if start_end.prefers_max() { -axis } else { axis };
    let start_center = cylinder.origin + axis * start_scalar;

    let shaft_point = point3(introspect.point_on_face(face)?);
    let foot = cylinder.origin + axis * axis_projection(&cylinder.origin, &axis, &shaft_point);
    let radial = shaft_point - foot;
    let mut basis_u = if radial.norm() < config.basis_tolerance {
        safe_perpendicular(&axis_direction)
    } else {
        radial.normalize()
    };
    let mut basis_v = axis_direction.cross(&basis_u);
    if basis_v.norm() < config.basis_tolerance {
        basis_u = safe_perpendicular(&axis_direction);
        basis_v = axis_direction.cross(&basis_u);
    }
    if basis_v.norm() < config.basis_tolerance {
        return Err(FrameError::DegenerateBasis);
    }
    let basis_v = basis_v.normalize();

    let shaft_body = introspect.face_body(face)?;
    let component = introspect.body_component(shaft_body)?;

    Ok(ShaftFrame {
        origin: cylinder.origin,
        axis_direction,
        basis_u,
        basis_v,
        start_center,
        radius: cylinder.radius,
        shaft_body,
        component,
    })
}
