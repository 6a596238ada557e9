//! Small vector helpers shared by the frame and helix code.

use nalgebra::{Point3, Vector3};

/// Convert a kernel-boundary array to a vector.
pub fn vec3(a: [f64; 3]) -> Vector3<f64> {
    Vector3::new(a[0], a[1], a[2])
}

/// Convert a kernel-boundary array to a point.
pub fn point3(a: [f64; 3]) -> Point3<f64> {
    Point3::new(a[0], a[1], a[2])
}

pub fn vec_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

pub fn point_array(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Signed distance of `point` along `axis` measured from `origin`.
pub fn axis_projection(origin: &Point3<f64>, axis: &Vector3<f64>, point: &Point3<f64>) -> f64 {
    (point - origin).dot(axis)
}

/// A unit vector perpendicular to `axis`: axis × X, or axis × Y when
/// `axis` is (nearly) parallel to X.
pub fn safe_perpendicular(axis: &Vector3<f64>) -> Vector3<f64> {
    let mut perp = axis.cross(&Vector3::x());
    if perp.norm() < 1e-6 {
        perp = axis.cross(&Vector3::y());
    }
    perp.normalize()
}

/// cos(angle)·u + sin(angle)·v, normalised. `None` when the combination is
/// shorter than `tolerance`.
pub fn unit_direction_from_angle(
    basis_u: &Vector3<f64>,
    basis_v: &Vector3<f64>,
    angle: f64,
    tolerance: f64,
) -> Option<Vector3<f64>> {
    let direction = basis_u * angle.cos() + basis_v * angle.sin();
    let len = direction.norm();
    if len < tolerance {
        return None;
    }
    Some(direction / len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perpendicular_of_z_is_unit_and_orthogonal() {
        let z = Vector3::z();
        let p = safe_perpendicular(&z);
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.dot(&z), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn perpendicular_of_x_falls_back_to_y_cross() {
        let p = safe_perpendicular(&Vector3::x());
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn direction_from_angle_quarter_turn() {
        let d = unit_direction_from_angle(&Vector3::x(), &Vector3::y(), std::f64::consts::FRAC_PI_2, 1e-9)
            .unwrap();
        assert_relative_eq!(d, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn direction_from_degenerate_basis_is_none() {
        let zero = Vector3::zeros();
        assert!(unit_direction_from_angle(&zero, &zero, 0.3, 1e-9).is_none());
    }

    #[test]
    fn projection_is_signed() {
        let o = Point3::origin();
        let axis = Vector3::z();
        assert_relative_eq!(axis_projection(&o, &axis, &Point3::new(5.0, 1.0, -3.0)), -3.0);
    }
}
