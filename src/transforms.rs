//! Rigid-transform algebra shared by the chain model and the solvers:
//! Euler angles, quaternion interpolation and validated construction of
//! rotations and poses.
//!
//! Rotations compose by matrix product (not commutative). Poses are
//! `Isometry3<f64>` values whose inverse is the closed-form rigid-body
//! inverse, exact up to floating point and never a generic 4x4 inversion.
//!
//! The Euler convention is fixed: X-Y-Z, `R = Rx(alpha) * Ry(beta) * Rz(gamma)`.
//! The triple for a given rotation is not unique; [`Euler::from_rotation`]
//! returns both valid triples rather than hiding one.

use crate::kinematics_error::KinematicsError;
use crate::kinematic_traits::Pose;
use nalgebra::{
    Isometry3, Matrix3, Quaternion, Rotation3, Translation3, UnitQuaternion, Vector3,
};

/// Tolerance for accepting a raw matrix as orthonormal, or a raw quaternion
/// as unit norm. Input outside this tolerance fails fast; it is never
/// silently renormalized.
const INPUT_TOLERANCE: f64 = 1e-6;

/// Below this angle between quaternions SLERP falls back to normalized
/// linear interpolation (the great-circle weights degenerate to 0/0).
const SLERP_PARALLEL_DOT: f64 = 0.9995;

/// Euler angles in the X-Y-Z convention: `R = Rx(a) * Ry(b) * Rz(g)`,
/// angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euler {
    pub a: f64,
    pub b: f64,
    pub g: f64,
}

impl Euler {
    pub fn new(a: f64, b: f64, g: f64) -> Self {
        Euler { a, b, g }
    }

    /// The rotation matrix this triple represents.
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.a)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.b)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.g)
    }

    /// The unit quaternion this triple represents.
    pub fn quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_rotation_matrix(&self.rotation())
    }

    /// Both Euler triples representing the rotation: the `beta` solution in
    /// (-π/2, π/2] and the `π - beta` solution. In gimbal lock (|r02| = 1)
    /// only the sum or difference of `alpha` and `gamma` is determined;
    /// `alpha` is fixed to zero by convention and both triples coincide.
    pub fn from_rotation(r: &Rotation3<f64>) -> (Euler, Euler) {
        let sb = r[(0, 2)].clamp(-1.0, 1.0);
        if 1.0 - sb.abs() < INPUT_TOLERANCE {
            // Gimbal lock: r10 = sin(a ± g), r11 = cos(a ± g).
            let g = r[(1, 0)].atan2(r[(1, 1)]);
            let locked = Euler::new(0.0, sb.asin(), g);
            return (locked, locked);
        }
        let b1 = sb.asin();
        let b2 = std::f64::consts::PI - b1;
        // cos(b1) > 0 and cos(b2) < 0; the sign folds into atan2 arguments.
        let first = Euler::new(
            (-r[(1, 2)]).atan2(r[(2, 2)]),
            b1,
            (-r[(0, 1)]).atan2(r[(0, 0)]),
        );
        let second = Euler::new(
            r[(1, 2)].atan2(-r[(2, 2)]),
            b2,
            r[(0, 1)].atan2(-r[(0, 0)]),
        );
        (first, second)
    }
}

/// Accept a raw 3x3 matrix as a rotation, verifying orthonormality and a
/// determinant of +1. Malformed input fails fast with
/// [`KinematicsError::NonOrthonormalRotation`].
pub fn rotation_from_matrix(m: &Matrix3<f64>) -> Result<Rotation3<f64>, KinematicsError> {
    let gram = m.transpose() * m;
    let distance = (gram - Matrix3::identity()).norm();
    if distance > INPUT_TOLERANCE {
        return Err(KinematicsError::NonOrthonormalRotation(format!(
            "columns deviate from orthonormal by {:e}",
            distance
        )));
    }
    let det = m.determinant();
    if (det - 1.0).abs() > INPUT_TOLERANCE {
        return Err(KinematicsError::NonOrthonormalRotation(format!(
            "determinant is {} rather than +1",
            det
        )));
    }
    Ok(Rotation3::from_matrix_unchecked(*m))
}

/// Accept a raw quaternion as a rotation, verifying unit norm. Malformed
/// input fails fast with [`KinematicsError::NonUnitQuaternion`].
pub fn quaternion_from_raw(q: &Quaternion<f64>) -> Result<UnitQuaternion<f64>, KinematicsError> {
    let norm = q.norm();
    if (norm - 1.0).abs() > INPUT_TOLERANCE {
        return Err(KinematicsError::NonUnitQuaternion(format!(
            "norm is {} rather than 1",
            norm
        )));
    }
    Ok(UnitQuaternion::from_quaternion(*q))
}

/// Build a pose from a position and a rotation matrix.
pub fn pose_from_parts(position: &Vector3<f64>, rotation: &Rotation3<f64>) -> Pose {
    Isometry3::from_parts(
        Translation3::from(*position),
        UnitQuaternion::from_rotation_matrix(rotation),
    )
}

/// Shortest-arc spherical interpolation between two unit quaternions,
/// `t` in [0, 1]. The sign of `to` is flipped when the dot product is
/// negative so interpolation never takes the long path; the result is
/// renormalized.
pub fn slerp(
    from: &UnitQuaternion<f64>,
    to: &UnitQuaternion<f64>,
    t: f64,
) -> UnitQuaternion<f64> {
    let c1 = from.coords;
    let mut c2 = to.coords;
    let mut dot = c1.dot(&c2);
    if dot < 0.0 {
        c2 = -c2;
        dot = -dot;
    }
    if dot > SLERP_PARALLEL_DOT {
        // Nearly parallel; the normalized lerp is within rounding of slerp.
        return UnitQuaternion::from_quaternion(Quaternion::from(c1.lerp(&c2, t)).normalize());
    }
    let theta = dot.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let w1 = ((1.0 - t) * theta).sin() / sin_theta;
    let w2 = (t * theta).sin() / sin_theta;
    UnitQuaternion::from_quaternion(Quaternion::from(c1 * w1 + c2 * w2).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    fn assert_rotation_eq(a: &Rotation3<f64>, b: &Rotation3<f64>) {
        assert!(
            (a.matrix() - b.matrix()).norm() < 1e-9,
            "rotations differ:\n{}\n{}",
            a.matrix(),
            b.matrix()
        );
    }

    #[test]
    fn test_euler_round_trip_both_triples() {
        let e = Euler::new(0.3, -0.7, 1.9);
        let r = e.rotation();
        let (first, second) = Euler::from_rotation(&r);
        assert_rotation_eq(&first.rotation(), &r);
        assert_rotation_eq(&second.rotation(), &r);
        // The two triples are genuinely different representations.
        assert!((first.b - second.b).abs() > 1e-6);
    }

    #[test]
    fn test_euler_recovers_exact_triple() {
        let e = Euler::new(0.1, 0.2, 0.3);
        let (first, _) = Euler::from_rotation(&e.rotation());
        assert!((first.a - e.a).abs() < 1e-9);
        assert!((first.b - e.b).abs() < 1e-9);
        assert!((first.g - e.g).abs() < 1e-9);
    }

    #[test]
    fn test_euler_gimbal_lock() {
        let e = Euler::new(0.4, FRAC_PI_2, 0.25);
        let r = e.rotation();
        let (first, second) = Euler::from_rotation(&r);
        // Alpha is fixed to zero by convention, both triples agree and
        // still reproduce the rotation.
        assert_eq!(first.a, 0.0);
        assert_eq!(first, second);
        assert_rotation_eq(&first.rotation(), &r);
    }

    #[test]
    fn test_rotation_from_matrix_accepts_rotation() {
        let r = Euler::new(0.5, 0.6, 0.7).rotation();
        let validated = rotation_from_matrix(r.matrix()).expect("valid rotation rejected");
        assert_rotation_eq(&validated, &r);
    }

    #[test]
    fn test_rotation_from_matrix_rejects_scaled() {
        let m = Matrix3::identity() * 1.1;
        assert!(matches!(
            rotation_from_matrix(&m),
            Err(KinematicsError::NonOrthonormalRotation(_))
        ));
    }

    #[test]
    fn test_rotation_from_matrix_rejects_reflection() {
        let mut m = Matrix3::identity();
        m[(2, 2)] = -1.0; // orthonormal but determinant -1
        assert!(matches!(
            rotation_from_matrix(&m),
            Err(KinematicsError::NonOrthonormalRotation(_))
        ));
    }

    #[test]
    fn test_quaternion_from_raw() {
        assert!(quaternion_from_raw(&Quaternion::new(1.0, 0.0, 0.0, 0.0)).is_ok());
        assert!(matches!(
            quaternion_from_raw(&Quaternion::new(1.0, 1.0, 0.0, 0.0)),
            Err(KinematicsError::NonUnitQuaternion(_))
        ));
    }

    #[test]
    fn test_slerp_boundaries() {
        let q1 = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.3);
        let q2 = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.1);
        assert!(slerp(&q1, &q2, 0.0).angle_to(&q1) < 1e-9);
        assert!(slerp(&q1, &q2, 1.0).angle_to(&q2) < 1e-9);
    }

    #[test]
    fn test_slerp_stays_unit_norm() {
        let q1 = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.9);
        let q2 = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -2.2);
        for i in 0..=10 {
            let q = slerp(&q1, &q2, i as f64 / 10.0);
            assert!((q.coords.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_slerp_takes_shortest_arc() {
        let q1 = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.1);
        let q2 = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5);
        // Negating the target quaternion represents the same rotation;
        // slerp must not swing the long way around because of the sign.
        let negated = UnitQuaternion::from_quaternion(Quaternion::from(-q2.coords));
        let mid = slerp(&q1, &negated, 0.5);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3);
        assert!(mid.angle_to(&expected) < 1e-9);
    }

    #[test]
    fn test_pose_inverse_idempotence() {
        let pose = pose_from_parts(
            &Vector3::new(0.2, -1.4, 0.8),
            &Euler::new(FRAC_PI_3, -0.4, PI / 5.0).rotation(),
        );
        let round_trip = pose.inverse().inverse();
        assert!((pose.translation.vector - round_trip.translation.vector).norm() < 1e-12);
        assert!(pose.rotation.angle_to(&round_trip.rotation) < 1e-12);
    }

    #[test]
    fn test_pose_inverse_is_rigid_inverse() {
        let pose = pose_from_parts(
            &Vector3::new(1.0, 2.0, 3.0),
            &Euler::new(0.2, 0.4, 0.6).rotation(),
        );
        let inv = pose.inverse();
        // R' = R^T
        let rt = pose.rotation.to_rotation_matrix().transpose();
        assert!((inv.rotation.to_rotation_matrix().matrix() - rt.matrix()).norm() < 1e-12);
        // p' = -R^T p
        let expected = -(rt * pose.translation.vector);
        assert!((inv.translation.vector - expected).norm() < 1e-12);
    }

    #[test]
    fn test_point_application_uses_implicit_homogeneous_coordinate() {
        let pose = pose_from_parts(&Vector3::new(0.0, 0.0, 1.0), &Rotation3::identity());
        let p = pose.transform_point(&nalgebra::Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p, nalgebra::Point3::new(1.0, 2.0, 4.0));
    }
}
