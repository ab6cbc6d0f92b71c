//! Helper functions

use crate::kinematic_traits::{Joints, Solutions};
use nalgebra::Isometry3;

/// Convert array of f32's in degrees to Joints
/// that are array of f64's in radians
pub fn joints(angles: &[f32; 6]) -> Joints {
    std::array::from_fn(|i| (angles[i] as f64).to_radians())
}

/// Convert joints that are array of f64's in radians to
/// array of f32's in degrees
pub fn to_degrees(angles: &Joints) -> [f32; 6] {
    std::array::from_fn(|i| angles[i].to_degrees() as f32)
}

/// Euclidean distance between two configurations in joint space.
pub fn joint_distance(from: &Joints, to: &Joints) -> f64 {
    (0..6)
        .map(|i| (from[i] - to[i]) * (from[i] - to[i]))
        .sum::<f64>()
        .sqrt()
}

/// Pick the solution closest to a reference configuration in joint space;
/// `None` when the solution set is empty. Used by callers chaining
/// successive poses into a path.
pub fn select_closest(solutions: &Solutions, reference: &Joints) -> Option<Joints> {
    solutions
        .iter()
        .min_by(|a, b| joint_distance(a, reference).total_cmp(&joint_distance(b, reference)))
        .copied()
}

/// Print joint values for all solutions, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_solutions(solutions: &Solutions) {
    if solutions.is_empty() {
        println!("No solutions");
    }
    for solution in solutions {
        let row: Vec<String> = solution
            .iter()
            .map(|q| format!("{:5.2}", q.to_degrees()))
            .collect();
        println!("[{}]", row.join(" "));
    }
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let row: Vec<String> = joints
        .iter()
        .map(|q| format!("{:5.2}", q.to_degrees()))
        .collect();
    println!("[{}]", row.join(" "));
}

pub fn dump_pose(isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let rotation = isometry.rotation;
    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}

/// Panics when two poses differ more than the given tolerances, dumping
/// both poses first. Intended for tests.
pub fn assert_pose_eq(
    ta: &Isometry3<f64>,
    tb: &Isometry3<f64>,
    distance_tolerance: f64,
    angular_tolerance: f64,
) -> bool {
    fn bad(ta: &Isometry3<f64>, tb: &Isometry3<f64>) {
        dump_pose(ta);
        dump_pose(tb);
    }

    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);

    if translation_distance.abs() > distance_tolerance {
        bad(ta, tb);
        panic!("Poses have too different translations");
    }

    if angular_distance.abs() > angular_tolerance {
        bad(ta, tb);
        panic!("Poses have too different angles");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joints_degree_round_trip() {
        let degrees: [f32; 6] = [0.0, 30.0, -45.0, 90.0, -115.0, 180.0];
        let radians = joints(&degrees);
        assert!((radians[1] - std::f64::consts::FRAC_PI_6).abs() < 1e-6);
        let back = to_degrees(&radians);
        for i in 0..6 {
            assert!((back[i] - degrees[i]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_joint_distance() {
        let a = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let b = [3.0, 0.0, 4.0, 0.0, 0.0, 0.0];
        assert!((joint_distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_select_closest() {
        let reference = [0.1, 0.0, 0.0, 0.0, 0.0, 0.0];
        let solutions = vec![
            [2.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.2, 0.0, 0.0, 0.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ];
        assert_eq!(select_closest(&solutions, &reference), Some(solutions[1]));
    }

    #[test]
    fn test_select_closest_empty_is_none() {
        assert_eq!(select_closest(&Vec::new(), &[0.0; 6]), None);
    }
}
