//! Closed-form inverse kinematics for 6 axis serial robots with a spherical
//! wrist.
//!
//! The solver decouples the problem: the wrist center point determines
//! joints 1-3 (azimuth branch plus the elbow-up/elbow-down triangle), then
//! each arm branch determines the two wrist branches for joints 4-6 from the
//! residual rotation. The trigonometric formulas are derived for one chain
//! topology (nonzero link lengths on rows 2 and 4, spherical wrist with
//! intersecting axes); the constructor refuses chains the derivation does
//! not cover. A new robot family requires a new derivation, not different
//! parameters.

use crate::constraints::Constraints;
use crate::dh::{JointType, SerialChain};
use crate::kinematic_traits::{
    Joints, Kinematics, Pose, Singularity, Solutions, J2, J3, J5,
};
use crate::kinematics_error::KinematicsError;
use crate::utils::joint_distance;
use nalgebra::{Isometry3, Point3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

const TWO_PI: f64 = 2.0 * PI;

/// Below this distance of |Q33| from 1 the wrist is treated as aligned and
/// the degenerate branch formulas apply.
const WRIST_ALIGNMENT_THRESHOLD: f64 = 1e-6;

/// Azimuth candidates are rounded to this many decimals before
/// deduplication, canonicalizing values that differ only by floating point
/// noise after ±π wrapping.
const AZIMUTH_DECIMALS: f64 = 1e7;

/// The ±2π winding offsets applied to (J4, J6) in extended mode, in the
/// order they are emitted. Only meaningful for joints whose mechanical
/// range exceeds one revolution.
const WINDINGS: [(f64, f64); 9] = [
    (0.0, 0.0),
    (TWO_PI, 0.0),
    (-TWO_PI, 0.0),
    (0.0, TWO_PI),
    (0.0, -TWO_PI),
    (TWO_PI, TWO_PI),
    (-TWO_PI, -TWO_PI),
    (TWO_PI, -TWO_PI),
    (-TWO_PI, TWO_PI),
];

/// One wrist branch: values for joints 4-6.
#[derive(Debug, Clone, Copy)]
struct WristBranch {
    q4: f64,
    q5: f64,
    q6: f64,
}

/// Analytic solver for a spherical-wrist chain.
pub struct SphericalWristKinematics {
    chain: SerialChain,
    ranges: Constraints,
    tool: Isometry3<f64>,
    /// Upper arm length, second DH row.
    l2: f64,
    /// Forearm length, fourth DH row offset.
    l3: f64,
    /// Offset from the wrist center to the tool flange, last DH row.
    l6: f64,
}

impl SphericalWristKinematics {
    /// Create a solver for the given chain with an identity tool transform.
    /// The declared joint ranges are consulted when deciding whether an
    /// elbow angle needs renormalization; they do not prune raw solutions.
    pub fn new(chain: SerialChain, ranges: Constraints) -> Result<Self, KinematicsError> {
        Self::new_with_tool(chain, ranges, Isometry3::identity())
    }

    /// Create a solver planning for a tool center point displaced from the
    /// flange by `tool`.
    pub fn new_with_tool(
        chain: SerialChain,
        ranges: Constraints,
        tool: Isometry3<f64>,
    ) -> Result<Self, KinematicsError> {
        if chain.dof() != 6 {
            return Err(KinematicsError::UnsupportedChain(format!(
                "the analytic solver needs 6 joints, chain has {}",
                chain.dof()
            )));
        }
        if chain.links().iter().any(|l| l.joint_type != JointType::Revolute) {
            return Err(KinematicsError::UnsupportedChain(
                "all joints must be revolute".to_string(),
            ));
        }
        // The derivation assumes the geometry lives in rows 2 and 4 and the
        // last three axes intersect in a point (spherical wrist).
        let spherical = chain.link(2).a == 0.0
            && chain.link(2).d == 0.0
            && chain.link(3).a == 0.0
            && chain.link(4).a == 0.0
            && chain.link(4).d == 0.0;
        if !spherical {
            return Err(KinematicsError::UnsupportedChain(
                "wrist axes do not intersect in a point".to_string(),
            ));
        }
        let l2 = chain.link(1).a;
        let l3 = chain.link(3).d;
        let l6 = chain.link(5).d;
        if l2 <= 0.0 || l3 <= 0.0 {
            return Err(KinematicsError::UnsupportedChain(
                "link lengths on DH rows 2 and 4 must be positive".to_string(),
            ));
        }
        Ok(SphericalWristKinematics { chain, ranges, tool, l2, l3, l6 })
    }

    pub fn chain(&self) -> &SerialChain {
        &self.chain
    }

    pub fn ranges(&self) -> &Constraints {
        &self.ranges
    }

    /// All solution branches for a pose. Branch order is deterministic:
    /// azimuth candidates in emission order (base value, then the wrapped
    /// ±π variant), elbow-up before elbow-down, +J5 wrist branch before
    /// -J5, winding offsets in table order.
    fn compute(&self, pose: &Pose, extended: bool) -> Solutions {
        // Work on the flange pose in the base frame: strip the mounting
        // transform and the tool offset.
        let t_end = self.chain.base().inverse() * pose * self.tool.inverse();
        let mut result = Solutions::new();
        for arm in self.position_branches(&t_end) {
            for wrist in self.solve_wrist(&arm, &t_end) {
                if extended {
                    for (dq4, dq6) in WINDINGS {
                        result.push([
                            arm[0], arm[1], arm[2],
                            wrist.q4 + dq4, wrist.q5, wrist.q6 + dq6,
                        ]);
                    }
                } else {
                    result.push([arm[0], arm[1], arm[2], wrist.q4, wrist.q5, wrist.q6]);
                }
            }
        }
        result
    }

    /// Candidate values for joints 1-3. Infeasible branches (wrist center
    /// outside the arm triangle) are dropped here; an empty result means
    /// the target is out of reach.
    fn position_branches(&self, t_end: &Pose) -> Vec<[f64; 3]> {
        let rotation = t_end.rotation.to_rotation_matrix();
        let z_end: Vector3<f64> = rotation.matrix().column(2).into_owned();
        // Retract from the flange along its approach axis to the point
        // where the wrist axes intersect.
        let pm = Point3::from(t_end.translation.vector - self.l6 * z_end);

        // If q1 reaches the wrist center, so does q1 ± π (arm folded over
        // the base). Wrapping can alias the variants onto each other;
        // canonicalize by rounding before comparing.
        let base_azimuth = pm.y.atan2(pm.x);
        let mut azimuths: Vec<f64> = Vec::with_capacity(3);
        let mut seen: Vec<i64> = Vec::with_capacity(3);
        for candidate in [
            base_azimuth,
            normalize_angle(base_azimuth + PI),
            normalize_angle(base_azimuth - PI),
        ] {
            let key = (candidate * AZIMUTH_DECIMALS).round() as i64;
            if !seen.contains(&key) {
                seen.push(key);
                azimuths.push(candidate);
            }
        }

        let mut branches = Vec::with_capacity(azimuths.len() * 2);
        for q1 in azimuths {
            match self.solve_elbow(q1, &pm) {
                Some(elbows) => {
                    for (q2, q3) in elbows {
                        branches.push([q1, q2, q3]);
                    }
                }
                None => {
                    tracing::debug!(
                        q1,
                        "position branch infeasible, wrist center out of the workspace"
                    );
                }
            }
        }
        branches
    }

    /// Solve the planar 2-link triangle for joints 2 and 3 given an azimuth
    /// branch, elbow-up first. `None` when the triangle inequality fails.
    fn solve_elbow(&self, q1: f64, pm: &Point3<f64>) -> Option<[(f64, f64); 2]> {
        // Express the wrist center in the link-1 frame.
        let a01 = self.chain.transform(0, q1);
        let p1 = a01.inverse_transform_point(pm);
        let r = p1.x.hypot(p1.y);
        let beta = (-p1.y).atan2(p1.x);

        let (l2, l3) = (self.l2, self.l3);
        let a = (l2 * l2 + r * r - l3 * l3) / (2.0 * r * l2);
        let b = (l2 * l2 + l3 * l3 - r * r) / (2.0 * l2 * l3);
        if a.abs() >= 1.0 || b.abs() >= 1.0 {
            return None;
        }
        let gamma = a.acos();
        let eta = b.acos();

        let q2_up = FRAC_PI_2 - beta - gamma;
        let q2_down = FRAC_PI_2 - beta + gamma;
        let q3_up = FRAC_PI_2 - eta;
        let q3_down = eta - 3.0 * FRAC_PI_2;
        Some([
            (self.rewrap(J2, q2_up), self.rewrap(J3, q3_up)),
            (self.rewrap(J2, q2_down), self.rewrap(J3, q3_down)),
        ])
    }

    /// Renormalize only when the raw value exceeds the declared range, so
    /// already-valid solutions are not needlessly perturbed.
    fn rewrap(&self, joint: usize, angle: f64) -> f64 {
        if self.ranges.in_range(joint, angle) {
            angle
        } else {
            normalize_angle(angle)
        }
    }

    /// Solve joints 4-6 from the residual rotation the wrist must supply.
    /// Always returns exactly two branches.
    fn solve_wrist(&self, arm: &[f64; 3], t_end: &Pose) -> [WristBranch; 2] {
        let a03 = self.chain.transform(0, arm[0])
            * self.chain.transform(1, arm[1])
            * self.chain.transform(2, arm[2]);
        // Q = (A1 A2 A3)^-1 * T_end = A4 A5 A6.
        let residual = a03.inverse() * t_end;
        let m = residual.rotation.to_rotation_matrix();
        let q33 = m[(2, 2)];

        if 1.0 - q33.abs() > WRIST_ALIGNMENT_THRESHOLD {
            let q5 = q33.clamp(-1.0, 1.0).acos();
            let branch = |s: f64, q5: f64| WristBranch {
                q4: (-s * m[(1, 2)]).atan2(-s * m[(0, 2)]),
                q5,
                q6: (s * m[(2, 1)]).atan2(-s * m[(2, 0)]),
            };
            [branch(1.0, q5), branch(-1.0, -q5)]
        } else {
            // Aligned wrist: only the sum of J4 and J6 is determined. Fix
            // J4 to 0 and π by convention and solve J6 from the remainder.
            tracing::warn!(
                q1 = arm[0], q2 = arm[1], q3 = arm[2],
                "degenerate wrist solution, J4/J6 split is not determined"
            );
            let q5 = q33.clamp(-1.0, 1.0).acos();
            let q6 = m[(0, 1)].atan2(-m[(1, 1)]);
            [
                WristBranch { q4: 0.0, q5, q6 },
                WristBranch { q4: PI, q5, q6: q6 - PI },
            ]
        }
    }
}

impl Kinematics for SphericalWristKinematics {
    fn inverse(&self, pose: &Pose) -> Solutions {
        self.compute(pose, false)
    }

    fn inverse_extended(&self, pose: &Pose) -> Solutions {
        self.compute(pose, true)
    }

    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Solutions {
        let mut solutions = self.compute(pose, true);
        solutions.sort_by(|a, b| {
            joint_distance(a, previous).total_cmp(&joint_distance(b, previous))
        });
        solutions
    }

    fn forward(&self, qs: &Joints) -> Pose {
        let mut t = self.chain.base();
        for (i, &q) in qs.iter().enumerate() {
            t *= self.chain.transform(i, q);
        }
        t * self.tool
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        // Same criterion the wrist solver applies to cos(J5).
        if 1.0 - qs[J5].cos().abs() < WRIST_ALIGNMENT_THRESHOLD {
            Some(Singularity::WristAligned)
        } else {
            None
        }
    }
}

/// Wrap an angle into (-π, π].
fn normalize_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}
