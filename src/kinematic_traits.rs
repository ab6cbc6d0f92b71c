//! Defines the core types and the `Kinematics` trait implemented by solvers
//! and by wrappers that cascade around them (tool, base).

use nalgebra::Isometry3;

/// Pose of the robot tool center point: Cartesian position plus a rotation
/// quaternion. Inversion of an `Isometry3` is the closed-form rigid-body
/// inverse (transposed rotation, rotated-and-negated translation), so poses
/// can be composed and inverted without generic matrix inversion.
/// ```
/// use nalgebra::{Isometry3, Translation3, UnitQuaternion};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion must be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(
///     nalgebra::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let pose = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Six joint values, in radians, ordered from base to tip.
pub type Joints = [f64; 6];

/// An ordered set of alternative joint configurations, each reproducing the
/// same tool pose. Order is deterministic and part of the contract: callers
/// chaining successive poses rely on it being reproducible.
pub type Solutions = Vec<Joints>;

/// All joints at zero.
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

pub const J1: usize = 0;
pub const J2: usize = 1;
pub const J3: usize = 2;
pub const J4: usize = 3;
pub const J5: usize = 4;
pub const J6: usize = 5;

/// Kinematic singularity of the arm. Only the wrist singularity exists for
/// the supported family (J5 = 0 or ±180°, J4 and J6 axes aligned).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singularity {
    /// The wrist axes are aligned; the J4/J6 split is not independently
    /// determined and solutions for them are selected by convention.
    WristAligned,
}

/// Inverse and forward kinematics over 6 joint values. Implementations are
/// pure value computations: no shared mutable state, safe to call from
/// multiple threads.
pub trait Kinematics: Send + Sync {
    /// Find all joint configurations placing the tool center point at the
    /// given pose, with J4 and J6 kept inside (-π, π]. Returns an empty set
    /// if the pose is out of reach; this is a normal outcome, not an error.
    fn inverse(&self, pose: &Pose) -> Solutions;

    /// Like [`Kinematics::inverse`], additionally enumerating the ±2π
    /// windings of J4 and J6 for robots whose mechanical range on those
    /// joints exceeds one revolution. A downstream range filter or
    /// continuity selector picks among the windings.
    fn inverse_extended(&self, pose: &Pose) -> Solutions;

    /// Inverse kinematics ordered by proximity to the previous joint
    /// configuration (closest first), enumerating extended windings so the
    /// continuation never jumps a revolution when the previous position
    /// was already wound up.
    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Solutions;

    /// Pose of the tool center point for the given joint values.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Report whether the configuration is kinematically singular.
    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity>;
}
