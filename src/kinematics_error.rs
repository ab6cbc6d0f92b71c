//! Error handling for chain construction and malformed kinematic input.
//!
//! Only malformed input is an error. An unreachable target is not: the
//! solver drops the infeasible branch and may return an empty solution set,
//! which callers must treat as a normal outcome.

/// Unified error for DOF mismatches and invalid rotation input.
#[derive(Debug)]
pub enum KinematicsError {
    /// Joint vector length does not match the chain's degrees of freedom.
    DofMismatch { expected: usize, found: usize },
    /// A raw 3x3 matrix was passed where a rotation is required, but its
    /// columns are not orthonormal (or the determinant is not +1).
    NonOrthonormalRotation(String),
    /// A raw quaternion was passed where a unit quaternion is required.
    NonUnitQuaternion(String),
    /// The chain does not have the topology the analytic solver is derived
    /// for (6 revolute joints with a spherical wrist).
    UnsupportedChain(String),
}

impl std::fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            KinematicsError::DofMismatch { expected, found } =>
                write!(f, "DOF mismatch: chain has {} joints, got {} values", expected, found),
            KinematicsError::NonOrthonormalRotation(ref msg) =>
                write!(f, "Not an orthonormal rotation: {}", msg),
            KinematicsError::NonUnitQuaternion(ref msg) =>
                write!(f, "Not a unit quaternion: {}", msg),
            KinematicsError::UnsupportedChain(ref msg) =>
                write!(f, "Unsupported chain topology: {}", msg),
        }
    }
}

impl std::error::Error for KinematicsError {}
