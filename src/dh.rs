//! Serial chain model over Denavit-Hartenberg parameters.
//!
//! A [`SerialChain`] is an ordered list of [`Link`] descriptors from base to
//! tip plus a base transform. Each link produces a per-joint-value rigid
//! transform by the standard DH composition
//! `Rz(theta + q) * Tz(d) * Tx(a) * Rx(alpha)` (for a prismatic joint the
//! variable adds to `d` instead of `theta`). The link constants `d` and `a`
//! are also read directly by the analytic solver, which is derived for one
//! specific chain topology; that coupling is intentional.

use crate::kinematic_traits::Pose;
use crate::kinematics_error::KinematicsError;
use nalgebra::{Isometry3, Vector3};

/// Joint type of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointType {
    /// Rotation about the link z-axis; the joint value adds to `theta`.
    Revolute,
    /// Translation along the link z-axis; the joint value adds to `d`.
    Prismatic,
}

/// One Denavit-Hartenberg table row. Immutable after construction and owned
/// by the chain that declares it.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    /// Rotation offset about the previous z-axis (the joint zero position).
    pub theta: f64,
    /// Offset along the previous z-axis.
    pub d: f64,
    /// Link length along the rotated x-axis.
    pub a: f64,
    /// Twist about the rotated x-axis.
    pub alpha: f64,
    pub joint_type: JointType,
}

impl Link {
    pub fn revolute(theta: f64, d: f64, a: f64, alpha: f64) -> Self {
        Link { theta, d, a, alpha, joint_type: JointType::Revolute }
    }

    pub fn prismatic(theta: f64, d: f64, a: f64, alpha: f64) -> Self {
        Link { theta, d, a, alpha, joint_type: JointType::Prismatic }
    }

    /// The link transform evaluated at joint value `q` (radians for a
    /// revolute joint, meters for a prismatic one).
    pub fn transform(&self, q: f64) -> Isometry3<f64> {
        let (theta, d) = match self.joint_type {
            JointType::Revolute => (self.theta + q, self.d),
            JointType::Prismatic => (self.theta, self.d + q),
        };
        Isometry3::rotation(Vector3::z() * theta)
            * Isometry3::translation(0.0, 0.0, d)
            * Isometry3::translation(self.a, 0.0, 0.0)
            * Isometry3::rotation(Vector3::x() * self.alpha)
    }
}

/// Ordered sequence of links from base to tip, with a base transform
/// applied before the first link.
#[derive(Debug, Clone)]
pub struct SerialChain {
    base: Isometry3<f64>,
    links: Vec<Link>,
}

impl SerialChain {
    pub fn new(base: Isometry3<f64>) -> Self {
        SerialChain { base, links: Vec::new() }
    }

    /// Add a link at the tip of the chain. Order matters: the append order
    /// is the kinematic order from base to tip.
    pub fn append(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Number of degrees of freedom (links) in the chain.
    pub fn dof(&self) -> usize {
        self.links.len()
    }

    pub fn base(&self) -> Isometry3<f64> {
        self.base
    }

    pub fn link(&self, i: usize) -> &Link {
        &self.links[i]
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Transform of link `i` evaluated at joint value `q`.
    pub fn transform(&self, i: usize, q: f64) -> Isometry3<f64> {
        self.links[i].transform(q)
    }

    /// Forward kinematics: `base * A1(q1) * ... * An(qn)`. Pure and
    /// deterministic. Fails with [`KinematicsError::DofMismatch`] when the
    /// joint vector length does not match the chain.
    pub fn pose(&self, q: &[f64]) -> Result<Pose, KinematicsError> {
        if q.len() != self.links.len() {
            return Err(KinematicsError::DofMismatch {
                expected: self.links.len(),
                found: q.len(),
            });
        }
        let mut t = self.base;
        for (link, &qi) in self.links.iter().zip(q) {
            t *= link.transform(qi);
        }
        Ok(t)
    }
}
