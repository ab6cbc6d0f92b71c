//! Hardcoded chain descriptions for supported robots.
//!
//! The analytic solver is derived per robot family, not per parameter set:
//! each constructor here builds a chain the derivation in
//! [`crate::kinematics_impl`] is known to be valid for. Supporting an arm
//! with a different topology means deriving a new solver, not adding a
//! table entry.

use crate::constraints::Constraints;
use crate::dh::{Link, SerialChain};
use crate::kinematics_impl::SphericalWristKinematics;
use crate::utils::joints;
use nalgebra::Isometry3;
use std::f64::consts::PI;

/// ABB IRB140 with the manufacturer's positive joint directions.
///
/// Default joint limits are q1 ±180°, q2 -90..110°, q3 -230..50°,
/// q5 ±115°; joints 4 and 6 are configured for the extended ±400° range,
/// which is what makes the extended (±2π winding) solutions meaningful.
pub fn abb_irb140() -> SphericalWristKinematics {
    let mut chain = SerialChain::new(Isometry3::identity());
    chain.append(Link::revolute(0.0, 0.352, 0.07, -PI / 2.0));
    chain.append(Link::revolute(-PI / 2.0, 0.0, 0.36, 0.0));
    chain.append(Link::revolute(0.0, 0.0, 0.0, -PI / 2.0));
    chain.append(Link::revolute(0.0, 0.38, 0.0, PI / 2.0));
    chain.append(Link::revolute(0.0, 0.0, 0.0, -PI / 2.0));
    chain.append(Link::revolute(PI, 0.065, 0.0, 0.0));

    let ranges = Constraints::new(
        joints(&[-180.0, -90.0, -230.0, -400.0, -115.0, -400.0]),
        joints(&[180.0, 110.0, 50.0, 400.0, 115.0, 400.0]),
    );

    // The chain above is known to satisfy the topology checks.
    match SphericalWristKinematics::new(chain, ranges) {
        Ok(kinematics) => kinematics,
        Err(error) => unreachable!("IRB140 chain rejected: {}", error),
    }
}
