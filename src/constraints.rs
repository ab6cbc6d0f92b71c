//! Per-joint motion ranges and the optional range-filtering post-pass.
//!
//! Ranges are plain `[min, max]` pairs in radians and may span more than one
//! revolution (industrial wrist joints often allow ±400°). They are not
//! enforced during raw solving; the solver only consults them when deciding
//! whether an elbow angle needs renormalization. Filtering is a separate
//! pass over a finished solution set.

use crate::kinematic_traits::{Joints, Solutions};
use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

/// Lower and upper joint limits, indexed like the joints themselves.
#[derive(Debug, Clone)]
pub struct Constraints {
    pub from: Joints,
    pub to: Joints,
}

impl Constraints {
    /// Ranges where `from[i] <= to[i]`; a range wider than 2π admits
    /// several windings of the same angle.
    pub fn new(from: Joints, to: Joints) -> Self {
        Constraints { from, to }
    }

    /// Symmetric ±π ranges for all joints.
    pub fn half_turns() -> Self {
        Constraints { from: [-PI; 6], to: [PI; 6] }
    }

    pub fn in_range(&self, joint: usize, angle: f64) -> bool {
        angle >= self.from[joint] && angle <= self.to[joint]
    }

    /// True when every joint value lies inside its declared range as given,
    /// without rewinding.
    pub fn compliant(&self, angles: &Joints) -> bool {
        (0..6).all(|j| self.in_range(j, angles[j]))
    }

    /// Bring one joint value into range by adding an integer multiple of
    /// 2π, preferring the smallest rewind. `None` when no winding fits.
    pub fn refit_joint(&self, joint: usize, angle: f64) -> Option<f64> {
        if self.in_range(joint, angle) {
            return Some(angle);
        }
        let k_min = ((self.from[joint] - angle) / TWO_PI).ceil() as i64;
        let k_max = ((self.to[joint] - angle) / TWO_PI).floor() as i64;
        if k_min > k_max {
            return None;
        }
        // The admissible k interval never straddles 0 here (angle is out of
        // range), so the end nearest zero is the smallest rewind.
        let k = if k_min.abs() <= k_max.abs() { k_min } else { k_max };
        Some(angle + k as f64 * TWO_PI)
    }

    /// Rewind a whole configuration into range. `None` when any joint
    /// cannot be brought back with whole revolutions.
    pub fn refit(&self, angles: &Joints) -> Option<Joints> {
        let mut result = *angles;
        for j in 0..6 {
            result[j] = self.refit_joint(j, angles[j])?;
        }
        Some(result)
    }

    /// Range-filtering post-pass: each configuration is first rewound by
    /// whole revolutions where needed, then pruned if any joint still falls
    /// outside its range. Order of surviving solutions is preserved.
    pub fn filter(&self, solutions: &Solutions) -> Solutions {
        solutions.iter().filter_map(|s| self.refit(s)).collect()
    }
}
