//! Rust implementation of forward and closed-form inverse kinematic solutions for
//! six-axis industrial robots with a spherical wrist, modelled as Denavit-Hartenberg
//! chains.
//!
//! The solver decouples the problem the classical way: the wrist center position
//! determines the first three joints (base azimuth and the planar elbow triangle),
//! and the residual rotation determines the three wrist joints. All candidate
//! branches are enumerated, so a reachable pose yields up to eight distinct
//! configurations, more when the extended ±360° windings of joints 4 and 6 are
//! requested.
//!
//! # Features
//!
//! - All returned solutions are valid and cross-checked with forward kinematics.
//! - Joint angles can be checked against per-joint ranges, keeping only compliant
//!   solutions.
//! - To generate a trajectory of the robot (sequence of poses), it is possible to use
//!   "previous joint positions" as additional input; solutions are then sorted by
//!   proximity to them (closest first).
//! - When the wrist axes align (J5 at 0° or ±180°), the solver still returns
//!   configurations that reproduce the pose rather than failing, and the alignment
//!   can be queried separately.
//! - The robot can be equipped with a tool and placed on a base, planning for the
//!   desired location and orientation of the tool center point (TCP) rather than
//!   any part of the robot.
//! - Conversions between rotation matrices, unit quaternions and X-Y-Z Euler
//!   triples, with both Euler families recovered and gimbal lock handled.

pub mod kinematic_traits;
pub mod kinematics_error;
pub mod transforms;
pub mod dh;
pub mod kinematics_impl;
pub mod constraints;
pub mod robots;
pub mod tool;
pub mod utils;
