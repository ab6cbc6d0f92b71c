use std::f64::consts::PI;
use anyhow::Result;
use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, Pose, JOINTS_AT_ZERO};
use rs_dh_kinematics::robots::abb_irb140;
use rs_dh_kinematics::utils::{dump_joints, dump_solutions, select_closest};

/// Usage example.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let robot = abb_irb140();
    let joints: Joints = [0.1, 0.4, -0.6, 0.3, 0.7, -0.2]; // Joints are alias of [f64; 6]
    println!("Commanded joints:");
    dump_joints(&joints);

    println!("All configurations reaching the same pose:");
    let pose: Pose = robot.forward(&joints); // Pose is alias of nalgebra::Isometry3<f64>
    let solutions = robot.inverse(&pose); // Solutions is alias of Vec<Joints>
    dump_solutions(&solutions);

    println!("Only solutions within the declared joint ranges:");
    dump_solutions(&robot.ranges().filter(&solutions));

    println!("Sorted by proximity when continuing from a nearby configuration:");
    let when_continuing_from: Joints = [0.1, 0.42, -0.58, 0.3, 0.72, -0.2];
    let solutions = robot.inverse_continuing(&pose, &when_continuing_from);
    dump_solutions(&solutions);
    if let Some(closest) = select_closest(&solutions, &when_continuing_from) {
        println!("Closest configuration:");
        dump_joints(&closest);
    }

    println!("Extended solutions with the ±360° windings of J4 and J6:");
    let extended = robot.ranges().filter(&robot.inverse_extended(&pose));
    dump_solutions(&extended);

    println!("Pose with the wrist axes aligned (J5 = 0):");
    let aligned: Joints = [0.0, 0.3, -0.5, 0.4, 0.0, 0.6];
    match robot.kinematic_singularity(&aligned) {
        Some(_) => println!("J4 and J6 are collinear, only their sum is determined"),
        None => println!("no alignment"),
    }
    let pose = robot.forward(&aligned);
    let solutions = robot.inverse_continuing(&pose, &JOINTS_AT_ZERO);
    dump_solutions(&solutions);

    println!("Pose outside the reachable workspace yields no solutions:");
    let far = Pose::translation(10.0, 0.0, 0.0);
    let solutions = robot.inverse(&far);
    assert!(solutions.is_empty());
    dump_solutions(&solutions);

    println!("A joint set a quarter turn from zero on the base:");
    let quarter: Joints = [PI / 2.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    dump_joints(&quarter);
    println!("reaches:");
    let pose = robot.forward(&quarter);
    println!(
        "  [{:.3}, {:.3}, {:.3}]",
        pose.translation.x, pose.translation.y, pose.translation.z
    );

    Ok(())
}
