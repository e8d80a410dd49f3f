//! Helper functions

use crate::kinematic_traits::{Joints, J1, J2, J3};
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Checks if all elements in the joint configuration are finite
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Wraps a revolute angle into [0, 2 pi)
pub fn wrap_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * PI;
    ((angle % two_pi) + two_pi) % two_pi
}

/// Converts ```nalgebra::Vector3<f64>``` to Joints ([f64; 3])
pub fn vector3_to_joints(v: Vector3<f64>) -> Joints {
    [v[0], v[1], v[2]]
}

/// Converts ```Joints ([f64; 3])``` to a ```Vector3<f64>```
pub fn joints_to_vector3(j: Joints) -> Vector3<f64> {
    Vector3::new(j[0], j[1], j[2])
}

/// Print joint values, the revolute angles converted to degrees, the
/// prismatic offset as is.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    println!(
        "[{:6.2} {:6.2} | {:6.3}]",
        joints[J1].to_degrees(),
        joints[J2].to_degrees(),
        joints[J3]
    );
}
