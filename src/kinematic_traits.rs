//! Common types and the kinematics trait for the 3 DOF SCARA arm.

use nalgebra::{Matrix3, Vector3};
use std::fmt;

/// Joint configuration of the arm: two revolute angles in radians and the
/// prismatic offset of the pen axis. The fixed-size array makes the dimension
/// a compile-time property; only data arriving through slices (files, wire)
/// needs the runtime check in [joints_from_slice].
pub type Joints = [f64; 3];

/// Cartesian position of the end effector. The z component is the prismatic
/// offset, the x and y components live in the drawing plane.
pub type Position = Vector3<f64>;

/// Index of the shoulder joint in [Joints]
pub const J1: usize = 0;
/// Index of the elbow joint in [Joints]
pub const J2: usize = 1;
/// Index of the prismatic pen axis in [Joints]
pub const J3: usize = 2;

pub const JOINTS_AT_ZERO: Joints = [0.0, 0.0, 0.0];

/// Default convergence tolerance for target tracking, in drawing plane units.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Defines the singularity of the arm in the given joint configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singularity {
    /// Both links aligned (elbow fully stretched or fully folded, sin q2 = 0).
    /// The Jacobian loses rank and only the pseudo-inverse can produce
    /// joint velocities.
    Aligned,
}

/// Errors reported by the kinematic control core.
#[derive(Debug)]
pub enum KinematicsError {
    /// A joint or velocity vector of the wrong dimension was supplied.
    /// Checked eagerly, before any computation.
    InvalidDimension { expected: usize, found: usize },

    /// The Jacobian is not invertible and the pseudo-inverse fallback
    /// was not enabled by the caller.
    Singular,

    /// The SVD-based pseudo-inverse could not be computed either.
    PseudoInverseFailed(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KinematicsError::InvalidDimension { expected, found } =>
                write!(f, "Invalid dimension: expected {}, found {}", expected, found),
            KinematicsError::Singular =>
                write!(f, "Singular configuration: Jacobian is not invertible"),
            KinematicsError::PseudoInverseFailed(msg) =>
                write!(f, "Pseudo-inverse failed: {}", msg),
        }
    }
}

impl std::error::Error for KinematicsError {}

pub trait Kinematics {
    /// End-effector position for the given joint configuration.
    fn forward(&self, qs: &Joints) -> Position;

    /// Analytic Jacobian at the given joint configuration. Recomputed on
    /// every call, never cached across joint state changes.
    fn jacobian_matrix(&self, qs: &Joints) -> Matrix3<f64>;

    /// Detects the singularity for the given joint configuration.
    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity>;
}

/// Builds [Joints] from a runtime-sized slice, the only place where the
/// dimension of an incoming vector still needs a check.
pub fn joints_from_slice(values: &[f64]) -> Result<Joints, KinematicsError> {
    if values.len() != 3 {
        return Err(KinematicsError::InvalidDimension {
            expected: 3,
            found: values.len(),
        });
    }
    Ok([values[0], values[1], values[2]])
}
