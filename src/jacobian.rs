use crate::kinematic_traits::{Joints, Kinematics, KinematicsError};
use crate::utils::vector3_to_joints;
use nalgebra::linalg::SVD;
use nalgebra::{Matrix3, Vector3};
use tracing::warn;

/// Singular values below this threshold are treated as zero when computing
/// the Moore-Penrose pseudo-inverse.
const PSEUDO_INVERSE_EPSILON: f64 = 1E-6;

/// Struct representing the Jacobian matrix
///
/// The Jacobian matrix maps the joint velocities to the end-effector
/// velocities. Each column corresponds to a joint, each row to a Cartesian
/// axis of the pen.
pub struct Jacobian {
    matrix: Matrix3<f64>,
}

/// Outcome of inverting the Jacobian. The pseudo-inverse variant marks the
/// singular-configuration fallback so callers can observe it without
/// treating it as a failure.
#[derive(Debug, Clone, Copy)]
pub enum JacobianInverse {
    /// Exact inverse, the configuration is regular.
    Exact(Matrix3<f64>),
    /// Moore-Penrose pseudo-inverse, produced in a singular configuration.
    Pseudo(Matrix3<f64>),
}

impl JacobianInverse {
    pub fn matrix(&self) -> &Matrix3<f64> {
        match self {
            JacobianInverse::Exact(matrix) => matrix,
            JacobianInverse::Pseudo(matrix) => matrix,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        matches!(self, JacobianInverse::Pseudo(_))
    }
}

impl Jacobian {
    /// Constructs a new Jacobian struct by computing the analytic Jacobian
    /// matrix for the given arm and joint configuration.
    pub fn new(robot: &impl Kinematics, qs: &Joints) -> Self {
        Self {
            matrix: robot.jacobian_matrix(qs),
        }
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Inverts the Jacobian matrix. If the matrix is not invertible and
    /// `allow_pseudo` is set, falls back to the pseudo-inverse; the fallback
    /// is logged and marked in the returned value. With the fallback
    /// disabled, a singular configuration is an error.
    pub fn inverse(&self, allow_pseudo: bool) -> Result<JacobianInverse, KinematicsError> {
        if let Some(inverse) = self.matrix.try_inverse() {
            return Ok(JacobianInverse::Exact(inverse));
        }
        if !allow_pseudo {
            return Err(KinematicsError::Singular);
        }
        let svd = SVD::new(self.matrix.clone(), true, true);
        match svd.pseudo_inverse(PSEUDO_INVERSE_EPSILON) {
            Ok(pseudo_inverse) => {
                warn!("Singular Jacobian, using pseudo-inverse");
                Ok(JacobianInverse::Pseudo(pseudo_inverse))
            }
            Err(msg) => Err(KinematicsError::PseudoInverseFailed(msg)),
        }
    }

    /// Computes the joint velocities required to achieve a desired
    /// end-effector velocity.
    pub fn velocities(
        &self,
        desired_end_effector_velocity: &Vector3<f64>,
        allow_pseudo: bool,
    ) -> Result<Joints, KinematicsError> {
        let inverse = self.inverse(allow_pseudo)?;
        Ok(vector3_to_joints(
            inverse.matrix() * desired_end_effector_velocity,
        ))
    }
}
