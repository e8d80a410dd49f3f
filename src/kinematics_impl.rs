use crate::kinematic_traits::{Joints, Kinematics, Position, Singularity, J1, J2, J3};
use crate::parameters::Parameters;
use nalgebra::Matrix3;

/// If the sine of the elbow angle falls below this value, the configuration
/// is reported as singular.
const SINGULARITY_THRESHOLD: f64 = 1E-6;

/// Closed-form kinematics of the SCARA arm.
pub struct ScaraKinematics {
    parameters: Parameters,
}

impl ScaraKinematics {
    /// Creates a new `ScaraKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        ScaraKinematics { parameters }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

impl Kinematics for ScaraKinematics {
    fn forward(&self, qs: &Joints) -> Position {
        let p = &self.parameters;
        Position::new(
            p.a1 * qs[J1].cos() + p.a2 * (qs[J1] + qs[J2]).cos(),
            p.a1 * qs[J1].sin() + p.a2 * (qs[J1] + qs[J2]).sin(),
            qs[J3],
        )
    }

    fn jacobian_matrix(&self, qs: &Joints) -> Matrix3<f64> {
        let p = &self.parameters;
        let s1 = qs[J1].sin();
        let c1 = qs[J1].cos();
        let s12 = (qs[J1] + qs[J2]).sin();
        let c12 = (qs[J1] + qs[J2]).cos();

        // The pen axis is decoupled from the revolute joints: the third
        // row and column carry only the 1 of the prismatic axis.
        Matrix3::new(
            -p.a1 * s1 - p.a2 * s12, -p.a2 * s12, 0.0,
            p.a1 * c1 + p.a2 * c12, p.a2 * c12, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        // det J = a1 * a2 * sin(q2), so the rank drops exactly when the
        // links align.
        if qs[J2].sin().abs() < SINGULARITY_THRESHOLD {
            Some(Singularity::Aligned)
        } else {
            None
        }
    }
}
