//! Defines the SCARA geometry parameter data structure

/// Parameters for the kinematic model of the arm. The movement chain is
/// Rz(q1) Tx(a1) Rz(q2) Tx(a2) Tz(q3).
#[derive(Debug, Clone, Copy)]
pub struct Parameters {
    /// The length of the first link (distance between the shoulder and the elbow).
    /// Must be a positive real.
    pub a1: f64,

    /// The length of the second link (distance between the elbow and the pen).
    /// Must be a positive real.
    pub a2: f64,
}

impl Parameters {
    /// Unit arm, both links of length 1. The work envelope is a disc of
    /// radius 2 around the base.
    pub fn unit_arm() -> Self {
        Parameters { a1: 1.0, a2: 1.0 }
    }

    /// A desk plotter sized in millimeters.
    pub fn desk_plotter() -> Self {
        Parameters { a1: 200.0, a2: 160.0 }
    }

    /// Maximum reach of the pen from the base.
    pub fn reach(&self) -> f64 {
        self.a1 + self.a2
    }
}
