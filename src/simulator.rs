//! Target tracking simulator: composes the kinematics and the velocity
//! controller into a single per-tick step towards the current target.

use crate::kinematic_traits::{
    Joints, Kinematics, KinematicsError, DEFAULT_TOLERANCE, J1, J2,
};
use crate::kinematics_impl::ScaraKinematics;
use crate::parameters::Parameters;
use crate::rate_limits::RateLimits;
use crate::segments::Point2D;
use crate::velocity_controller::VelocityController;
use nalgebra::Vector3;
use tracing::debug;

/// The two moving links of the arm as a renderer sees them: only the
/// revolute angles matter, the pen axis is orthogonal to the drawing plane.
#[derive(Debug, Clone, Copy)]
pub struct ScaraArm {
    pub length_1: f64,
    pub length_2: f64,
    pub angle_1: f64,
    pub angle_2: f64,
}

impl ScaraArm {
    pub fn new(length_1: f64, length_2: f64) -> Self {
        ScaraArm {
            length_1,
            length_2,
            angle_1: 0.0,
            angle_2: 0.0,
        }
    }

    /// Elbow and pen positions for the given base position.
    pub fn vertex_positions(&self, center: Point2D) -> (Point2D, Point2D) {
        let elbow = Point2D::new(
            center.x + self.length_1 * self.angle_1.cos(),
            center.y + self.length_1 * self.angle_1.sin(),
        );
        let pen = Point2D::new(
            elbow.x + self.length_2 * (self.angle_1 + self.angle_2).cos(),
            elbow.y + self.length_2 * (self.angle_1 + self.angle_2).sin(),
        );
        (elbow, pen)
    }
}

/// Steers the pen towards a target point with a proportional controller:
/// the desired velocity is the raw position error (gain 1, no integral or
/// derivative term). Near singularities this controller may oscillate; the
/// rate limits keep the oscillation bounded.
pub struct ScaraSimulator {
    controller: VelocityController,
    arm: ScaraArm,
    center: Point2D,
    target: Option<Point2D>,
    tolerance: f64,
}

impl ScaraSimulator {
    pub fn new(parameters: Parameters, center: Point2D) -> Self {
        ScaraSimulator {
            controller: VelocityController::new(
                ScaraKinematics::new(parameters),
                [0.0, 0.0, 0.0],
            ),
            arm: ScaraArm::new(parameters.a1, parameters.a2),
            center,
            target: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Caps the revolute joint rates; the pen axis stays unconstrained.
    pub fn with_rate_limits(mut self, w1: f64, w2: f64) -> Self {
        self.controller.set_limits(Some(RateLimits::revolute(w1, w2)));
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Disables the pseudo-inverse fallback, making singular configurations
    /// fatal to [ScaraSimulator::step].
    pub fn with_strict_singularities(mut self) -> Self {
        self.controller.allow_pseudo_inverse = false;
        self
    }

    pub fn set_target(&mut self, target: Point2D) {
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<Point2D> {
        self.target
    }

    pub fn joints(&self) -> &Joints {
        self.controller.joints()
    }

    /// Pen position in the drawing frame.
    pub fn pen_position(&self) -> Point2D {
        let p = self
            .controller
            .kinematics()
            .forward(self.controller.joints());
        Point2D::new(self.center.x + p.x, self.center.y + p.y)
    }

    /// Elbow and pen positions for rendering.
    pub fn vertex_positions(&self) -> (Point2D, Point2D) {
        self.arm.vertex_positions(self.center)
    }

    /// One control step towards the target. A no-op when there is no target
    /// or the target is already achieved. On a singular configuration with
    /// the pseudo-inverse fallback disabled the error propagates and the
    /// joint state is left unchanged.
    pub fn step(&mut self, dt: f64) -> Result<(), KinematicsError> {
        let Some(target) = self.target else {
            return Ok(());
        };
        if self.is_target_achieved(self.tolerance) {
            return Ok(());
        }

        // Position error in the frame centered on the base; the pen stays
        // on the drawing plane, so the z error is zero.
        let qs = *self.controller.joints();
        let position = self.controller.kinematics().forward(&qs);
        let error = Vector3::new(
            target.x - self.center.x - position.x,
            target.y - self.center.y - position.y,
            0.0,
        );

        let q_dot = self.controller.desired_joint_velocity(&error)?;
        let q_dot = self.controller.normalize(&q_dot);
        self.controller.integrate(&q_dot, dt);

        // Re-synchronize the rendering arm and push the wrapped angles back
        // as a measurement.
        let qs = *self.controller.joints();
        self.arm.angle_1 = qs[J1];
        self.arm.angle_2 = qs[J2];
        self.controller
            .set_measurement(Some(self.arm.angle_1), Some(self.arm.angle_2), None);
        Ok(())
    }

    /// True when there is no target, or the pen is within the tolerance of
    /// the target on both axes.
    pub fn is_target_achieved(&self, tolerance: f64) -> bool {
        match self.target {
            None => true,
            Some(target) => {
                let pen = self.pen_position();
                (target.x - pen.x).abs() < tolerance && (target.y - pen.y).abs() < tolerance
            }
        }
    }

    /// Convergence test with the configured tolerance.
    pub fn target_achieved(&self) -> bool {
        self.is_target_achieved(self.tolerance)
    }

    /// Re-initializes the joint state, used at session start or restart.
    /// The current target, if any, is kept.
    pub fn reset(&mut self, q1: f64, q2: f64) {
        debug!("Simulator reset to q1={}, q2={}", q1, q2);
        self.controller.set_measurement(Some(q1), Some(q2), Some(0.0));
        self.arm.angle_1 = q1;
        self.arm.angle_2 = q2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achieved_immediately_at_target() {
        // Unit arm at zero reaches (2, 0); with the base in the origin the
        // target (2, 0) is achieved without a single step.
        let mut simulator = ScaraSimulator::new(Parameters::unit_arm(), Point2D::new(0.0, 0.0));
        simulator.set_target(Point2D::new(2.0, 0.0));
        assert!(simulator.target_achieved());
    }

    #[test]
    fn test_no_target_is_achieved() {
        let simulator = ScaraSimulator::new(Parameters::unit_arm(), Point2D::new(0.0, 0.0));
        assert!(simulator.target_achieved());
    }

    #[test]
    fn test_step_without_target_is_noop() {
        let mut simulator = ScaraSimulator::new(Parameters::unit_arm(), Point2D::new(0.0, 0.0));
        let before = *simulator.joints();
        simulator.step(0.016).expect("No-op step");
        assert_eq!(*simulator.joints(), before);
    }

    #[test]
    fn test_converges_to_reachable_target() {
        let mut simulator = ScaraSimulator::new(Parameters::unit_arm(), Point2D::new(0.0, 0.0));
        simulator.reset(0.3, 1.2);
        simulator.set_target(Point2D::new(1.0, 1.0));
        for _ in 0..10_000 {
            if simulator.target_achieved() {
                break;
            }
            simulator.step(0.016).expect("Fallback enabled");
        }
        assert!(simulator.target_achieved());
    }

    #[test]
    fn test_converges_from_singular_start() {
        // The arm starts fully stretched (singular). The pseudo-inverse
        // fallback must carry it out of the singularity; the proportional
        // only controller is a known limitation here and may need many
        // ticks, but must not fail.
        let mut simulator = ScaraSimulator::new(Parameters::unit_arm(), Point2D::new(0.0, 0.0));
        simulator.set_target(Point2D::new(0.5, 1.0));
        for _ in 0..100_000 {
            if simulator.target_achieved() {
                break;
            }
            simulator.step(0.016).expect("Fallback enabled");
        }
        assert!(simulator.target_achieved());
    }

    #[test]
    fn test_rate_limits_respected() {
        let w_max = 0.5;
        let mut simulator = ScaraSimulator::new(Parameters::unit_arm(), Point2D::new(0.0, 0.0))
            .with_rate_limits(w_max, w_max);
        simulator.reset(0.0, 1.5);
        simulator.set_target(Point2D::new(-1.0, -1.0));
        let dt = 0.01;
        let mut previous = *simulator.joints();
        for _ in 0..1000 {
            simulator.step(dt).expect("Fallback enabled");
            let current = *simulator.joints();
            for joint in [J1, J2] {
                // Compare on the circle, the state wraps at 2 pi.
                let delta = (current[joint] - previous[joint]).abs();
                let delta = delta.min(2.0 * std::f64::consts::PI - delta);
                assert!(delta <= w_max * dt + 1E-9);
            }
            previous = current;
        }
    }

    #[test]
    fn test_strict_singularity_fails_step() {
        let mut simulator = ScaraSimulator::new(Parameters::unit_arm(), Point2D::new(0.0, 0.0))
            .with_strict_singularities();
        simulator.set_target(Point2D::new(0.5, 1.0));
        let before = *simulator.joints();
        assert!(simulator.step(0.016).is_err());
        assert_eq!(*simulator.joints(), before);
    }
}
