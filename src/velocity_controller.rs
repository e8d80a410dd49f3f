//! Closed-loop joint velocity controller. Owns the joint configuration;
//! the state is mutated only through [VelocityController::integrate] or an
//! explicit measurement update.

use crate::jacobian::Jacobian;
use crate::kinematic_traits::{Joints, KinematicsError, J1, J2, J3};
use crate::kinematics_impl::ScaraKinematics;
use crate::rate_limits::RateLimits;
use crate::utils::wrap_angle;
use nalgebra::Vector3;

pub struct VelocityController {
    kinematics: ScaraKinematics,
    qs: Joints,
    limits: Option<RateLimits>,

    /// When the arm passes through a singular configuration, resolve the
    /// desired velocity with the pseudo-inverse instead of failing. Enabled
    /// by default; disable to make singularities fatal to the caller.
    pub allow_pseudo_inverse: bool,
}

impl VelocityController {
    pub fn new(kinematics: ScaraKinematics, initial: Joints) -> Self {
        VelocityController {
            kinematics,
            qs: initial,
            limits: None,
            allow_pseudo_inverse: true,
        }
    }

    pub fn with_limits(kinematics: ScaraKinematics, initial: Joints, limits: RateLimits) -> Self {
        VelocityController {
            kinematics,
            qs: initial,
            limits: Some(limits),
            allow_pseudo_inverse: true,
        }
    }

    pub fn joints(&self) -> &Joints {
        &self.qs
    }

    pub fn set_limits(&mut self, limits: Option<RateLimits>) {
        self.limits = limits;
    }

    pub fn kinematics(&self) -> &ScaraKinematics {
        &self.kinematics
    }

    /// Joint velocities that produce the desired end-effector velocity in
    /// the current configuration. The owned joint state is not touched; on
    /// a singular configuration with the fallback disabled the error
    /// propagates and the state stays exactly as it was.
    pub fn desired_joint_velocity(
        &self,
        desired_velocity: &Vector3<f64>,
    ) -> Result<Joints, KinematicsError> {
        Jacobian::new(&self.kinematics, &self.qs)
            .velocities(desired_velocity, self.allow_pseudo_inverse)
    }

    /// Applies the configured rate limits. Without limits the velocity is
    /// returned unchanged.
    pub fn normalize(&self, q_dot: &Joints) -> Joints {
        match &self.limits {
            Some(limits) => limits.scale(q_dot),
            None => *q_dot,
        }
    }

    /// Advances the joint state by one step of the given joint velocity.
    /// Revolute angles wrap into [0, 2 pi); the prismatic axis accumulates
    /// without wrapping.
    pub fn integrate(&mut self, q_dot: &Joints, dt: f64) {
        self.qs[J1] = wrap_angle(self.qs[J1] + q_dot[J1] * dt);
        self.qs[J2] = wrap_angle(self.qs[J2] + q_dot[J2] * dt);
        self.qs[J3] += q_dot[J3] * dt;
    }

    /// Corrects one or more joints from an external measurement without
    /// resetting the others.
    pub fn set_measurement(&mut self, q1: Option<f64>, q2: Option<f64>, q3: Option<f64>) {
        if let Some(q1) = q1 {
            self.qs[J1] = q1;
        }
        if let Some(q2) = q2 {
            self.qs[J2] = q2;
        }
        if let Some(q3) = q3 {
            self.qs[J3] = q3;
        }
    }
}
