//! Rust implementation of kinematic control and drawing path planning for a
//! 3 DOF SCARA arm (two revolute joints and a prismatic pen axis) that
//! traces drawings made of 2D line segments.
//!
//! # Features
//!
//! - Closed-form forward kinematics and the analytic Jacobian of the
//!   Rz(q1) Tx(a1) Rz(q2) Tx(a2) Tz(q3) chain.
//! - Jacobian inversion with an explicit, observable Moore-Penrose
//!   pseudo-inverse fallback for singular configurations.
//! - Closed-loop velocity controller with per-joint rate limits that scale
//!   the whole joint velocity uniformly, preserving the direction.
//! - Target tracking simulator with a convergence test, driving the arm by
//!   discrete ticks with an explicit time step.
//! - Path planning pipeline: chaining an unordered cloud of border points
//!   into polylines (kd-tree neighbour search), Ramer-Douglas-Peucker
//!   simplification, and greedy travel-minimizing stroke ordering.
//! - Drawing session state machine emitting a strictly ordered, annotated
//!   target stream for renderers.
//! - JSON persistence of segment drawings (behind `allow_filesystem`).
//!
//! Everything is single-threaded and tick-driven; an embedding application
//! owns the loop cadence and serializes access to a session.

pub mod parameters;

pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod jacobian;

pub mod rate_limits;
pub mod velocity_controller;
pub mod simulator;

pub mod segments;
pub mod annotations;

#[path = "path_plan/chaining.rs"]
pub mod chaining;

#[path = "path_plan/simplify.rs"]
pub mod simplify;

#[path = "path_plan/routing.rs"]
pub mod routing;

#[path = "path_plan/fitting.rs"]
pub mod fitting;

pub mod drawing;

#[cfg(feature = "allow_filesystem")]
pub mod segment_io;

pub mod utils;

#[cfg(test)]
mod tests;
