//! Drawing session state machine. Consumes a draw plan and feeds the
//! target tracker one point at a time.

use crate::annotations::{AnnotatedTarget, TargetFlags};
use crate::kinematic_traits::KinematicsError;
use crate::segments::{DrawPlan, Point2D};
use crate::simulator::ScaraSimulator;
use std::fmt;
use tracing::debug;

/// Lifecycle of a drawing session. `Finished` is terminal: no further
/// targets are issued and ticks become no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    /// Travelling to the first point of a segment with the pen up.
    Moving,
    /// Tracing a stroke with the pen down.
    Drawing,
    /// The whole plan has been drawn.
    Finished,
}

impl fmt::Display for DrawingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawingState::Moving => write!(f, "MOVING"),
            DrawingState::Drawing => write!(f, "DRAWING"),
            DrawingState::Finished => write!(f, "FINISHED"),
        }
    }
}

/// An explicitly constructed, caller-owned session. Lifecycle: construct,
/// tick until finished, discard. The plan is immutable once the session
/// holds it.
pub struct DrawingSession {
    simulator: ScaraSimulator,
    plan: DrawPlan,
    segment_index: usize,
    point_index: usize,
    state: DrawingState,
}

impl DrawingSession {
    /// Starts a session targeting the first point of the first segment.
    /// A degenerate empty plan finishes immediately, without a tick.
    pub fn new(mut simulator: ScaraSimulator, plan: DrawPlan) -> Self {
        let state = if plan.is_empty() {
            DrawingState::Finished
        } else {
            simulator.set_target(plan[0].first());
            DrawingState::Moving
        };
        DrawingSession {
            simulator,
            plan,
            segment_index: 0,
            point_index: 0,
            state,
        }
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn simulator(&self) -> &ScaraSimulator {
        &self.simulator
    }

    pub fn plan(&self) -> &DrawPlan {
        &self.plan
    }

    /// The target the arm is currently steering to, annotated for the
    /// renderer. None once the session is finished.
    pub fn current_target(&self) -> Option<AnnotatedTarget> {
        if self.state == DrawingState::Finished {
            return None;
        }
        let segment = &self.plan[self.segment_index];
        let mut flags = match self.state {
            DrawingState::Moving => TargetFlags::MOVE,
            _ => TargetFlags::TRACE,
        };
        if self.point_index == 0 {
            flags |= TargetFlags::SEGMENT_START;
        }
        if self.point_index == segment.len() - 1 {
            flags |= TargetFlags::SEGMENT_END;
        }
        Some(AnnotatedTarget {
            point: segment.points()[self.point_index],
            flags,
        })
    }

    /// Advances the simulator by one step; on convergence, moves on to the
    /// next point, segment, or the finished state. Returns the state after
    /// the tick. Once finished, the tick is a no-op.
    pub fn tick(&mut self, dt: f64) -> Result<DrawingState, KinematicsError> {
        if self.state == DrawingState::Finished {
            return Ok(self.state);
        }
        self.simulator.step(dt)?;
        if self.simulator.target_achieved() {
            self.advance();
        }
        Ok(self.state)
    }

    /// Elbow and pen positions for rendering.
    pub fn vertex_positions(&self) -> (Point2D, Point2D) {
        self.simulator.vertex_positions()
    }

    fn advance(&mut self) {
        self.point_index += 1;
        if self.point_index == self.plan[self.segment_index].len() {
            // Segment exhausted: travel to the next one, pen up.
            self.state = DrawingState::Moving;
            self.segment_index += 1;
            self.point_index = 0;
        } else {
            self.state = DrawingState::Drawing;
        }

        if self.segment_index == self.plan.len() {
            debug!("Draw plan complete after {} segments", self.plan.len());
            self.state = DrawingState::Finished;
            return;
        }

        let point = self.plan[self.segment_index].points()[self.point_index];
        self.simulator.set_target(point);
    }
}
