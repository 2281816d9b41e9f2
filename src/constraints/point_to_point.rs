use crate::dynamics::{Body, BodyHandle};
use crate::math::Vec3;

use super::{pair_mut, solve_point_row, world_anchor, Constraint};

/// A ball joint: forces two body-local anchor points to coincide.
#[derive(Debug, Clone)]
pub struct PointToPointConstraint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    /// Anchor in body A's local frame
    pivot_a: Vec3,
    /// Anchor in body B's local frame
    pivot_b: Vec3,
    /// World-space anchor on A, refreshed by `pre_solve`
    anchor_a: Vec3,
    /// World-space anchor on B, refreshed by `pre_solve`
    anchor_b: Vec3,
}

impl PointToPointConstraint {
    /// Creates a ball joint between two bodies with local-space pivots
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, pivot_a: Vec3, pivot_b: Vec3) -> Self {
        Self {
            body_a,
            body_b,
            pivot_a,
            pivot_b,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
        }
    }
}

impl Constraint for PointToPointConstraint {
    fn pre_solve(&mut self, bodies: &[Body], _dt: f32) {
        self.anchor_a = world_anchor(&bodies[self.body_a.index()], self.pivot_a);
        self.anchor_b = world_anchor(&bodies[self.body_b.index()], self.pivot_b);
    }

    fn solve(&mut self, bodies: &mut [Body], dt: f32) {
        let (a, b) = pair_mut(bodies, self.body_a.index(), self.body_b.index());
        solve_point_row(a, b, self.anchor_a, self.anchor_b, dt);
    }
}
