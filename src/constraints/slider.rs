use crate::dynamics::{Body, BodyHandle};
use crate::math::Vec3;

use super::{pair_mut, solve_axis_row, solve_point_row, world_anchor, Constraint};

/// A prismatic joint: keeps two bodies rotationally locked to a shared axis
/// while penalising any anchor separation along that axis.
#[derive(Debug, Clone)]
pub struct SliderConstraint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    pivot_a: Vec3,
    pivot_b: Vec3,
    axis_a: Vec3,
    axis_b: Vec3,
    anchor_a: Vec3,
    anchor_b: Vec3,
    world_axis_a: Vec3,
    world_axis_b: Vec3,
}

impl SliderConstraint {
    /// Creates a slider between two bodies with local pivots and axes
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        pivot_a: Vec3,
        pivot_b: Vec3,
        axis_a: Vec3,
        axis_b: Vec3,
    ) -> Self {
        Self {
            body_a,
            body_b,
            pivot_a,
            pivot_b,
            axis_a,
            axis_b,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            world_axis_a: Vec3::ZERO,
            world_axis_b: Vec3::ZERO,
        }
    }
}

impl Constraint for SliderConstraint {
    fn pre_solve(&mut self, bodies: &[Body], _dt: f32) {
        let a = &bodies[self.body_a.index()];
        let b = &bodies[self.body_b.index()];
        self.anchor_a = world_anchor(a, self.pivot_a);
        self.anchor_b = world_anchor(b, self.pivot_b);
        self.world_axis_a = a.orientation.rotate_vec(self.axis_a);
        self.world_axis_b = b.orientation.rotate_vec(self.axis_b);
    }

    fn solve(&mut self, bodies: &mut [Body], dt: f32) {
        let (a, b) = pair_mut(bodies, self.body_a.index(), self.body_b.index());

        solve_point_row(a, b, self.anchor_a, self.anchor_b, dt);
        solve_axis_row(a, b, self.world_axis_a, self.world_axis_b, dt);

        // translational row: anchor separation projected onto the slide axis
        let inv_mass_sum = a.inv_mass + b.inv_mass;
        if inv_mass_sum == 0.0 {
            return;
        }

        let error = (self.anchor_b - self.anchor_a).dot(self.world_axis_a);
        let jacobian = self.world_axis_a;
        let effective_mass = 1.0 / inv_mass_sum;
        let lambda = -effective_mass * error / dt;

        a.velocity -= jacobian * (lambda * a.inv_mass);
        b.velocity += jacobian * (lambda * b.inv_mass);
    }
}
