use std::f32::consts::PI;

use crate::dynamics::{Body, BodyHandle};
use crate::math::Vec3;

use super::{pair_mut, solve_point_row, world_anchor, Constraint};

/// A shoulder-style joint: a ball joint with angular limits.
///
/// The swing rows engage when the angle between the two world axes exceeds
/// the smaller swing span; the twist row engages when the rotation about the
/// shared axis exceeds the twist span. All spans default to pi, which leaves
/// the joint limit-free until configured.
#[derive(Debug, Clone)]
pub struct ConeTwistConstraint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    pivot_a: Vec3,
    pivot_b: Vec3,
    axis_a: Vec3,
    axis_b: Vec3,
    swing_span1: f32,
    swing_span2: f32,
    twist_span: f32,
    anchor_a: Vec3,
    anchor_b: Vec3,
    world_axis_a: Vec3,
    world_axis_b: Vec3,
}

impl ConeTwistConstraint {
    /// Creates a cone-twist joint; limits default to pi
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
            swing_span1: PI,
            swing_span2: PI,
            twist_span: PI,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
            world_axis_a: Vec3::ZERO,
            world_axis_b: Vec3::ZERO,
        }
    }

    /// Sets the two swing spans and the twist span, in radians
    pub fn with_limits(mut self, swing_span1: f32, swing_span2: f32, twist_span: f32) -> Self {
        self.swing_span1 = swing_span1;
        self.swing_span2 = swing_span2;
        self.twist_span = twist_span;
        self
    }
}

impl Constraint for ConeTwistConstraint {
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

        let inv_inertia_a = a.inv_inertia.element(0, 0);
        let inv_inertia_b = b.inv_inertia.element(0, 0);
        let inv_sum = inv_inertia_a + inv_inertia_b;
        if inv_sum == 0.0 {
            return;
        }
        let effective_mass = 1.0 / inv_sum;

        // swing limit
        let cos_angle = self.world_axis_a.dot(self.world_axis_b).clamp(-1.0, 1.0);
        let swing_angle = cos_angle.acos();
        if swing_angle > 0.0 {
            let swing_error = swing_angle - self.swing_span1.min(self.swing_span2);
            if swing_error > 0.0 {
                let swing_axis = self.world_axis_a.cross(self.world_axis_b).normalize();
                let lambda = -effective_mass * swing_error / dt;

                a.angular_velocity -= swing_axis * (lambda * inv_inertia_a);
                b.angular_velocity += swing_axis * (lambda * inv_inertia_b);
            }
        }

        // twist limit about the shared axis
        let twist_angle = self
            .world_axis_a
            .cross(self.world_axis_b)
            .length()
            .atan2(self.world_axis_a.dot(self.world_axis_b));
        let twist_error = twist_angle.abs() - self.twist_span;
        if twist_error > 0.0 {
            let twist_axis = self.world_axis_a;
            let lambda = -effective_mass * twist_error / dt;

            a.angular_velocity -= twist_axis * (lambda * inv_inertia_a);
            b.angular_velocity += twist_axis * (lambda * inv_inertia_b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Shape;
    use crate::math::Quat;

    fn jointed_pair(tilt: f32, swing_limit: f32) -> (Vec<Body>, ConeTwistConstraint) {
        let bodies = vec![
            Body::new(Shape::cuboid(Vec3::splat(0.5))).with_mass(1.0),
            Body::new(Shape::cuboid(Vec3::splat(0.5)))
                .with_mass(1.0)
                .with_position(Vec3::new(1.0, 0.0, 0.0))
                .with_orientation(Quat::from_axis_angle(Vec3::Z, tilt)),
        ];
        let joint = ConeTwistConstraint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::X,
            Vec3::X,
        )
        .with_limits(swing_limit, swing_limit, PI);
        (bodies, joint)
    }

    #[test]
    fn swing_inside_the_cone_is_free() {
        let (mut bodies, mut joint) = jointed_pair(0.2, 0.5);

        let dt = 1.0 / 60.0;
        joint.pre_solve(&bodies, dt);
        joint.solve(&mut bodies, dt);

        assert!(bodies[0].angular_velocity.is_near_zero(1e-6));
        assert!(bodies[1].angular_velocity.is_near_zero(1e-6));
    }

    #[test]
    fn swing_beyond_the_cone_is_pushed_back() {
        let (mut bodies, mut joint) = jointed_pair(0.8, 0.5);

        let dt = 1.0 / 60.0;
        joint.pre_solve(&bodies, dt);
        joint.solve(&mut bodies, dt);

        // limit torque engages on both bodies in opposite directions
        assert!(!bodies[0].angular_velocity.is_near_zero(1e-6));
        assert!(!bodies[1].angular_velocity.is_near_zero(1e-6));
        assert!(bodies[0].angular_velocity.dot(bodies[1].angular_velocity) < 0.0);
    }

    #[test]
    fn default_limits_never_engage() {
        let (mut bodies, mut joint) = jointed_pair(1.5, PI);

        let dt = 1.0 / 60.0;
        joint.pre_solve(&bodies, dt);
        joint.solve(&mut bodies, dt);

        assert!(bodies[0].angular_velocity.is_near_zero(1e-6));
        assert!(bodies[1].angular_velocity.is_near_zero(1e-6));
    }
}
