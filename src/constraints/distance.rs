use crate::dynamics::{Body, BodyHandle};
use crate::math::Vec3;

use super::{pair_mut, world_anchor, Constraint};

/// A rigid rod: drives the separation of two anchor points to a prescribed
/// rest length.
#[derive(Debug, Clone)]
pub struct DistanceConstraint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    pivot_a: Vec3,
    pivot_b: Vec3,
    /// Target separation of the two anchors
    rest_length: f32,
    anchor_a: Vec3,
    anchor_b: Vec3,
}

impl DistanceConstraint {
    /// Creates a distance constraint with the given rest length
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        pivot_a: Vec3,
        pivot_b: Vec3,
        rest_length: f32,
    ) -> Self {
        Self {
            body_a,
            body_b,
            pivot_a,
            pivot_b,
            rest_length,
            anchor_a: Vec3::ZERO,
            anchor_b: Vec3::ZERO,
        }
    }

    /// The prescribed anchor separation
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }
}

impl Constraint for DistanceConstraint {
    fn pre_solve(&mut self, bodies: &[Body], _dt: f32) {
        self.anchor_a = world_anchor(&bodies[self.body_a.index()], self.pivot_a);
        self.anchor_b = world_anchor(&bodies[self.body_b.index()], self.pivot_b);
    }

    fn solve(&mut self, bodies: &mut [Body], dt: f32) {
        let (a, b) = pair_mut(bodies, self.body_a.index(), self.body_b.index());

        let inv_mass_sum = a.inv_mass + b.inv_mass;
        if inv_mass_sum == 0.0 {
            return;
        }

        let separation = self.anchor_b - self.anchor_a;
        let (jacobian, current_length) = separation.normalize_with_length();
        // signed: positive when stretched, negative when compressed
        let error = current_length - self.rest_length;

        let effective_mass = 1.0 / inv_mass_sum;
        let lambda = -effective_mass * error / dt;

        a.velocity -= jacobian * (lambda * a.inv_mass);
        b.velocity += jacobian * (lambda * b.inv_mass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Shape;

    fn rod(separation: f32, rest_length: f32) -> (Vec<Body>, DistanceConstraint) {
        let bodies = vec![
            Body::new(Shape::sphere(0.2)).with_mass(1.0),
            Body::new(Shape::sphere(0.2))
                .with_mass(1.0)
                .with_position(Vec3::new(separation, 0.0, 0.0)),
        ];
        let joint = DistanceConstraint::new(
            BodyHandle::new(0),
            BodyHandle::new(1),
            Vec3::ZERO,
            Vec3::ZERO,
            rest_length,
        );
        (bodies, joint)
    }

    #[test]
    fn stretched_rod_contracts() {
        let (mut bodies, mut joint) = rod(3.0, 2.0);

        let dt = 1.0 / 60.0;
        joint.pre_solve(&bodies, dt);
        joint.solve(&mut bodies, dt);

        assert!(bodies[0].velocity.x > 0.0);
        assert!(bodies[1].velocity.x < 0.0);
    }

    #[test]
    fn compressed_rod_expands() {
        let (mut bodies, mut joint) = rod(1.0, 2.0);

        let dt = 1.0 / 60.0;
        joint.pre_solve(&bodies, dt);
        joint.solve(&mut bodies, dt);

        assert!(bodies[0].velocity.x < 0.0);
        assert!(bodies[1].velocity.x > 0.0);
    }

    #[test]
    fn rod_at_rest_length_does_nothing() {
        let (mut bodies, mut joint) = rod(2.0, 2.0);

        let dt = 1.0 / 60.0;
        joint.pre_solve(&bodies, dt);
        joint.solve(&mut bodies, dt);

        assert!(bodies[0].velocity.is_near_zero(1e-6));
        assert!(bodies[1].velocity.is_near_zero(1e-6));
    }
}
