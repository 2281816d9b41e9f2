//! Articulated-joint constraints.
//!
//! Every joint follows the same three-phase pattern: `pre_solve` maps the
//! body-local anchors and axes into world space with the bodies' current
//! orientations, `solve` turns a position error into an impulse through a
//! Jacobian direction and an effective mass, and `post_solve` is a cleanup
//! hook. Joints address bodies through arena indices into the world's body
//! list rather than holding references.

mod cone_twist;
mod distance;
mod driver;
mod hinge;
mod point_to_point;
mod slider;

pub use cone_twist::ConeTwistConstraint;
pub use distance::DistanceConstraint;
pub use driver::HingeDriver;
pub use hinge::HingeConstraint;
pub use point_to_point::PointToPointConstraint;
pub use slider::SliderConstraint;

use crate::dynamics::Body;
use crate::math::Vec3;

/// A constraint between two bodies in the world's arena.
pub trait Constraint {
    /// Converts local anchors and axes into world space
    fn pre_solve(&mut self, bodies: &[Body], dt: f32);

    /// Computes and applies the constraint impulses
    fn solve(&mut self, bodies: &mut [Body], dt: f32);

    /// Per-step cleanup hook
    fn post_solve(&mut self, _bodies: &mut [Body]) {}
}

/// Gets mutable references to two distinct bodies of the arena
pub(crate) fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    assert!(a != b, "constraint attached to one body twice");
    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// World-space anchor of a local pivot on a body
#[inline]
pub(crate) fn world_anchor(body: &Body, local_pivot: Vec3) -> Vec3 {
    body.position + body.orientation.rotate_vec(local_pivot)
}

/// Solves one positional row pulling two world anchors together.
///
/// The impulse is `lambda = -effective_mass * |error| / dt` along the anchor
/// separation; signs are chosen so the row reduces its error. Skipped when
/// both bodies are static (zero effective mass).
pub(crate) fn solve_point_row(a: &mut Body, b: &mut Body, anchor_a: Vec3, anchor_b: Vec3, dt: f32) {
    let error = anchor_b - anchor_a;
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }

    let jacobian = error.normalize();
    let effective_mass = 1.0 / inv_mass_sum;
    let lambda = -effective_mass * error.length() / dt;

    a.velocity -= jacobian * (lambda * a.inv_mass);
    b.velocity += jacobian * (lambda * b.inv_mass);
}

/// Solves one rotational row aligning two world-space axes.
///
/// The error is `axis_a x axis_b`; the effective mass comes from the
/// leading diagonal elements of the inverse inertia tensors.
pub(crate) fn solve_axis_row(a: &mut Body, b: &mut Body, axis_a: Vec3, axis_b: Vec3, dt: f32) {
    let error = axis_a.cross(axis_b);

    let inv_inertia_a = a.inv_inertia.element(0, 0);
    let inv_inertia_b = b.inv_inertia.element(0, 0);
    let inv_sum = inv_inertia_a + inv_inertia_b;
    if inv_sum == 0.0 {
        return;
    }

    let jacobian = error.normalize();
    let effective_mass = 1.0 / inv_sum;
    let lambda = -effective_mass * error.length() / dt;

    a.angular_velocity -= jacobian * (lambda * inv_inertia_a);
    b.angular_velocity += jacobian * (lambda * inv_inertia_b);
}
