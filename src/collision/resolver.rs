use crate::dynamics::Body;
use crate::math::consts::EPSILON;

use super::narrow_phase::Contact;

/// Resolves a single contact with an impulse along the normal, clamped
/// Coulomb friction along the tangent, and a positional pushout.
///
/// The contact normal must point from `a` to `b`. When both bodies are
/// static nothing is mutated. The positional correction splits the
/// penetration across the pair in proportion to inverse mass and runs even
/// when the pair is already separating; the velocity test only gates the
/// impulses.
pub fn resolve_contact(
    a: &mut Body,
    b: &mut Body,
    contact: &Contact,
    restitution: f32,
    friction: f32,
) {
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }

    let normal = contact.normal;

    // positional correction: constant 50/50 split of the penetration,
    // weighted by inverse mass
    let correction = contact.penetration / inv_mass_sum * 0.5;
    a.position -= normal * (correction * a.inv_mass);
    b.position += normal * (correction * b.inv_mass);

    let relative_velocity = b.velocity - a.velocity;
    let normal_velocity = relative_velocity.dot(normal);

    // separating already: no impulse needed
    if normal_velocity > 0.0 {
        return;
    }

    // normal impulse
    let j = -(1.0 + restitution) * normal_velocity / inv_mass_sum;
    a.velocity -= normal * (j * a.inv_mass);
    b.velocity += normal * (j * b.inv_mass);

    // clamped-tangent Coulomb friction on the post-impulse velocities
    let relative_velocity = b.velocity - a.velocity;
    let normal_velocity = relative_velocity.dot(normal);
    let tangent_velocity = relative_velocity - normal * normal_velocity;

    let (tangent, tangent_speed) = tangent_velocity.normalize_with_length();
    if tangent_speed > EPSILON {
        let jt = (-tangent_speed / inv_mass_sum).clamp(-friction * j.abs(), friction * j.abs());
        a.velocity -= tangent * (jt * a.inv_mass);
        b.velocity += tangent * (jt * b.inv_mass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Shape;
    use crate::math::Vec3;

    fn dynamic_sphere(x: f32, vx: f32) -> Body {
        Body::new(Shape::sphere(1.0))
            .with_mass(1.0)
            .with_position(Vec3::new(x, 0.0, 0.0))
            .with_velocity(Vec3::new(vx, 0.0, 0.0))
    }

    fn head_on_contact() -> Contact {
        Contact {
            normal: Vec3::X,
            penetration: 0.1,
        }
    }

    #[test]
    fn both_static_pair_is_untouched() {
        let mut a = Body::new(Shape::sphere(1.0)).with_position(Vec3::new(-0.5, 0.0, 0.0));
        let mut b = Body::new(Shape::sphere(1.0)).with_position(Vec3::new(0.5, 0.0, 0.0));

        resolve_contact(&mut a, &mut b, &head_on_contact(), 0.5, 0.4);

        assert_eq!(a.position, Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(b.position, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(a.velocity, Vec3::ZERO);
        assert_eq!(b.velocity, Vec3::ZERO);
    }

    #[test]
    fn separating_pair_keeps_velocities() {
        let mut a = dynamic_sphere(-1.0, -1.0);
        let mut b = dynamic_sphere(1.0, 1.0);

        resolve_contact(&mut a, &mut b, &head_on_contact(), 0.5, 0.4);

        assert_eq!(a.velocity, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn positional_correction_pushes_bodies_apart() {
        let mut a = dynamic_sphere(-0.95, 0.0);
        let mut b = dynamic_sphere(0.95, 0.0);

        resolve_contact(&mut a, &mut b, &head_on_contact(), 0.0, 0.0);

        // penetration 0.1 split equally between two unit masses
        assert!(a.position.x < -0.95);
        assert!(b.position.x > 0.95);
        assert!((b.position.x - a.position.x - 1.95).abs() < 1e-5);
    }

    #[test]
    fn approaching_pair_ends_up_separating() {
        let mut a = dynamic_sphere(-1.0, 5.0);
        let mut b = dynamic_sphere(1.0, -5.0);

        resolve_contact(&mut a, &mut b, &head_on_contact(), 0.5, 0.0);

        let normal_velocity = (b.velocity - a.velocity).dot(Vec3::X);
        assert!(normal_velocity >= 0.0, "pair still approaching: {normal_velocity}");

        // equal masses: momentum stays zero, no energy is gained
        assert!((a.velocity.x + b.velocity.x).abs() < 1e-5);
        assert!(a.velocity.x.abs() <= 5.0 + 1e-5);
    }

    #[test]
    fn restitution_scales_the_bounce() {
        let mut a = dynamic_sphere(-1.0, 2.0);
        let mut b = Body::new(Shape::sphere(1.0)).with_position(Vec3::new(1.0, 0.0, 0.0));

        resolve_contact(&mut a, &mut b, &head_on_contact(), 1.0, 0.0);

        // perfectly elastic bounce off a static body reverses the velocity
        assert!((a.velocity.x + 2.0).abs() < 1e-5);
        assert_eq!(b.velocity, Vec3::ZERO);
    }

    #[test]
    fn friction_arrests_drift_inside_the_cone() {
        // tangential speed well inside the static-friction cone: the
        // clamped-tangent form collapses to a no-slip response
        let mut a = dynamic_sphere(-1.0, 5.0);
        a.velocity.y = 0.05;
        let mut b = dynamic_sphere(1.0, -5.0);

        resolve_contact(&mut a, &mut b, &head_on_contact(), 0.5, 0.8);

        let tangential = (b.velocity - a.velocity).y;
        assert!(tangential.abs() < 1e-5, "residual drift: {tangential}");
    }

    #[test]
    fn friction_is_clamped_by_normal_impulse() {
        // large tangential speed, small normal speed: friction must clamp
        let mut a = dynamic_sphere(-1.0, 0.1);
        a.velocity.y = 10.0;
        let mut b = dynamic_sphere(1.0, -0.1);

        let tangential_before = (b.velocity - a.velocity).y.abs();
        resolve_contact(&mut a, &mut b, &head_on_contact(), 0.0, 0.4);
        let tangential_after = (b.velocity - a.velocity).y.abs();

        // reduced, but not arrested: the clamp kicked in
        assert!(tangential_after < tangential_before);
        assert!(tangential_after > 0.0);
    }
}
