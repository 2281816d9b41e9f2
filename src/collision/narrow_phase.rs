use crate::dynamics::{Body, Shape};
use crate::math::consts::EPSILON;
use crate::math::{Mat3, Vec3};

/// An ephemeral contact between two bodies.
///
/// By convention the normal points from body `a` to body `b` and the
/// penetration depth is positive when the shapes overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact normal, unit length, pointing from `a` to `b`
    pub normal: Vec3,
    /// Overlap along the normal, always positive
    pub penetration: f32,
}

/// An oriented box in world space, the common operand of the SAT tests.
#[derive(Debug, Clone, Copy)]
pub struct Obb {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub orientation: Mat3,
}

impl Obb {
    /// Builds an OBB from a body's position, half-extents and orientation
    pub fn new(center: Vec3, half_extents: Vec3, orientation: Mat3) -> Self {
        Self {
            center,
            half_extents,
            orientation,
        }
    }

    /// An axis-aligned box expressed as an OBB with identity orientation
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center, half_extents, Mat3::IDENTITY)
    }

    /// The box's world-space local axes (columns of the rotation matrix)
    #[inline]
    fn axes(&self) -> [Vec3; 3] {
        [
            self.orientation.col(0),
            self.orientation.col(1),
            self.orientation.col(2),
        ]
    }

    /// Half-width of the box's projection onto a unit axis
    #[inline]
    fn projected_radius(&self, axis: Vec3) -> f32 {
        let axes = self.axes();
        self.half_extents.x * axes[0].dot(axis).abs()
            + self.half_extents.y * axes[1].dot(axis).abs()
            + self.half_extents.z * axes[2].dot(axis).abs()
    }
}

/// Sphere versus sphere.
///
/// Coincident centres fall back to an arbitrary fixed axis (+X) with the
/// full combined radius as penetration.
pub fn sphere_sphere(
    center_a: Vec3,
    radius_a: f32,
    center_b: Vec3,
    radius_b: f32,
) -> Option<Contact> {
    let d = center_b - center_a;
    let radius_sum = radius_a + radius_b;
    if d.length_squared() >= radius_sum * radius_sum {
        return None;
    }

    let (normal, dist) = d.normalize_with_length();
    if dist < EPSILON {
        return Some(Contact {
            normal: Vec3::X,
            penetration: radius_sum,
        });
    }

    Some(Contact {
        normal,
        penetration: radius_sum - dist,
    })
}

/// Axis-aligned box versus axis-aligned box.
///
/// The axis with the smallest positive overlap becomes the contact normal;
/// equal overlaps resolve toward X first, then Y. The normal is signed so it
/// points from `a`'s centre toward `b`'s.
pub fn aabb_aabb(center_a: Vec3, half_a: Vec3, center_b: Vec3, half_b: Vec3) -> Option<Contact> {
    let min_a = center_a - half_a;
    let max_a = center_a + half_a;
    let min_b = center_b - half_b;
    let max_b = center_b + half_b;

    let overlap_x = (max_a.x - min_b.x).min(max_b.x - min_a.x);
    let overlap_y = (max_a.y - min_b.y).min(max_b.y - min_a.y);
    let overlap_z = (max_a.z - min_b.z).min(max_b.z - min_a.z);

    if overlap_x <= 0.0 || overlap_y <= 0.0 || overlap_z <= 0.0 {
        return None;
    }

    let (penetration, normal) = if overlap_x <= overlap_y && overlap_x <= overlap_z {
        let sign = if max_a.x - min_b.x < max_b.x - min_a.x { 1.0 } else { -1.0 };
        (overlap_x, Vec3::new(sign, 0.0, 0.0))
    } else if overlap_y <= overlap_z {
        let sign = if max_a.y - min_b.y < max_b.y - min_a.y { 1.0 } else { -1.0 };
        (overlap_y, Vec3::new(0.0, sign, 0.0))
    } else {
        let sign = if max_a.z - min_b.z < max_b.z - min_a.z { 1.0 } else { -1.0 };
        (overlap_z, Vec3::new(0.0, 0.0, sign))
    };

    Some(Contact { normal, penetration })
}

/// Oriented box versus oriented box via the separating axis theorem.
///
/// Projects both boxes onto the 15 candidate axes (3 face normals each plus
/// the 9 edge-edge cross products). Any non-positive overlap proves
/// separation; otherwise the axis with the minimum overlap yields the
/// contact. Cross products of near-parallel edges degenerate to zero length
/// and are skipped.
pub fn obb_obb(a: &Obb, b: &Obb) -> Option<Contact> {
    let t = b.center - a.center;
    let axes_a = a.axes();
    let axes_b = b.axes();

    let mut min_overlap = f32::MAX;
    let mut min_axis = Vec3::X;

    let mut test_axis = |axis: Vec3| -> bool {
        let overlap = a.projected_radius(axis) + b.projected_radius(axis) - t.dot(axis).abs();
        if overlap <= 0.0 {
            return false;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = axis;
        }
        true
    };

    for axis in axes_a.iter().chain(axes_b.iter()) {
        if !test_axis(*axis) {
            return None;
        }
    }

    for edge_a in &axes_a {
        for edge_b in &axes_b {
            let (axis, len) = edge_a.cross(*edge_b).normalize_with_length();
            if len < EPSILON {
                continue;
            }
            if !test_axis(axis) {
                return None;
            }
        }
    }

    // orient the minimum axis so it points from a toward b
    let normal = if min_axis.dot(t) < 0.0 { -min_axis } else { min_axis };

    Some(Contact {
        normal,
        penetration: min_overlap,
    })
}

/// Oriented box versus axis-aligned box, reduced to the OBB test by
/// synthesizing an identity-orientation OBB from the AABB.
pub fn obb_aabb(obb: &Obb, center: Vec3, half_extents: Vec3) -> Option<Contact> {
    obb_obb(obb, &Obb::axis_aligned(center, half_extents))
}

/// Dispatches a body pair to the matching shape test.
///
/// The contact normal always points from `a` to `b`. Shape pairings without
/// a test in the 3x3 table (sphere against either box) produce no contact.
pub fn test_pair(a: &Body, b: &Body) -> Option<Contact> {
    match (a.shape, b.shape) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            sphere_sphere(a.position, ra, b.position, rb)
        }
        (Shape::Box { half_extents: ha }, Shape::Box { half_extents: hb }) => {
            aabb_aabb(a.position, ha, b.position, hb)
        }
        (Shape::OrientedBox { half_extents: ha }, Shape::OrientedBox { half_extents: hb }) => {
            obb_obb(
                &Obb::new(a.position, ha, a.orientation.to_matrix()),
                &Obb::new(b.position, hb, b.orientation.to_matrix()),
            )
        }
        (Shape::OrientedBox { half_extents: ha }, Shape::Box { half_extents: hb }) => {
            obb_aabb(&Obb::new(a.position, ha, a.orientation.to_matrix()), b.position, hb)
        }
        (Shape::Box { half_extents: ha }, Shape::OrientedBox { half_extents: hb }) => {
            // the OBB test reports its normal from the oriented box outward,
            // which is b to a here; flip to keep the a-to-b convention
            obb_aabb(&Obb::new(b.position, hb, b.orientation.to_matrix()), a.position, ha)
                .map(|c| Contact {
                    normal: -c.normal,
                    penetration: c.penetration,
                })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use std::f32::consts::PI;

    #[test]
    fn spheres_apart_do_not_collide() {
        let c = sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(3.0, 0.0, 0.0), 1.0);
        assert!(c.is_none());

        // exact touching counts as separated
        let c = sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(c.is_none());
    }

    #[test]
    fn overlapping_spheres_report_depth_along_centre_line() {
        let c = sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0), 1.0).unwrap();
        assert_eq!(c.normal, Vec3::X);
        assert!((c.penetration - 0.5).abs() < 1e-6);
    }

    #[test]
    fn coincident_spheres_fall_back_to_fixed_axis() {
        let c = sphere_sphere(Vec3::ZERO, 1.0, Vec3::ZERO, 2.0).unwrap();
        assert_eq!(c.normal, Vec3::X);
        assert!((c.penetration - 3.0).abs() < 1e-6);
    }

    #[test]
    fn separated_aabbs_return_none() {
        let c = aabb_aabb(
            Vec3::ZERO,
            Vec3::splat(0.5),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::splat(0.5),
        );
        assert!(c.is_none());
    }

    #[test]
    fn aabb_overlap_picks_smallest_axis_and_signs_toward_b() {
        // deep overlap on X and Z, shallow on Y: normal must be +Y
        let c = aabb_aabb(
            Vec3::ZERO,
            Vec3::new(2.0, 1.0, 2.0),
            Vec3::new(0.1, 1.8, 0.1),
            Vec3::new(2.0, 1.0, 2.0),
        )
        .unwrap();
        assert_eq!(c.normal, Vec3::Y);
        assert!((c.penetration - 0.2).abs() < 1e-5);

        // b below a: normal flips
        let c = aabb_aabb(
            Vec3::ZERO,
            Vec3::new(2.0, 1.0, 2.0),
            Vec3::new(0.1, -1.8, 0.1),
            Vec3::new(2.0, 1.0, 2.0),
        )
        .unwrap();
        assert_eq!(c.normal, -Vec3::Y);
    }

    #[test]
    fn aabb_equal_overlap_tie_breaks_toward_x() {
        // identical offsets on X and Y, Z fully overlapping
        let c = aabb_aabb(
            Vec3::ZERO,
            Vec3::splat(1.0),
            Vec3::new(1.5, 1.5, 0.0),
            Vec3::splat(1.0),
        )
        .unwrap();
        assert_eq!(c.normal, Vec3::X);
    }

    #[test]
    fn identical_obbs_aligned_behave_like_aabbs() {
        let a = Obb::axis_aligned(Vec3::ZERO, Vec3::splat(1.0));
        let b = Obb::axis_aligned(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        let c = obb_obb(&a, &b).unwrap();
        assert_eq!(c.normal, Vec3::X);
        assert!((c.penetration - 0.5).abs() < 1e-5);
    }

    #[test]
    fn rotated_obb_separated_where_aabb_would_hit() {
        // a unit box rotated 45 degrees about Z presents a thin diagonal
        // profile; placed far enough along X the boxes are separate even
        // though their axis-aligned bounds overlap
        let rot = Mat3::from_quat(Quat::from_axis_angle(Vec3::Z, PI / 4.0));
        let a = Obb::new(Vec3::ZERO, Vec3::splat(0.5), rot);
        let b = Obb::axis_aligned(Vec3::new(1.3, 0.0, 0.0), Vec3::splat(0.5));
        assert!(obb_obb(&a, &b).is_none());

        // moved closer they do collide
        let b = Obb::axis_aligned(Vec3::new(1.1, 0.0, 0.0), Vec3::splat(0.5));
        let c = obb_obb(&a, &b).unwrap();
        assert!(c.penetration > 0.0);
        assert!(c.normal.dot(Vec3::X) > 0.0);
    }

    #[test]
    fn parallel_obbs_skip_degenerate_cross_axes() {
        // identically oriented boxes: all nine cross products vanish and
        // only face axes must decide
        let rot = Mat3::from_quat(Quat::from_axis_angle(Vec3::Y, 0.3));
        let a = Obb::new(Vec3::ZERO, Vec3::splat(0.5), rot);
        let b = Obb::new(Vec3::new(0.4, 0.0, 0.0), Vec3::splat(0.5), rot);
        let c = obb_obb(&a, &b).unwrap();
        assert!(c.penetration > 0.0);
    }

    #[test]
    fn dispatch_has_no_test_for_sphere_box_pairs() {
        let sphere = Body::new(Shape::sphere(1.0));
        let cube = Body::new(Shape::cuboid(Vec3::splat(1.0)));
        assert!(test_pair(&sphere, &cube).is_none());
        assert!(test_pair(&cube, &sphere).is_none());
    }

    #[test]
    fn dispatch_keeps_normal_pointing_a_to_b_for_mixed_boxes() {
        let obb = Body::new(Shape::oriented_cuboid(Vec3::splat(1.0)))
            .with_position(Vec3::new(0.0, 0.0, 0.0));
        let aabb = Body::new(Shape::cuboid(Vec3::splat(1.0)))
            .with_position(Vec3::new(1.5, 0.0, 0.0));

        // oriented box first: normal points toward the AABB (+X)
        let c = test_pair(&obb, &aabb).unwrap();
        assert!(c.normal.dot(Vec3::X) > 0.9);

        // swapped operands: still from a to b, now -X
        let c = test_pair(&aabb, &obb).unwrap();
        assert!(c.normal.dot(Vec3::X) < -0.9);
    }
}
