use serde::{Deserialize, Serialize};

use crate::math::{Mat3, Quat, Vec3};

/// A handle to a body in a world's arena.
///
/// Constraints and hosts refer to bodies through handles rather than
/// references; the world owns the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// Creates a handle from an arena index
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// The arena index of this handle
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The collision shape carried by a body.
///
/// `Box` is tested axis-aligned regardless of the body's orientation;
/// `OrientedBox` feeds the orientation into the separating-axis test. The
/// two are otherwise identical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A sphere defined by its radius
    Sphere { radius: f32 },
    /// An axis-aligned box defined by half-extents
    Box { half_extents: Vec3 },
    /// An oriented box defined by half-extents, rotated by the body
    OrientedBox { half_extents: Vec3 },
}

impl Shape {
    /// Creates a sphere shape
    #[inline]
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Creates an axis-aligned box shape from half-extents
    #[inline]
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }

    /// Creates an oriented box shape from half-extents
    #[inline]
    pub fn oriented_cuboid(half_extents: Vec3) -> Self {
        Self::OrientedBox { half_extents }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::Sphere { radius: 1.0 }
    }
}

/// A single rigid body: kinematic state, mass properties, shape and
/// material, plus the per-step force accumulators.
///
/// A body with `mass == 0` is STATIC: `inv_mass` and `inv_inertia` are zero
/// and integration and impulses leave it untouched.
#[derive(Debug, Clone)]
pub struct Body {
    /// Position in world space
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Orientation, kept unit-length
    pub orientation: Quat,
    /// Angular velocity in radians per second
    pub angular_velocity: Vec3,

    /// Mass (0 = static)
    pub mass: f32,
    /// Inverse mass (0 = static)
    pub inv_mass: f32,
    /// Inverse inertia tensor; identity for dynamic bodies, zero for static
    pub inv_inertia: Mat3,

    /// Collision shape tag
    pub shape: Shape,

    /// Restitution (bounciness) in [0, 1]
    pub restitution: f32,
    /// Coulomb friction coefficient
    pub friction: f32,

    /// Accumulated force, consumed and reset by `integrate`
    pub force_accum: Vec3,
    /// Accumulated torque, consumed and reset by `integrate`
    pub torque_accum: Vec3,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            // static until set_mass is called
            mass: 0.0,
            inv_mass: 0.0,
            inv_inertia: Mat3::ZERO,
            shape: Shape::default(),
            restitution: 0.3,
            friction: 0.5,
            force_accum: Vec3::ZERO,
            torque_accum: Vec3::ZERO,
        }
    }
}

impl Body {
    /// Creates a new static body with the given shape at the origin
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Sets the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the linear velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the orientation (renormalized)
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation.normalize();
        self
    }

    /// Sets the mass, see [`Body::set_mass`]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    /// Sets the restitution coefficient
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Sets the friction coefficient
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.max(0.0);
        self
    }

    /// Sets the mass and precomputes the inverse mass properties.
    ///
    /// A non-positive mass makes the body static. Dynamic bodies get a unit
    /// inertia tensor, so a torque `t` produces angular acceleration `t`
    /// directly.
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        if mass <= 0.0 {
            self.inv_mass = 0.0;
            self.inv_inertia = Mat3::ZERO;
        } else {
            self.inv_mass = 1.0 / mass;
            self.inv_inertia = Mat3::IDENTITY;
        }
    }

    /// True when this body never moves
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Accumulates a force applied at the centre of mass
    pub fn apply_force(&mut self, force: Vec3) {
        self.force_accum += force;
    }

    /// Accumulates a force applied at a world-space point, adding the
    /// resulting torque `(point - position) x force`
    pub fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.force_accum += force;
        self.torque_accum += (point - self.position).cross(force);
    }

    /// Accumulates a torque
    pub fn apply_torque(&mut self, torque: Vec3) {
        self.torque_accum += torque;
    }

    /// Clears the force and torque accumulators
    pub fn clear_forces(&mut self) {
        self.force_accum = Vec3::ZERO;
        self.torque_accum = Vec3::ZERO;
    }

    /// Advances the body by `dt` seconds of semi-implicit Euler.
    ///
    /// Position uses the closed form `x += v*dt + 0.5*a*dt^2` so a constant
    /// force reproduces the analytic trajectory in a single step. Static
    /// bodies are untouched. Accumulators are reset at the end of the step.
    pub fn integrate(&mut self, dt: f32) {
        if self.inv_mass == 0.0 {
            return;
        }

        let acceleration = self.force_accum * self.inv_mass;
        self.position += self.velocity * dt + acceleration * (0.5 * dt * dt);
        self.velocity += acceleration * dt;

        let angular_acceleration = self.inv_inertia * self.torque_accum;
        self.angular_velocity += angular_acceleration * dt;
        self.orientation = self.orientation.integrate(self.angular_velocity, dt);

        self.clear_forces();
    }
}
