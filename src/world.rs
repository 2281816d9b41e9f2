use crate::collision::{resolve_contact, test_pair, UniformGrid};
use crate::constraints::{pair_mut, Constraint};
use crate::dynamics::{Body, BodyHandle};
use crate::math::Vec3;

/// Cell size of the world's broad-phase grid
const GRID_CELL_SIZE: f32 = 2.0;

/// Restitution used for every contact the step pipeline resolves
const CONTACT_RESTITUTION: f32 = 0.5;

/// Friction used for every contact the step pipeline resolves
const CONTACT_FRICTION: f32 = 0.4;

/// The physics world: an arena of bodies, a list of articulated
/// constraints, and the fixed-timestep simulation pipeline.
pub struct World {
    bodies: Vec<Body>,
    constraints: Vec<Box<dyn Constraint>>,
    broad_phase: UniformGrid,
    fixed_delta_time: f32,
    gravity: Vec3,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with the default 60 Hz timestep and gravity
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            constraints: Vec::new(),
            broad_phase: UniformGrid::new(GRID_CELL_SIZE),
            fixed_delta_time: 1.0 / 60.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }

    /// Adds a body to the arena and returns its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle::new(self.bodies.len() as u32);
        self.bodies.push(body);
        handle
    }

    /// Adds an articulated constraint, solved in addition order
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    /// Advances the simulation by one fixed timestep.
    ///
    /// The phases run in a fixed order: gravity, integration, broad phase,
    /// narrow phase plus contact resolution, constraint solve. Bodies are
    /// visited in insertion order and candidate pairs in broad-phase
    /// emission order.
    pub fn step(&mut self) {
        // 1) gravity as a force, so integration sees it with everything else
        let gravity = self.gravity;
        for body in &mut self.bodies {
            if !body.is_static() {
                let weight = gravity * body.mass;
                body.apply_force(weight);
            }
        }

        // 2) integrate
        let dt = self.fixed_delta_time;
        for body in &mut self.bodies {
            body.integrate(dt);
        }

        // 3) broad phase: rebuilt from scratch every step
        self.broad_phase.clear();
        for (index, body) in self.bodies.iter().enumerate() {
            self.broad_phase.insert(index, body.position);
        }

        // 4) narrow phase and resolution per candidate pair
        for (i, j) in self.broad_phase.candidate_pairs() {
            let (a, b) = pair_mut(&mut self.bodies, i, j);
            if a.is_static() && b.is_static() {
                continue;
            }
            if let Some(contact) = test_pair(a, b) {
                resolve_contact(a, b, &contact, CONTACT_RESTITUTION, CONTACT_FRICTION);
            }
        }

        // 5) articulated constraints
        let mut constraints = std::mem::take(&mut self.constraints);
        for constraint in &mut constraints {
            constraint.pre_solve(&self.bodies, dt);
            constraint.solve(&mut self.bodies, dt);
            constraint.post_solve(&mut self.bodies);
        }
        self.constraints = constraints;
    }

    /// Removes all bodies and constraints
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.constraints.clear();
        self.broad_phase.clear();
    }

    /// The gravity vector
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Sets the gravity vector
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// The fixed timestep in seconds
    pub fn fixed_delta_time(&self) -> f32 {
        self.fixed_delta_time
    }

    /// Sets the fixed timestep. Non-positive values are rejected and the
    /// previous timestep is kept.
    pub fn set_fixed_delta_time(&mut self, dt: f32) {
        if dt > 0.0 {
            self.fixed_delta_time = dt;
        } else {
            tracing::warn!(rejected = dt, "ignoring non-positive fixed timestep");
        }
    }

    /// Number of bodies in the arena
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of constraints
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Gets a body by handle
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    /// Gets a body mutably by handle
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.index())
    }

    /// All bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}
