use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constraints::HingeDriver;
use crate::debug_draw::DebugDrawData;
use crate::dynamics::{Body, BodyHandle, Shape};
use crate::math::{Quat, Vec3};
use crate::scene::{self, SceneError};
use crate::timer::Timer;
use crate::world::World;

/// Half-extents of the large thin slab standing in for an infinite plane
const PLANE_HALF_EXTENTS: Vec3 = Vec3::new(1000.0, 0.1, 1000.0);

/// Engine configuration.
///
/// `default_restitution` and `default_friction` are part of the persisted
/// configuration surface; the step pipeline itself resolves contacts with
/// the world's fixed material (see [`World::step`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds simulated by one substep
    pub fixed_time_step: f32,
    /// Upper clamp on the wall-clock delta fed to `update`
    pub max_time_step: f32,
    /// Upper bound on substeps per `update`
    pub max_sub_steps: u32,
    /// Gravity applied to every dynamic body
    pub gravity: Vec3,
    pub default_restitution: f32,
    pub default_friction: f32,
    /// Master switch for rebuilding the debug-draw feed
    pub show_debug_draw: bool,
    pub show_colliders: bool,
    pub show_contacts: bool,
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixed_time_step: 1.0 / 60.0,
            max_time_step: 0.25,
            max_sub_steps: 4,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            default_restitution: 0.5,
            default_friction: 0.3,
            show_debug_draw: false,
            show_colliders: true,
            show_contacts: false,
            show_grid: true,
        }
    }
}

/// A handle to a kinematic hinge driver owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverHandle(pub u32);

impl DriverHandle {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A read-only view of one body for host consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub position: Vec3,
    pub orientation: Quat,
    pub shape: Shape,
}

/// The fixed-timestep scheduler around [`World`]: factories for bodies and
/// drivers, wall-clock pacing, scene persistence and the debug-draw feed.
///
/// Engine instances are independent of each other; a single instance must
/// only be driven from one thread.
pub struct Engine {
    settings: Settings,
    world: World,
    timer: Timer,
    drivers: Vec<HingeDriver>,
    debug_draw: DebugDrawData,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default settings
    pub fn new() -> Self {
        let mut engine = Self {
            settings: Settings::default(),
            world: World::new(),
            timer: Timer::new(),
            drivers: Vec::new(),
            debug_draw: DebugDrawData::default(),
        };
        engine.initialize(Settings::default());
        engine
    }

    /// Resets the engine with new settings: the world is emptied, the timer
    /// and debug buffers cleared, and the world adopts the configured
    /// gravity and timestep.
    pub fn initialize(&mut self, settings: Settings) {
        self.world.clear();
        self.world.set_gravity(settings.gravity);
        self.world.set_fixed_delta_time(settings.fixed_time_step);
        self.settings = settings;
        self.drivers.clear();
        self.timer.reset();
        self.debug_draw.clear();
    }

    /// Advances the simulation by a wall-clock delta.
    ///
    /// The delta is clamped to `max_time_step` (negative input advances
    /// nothing), then consumed in fixed-size substeps, at most
    /// `max_sub_steps` of them. Afterwards the debug-draw feed is rebuilt
    /// when enabled.
    pub fn update(&mut self, delta_time: f32) {
        self.timer.update();

        let dt = delta_time.clamp(0.0, self.settings.max_time_step);

        let mut remaining = dt;
        let mut substeps = 0;
        while remaining > 0.0 && substeps < self.settings.max_sub_steps {
            self.world.step();
            remaining -= self.settings.fixed_time_step;
            substeps += 1;
        }

        if self.settings.show_debug_draw {
            self.rebuild_debug_draw();
        }
    }

    /// Creates a box body. `size` is the full extent on each axis.
    pub fn create_box(&mut self, position: Vec3, size: Vec3, mass: f32) -> BodyHandle {
        let body = Body::new(Shape::cuboid(size * 0.5))
            .with_position(position)
            .with_mass(mass);
        self.world.add_body(body)
    }

    /// Creates a sphere body
    pub fn create_sphere(&mut self, position: Vec3, radius: f32, mass: f32) -> BodyHandle {
        let body = Body::new(Shape::sphere(radius))
            .with_position(position)
            .with_mass(mass);
        self.world.add_body(body)
    }

    /// Creates a ground plane: a very large, thin box centred at
    /// `normal * distance`. Pass mass 0 for the usual static ground.
    pub fn create_plane(&mut self, normal: Vec3, distance: f32, mass: f32) -> BodyHandle {
        let body = Body::new(Shape::cuboid(PLANE_HALF_EXTENTS))
            .with_position(normal * distance)
            .with_mass(mass);
        self.world.add_body(body)
    }

    /// Creates a kinematic hinge driver the host can push angles into.
    /// Drivers live outside the world's constraint list.
    pub fn create_hinge_driver(
        &mut self,
        pivot: Vec3,
        axis: Vec3,
        angular_velocity: f32,
        is_rotating: bool,
    ) -> DriverHandle {
        let handle = DriverHandle(self.drivers.len() as u32);
        self.drivers
            .push(HingeDriver::new(pivot, axis, angular_velocity, is_rotating));
        handle
    }

    /// Pushes a target angle into a driver. An out-of-range handle is a
    /// silent no-op.
    pub fn set_hinge_rotation(&mut self, handle: DriverHandle, angle: f32) {
        if let Some(driver) = self.drivers.get_mut(handle.index()) {
            driver.set_target_angle(angle);
        }
    }

    /// Gets a driver by handle
    pub fn hinge_driver(&self, handle: DriverHandle) -> Option<&HingeDriver> {
        self.drivers.get(handle.index())
    }

    /// Sets the gravity for both the settings and the running world
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.settings.gravity = gravity;
        self.world.set_gravity(gravity);
    }

    /// Sets the fixed timestep. Non-positive values are rejected and the
    /// previous timestep is kept (see [`World::set_fixed_delta_time`]).
    pub fn set_time_step(&mut self, time_step: f32) {
        self.world.set_fixed_delta_time(time_step);
        self.settings.fixed_time_step = self.world.fixed_delta_time();
    }

    /// Flips the master debug-draw switch
    pub fn toggle_debug_draw(&mut self) {
        self.settings.show_debug_draw = !self.settings.show_debug_draw;
    }

    /// Flips collider wireframe drawing
    pub fn toggle_colliders(&mut self) {
        self.settings.show_colliders = !self.settings.show_colliders;
    }

    /// Flips contact drawing
    pub fn toggle_contacts(&mut self) {
        self.settings.show_contacts = !self.settings.show_contacts;
    }

    /// Flips floor-grid drawing
    pub fn toggle_grid(&mut self) {
        self.settings.show_grid = !self.settings.show_grid;
    }

    /// Frees every managed body and driver and restores default settings
    pub fn reset_scene(&mut self) {
        tracing::debug!("resetting scene");
        self.initialize(Settings::default());
    }

    /// Writes the current settings and bodies to a scene file
    pub fn save_scene(&self, path: &Path) -> Result<(), SceneError> {
        scene::save_scene(path, &self.settings, self.world.bodies())
    }

    /// Loads a scene file, replacing the current scene.
    ///
    /// The scene is reset before parsing, so a failed load leaves the world
    /// empty.
    pub fn load_scene(&mut self, path: &Path) -> Result<(), SceneError> {
        self.reset_scene();
        let data = scene::load_scene(path)?;
        self.initialize(data.settings);
        for body in data.bodies {
            self.world.add_body(body);
        }
        Ok(())
    }

    /// The most recently rebuilt debug-draw feed
    pub fn debug_draw_data(&self) -> &DebugDrawData {
        &self.debug_draw
    }

    /// Average frames per second over the timer's sample window
    pub fn average_fps(&self) -> f32 {
        self.timer.average_fps()
    }

    /// The current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The underlying world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The underlying world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Number of bodies in the world
    pub fn body_count(&self) -> u32 {
        self.world.body_count() as u32
    }

    /// A read-only snapshot of body `index`, in insertion order
    pub fn body_snapshot(&self, index: u32) -> Option<BodySnapshot> {
        self.world.body(BodyHandle::new(index)).map(|body| BodySnapshot {
            position: body.position,
            orientation: body.orientation,
            shape: body.shape,
        })
    }

    fn rebuild_debug_draw(&mut self) {
        self.debug_draw.clear();

        if self.settings.show_colliders {
            self.debug_draw.draw_colliders(self.world.bodies());
        }
        // show_contacts is accepted but contacts are not recorded across
        // the step, so there is nothing to draw yet
        if self.settings.show_grid {
            self.debug_draw.draw_grid();
        }
        self.debug_draw.draw_stats(
            self.timer.average_fps(),
            self.world.body_count(),
            self.settings.fixed_time_step,
        );
    }
}
