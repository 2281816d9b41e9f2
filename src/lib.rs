//! # Kinetix
//!
//! A real-time, impulse-based 3D rigid body physics engine.
//!
//! ## Features
//!
//! - **Rigid Body Dynamics**: semi-implicit Euler integration of linear and
//!   angular motion with per-step force accumulators
//! - **Collision Shapes**: spheres, axis-aligned boxes and oriented boxes
//! - **Broad Phase**: uniform spatial hash grid producing candidate pairs in
//!   roughly linear expected time
//! - **Narrow Phase**: shape-specific tests including a 15-axis separating
//!   axis theorem test for oriented boxes
//! - **Contact Resolution**: normal impulses with clamped-tangent Coulomb
//!   friction and positional correction
//! - **Constraints**: point-to-point, hinge, slider, distance and cone-twist
//!   joints plus host-driven kinematic hinges
//! - **Engine Layer**: fixed-timestep scheduler, body factories, scene
//!   persistence and a debug-draw feed for host renderers
//!
//! ## Quick Start
//!
//! ```rust
//! use kinetix::prelude::*;
//!
//! let mut engine = Engine::new();
//!
//! // a static ground plane and a falling ball
//! engine.create_plane(Vec3::Y, 0.0, 0.0);
//! let ball = engine.create_sphere(Vec3::new(0.0, 5.0, 0.0), 0.5, 1.0);
//!
//! // drive the simulation at 60 Hz
//! for _ in 0..600 {
//!     engine.update(1.0 / 60.0);
//! }
//!
//! let snapshot = engine.body_snapshot(ball.0).unwrap();
//! println!("ball ended up at {:?}", snapshot.position);
//! ```

pub mod collision;
pub mod constraints;
pub mod debug_draw;
pub mod dynamics;
mod engine;
pub mod math;
pub mod scene;
mod timer;
mod world;

pub use engine::{BodySnapshot, DriverHandle, Engine, Settings};
pub use timer::Timer;
pub use world::World;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{Contact, UniformGrid};
    pub use crate::constraints::{
        ConeTwistConstraint, Constraint, DistanceConstraint, HingeConstraint, HingeDriver,
        PointToPointConstraint, SliderConstraint,
    };
    pub use crate::debug_draw::DebugDrawData;
    pub use crate::dynamics::{Body, BodyHandle, Shape};
    pub use crate::engine::{BodySnapshot, DriverHandle, Engine, Settings};
    pub use crate::math::{Mat3, Quat, Vec3};
    pub use crate::world::World;
}
