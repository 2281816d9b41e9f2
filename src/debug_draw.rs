use serde::{Deserialize, Serialize};

use crate::dynamics::{Body, Shape};
use crate::math::{Quat, Vec3};

const COLOR_DYNAMIC: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const COLOR_STATIC: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const COLOR_GRID: Vec3 = Vec3::new(0.3, 0.3, 0.3);
const COLOR_TEXT: Vec3 = Vec3::new(1.0, 1.0, 1.0);

const SPHERE_SEGMENTS: usize = 16;
const GRID_HALF_SIZE: f32 = 20.0;
const GRID_SPACING: f32 = 1.0;

/// A debug line segment with an RGB color
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Vec3,
}

/// A debug point marker
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DebugPoint {
    pub position: Vec3,
    pub color: Vec3,
    pub size: f32,
}

/// A debug text label anchored in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugText {
    pub text: String,
    pub position: Vec3,
    pub color: Vec3,
}

/// The visualization feed the engine rebuilds after each update: polylines
/// for colliders and the floor grid, point markers, and stats text. Hosts
/// consume this wholesale (it serializes cleanly for remote renderers).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugDrawData {
    pub lines: Vec<DebugLine>,
    pub points: Vec<DebugPoint>,
    pub texts: Vec<DebugText>,
}

impl DebugDrawData {
    /// Empties all three buffers
    pub fn clear(&mut self) {
        self.lines.clear();
        self.points.clear();
        self.texts.clear();
    }

    /// Appends a line segment
    pub fn add_line(&mut self, start: Vec3, end: Vec3, color: Vec3) {
        self.lines.push(DebugLine { start, end, color });
    }

    /// Appends a point marker
    pub fn add_point(&mut self, position: Vec3, color: Vec3, size: f32) {
        self.points.push(DebugPoint {
            position,
            color,
            size,
        });
    }

    /// Appends a text label
    pub fn add_text(&mut self, text: impl Into<String>, position: Vec3, color: Vec3) {
        self.texts.push(DebugText {
            text: text.into(),
            position,
            color,
        });
    }

    /// Draws wireframes for every body: 12 edges per box, three great
    /// circles per sphere. Dynamic bodies are green, static red.
    pub(crate) fn draw_colliders(&mut self, bodies: &[Body]) {
        for body in bodies {
            let color = if body.is_static() { COLOR_STATIC } else { COLOR_DYNAMIC };

            match body.shape {
                Shape::Sphere { radius } => self.draw_sphere(body.position, radius, color),
                Shape::Box { half_extents } => {
                    self.draw_box(body.position, half_extents, Quat::IDENTITY, color)
                }
                Shape::OrientedBox { half_extents } => {
                    self.draw_box(body.position, half_extents, body.orientation, color)
                }
            }
        }
    }

    fn draw_box(&mut self, center: Vec3, half_extents: Vec3, orientation: Quat, color: Vec3) {
        // corner i has its sign bits in i's binary digits
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let local = Vec3::new(
                if i & 1 != 0 { half_extents.x } else { -half_extents.x },
                if i & 2 != 0 { half_extents.y } else { -half_extents.y },
                if i & 4 != 0 { half_extents.z } else { -half_extents.z },
            );
            *corner = center + orientation.rotate_vec(local);
        }

        // an edge connects corners differing in exactly one bit
        for i in 0..8usize {
            for bit in [1usize, 2, 4] {
                let j = i | bit;
                if j != i {
                    self.add_line(corners[i], corners[j], color);
                }
            }
        }
    }

    fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Vec3) {
        let step = std::f32::consts::TAU / SPHERE_SEGMENTS as f32;
        for i in 0..SPHERE_SEGMENTS {
            let (s0, c0) = (i as f32 * step).sin_cos();
            let (s1, c1) = ((i + 1) as f32 * step).sin_cos();

            // great circles in the XY, XZ and YZ planes
            self.add_line(
                center + Vec3::new(c0, s0, 0.0) * radius,
                center + Vec3::new(c1, s1, 0.0) * radius,
                color,
            );
            self.add_line(
                center + Vec3::new(c0, 0.0, s0) * radius,
                center + Vec3::new(c1, 0.0, s1) * radius,
                color,
            );
            self.add_line(
                center + Vec3::new(0.0, c0, s0) * radius,
                center + Vec3::new(0.0, c1, s1) * radius,
                color,
            );
        }
    }

    /// Draws the floor grid in the XZ plane at y = 0
    pub(crate) fn draw_grid(&mut self) {
        let mut coord = -GRID_HALF_SIZE;
        while coord <= GRID_HALF_SIZE {
            self.add_line(
                Vec3::new(coord, 0.0, -GRID_HALF_SIZE),
                Vec3::new(coord, 0.0, GRID_HALF_SIZE),
                COLOR_GRID,
            );
            self.add_line(
                Vec3::new(-GRID_HALF_SIZE, 0.0, coord),
                Vec3::new(GRID_HALF_SIZE, 0.0, coord),
                COLOR_GRID,
            );
            coord += GRID_SPACING;
        }
    }

    /// Draws the stats overlay text
    pub(crate) fn draw_stats(&mut self, fps: f32, body_count: usize, time_step: f32) {
        let stats = format!("FPS: {fps:.1}\nBodies: {body_count}\nTime Step: {time_step}");
        self.add_text(stats, Vec3::new(-10.0, 10.0, 0.0), COLOR_TEXT);
    }
}
