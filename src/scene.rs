//! Line-oriented scene persistence.
//!
//! The format is a plain text file with two sections: a `settings` header
//! followed by the timestep, gravity and material lines, then a `bodies`
//! header with a count and one line per body
//! (`shape x y z hx hy hz mass`). Shape tags: 0 sphere, 1 box, 2 oriented
//! box; lines with an unknown tag are discarded.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::dynamics::{Body, Shape};
use crate::engine::Settings;
use crate::math::Vec3;

const SHAPE_SPHERE: i32 = 0;
const SHAPE_BOX: i32 = 1;
const SHAPE_ORIENTED_BOX: i32 = 2;

/// Errors surfaced by scene save/load.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Reading or writing the file failed
    #[error("scene file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents did not match the scene format
    #[error("scene parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A parsed scene: settings plus the bodies to recreate.
#[derive(Debug)]
pub struct SceneData {
    pub settings: Settings,
    pub bodies: Vec<Body>,
}

/// Writes settings and bodies in the scene format.
pub fn save_scene(path: &Path, settings: &Settings, bodies: &[Body]) -> Result<(), SceneError> {
    let mut out = String::new();

    out.push_str("settings\n");
    out.push_str(&format!(
        "{} {} {}\n",
        settings.fixed_time_step, settings.max_time_step, settings.max_sub_steps
    ));
    out.push_str(&format!(
        "{} {} {}\n",
        settings.gravity.x, settings.gravity.y, settings.gravity.z
    ));
    out.push_str(&format!(
        "{} {}\n",
        settings.default_restitution, settings.default_friction
    ));

    out.push_str("bodies\n");
    out.push_str(&format!("{}\n", bodies.len()));
    for body in bodies {
        let (tag, extents) = match body.shape {
            Shape::Sphere { radius } => (SHAPE_SPHERE, Vec3::splat(radius)),
            Shape::Box { half_extents } => (SHAPE_BOX, half_extents),
            Shape::OrientedBox { half_extents } => (SHAPE_ORIENTED_BOX, half_extents),
        };
        out.push_str(&format!(
            "{} {} {} {} {} {} {} {}\n",
            tag,
            body.position.x,
            body.position.y,
            body.position.z,
            extents.x,
            extents.y,
            extents.z,
            body.mass
        ));
    }

    fs::write(path, out)?;
    Ok(())
}

/// Reads a scene file back into settings and bodies.
pub fn load_scene(path: &Path) -> Result<SceneData, SceneError> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines().enumerate();

    let mut settings = Settings::default();
    let mut bodies = Vec::new();

    while let Some((_, line)) = lines.next() {
        match line.trim() {
            "settings" => {
                let steps = expect_floats(&mut lines, 3)?;
                settings.fixed_time_step = steps[0];
                settings.max_time_step = steps[1];
                settings.max_sub_steps = steps[2] as u32;

                let gravity = expect_floats(&mut lines, 3)?;
                settings.gravity = Vec3::new(gravity[0], gravity[1], gravity[2]);

                let material = expect_floats(&mut lines, 2)?;
                settings.default_restitution = material[0];
                settings.default_friction = material[1];
            }
            "bodies" => {
                let count = expect_floats(&mut lines, 1)?[0] as usize;
                for _ in 0..count {
                    let fields = expect_floats(&mut lines, 8)?;
                    let tag = fields[0] as i32;
                    let position = Vec3::new(fields[1], fields[2], fields[3]);
                    let extents = Vec3::new(fields[4], fields[5], fields[6]);
                    let mass = fields[7];

                    let shape = match tag {
                        SHAPE_SPHERE => Shape::Sphere { radius: extents.x },
                        SHAPE_BOX => Shape::Box { half_extents: extents },
                        SHAPE_ORIENTED_BOX => Shape::OrientedBox { half_extents: extents },
                        other => {
                            tracing::warn!(tag = other, "discarding body with unknown shape tag");
                            continue;
                        }
                    };

                    bodies.push(Body::new(shape).with_position(position).with_mass(mass));
                }
            }
            _ => {}
        }
    }

    Ok(SceneData { settings, bodies })
}

/// Pulls the next line and parses exactly `count` whitespace-separated
/// floats from it.
fn expect_floats<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    count: usize,
) -> Result<Vec<f32>, SceneError> {
    let (index, line) = lines.next().ok_or(SceneError::Parse {
        line: 0,
        message: "unexpected end of file".into(),
    })?;
    let line_number = index + 1;

    let values: Vec<f32> = line
        .split_whitespace()
        .map(|field| {
            field.parse::<f32>().map_err(|_| SceneError::Parse {
                line: line_number,
                message: format!("expected a number, found {field:?}"),
            })
        })
        .collect::<Result<_, _>>()?;

    if values.len() != count {
        return Err(SceneError::Parse {
            line: line_number,
            message: format!("expected {count} values, found {}", values.len()),
        });
    }

    Ok(values)
}
