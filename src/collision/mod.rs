pub mod broad_phase;
pub mod narrow_phase;
pub mod resolver;

pub use broad_phase::{CellCoord, UniformGrid};
pub use narrow_phase::{aabb_aabb, obb_aabb, obb_obb, sphere_sphere, test_pair, Contact, Obb};
pub use resolver::resolve_contact;
