mod body;

pub use body::{Body, BodyHandle, Shape};
