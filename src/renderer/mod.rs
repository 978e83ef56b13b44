//! CPU tessellation of growth marks
//!
//! Turns the marks a tick produces into colored triangles that any backend
//! can upload as-is.

pub mod shapes;
pub mod vertex;

pub use shapes::{circle, segment, tessellate};
pub use vertex::{Vertex, as_bytes};
