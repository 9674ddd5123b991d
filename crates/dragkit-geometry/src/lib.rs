//! Pure point/rectangle math for dragkit
//!
//! This crate contains the geometry primitives shared by the registry, the
//! gesture engine and the hit-testing helpers. Everything here is plain
//! `Copy` data with no runtime dependencies.

mod geometry;
mod hit;

pub use geometry::*;
pub use hit::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::hit::{apply_offset, get_distance, includes_point, overlaps_rectangle};
}
