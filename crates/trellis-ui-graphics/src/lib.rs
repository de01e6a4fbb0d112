//! Pure geometry data for Trellis
//!
//! Points, sizes and rectangles exchanged between the layout contract,
//! the layout driver and container policies.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
