//! Planar primitives the clipper works with.

mod extent;
pub(crate) mod point;
mod polygon;
mod polyline;
mod ring;
mod segment;

pub use self::extent::Extent;
pub use self::point::Point;
pub use self::polygon::Polygon;
pub use self::polyline::{MultiPolyline, Polyline};
pub use self::ring::Ring;
pub use self::segment::Segment;
