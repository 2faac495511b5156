//! Clipping of polylines and polygons with holes against a region of the plane.
//!
//! The region, a [`ClipBoundary`], may be an arbitrary simple ring, an axis-aligned rectangle or
//! one side of a longitude or latitude cut line. Inputs whose extent lays inside the boundary are
//! returned untouched, inputs away from it are rejected right away, and everything else goes
//! through the arc tracing clipper.
//!
//! ```
//! use ringclip::{ClipBoundary, clip_polygon, cartesian::{Extent, Polygon}};
//!
//! let boundary: ClipBoundary = Extent::new(5., 5., 15., 15.).into();
//! let square = Polygon::from(vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.]]);
//!
//! let clipped = clip_polygon(&square, &boundary).unwrap();
//! assert_eq!(clipped, vec![Polygon::from(vec![[5., 5.], [5., 10.], [10., 10.], [10., 5.]])]);
//! ```

mod boundary;
pub mod cartesian;
mod clipper;
mod error;
pub mod layer;
pub mod longitude;
mod maybe_rayon;
mod pair;
mod shape;
mod tolerance;

use num_traits::Float;

pub use self::boundary::{Axis, ClipBoundary, HalfPlane, RectCorner, Side};
pub use self::clipper::{Clipper, Unknown};
pub use self::error::{Error, Result};
pub use self::pair::MaybePair;
pub use self::shape::Shape;
pub use self::tolerance::{COORD_EPSILON, IsClose, Positive, Tolerance};

use self::{
    cartesian::{MultiPolyline, Polygon, Polyline},
    layer::{FeatureCollection, FeatureSource},
};

/// Returns the parts of the polyline laying inside the boundary, if any.
pub fn clip_polyline<T>(
    polyline: &Polyline<T>,
    boundary: &ClipBoundary<T>,
) -> Option<MultiPolyline<T>>
where
    T: Float,
{
    Clipper::default()
        .with_boundary(boundary)
        .with_tolerance(Tolerance::default())
        .polyline(polyline)
}

/// Returns the polygons resulting from clipping the given one by the boundary.
pub fn clip_polygon<T>(polygon: &Polygon<T>, boundary: &ClipBoundary<T>) -> Result<Vec<Polygon<T>>>
where
    T: Float,
{
    Clipper::default()
        .with_boundary(boundary)
        .with_tolerance(Tolerance::default())
        .polygon(polygon)
}

/// Returns the features of the layer surviving the boundary.
pub fn clip_layer<T, L>(
    layer: &L,
    boundary: &ClipBoundary<T>,
) -> FeatureCollection<T, L::Row, L::Schema>
where
    T: Float + Send + Sync,
    L: FeatureSource<T> + Sync,
    L::Row: Clone + Send,
    L::Schema: Clone,
{
    crate::layer::clip(layer, boundary, Tolerance::default())
}

/// Returns a feature for every combination of feature of the layer and boundary it survives.
pub fn clip_layer_by_boundaries<T, L>(
    layer: &L,
    boundaries: &[ClipBoundary<T>],
) -> FeatureCollection<T, L::Row, L::Schema>
where
    T: Float + Send + Sync,
    L: FeatureSource<T> + Sync,
    L::Row: Clone + Send,
    L::Schema: Clone,
{
    crate::layer::clip_by_boundaries(layer, boundaries, Tolerance::default())
}
