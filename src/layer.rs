//! Clipping of whole layers of features.
//!
//! A layer is any [`FeatureSource`]: an indexed collection of geometries, each paired with a row
//! of attributes. Clipping a layer appends to a [`FeatureSink`] every feature surviving the
//! boundary, with its geometry clipped and a copy of its attributes. Features are independent
//! from each other, so they get clipped in parallel when the `parallel` feature is enabled; the
//! output keeps the order of the input anyway.

use num_traits::Float;

use crate::{
    ClipBoundary, Clipper, Result, Shape, Tolerance,
    cartesian::{MultiPolyline, Point, Polygon, Polyline},
    maybe_rayon::*,
};

/// The geometry of a feature.
#[derive(Debug, Clone)]
pub enum Geometry<T = f64> {
    Point(Point<T>),
    Polyline(MultiPolyline<T>),
    Polygon(Shape<T>),
}

impl<T> PartialEq for Geometry<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Point(a), Self::Point(b)) => a == b,
            (Self::Polyline(a), Self::Polyline(b)) => a == b,
            (Self::Polygon(a), Self::Polygon(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> From<Point<T>> for Geometry<T> {
    fn from(point: Point<T>) -> Self {
        Self::Point(point)
    }
}

impl<T> From<Polyline<T>> for Geometry<T> {
    fn from(polyline: Polyline<T>) -> Self {
        Self::Polyline(polyline.into())
    }
}

impl<T> From<MultiPolyline<T>> for Geometry<T> {
    fn from(multi: MultiPolyline<T>) -> Self {
        Self::Polyline(multi)
    }
}

impl<T> From<Polygon<T>> for Geometry<T> {
    fn from(polygon: Polygon<T>) -> Self {
        Self::Polygon(polygon.into())
    }
}

impl<T> From<Shape<T>> for Geometry<T> {
    fn from(shape: Shape<T>) -> Self {
        Self::Polygon(shape)
    }
}

/// An indexed collection of features to clip.
pub trait FeatureSource<T> {
    /// The attributes of a single feature.
    type Row;
    /// The description of the attributes, shared by every feature.
    type Schema;

    fn row_count(&self) -> usize;

    fn shape_at(&self, index: usize) -> Option<&Geometry<T>>;

    fn attribute_row_at(&self, index: usize) -> Option<&Self::Row>;

    fn schema(&self) -> &Self::Schema;
}

/// A collection receiving clipped features.
pub trait FeatureSink<T, R> {
    fn append_shape(&mut self, geometry: Geometry<T>, row: R);
}

/// A geometry and its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature<T, R> {
    pub geometry: Geometry<T>,
    pub row: R,
}

/// An in-memory layer of features sharing the same schema.
#[derive(Debug, Clone)]
pub struct FeatureCollection<T, R, S = ()> {
    schema: S,
    features: Vec<Feature<T, R>>,
}

impl<T, R, S> FeatureCollection<T, R, S> {
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            features: Vec::new(),
        }
    }

    /// Appends a feature to the collection.
    pub fn push(&mut self, geometry: impl Into<Geometry<T>>, row: R) {
        self.features.push(Feature {
            geometry: geometry.into(),
            row,
        });
    }

    pub fn features(&self) -> &[Feature<T, R>] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<T, R, S> FeatureSource<T> for FeatureCollection<T, R, S> {
    type Row = R;
    type Schema = S;

    fn row_count(&self) -> usize {
        self.features.len()
    }

    fn shape_at(&self, index: usize) -> Option<&Geometry<T>> {
        self.features.get(index).map(|feature| &feature.geometry)
    }

    fn attribute_row_at(&self, index: usize) -> Option<&R> {
        self.features.get(index).map(|feature| &feature.row)
    }

    fn schema(&self) -> &S {
        &self.schema
    }
}

impl<T, R, S> FeatureSink<T, R> for FeatureCollection<T, R, S> {
    fn append_shape(&mut self, geometry: Geometry<T>, row: R) {
        self.push(geometry, row);
    }
}

impl<T> Clipper<&ClipBoundary<T>, Tolerance<T>>
where
    T: Float,
{
    /// Returns the given geometry clipped by the boundary, if anything of it survives.
    pub fn geometry(&self, geometry: &Geometry<T>) -> Result<Option<Geometry<T>>> {
        Ok(match geometry {
            Geometry::Point(point) => self.point(point).then_some(Geometry::Point(*point)),
            Geometry::Polyline(multi) => self.multi_polyline(multi).map(Geometry::Polyline),
            Geometry::Polygon(shape) => {
                let clipped = self.shape(shape)?;
                (!clipped.is_empty()).then_some(Geometry::Polygon(clipped))
            }
        })
    }
}

/// Returns a layer with the same schema as the given one, holding the features surviving the
/// boundary.
pub fn clip<T, L>(
    layer: &L,
    boundary: &ClipBoundary<T>,
    tolerance: Tolerance<T>,
) -> FeatureCollection<T, L::Row, L::Schema>
where
    T: Float + Send + Sync,
    L: FeatureSource<T> + Sync,
    L::Row: Clone + Send,
    L::Schema: Clone,
{
    clip_by_boundaries(layer, std::slice::from_ref(boundary), tolerance)
}

/// Returns a layer with the same schema as the given one, holding a feature for every
/// combination of input feature and boundary it survives.
///
/// Output features are sorted by input feature first, and by boundary then.
pub fn clip_by_boundaries<T, L>(
    layer: &L,
    boundaries: &[ClipBoundary<T>],
    tolerance: Tolerance<T>,
) -> FeatureCollection<T, L::Row, L::Schema>
where
    T: Float + Send + Sync,
    L: FeatureSource<T> + Sync,
    L::Row: Clone + Send,
    L::Schema: Clone,
{
    let mut output = FeatureCollection::new(layer.schema().clone());
    clip_into(layer, boundaries, tolerance, &mut output);
    output
}

/// Appends to the sink the features of the layer surviving each of the boundaries.
///
/// A feature whose clipping fails is left out of the output, and logged.
pub fn clip_into<T, L, K>(
    layer: &L,
    boundaries: &[ClipBoundary<T>],
    tolerance: Tolerance<T>,
    sink: &mut K,
) where
    T: Float + Send + Sync,
    L: FeatureSource<T> + Sync,
    L::Row: Clone + Send,
    K: FeatureSink<T, L::Row>,
{
    let clipped: Vec<Vec<(Geometry<T>, L::Row)>> = (0..layer.row_count())
        .into_par_iter()
        .map(|index| clip_feature(layer, index, boundaries, &tolerance))
        .collect();

    clipped
        .into_iter()
        .flatten()
        .for_each(|(geometry, row)| sink.append_shape(geometry, row));
}

fn clip_feature<T, L>(
    layer: &L,
    index: usize,
    boundaries: &[ClipBoundary<T>],
    tolerance: &Tolerance<T>,
) -> Vec<(Geometry<T>, L::Row)>
where
    T: Float,
    L: FeatureSource<T>,
    L::Row: Clone,
{
    let (Some(geometry), Some(row)) = (layer.shape_at(index), layer.attribute_row_at(index)) else {
        log::warn!("feature {index} lacks its geometry or its attributes");
        return Vec::new();
    };

    boundaries
        .iter()
        .filter_map(|boundary| {
            let clipper = Clipper::default()
                .with_boundary(boundary)
                .with_tolerance(*tolerance);

            clipper.geometry(geometry).unwrap_or_else(|error| {
                log::warn!("excluding feature {index} from the clipped layer: {error}");
                None
            })
        })
        .map(|geometry| (geometry, row.clone()))
        .collect()
}
