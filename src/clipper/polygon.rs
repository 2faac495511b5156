use std::borrow::Cow;

use num_traits::Float;

use crate::{
    ClipBoundary, Result, Shape, Tolerance,
    boundary::Border,
    cartesian::{MultiPolyline, Point, Polygon, Polyline, Ring},
};

use super::{
    Clipper, Direction,
    border::BorderList,
    line::{Coverage, LineClipper},
    trace::Tracer,
};

impl<T> Clipper<&ClipBoundary<T>, Tolerance<T>>
where
    T: Float,
{
    /// Returns true if, and only if, the given point survives the clipping.
    pub fn point(&self, point: &Point<T>) -> bool {
        self.boundary.contains(point, &self.tolerance)
    }

    /// Returns the parts of the polyline laying inside the boundary, if any.
    pub fn polyline(&self, polyline: &Polyline<T>) -> Option<MultiPolyline<T>> {
        let parts = self.polyline_parts(polyline);
        (!parts.is_empty()).then(|| parts.into())
    }

    /// Returns the parts of every polyline laying inside the boundary, if any.
    pub fn multi_polyline(&self, multi: &MultiPolyline<T>) -> Option<MultiPolyline<T>> {
        let parts: Vec<_> = multi
            .parts
            .iter()
            .flat_map(|polyline| self.polyline_parts(polyline))
            .collect();

        (!parts.is_empty()).then(|| parts.into())
    }

    fn polyline_parts(&self, polyline: &Polyline<T>) -> Vec<Polyline<T>> {
        if !polyline.is_valid() {
            log::debug!(
                "skipping polyline of {} vertices",
                polyline.vertices.len()
            );

            return Vec::new();
        }

        let Some(extent) = polyline.extent() else {
            return Vec::new();
        };

        if self.boundary.is_degenerate(&self.tolerance)
            || !self.boundary.extent_overlaps(&extent, &self.tolerance)
        {
            return Vec::new();
        }

        if self.boundary.is_extent_fully_inside(&extent, &self.tolerance) {
            return vec![polyline.clone()];
        }

        let border = Border::new(self.boundary, &extent);
        LineClipper::new(&border, &self.tolerance).polyline(polyline)
    }

    /// Returns the polygons resulting from clipping the given one.
    ///
    /// A polygon whose extent lays inside the boundary is returned unchanged. Otherwise every
    /// output polygon has a clockwise exterior, holding the holes of the input that were not
    /// cut by the boundary.
    pub fn polygon(&self, polygon: &Polygon<T>) -> Result<Vec<Polygon<T>>> {
        let tolerance = &self.tolerance;
        let exterior = &polygon.exterior;

        if !exterior.is_valid() {
            log::debug!(
                "skipping polygon with an exterior of {} vertices",
                exterior.len()
            );

            return Ok(Vec::new());
        }

        let Some(extent) = exterior.extent() else {
            return Ok(Vec::new());
        };

        if self.boundary.is_degenerate(tolerance)
            || !self.boundary.extent_overlaps(&extent, tolerance)
        {
            return Ok(Vec::new());
        }

        if self.boundary.is_extent_fully_inside(&extent, tolerance) {
            return Ok(vec![polygon.clone()]);
        }

        let border = Border::new(self.boundary, &extent);
        let line_clipper = LineClipper::new(&border, tolerance);
        let mut list = BorderList::new(&border, self.tolerance);
        let mut arcs = Vec::new();

        match line_clipper.ring(exterior, &mut list, &mut arcs) {
            Coverage::Inside => return Ok(vec![polygon.clone()]),
            Coverage::Outside if !self.encloses(&border, exterior) => return Ok(Vec::new()),
            _ => {}
        }

        let clockwise = exterior.is_clockwise();
        let mut free_holes = Vec::new();
        for hole in &polygon.holes {
            if !hole.is_valid() {
                log::debug!("skipping hole of {} vertices", hole.len());
                continue;
            }

            let Some(hole_extent) = hole.extent() else {
                continue;
            };

            if !self.boundary.extent_overlaps(&hole_extent, tolerance) {
                continue;
            }

            if self.boundary.is_extent_fully_inside(&hole_extent, tolerance) {
                free_holes.push(hole);
                continue;
            }

            // Holes must wind against the exterior for their arcs to be traced along with it.
            let oriented = if hole.is_clockwise() == clockwise {
                Cow::Owned(hole.clone().reversed())
            } else {
                Cow::Borrowed(hole)
            };

            match line_clipper.ring(&oriented, &mut list, &mut arcs) {
                Coverage::Inside => free_holes.push(hole),
                Coverage::Outside if self.encloses(&border, hole) => {
                    log::debug!("the boundary lays inside a hole of the polygon");
                    return Ok(Vec::new());
                }
                _ => {}
            }
        }

        let rings = if arcs.is_empty() {
            vec![border.ring()]
        } else {
            let direction = if clockwise {
                Direction::Forward
            } else {
                Direction::Backward
            };

            list.settle(direction);
            Tracer::new(&list, &arcs, direction, tolerance).rings()?
        };

        let mut polygons: Vec<Polygon<T>> = rings.into_iter().map(Polygon::from).collect();
        for hole in free_holes {
            match polygons
                .iter_mut()
                .find(|polygon| surrounds(&polygon.exterior, hole, tolerance))
            {
                Some(polygon) => polygon.holes.push(hole.clone()),
                None => log::debug!(
                    "dropping hole of {} vertices outside every clipped polygon",
                    hole.len()
                ),
            }
        }

        Ok(polygons)
    }

    /// Returns the polygons resulting from clipping every polygon in the shape.
    pub fn shape(&self, shape: &Shape<T>) -> Result<Shape<T>> {
        let mut polygons = Vec::new();
        for polygon in &shape.polygons {
            polygons.extend(self.polygon(polygon)?);
        }

        Ok(polygons.into())
    }

    /// Returns true if, and only if, the given ring, which does not cross the border, encloses
    /// it.
    fn encloses(&self, border: &Border<T>, ring: &Ring<T>) -> bool {
        border
            .sample(ring, &self.tolerance)
            .is_some_and(|sample| ring.contains(&sample))
    }
}

/// Returns true if, and only if, the hole lays inside the given exterior.
fn surrounds<T>(exterior: &Ring<T>, hole: &Ring<T>, tolerance: &Tolerance<T>) -> bool
where
    T: Float,
{
    let (Some(outer), Some(inner)) = (exterior.extent(), hole.extent()) else {
        return false;
    };

    outer.contains_extent(&inner, tolerance)
        && hole
            .vertices
            .iter()
            .all(|vertex| exterior.covers(vertex, tolerance))
}
