use std::cmp::Ordering;

use num_traits::Float;

use crate::{
    IsClose, Tolerance,
    boundary::Border,
    cartesian::{Point, Polyline, Ring, Segment},
};

use super::border::{BorderList, Crossing, Event};

/// How a sequence of points relates to the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Coverage {
    /// No stretch of the sequence lays outside the border.
    Inside,
    /// No stretch of the sequence lays inside the border.
    Outside,
    /// The sequence crosses the border.
    Crossing,
}

/// A stretch of a segment laying either inside or outside the border.
#[derive(Debug, Clone, Copy)]
struct Piece<T> {
    from: Point<T>,
    to: Point<T>,
    inside: bool,
    starts_at_vertex: bool,
    ends_at_vertex: bool,
}

/// Clips sequences of points against a [`Border`].
pub(crate) struct LineClipper<'a, T> {
    border: &'a Border<T>,
    tolerance: &'a Tolerance<T>,
}

impl<'a, T> LineClipper<'a, T>
where
    T: Float,
{
    pub fn new(border: &'a Border<T>, tolerance: &'a Tolerance<T>) -> Self {
        Self { border, tolerance }
    }

    /// Splits every segment of the sequence at its crossings with the border.
    fn pieces(&self, vertices: &[Point<T>], closed: bool) -> Vec<Piece<T>> {
        let closing = closed
            .then(|| vertices.last().zip(vertices.first()))
            .flatten()
            .filter(|_| vertices.len() > 2);

        let epsilon = self.tolerance.epsilon();
        let mut pieces = Vec::with_capacity(vertices.len());

        for (from, to) in vertices.iter().zip(vertices.iter().skip(1)).chain(closing) {
            let segment = Segment::new(from, to);
            let length = segment.length();
            if length <= epsilon {
                continue;
            }

            let mut fractions = self.border.crossings(&segment, self.tolerance);
            fractions.extend([T::zero(), T::one()]);
            fractions
                .iter_mut()
                .for_each(|t| *t = t.max(T::zero()).min(T::one()));
            fractions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            fractions.dedup_by(|a, b| (*a - *b) * length <= epsilon);

            if let Some(last) = fractions.last_mut() {
                *last = T::one();
            }

            let last = fractions.len() - 1;
            pieces.extend(fractions.windows(2).enumerate().map(|(index, window)| {
                let (start, end) = (window[0], window[1]);
                let middle = segment.at((start + end) / (T::one() + T::one()));

                Piece {
                    from: segment.at(start),
                    to: segment.at(end),
                    inside: self.border.contains(&middle, self.tolerance),
                    starts_at_vertex: index == 0,
                    ends_at_vertex: index + 1 == last,
                }
            }));
        }

        pieces
    }

    /// Returns the given point moved onto the border, unless it is a vertex of the input.
    fn anchor(&self, point: Point<T>, is_vertex: bool) -> Point<T> {
        if is_vertex {
            return point;
        }

        let (_, location) = self.border.locate(&point, self.tolerance);
        location
    }

    /// Returns the parts of the polyline laying inside the border.
    pub fn polyline(&self, polyline: &Polyline<T>) -> Vec<Polyline<T>> {
        let mut pieces = self.pieces(&polyline.vertices, polyline.closed);
        if pieces.iter().all(|piece| piece.inside) {
            let inside = !pieces.is_empty()
                || polyline
                    .vertices
                    .first()
                    .is_some_and(|vertex| self.border.contains(vertex, self.tolerance));

            return if inside {
                vec![polyline.clone()]
            } else {
                Vec::new()
            };
        }

        // A closed polyline is walked from its first outside piece, which closes the walk too.
        let mut sentinel = None;
        if polyline.closed
            && let Some(first_outside) = pieces.iter().position(|piece| !piece.inside)
        {
            pieces.rotate_left(first_outside);
            sentinel = pieces.first().copied();
        }

        let mut parts = Vec::new();
        let mut current: Option<Vec<Point<T>>> = None;
        for piece in pieces.iter().chain(sentinel.iter()) {
            match (piece.inside, current.take()) {
                (true, Some(mut points)) => {
                    if piece.ends_at_vertex {
                        push_distinct(&mut points, piece.to, self.tolerance);
                    }

                    current = Some(points);
                }
                (true, None) => {
                    let mut points = vec![self.anchor(piece.from, piece.starts_at_vertex)];
                    if piece.ends_at_vertex {
                        push_distinct(&mut points, piece.to, self.tolerance);
                    }

                    current = Some(points);
                }
                (false, Some(mut points)) => {
                    let exit = self.anchor(piece.from, piece.starts_at_vertex);
                    replace_or_push(&mut points, exit, self.tolerance);
                    parts.push(points);
                }
                (false, None) => {}
            }
        }

        parts.extend(current);
        parts
            .into_iter()
            .filter(|vertices| vertices.len() >= 2)
            .map(|vertices| Polyline {
                vertices,
                closed: false,
            })
            .collect()
    }

    /// Appends to the given list the arcs of the ring laying inside the border, registering the
    /// crossings that delimit them.
    ///
    /// The ring is walked from its first outside piece, so every arc has both an entry and an
    /// exit crossing. Nothing is registered unless the ring crosses the border.
    pub fn ring(
        &self,
        ring: &Ring<T>,
        list: &mut BorderList<T>,
        arcs: &mut Vec<Vec<Point<T>>>,
    ) -> Coverage {
        let mut pieces = self.pieces(&ring.vertices, true);
        let Some(first_outside) = pieces.iter().position(|piece| !piece.inside) else {
            return Coverage::Inside;
        };

        if pieces.iter().all(|piece| !piece.inside) {
            return Coverage::Outside;
        }

        pieces.rotate_left(first_outside);
        let sentinel = pieces[0];

        let mut current: Option<(usize, Vec<Point<T>>)> = None;
        for piece in pieces.iter().chain([&sentinel]) {
            match (piece.inside, current.take()) {
                (true, Some((arc, mut points))) => {
                    if piece.ends_at_vertex {
                        push_distinct(&mut points, piece.to, self.tolerance);
                    }

                    current = Some((arc, points));
                }
                (true, None) => {
                    let arc = arcs.len();
                    let entry = self.cross(list, &piece.from, Crossing {
                        arc,
                        event: Event::Entry,
                    });

                    let mut points = vec![entry];
                    if piece.ends_at_vertex {
                        push_distinct(&mut points, piece.to, self.tolerance);
                    }

                    current = Some((arc, points));
                }
                (false, Some((arc, mut points))) => {
                    let exit = self.cross(list, &piece.from, Crossing {
                        arc,
                        event: Event::Exit,
                    });

                    replace_or_push(&mut points, exit, self.tolerance);
                    arcs.push(points);
                }
                (false, None) => {}
            }
        }

        Coverage::Crossing
    }

    /// Registers the given crossing in the list and returns the point moved onto the border.
    fn cross(&self, list: &mut BorderList<T>, point: &Point<T>, crossing: Crossing) -> Point<T> {
        let (position, point) = self.border.locate(point, self.tolerance);
        list.insert(point, position, crossing);
        point
    }
}

/// Pushes the point unless it is the same as the latest one.
fn push_distinct<T>(points: &mut Vec<Point<T>>, point: Point<T>, tolerance: &Tolerance<T>)
where
    T: Float,
{
    if points
        .last()
        .is_none_or(|last| !last.is_close(&point, tolerance))
    {
        points.push(point);
    }
}

/// Pushes the point, replacing the latest one if they are the same.
fn replace_or_push<T>(points: &mut Vec<Point<T>>, point: Point<T>, tolerance: &Tolerance<T>)
where
    T: Float,
{
    match points.last_mut() {
        Some(last) if last.is_close(&point, tolerance) => *last = point,
        _ => points.push(point),
    }
}
