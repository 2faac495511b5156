mod border;
mod line;
mod polygon;
mod trace;

/// Marker for yet undefined generic parameters.
pub struct Unknown;

/// A direction to follow when walking the border.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Walk the border clockwise.
    #[default]
    Forward,
    /// Walk the border counter-clockwise.
    Backward,
}

impl Direction {
    /// Returns the index following the given one in a circular list of the given length.
    pub(crate) fn step(&self, index: usize, len: usize) -> usize {
        match self {
            Self::Forward => (index + 1) % len,
            Self::Backward => (index + len - 1) % len,
        }
    }

    pub(crate) fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Clips geometries against a [`ClipBoundary`](crate::ClipBoundary).
///
/// ```
/// use ringclip::{ClipBoundary, Clipper, Tolerance, cartesian::{Extent, Polygon}};
///
/// let boundary: ClipBoundary = Extent::new(5., 5., 15., 15.).into();
/// let square = Polygon::from(vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.]]);
///
/// let clipped = Clipper::default()
///     .with_boundary(&boundary)
///     .with_tolerance(Tolerance::default())
///     .polygon(&square)
///     .unwrap();
///
/// assert_eq!(clipped.len(), 1);
/// assert_eq!(clipped[0].area(), 25.);
/// ```
pub struct Clipper<Boundary, Tolerance> {
    boundary: Boundary,
    tolerance: Tolerance,
}

impl Default for Clipper<Unknown, Unknown> {
    fn default() -> Self {
        Self {
            boundary: Unknown,
            tolerance: Unknown,
        }
    }
}

impl<Tol> Clipper<Unknown, Tol> {
    pub fn with_boundary<B>(self, boundary: B) -> Clipper<B, Tol> {
        Clipper {
            boundary,
            tolerance: self.tolerance,
        }
    }
}

impl<B> Clipper<B, Unknown> {
    pub fn with_tolerance<Tol>(self, tolerance: Tol) -> Clipper<B, Tol> {
        Clipper {
            boundary: self.boundary,
            tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn direction_steps() {
        struct Test {
            name: &'static str,
            direction: Direction,
            index: usize,
            want: usize,
        }

        vec![
            Test {
                name: "forward in the middle",
                direction: Direction::Forward,
                index: 2,
                want: 3,
            },
            Test {
                name: "forward wraps around",
                direction: Direction::Forward,
                index: 4,
                want: 0,
            },
            Test {
                name: "backward in the middle",
                direction: Direction::Backward,
                index: 2,
                want: 1,
            },
            Test {
                name: "backward wraps around",
                direction: Direction::Backward,
                index: 0,
                want: 4,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = test.direction.step(test.index, 5);
            assert_eq!(got, test.want, "{}", test.name);
        });
    }
}
