use num_traits::Float;

use crate::{
    Error, Result, Tolerance,
    cartesian::{Point, Ring},
};

use super::{
    Direction,
    border::{BorderList, Crossing, Event},
};

/// Bounds the amount of steps a trace may take.
#[derive(Debug)]
struct Budget {
    limit: usize,
    spent: usize,
}

impl Budget {
    fn new(limit: usize) -> Self {
        Self { limit, spent: 0 }
    }

    fn spend(&mut self) -> Result<()> {
        self.spent += 1;
        if self.spent > self.limit {
            return Err(Error::IterationLimit { limit: self.limit });
        }

        Ok(())
    }
}

/// Builds the output rings out of the arcs of the subject and the border joining them.
pub(crate) struct Tracer<'a, T> {
    list: &'a BorderList<T>,
    arcs: &'a [Vec<Point<T>>],
    direction: Direction,
    tolerance: &'a Tolerance<T>,
}

impl<'a, T> Tracer<'a, T>
where
    T: Float,
{
    pub fn new(
        list: &'a BorderList<T>,
        arcs: &'a [Vec<Point<T>>],
        direction: Direction,
        tolerance: &'a Tolerance<T>,
    ) -> Self {
        Self {
            list,
            arcs,
            direction,
            tolerance,
        }
    }

    /// Returns the rings enclosed by the arcs and the border.
    ///
    /// Every ring starts at the entry of an arc not yet traced. After each arc the border is
    /// walked in the tracer's direction until the entry of the next arc, collecting the border
    /// vertices found on the way; the ring is closed once the walk comes back to an entry
    /// already traced.
    pub fn rings(&self) -> Result<Vec<Ring<T>>> {
        let ends = self.list.arc_ends(self.arcs.len())?;
        let len = self.list.len();

        let mut budget = Budget::new((len + 1) * (len + self.arcs.len() + 1));
        let mut visited = vec![false; len];
        let mut rings = Vec::new();

        for (start, &(entry, _)) in ends.iter().enumerate() {
            if visited[entry] {
                continue;
            }

            visited[entry] = true;

            let mut points = Vec::new();
            let mut arc = start;
            loop {
                budget.spend()?;
                points.extend_from_slice(&self.arcs[arc]);

                let (_, exit) = ends[arc];
                visited[exit] = true;

                let mut index = exit;
                let next = loop {
                    budget.spend()?;
                    index = self.direction.step(index, len);

                    let border_point = &self.list.points[index];
                    match border_point.crossing {
                        None => {
                            if let Some(corner) = border_point.corner {
                                log::trace!("walking past the {corner:?} corner");
                            }

                            points.push(border_point.point)
                        }
                        Some(Crossing {
                            arc,
                            event: Event::Entry,
                        }) => break (!visited[index]).then_some(arc),
                        Some(Crossing {
                            arc,
                            event: Event::Exit,
                        }) => log::trace!("walking past the exit of arc {arc}"),
                    }
                };

                let Some(next) = next else {
                    break;
                };

                visited[index] = true;
                arc = next;
            }

            let traced = Ring::traced(points, self.tolerance);
            match traced.len() {
                0 => log::debug!("discarding degenerate ring traced from arc {start}"),
                1 => {}
                count => log::debug!("splitting ring traced from arc {start} into {count}"),
            }

            rings.extend(traced);
        }

        Ok(rings)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        boundary::Border,
        cartesian::{Extent, Point, Ring},
        clipper::{
            Direction,
            border::{BorderList, Crossing, Event},
            line::LineClipper,
        },
    };

    use super::Tracer;

    #[test]
    fn traced_rings() {
        struct Test {
            name: &'static str,
            boundary: Extent<f64>,
            subject: Ring<f64>,
            want: Vec<Ring<f64>>,
        }

        vec![
            Test {
                name: "square over the corner of the rectangle",
                boundary: Extent::new(5., 5., 15., 15.),
                subject: vec![[0., 0.], [0., 10.], [10., 10.], [10., 0.]].into(),
                want: vec![vec![[5., 5.], [5., 10.], [10., 10.], [10., 5.]].into()],
            },
            Test {
                name: "rectangle cutting through the square",
                boundary: Extent::new(2., -5., 8., 15.),
                subject: vec![[0., 0.], [0., 10.], [10., 10.], [10., 0.]].into(),
                want: vec![vec![[2., 0.], [2., 10.], [8., 10.], [8., 0.]].into()],
            },
            Test {
                name: "u-shaped ring split in two",
                boundary: Extent::new(0., 5., 10., 20.),
                subject: vec![
                    [0., 0.],
                    [0., 10.],
                    [3., 10.],
                    [3., 3.],
                    [7., 3.],
                    [7., 10.],
                    [10., 10.],
                    [10., 0.],
                ]
                .into(),
                want: vec![
                    vec![[0., 5.], [0., 10.], [3., 10.], [3., 5.]].into(),
                    vec![[7., 5.], [7., 10.], [10., 10.], [10., 5.]].into(),
                ],
            },
            Test {
                name: "vertex touching the border splits the ring",
                boundary: Extent::new(0., 0., 10., 10.),
                subject: vec![[0., -5.], [2., 5.], [4., 0.], [6., 5.], [8., -5.]].into(),
                want: vec![
                    vec![[4., 0.], [6., 5.], [7., 0.]].into(),
                    vec![[1., 0.], [2., 5.], [4., 0.]].into(),
                ],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let tolerance = Default::default();
            let subject_extent = test.subject.extent().unwrap_or(test.boundary);
            let border = Border::new(&test.boundary.into(), &subject_extent);

            let mut list = BorderList::new(&border, tolerance);
            let mut arcs = Vec::new();
            LineClipper::new(&border, &tolerance).ring(&test.subject, &mut list, &mut arcs);
            list.settle(Direction::Forward);

            let got = Tracer::new(&list, &arcs, Direction::Forward, &tolerance).rings();
            assert_eq!(got, Ok(test.want), "{}", test.name);
        });
    }

    #[test]
    fn inconsistent_border_fails() {
        let tolerance = Default::default();
        let border = Border::new(
            &Extent::new(0., 0., 10., 10.).into(),
            &Extent::new(0., 0., 10., 10.),
        );

        let mut list = BorderList::new(&border, tolerance);
        let (position, point) = border.locate(&Point::new(0., 5.), &tolerance);
        list.insert(
            point,
            position,
            Crossing {
                arc: 0,
                event: Event::Entry,
            },
        );

        let arcs = vec![vec![point, Point::new(5., 5.)]];
        let got = Tracer::new(&list, &arcs, Direction::Forward, &tolerance).rings();
        assert_eq!(got, Err(Error::OpenArc { arc: 0 }));

        let got = Tracer::new(&list, &[], Direction::Forward, &tolerance).rings();
        assert_eq!(got, Err(Error::MissingArc { arc: 0 }));
    }
}
