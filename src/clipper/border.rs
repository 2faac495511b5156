use num_traits::Float;

use crate::{
    Error, RectCorner, Result, Tolerance,
    boundary::{Border, BorderPosition},
    cartesian::Point,
};

use super::Direction;

/// Whether the subject enters or leaves the border at a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Entry,
    Exit,
}

impl Event {
    fn opposite(&self) -> Self {
        match self {
            Self::Entry => Self::Exit,
            Self::Exit => Self::Entry,
        }
    }
}

/// The endpoint of an arc on the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Crossing {
    pub arc: usize,
    pub event: Event,
}

/// A point of the border-point list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BorderPoint<T> {
    pub point: Point<T>,
    pub position: BorderPosition<T>,
    /// The arc this point is an endpoint of, if any.
    pub crossing: Option<Crossing>,
    pub corner: Option<RectCorner>,
}

/// The circular list of border vertices and crossings, ordered clockwise along the border.
#[derive(Debug)]
pub(crate) struct BorderList<T> {
    pub points: Vec<BorderPoint<T>>,
    tolerance: Tolerance<T>,
}

impl<T> BorderList<T>
where
    T: Float,
{
    pub fn new(border: &Border<T>, tolerance: Tolerance<T>) -> Self {
        let points = border
            .vertices()
            .into_iter()
            .enumerate()
            .map(|(edge, (point, corner))| BorderPoint {
                point,
                position: BorderPosition {
                    edge,
                    offset: T::zero(),
                },
                crossing: None,
                corner,
            })
            .collect();

        Self { points, tolerance }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Inserts the given crossing after every point whose position is not beyond it.
    pub fn insert(&mut self, point: Point<T>, position: BorderPosition<T>, crossing: Crossing) {
        let index = self
            .points
            .partition_point(|candidate| candidate.position <= position);

        log::trace!(
            "arc {} {:?} crosses the border at edge {}, inserted at {index}",
            crossing.arc,
            crossing.event,
            position.edge,
        );

        self.points.insert(
            index,
            BorderPoint {
                point,
                position,
                crossing: Some(crossing),
                corner: None,
            },
        );
    }

    /// Reorders runs of coincident crossings so that, in walking order, an exit is always
    /// followed by an entry.
    ///
    /// Each run starts with the event opposite to the crossing preceding it; a run with no
    /// preceding crossing starts with an exit. Entries and exits keep their relative order.
    pub fn settle(&mut self, direction: Direction) {
        if !direction.is_forward() {
            self.points.reverse();
        }

        let mut runs: Vec<Vec<usize>> = Vec::new();
        for (index, point) in self.points.iter().enumerate() {
            if point.crossing.is_none() {
                continue;
            }

            match runs.last_mut() {
                Some(run)
                    if run.last().is_some_and(|&last| {
                        self.points[last]
                            .position
                            .is_close(&point.position, &self.tolerance)
                    }) =>
                {
                    run.push(index)
                }
                _ => runs.push(vec![index]),
            }
        }

        for current in 0..runs.len() {
            if runs[current].len() < 2 {
                continue;
            }

            let preceding = (runs.len() > 1)
                .then(|| runs[(current + runs.len() - 1) % runs.len()].last())
                .flatten()
                .and_then(|&index| self.points[index].crossing)
                .map(|crossing| crossing.event);

            self.alternate(&runs[current], preceding.map_or(Event::Exit, |event| event.opposite()));
        }

        if !direction.is_forward() {
            self.points.reverse();
        }
    }

    /// Rearranges the crossings at the given slots so their events alternate, starting with the
    /// given one.
    fn alternate(&mut self, slots: &[usize], first: Event) {
        let (mut entries, mut exits): (Vec<_>, Vec<_>) = slots
            .iter()
            .map(|&slot| self.points[slot])
            .partition(|point| {
                point
                    .crossing
                    .is_some_and(|crossing| crossing.event == Event::Entry)
            });

        entries.reverse();
        exits.reverse();

        let mut event = first;
        for &slot in slots {
            let next = match event {
                Event::Entry => entries.pop().or_else(|| exits.pop()),
                Event::Exit => exits.pop().or_else(|| entries.pop()),
            };

            let Some(next) = next else {
                break;
            };

            if self.points[slot].crossing != next.crossing {
                log::trace!(
                    "tie-break moved the crossing of arc {:?} to slot {slot}",
                    next.crossing.map(|crossing| crossing.arc)
                );
            }

            self.points[slot] = next;
            event = event.opposite();
        }
    }

    /// Returns the index of the entry and exit crossings of every arc.
    pub fn arc_ends(&self, arcs: usize) -> Result<Vec<(usize, usize)>> {
        let mut ends = vec![(None, None); arcs];
        for (index, point) in self.points.iter().enumerate() {
            let Some(crossing) = point.crossing else {
                continue;
            };

            let (entry, exit) = ends
                .get_mut(crossing.arc)
                .ok_or(Error::MissingArc { arc: crossing.arc })?;

            match crossing.event {
                Event::Entry => *entry = Some(index),
                Event::Exit => *exit = Some(index),
            }
        }

        ends.into_iter()
            .enumerate()
            .map(|(arc, ends)| match ends {
                (Some(entry), Some(exit)) => Ok((entry, exit)),
                _ => Err(Error::OpenArc { arc }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        boundary::{Border, BorderPosition},
        cartesian::{Extent, Point},
        clipper::Direction,
    };

    use super::{BorderList, Crossing, Event};

    fn events(list: &BorderList<f64>) -> Vec<(usize, Event)> {
        list.points
            .iter()
            .filter_map(|point| point.crossing)
            .map(|crossing| (crossing.arc, crossing.event))
            .collect()
    }

    fn rectangle() -> Border<f64> {
        Border::new(
            &Extent::new(0., 0., 10., 10.).into(),
            &Extent::new(0., 0., 10., 10.),
        )
    }

    #[test]
    fn crossings_are_inserted_in_border_order() {
        let border = rectangle();
        let mut list = BorderList::new(&border, Default::default());

        let crossings = [
            ((3, 5.), 0, Event::Exit),
            ((0, 5.), 1, Event::Entry),
            ((1, 0.), 0, Event::Entry),
            ((0, 2.), 1, Event::Exit),
        ];

        for ((edge, offset), arc, event) in crossings {
            list.insert(
                Point::new(0., 0.),
                BorderPosition { edge, offset },
                Crossing { arc, event },
            );
        }

        assert_eq!(list.len(), 8);
        assert_eq!(
            events(&list),
            vec![
                (1, Event::Exit),
                (1, Event::Entry),
                (0, Event::Entry),
                (0, Event::Exit)
            ]
        );

        // The crossing at the start of the top side comes right after its corner.
        assert_eq!(list.points[4].corner, None);
        assert_eq!(list.points[4].crossing, Some(Crossing { arc: 0, event: Event::Entry }));
        assert_eq!(list.arc_ends(2), Ok(vec![(4, 7), (2, 1)]));
    }

    #[test]
    fn coincident_crossings_alternate() {
        struct Test {
            name: &'static str,
            crossings: Vec<(f64, usize, Event)>,
            direction: Direction,
            want: Vec<(usize, Event)>,
        }

        vec![
            Test {
                name: "single arc touching itself",
                crossings: vec![(5., 0, Event::Entry), (5., 0, Event::Exit)],
                direction: Direction::Forward,
                want: vec![(0, Event::Exit), (0, Event::Entry)],
            },
            Test {
                name: "single arc touching itself walking backward",
                crossings: vec![(5., 0, Event::Exit), (5., 0, Event::Entry)],
                direction: Direction::Backward,
                want: vec![(0, Event::Entry), (0, Event::Exit)],
            },
            Test {
                name: "pinch after an entry",
                crossings: vec![
                    (2., 0, Event::Entry),
                    (5., 1, Event::Entry),
                    (5., 0, Event::Exit),
                    (8., 1, Event::Exit),
                ],
                direction: Direction::Forward,
                want: vec![
                    (0, Event::Entry),
                    (0, Event::Exit),
                    (1, Event::Entry),
                    (1, Event::Exit),
                ],
            },
            Test {
                name: "already alternating",
                crossings: vec![
                    (2., 0, Event::Entry),
                    (5., 0, Event::Exit),
                    (5., 1, Event::Entry),
                    (8., 1, Event::Exit),
                ],
                direction: Direction::Forward,
                want: vec![
                    (0, Event::Entry),
                    (0, Event::Exit),
                    (1, Event::Entry),
                    (1, Event::Exit),
                ],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let border = rectangle();
            let mut list = BorderList::new(&border, Default::default());
            for (offset, arc, event) in test.crossings {
                list.insert(
                    Point::new(0., offset),
                    BorderPosition { edge: 0, offset },
                    Crossing { arc, event },
                );
            }

            list.settle(test.direction);
            assert_eq!(events(&list), test.want, "{}", test.name);
        });
    }

    #[test]
    fn arc_ends_report_inconsistencies() {
        let border = rectangle();

        let mut list = BorderList::new(&border, Default::default());
        list.insert(
            Point::new(0., 5.),
            BorderPosition { edge: 0, offset: 5. },
            Crossing { arc: 3, event: Event::Entry },
        );

        assert_eq!(list.arc_ends(1), Err(Error::MissingArc { arc: 3 }));

        let mut list = BorderList::new(&border, Default::default());
        list.insert(
            Point::new(0., 5.),
            BorderPosition { edge: 0, offset: 5. },
            Crossing { arc: 0, event: Event::Entry },
        );

        assert_eq!(list.arc_ends(1), Err(Error::OpenArc { arc: 0 }));
    }
}
