/// A type that may contain a single value or a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaybePair<T> {
    Single(T),
    Pair([T; 2]),
}

impl<T> IntoIterator for MaybePair<T> {
    type Item = T;
    type IntoIter = std::iter::Chain<std::array::IntoIter<T, 1>, std::option::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            MaybePair::Single(value) => [value].into_iter().chain(None),
            MaybePair::Pair([first, second]) => [first].into_iter().chain(Some(second)),
        }
    }
}

impl<T> MaybePair<T> {
    /// Returns a single value or a pair from the given options, if any is set.
    pub(crate) fn from_options(first: Option<T>, second: Option<T>) -> Option<Self> {
        match (first, second) {
            (Some(first), Some(second)) => Some(MaybePair::Pair([first, second])),
            (Some(value), None) | (None, Some(value)) => Some(MaybePair::Single(value)),
            (None, None) => None,
        }
    }
}
