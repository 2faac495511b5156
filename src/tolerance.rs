use num_traits::Float;

/// The default absolute deviation under which two coordinates are the same.
pub const COORD_EPSILON: f64 = 1e-10;

/// A value that is always positive.
#[derive(Debug, Default, Clone, Copy)]
pub struct Positive<T>(T);

impl<T> From<T> for Positive<T>
where
    T: Float,
{
    fn from(value: T) -> Self {
        Self(value.abs())
    }
}

impl<T> Positive<T> {
    /// Returns the inner value of self.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// The acceptable deviation between two values.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance<T> {
    /// The maximum allowed difference between two values.
    pub relative: Positive<T>,
    /// Used to compare values near zero.
    pub absolute: Positive<T>,
}

impl<T> Default for Tolerance<T>
where
    T: Float,
{
    /// Returns a tolerance of [`COORD_EPSILON`] absolute units and no relative slack.
    fn default() -> Self {
        Self {
            relative: Positive(T::zero()),
            absolute: Positive(scalar(COORD_EPSILON)),
        }
    }
}

impl<T> Tolerance<T>
where
    T: Float,
{
    /// Returns a tolerance with the given absolute slack and no relative one.
    pub fn with_absolute(absolute: T) -> Self {
        Self {
            relative: Positive(T::zero()),
            absolute: absolute.into(),
        }
    }

    /// Returns the absolute slack of this tolerance.
    pub fn epsilon(&self) -> T {
        self.absolute.0
    }
}

/// A value whose equality depends on a tolerance.
pub trait IsClose {
    type Scalar;

    /// Returns true if, and only if, self and rhs are close enough given a tolerance;
    /// otherwise returns false.
    fn is_close(&self, rhs: &Self, tolerance: &Tolerance<Self::Scalar>) -> bool;
}

impl<T> IsClose for T
where
    T: Float,
{
    type Scalar = T;

    fn is_close(&self, rhs: &Self, tolerance: &Tolerance<Self::Scalar>) -> bool {
        (*self - *rhs).abs()
            <= Self::max(
                tolerance.relative.0 * Self::max(self.abs(), rhs.abs()),
                tolerance.absolute.0,
            )
    }
}

/// Converts a literal into the scalar type of the geometry.
pub(crate) fn scalar<T>(value: f64) -> T
where
    T: Float,
{
    T::from(value).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use crate::{IsClose, Tolerance};

    #[test]
    fn scalar_closeness() {
        struct Test {
            name: &'static str,
            left: f64,
            right: f64,
            tolerance: Tolerance<f64>,
            want: bool,
        }

        vec![
            Test {
                name: "identical values",
                left: 1.,
                right: 1.,
                tolerance: Tolerance::default(),
                want: true,
            },
            Test {
                name: "values within the default epsilon",
                left: 1.,
                right: 1. + 1e-12,
                tolerance: Tolerance::default(),
                want: true,
            },
            Test {
                name: "values beyond the default epsilon",
                left: 1.,
                right: 1. + 1e-6,
                tolerance: Tolerance::default(),
                want: false,
            },
            Test {
                name: "values within a custom absolute slack",
                left: 1.,
                right: 1.001,
                tolerance: Tolerance::with_absolute(0.01),
                want: true,
            },
            Test {
                name: "large values within the relative slack",
                left: 1e9,
                right: 1e9 + 1.,
                tolerance: Tolerance {
                    relative: 1e-6.into(),
                    absolute: 0.0.into(),
                },
                want: true,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = test.left.is_close(&test.right, &test.tolerance);
            assert_eq!(got, test.want, "{}", test.name);
        });
    }
}
