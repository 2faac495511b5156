//! Error types for clipping operations.

use thiserror::Error;

/// An inconsistency found while tracing the output of a clipping operation.
///
/// Unusual input, such as rings with too few vertices or non-overlapping geometries, never yields
/// an error; these variants signal a defect in the clipping state instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("border point references arc {arc}, which was never produced")]
    MissingArc { arc: usize },

    #[error("arc {arc} lacks its entry or exit crossing on the border")]
    OpenArc { arc: usize },

    #[error("tracing exceeded its budget of {limit} steps")]
    IterationLimit { limit: usize },
}

/// Result type alias for clipping operations.
pub type Result<T> = std::result::Result<T, Error>;
