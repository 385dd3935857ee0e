//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the particle-morph crate.
#[derive(Debug)]
pub enum MorphError {
    /// The equalizer was handed an empty list of point sets.
    NoPointSets,
    /// A point set has zero points; there is nothing to resample from.
    EmptyPointSet {
        /// Position of the offending set in the input list.
        index: usize,
    },
    /// A flat position buffer whose length is not a multiple of three.
    MalformedPointSet {
        /// Length of the rejected flat buffer.
        len: usize,
    },
    /// A single set was asked to equalize to fewer points than it holds.
    TargetTooSmall {
        /// Points in the set.
        count: usize,
        /// Requested output length.
        max_count: usize,
    },
    /// Source and target buffers of a morph pair differ in length.
    ShapeMismatch {
        /// Point count of the source buffer.
        source: usize,
        /// Point count of the target buffer.
        target: usize,
    },
    /// More points than a single GPU draw can instance.
    TooManyPoints {
        /// Point count of the rejected buffers.
        count: usize,
    },
    /// A pair selection refers to a model that was not loaded.
    PairIndexOutOfRange {
        /// The requested model index.
        index: usize,
        /// How many models are available.
        available: usize,
    },
    /// Failed to load or decode a model set.
    ModelLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPointSets => write!(f, "no point sets to equalize"),
            Self::EmptyPointSet { index } => {
                write!(f, "point set {index} has no points to resample")
            }
            Self::MalformedPointSet { len } => write!(
                f,
                "position buffer of length {len} is not a multiple of 3"
            ),
            Self::TargetTooSmall { count, max_count } => write!(
                f,
                "cannot equalize {count} points down to {max_count}"
            ),
            Self::ShapeMismatch { source, target } => write!(
                f,
                "morph source has {source} points but target has {target}"
            ),
            Self::TooManyPoints { count } => write!(
                f,
                "{count} points exceed the {} instances one draw can hold",
                u32::MAX
            ),
            Self::PairIndexOutOfRange { index, available } => write!(
                f,
                "model index {index} out of range ({available} loaded)"
            ),
            Self::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MorphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for MorphError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for MorphError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_point_set_names_the_index() {
        let err = MorphError::EmptyPointSet { index: 2 };
        assert_eq!(err.to_string(), "point set 2 has no points to resample");
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let err = MorphError::from(std::io::Error::other("disk gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk gone"));
    }
}
