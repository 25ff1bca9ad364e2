use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("array has {data} axes but the metadata describes {described}")]
    AxisCountMismatch { data: usize, described: usize },

    #[error("axis {axis} holds {data} samples but the metadata says {described}")]
    AxisLengthMismatch {
        axis: usize,
        data: usize,
        described: usize,
    },

    #[error("axis {axis} is empty")]
    EmptyAxis { axis: usize },

    #[error("dataset has no {0} axis")]
    MissingAxis(&'static str),

    #[error("plane {index} out of range for a stack of depth {depth}")]
    PlaneOutOfRange { index: usize, depth: usize },

    #[error("cannot reduce dataset to a plane: {0}")]
    PlaneShape(String),
}
