//! Typed n-dimensional datasets and the axis metadata that describes them.

mod axis;
mod dataset;
mod error;
mod metadata;


pub use axis::{AxisKind, PixelType};
pub use dataset::{Dataset, DatasetF32};
pub use error::{CoreError, Result};
pub use metadata::{Dim, Metadata};
