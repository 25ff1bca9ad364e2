//! Decoding and encoding of the image files a gallery is built from.

mod api;
mod error;
mod raster;
mod tiff;
mod util;


pub use api::{FileFormat, is_supported, read_dataset, write_dataset};
pub use error::{IoError, Result};
