use thiserror::Error;

use crate::model::{CoreError, PixelType};

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("no reader or writer for `{0}`")]
    UnsupportedFormat(String),

    #[error("cannot store this dataset layout: {0}")]
    UnsupportedLayout(String),

    #[error("TIFF page {page} holds {found:?} samples but the first page holds {expected:?}")]
    MixedPageTypes {
        page: usize,
        expected: PixelType,
        found: PixelType,
    },

    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("raster codec failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF codec failed: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("decoded data does not form a dataset: {0}")]
    Core(#[from] CoreError),
}
