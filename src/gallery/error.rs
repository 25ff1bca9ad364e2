use crate::formats::IoError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("index {index} out of range for a gallery of {item_count} items")]
    InvalidIndex { index: usize, item_count: usize },

    #[error("failed to create gallery item {index}: {reason}")]
    ItemCreation { index: usize, reason: String },

    #[error("gallery dimensions unavailable: {0}")]
    DimensionUnavailable(String),

    #[error("gallery image I/O failure: {0}")]
    Io(#[from] IoError),
}
