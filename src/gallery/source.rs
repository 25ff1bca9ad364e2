use serde::Serialize;

use super::{ImageItem, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GalleryDimensions {
    pub item_count: usize,
    pub width: u32,
    pub height: u32,
}

/// Pixel size of the thumbnails currently requested by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ThumbSize {
    pub width: u32,
    pub height: u32,
}

pub trait DimensionSource {
    fn dimensions(&self) -> Result<GalleryDimensions>;
}

pub trait KeyDeriver {
    /// Cache key for `index` at the given thumbnail size. Must be stable for
    /// equal arguments and fail with `InvalidIndex` past the last item.
    fn key_for(&self, index: usize, size: ThumbSize) -> Result<String>;
}

pub trait ItemFactory {
    fn create(&self, index: usize, key: &str, size: ThumbSize) -> Result<ImageItem>;
}

pub trait RangeComputer {
    /// Global intensity range over every item of the source.
    fn min_max(&self) -> (f32, f32);
}

/// Everything a dataset type has to provide to back a gallery.
pub trait GallerySource: DimensionSource + KeyDeriver + ItemFactory + RangeComputer {
    fn title(&self) -> String;
}
