use std::path::Path;

use crate::formats::read_dataset;
use crate::model::DatasetF32;

use super::item::scale_plane;
use super::{
    DimensionSource, GalleryDimensions, GalleryError, GallerySource, ImageItem, ItemFactory,
    KeyDeriver, RangeComputer, Result, ThumbSize,
};

/// Gallery over the Z planes of one volume.
#[derive(Debug, Clone)]
pub struct StackSource {
    dataset: DatasetF32,
    name: String,
}

impl StackSource {
    pub fn new(dataset: DatasetF32) -> Self {
        let name = dataset.metadata.title();
        Self { dataset, name }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(read_dataset(path)?))
    }

    pub fn dataset(&self) -> &DatasetF32 {
        &self.dataset
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let item_count = self.dataset.depth();
        if index >= item_count {
            return Err(GalleryError::InvalidIndex { index, item_count });
        }
        Ok(())
    }
}

impl DimensionSource for StackSource {
    fn dimensions(&self) -> Result<GalleryDimensions> {
        let (width, height) = self.dataset.frame_size().ok_or_else(|| {
            GalleryError::DimensionUnavailable(format!("{} has no X/Y axes", self.name))
        })?;
        Ok(GalleryDimensions {
            item_count: self.dataset.depth(),
            width: width as u32,
            height: height as u32,
        })
    }
}

impl KeyDeriver for StackSource {
    fn key_for(&self, index: usize, size: ThumbSize) -> Result<String> {
        self.check_index(index)?;
        Ok(format!(
            "{}:{index}@{}x{}",
            self.name, size.width, size.height
        ))
    }
}

impl ItemFactory for StackSource {
    fn create(&self, index: usize, key: &str, size: ThumbSize) -> Result<ImageItem> {
        self.check_index(index)?;
        let plane = self
            .dataset
            .plane(index)
            .map_err(|error| GalleryError::ItemCreation {
                index,
                reason: error.to_string(),
            })?;
        let thumbnail = scale_plane(&plane, size)
            .map_err(|reason| GalleryError::ItemCreation { index, reason })?;
        Ok(ImageItem::new(index, key, (index + 1).to_string(), thumbnail))
    }
}

impl RangeComputer for StackSource {
    fn min_max(&self) -> (f32, f32) {
        self.dataset.min_max().unwrap_or((0.0, 0.0))
    }
}

impl GallerySource for StackSource {
    fn title(&self) -> String {
        self.name.clone()
    }
}
