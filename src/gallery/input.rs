use std::path::PathBuf;

use super::{
    DimensionSource, FileListSource, GalleryDimensions, GalleryError, GallerySource, ImageItem,
    ItemFactory, KeyDeriver, RangeComputer, Result, StackSource, ThumbSize,
};

/// Source picked from command line inputs: one volume file becomes a stack,
/// a directory or several files become a file list.
#[derive(Debug, Clone)]
pub enum GalleryInput {
    Stack(StackSource),
    Files(FileListSource),
}

impl GalleryInput {
    pub fn open(inputs: &[PathBuf]) -> Result<Self> {
        match inputs {
            [] => Err(GalleryError::DimensionUnavailable(
                "no gallery input given".to_string(),
            )),
            [single] if single.is_dir() => Ok(Self::Files(FileListSource::from_directory(single)?)),
            [single] => Ok(Self::Stack(StackSource::open(single)?)),
            many => Ok(Self::Files(FileListSource::new(many.to_vec()))),
        }
    }

    fn inner(&self) -> &dyn GallerySource {
        match self {
            Self::Stack(stack) => stack,
            Self::Files(files) => files,
        }
    }
}

impl DimensionSource for GalleryInput {
    fn dimensions(&self) -> Result<GalleryDimensions> {
        self.inner().dimensions()
    }
}

impl KeyDeriver for GalleryInput {
    fn key_for(&self, index: usize, size: ThumbSize) -> Result<String> {
        self.inner().key_for(index, size)
    }
}

impl ItemFactory for GalleryInput {
    fn create(&self, index: usize, key: &str, size: ThumbSize) -> Result<ImageItem> {
        self.inner().create(index, key, size)
    }
}

impl RangeComputer for GalleryInput {
    fn min_max(&self) -> (f32, f32) {
        self.inner().min_max()
    }
}

impl GallerySource for GalleryInput {
    fn title(&self) -> String {
        self.inner().title()
    }
}
