use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::warn;

use crate::formats::{IoError, is_supported, read_dataset};

use super::item::scale_plane;
use super::{
    DimensionSource, GalleryDimensions, GalleryError, GallerySource, ImageItem, ItemFactory,
    KeyDeriver, RangeComputer, Result, ThumbSize,
};

/// Gallery with one item per image file. The first file sets the base
/// frame size; the others are resampled to it.
#[derive(Debug, Clone)]
pub struct FileListSource {
    paths: Vec<PathBuf>,
    title: String,
}

impl FileListSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let title = format!("{} files", paths.len());
        Self { paths, title }
    }

    /// Every supported image directly inside `dir`, sorted by name.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = fs::read_dir(dir)
            .map_err(IoError::from)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && is_supported(path))
            .collect::<Vec<_>>();
        paths.sort();
        let mut source = Self::new(paths);
        source.title = dir.display().to_string();
        Ok(source)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn path(&self, index: usize) -> Result<&Path> {
        self.paths
            .get(index)
            .map(PathBuf::as_path)
            .ok_or(GalleryError::InvalidIndex {
                index,
                item_count: self.paths.len(),
            })
    }
}

impl DimensionSource for FileListSource {
    fn dimensions(&self) -> Result<GalleryDimensions> {
        let first = self
            .paths
            .first()
            .ok_or_else(|| GalleryError::DimensionUnavailable("no image files".to_string()))?;
        let dataset = read_dataset(first).map_err(|error| {
            GalleryError::DimensionUnavailable(format!("{}: {error}", first.display()))
        })?;
        match dataset.frame_size() {
            Some((width, height)) => Ok(GalleryDimensions {
                item_count: self.paths.len(),
                width: width as u32,
                height: height as u32,
            }),
            None => Err(GalleryError::DimensionUnavailable(format!(
                "{} has no X/Y axes",
                first.display()
            ))),
        }
    }
}

impl KeyDeriver for FileListSource {
    fn key_for(&self, index: usize, size: ThumbSize) -> Result<String> {
        let path = self.path(index)?;
        Ok(format!("{}@{}x{}", path.display(), size.width, size.height))
    }
}

impl ItemFactory for FileListSource {
    fn create(&self, index: usize, key: &str, size: ThumbSize) -> Result<ImageItem> {
        let path = self.path(index)?;
        let creation_error = |reason: String| GalleryError::ItemCreation { index, reason };
        let dataset = read_dataset(path).map_err(|error| creation_error(error.to_string()))?;
        let plane = dataset
            .plane(0)
            .map_err(|error| creation_error(error.to_string()))?;
        let thumbnail = scale_plane(&plane, size).map_err(creation_error)?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| (index + 1).to_string());
        Ok(ImageItem::new(index, key, label, thumbnail))
    }
}

impl RangeComputer for FileListSource {
    fn min_max(&self) -> (f32, f32) {
        let (min, max) = self
            .paths
            .par_iter()
            .filter_map(|path| match read_dataset(path) {
                Ok(dataset) => dataset.min_max(),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping file in range scan");
                    None
                }
            })
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |left, right| (left.0.min(right.0), left.1.max(right.1)),
            );
        if min > max { (0.0, 0.0) } else { (min, max) }
    }
}

impl GallerySource for FileListSource {
    fn title(&self) -> String {
        self.title.clone()
    }
}
