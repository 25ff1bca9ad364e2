use std::path::Path;

use crate::model::DatasetF32;

use super::raster::{read_common_raster, write_common_raster};
use super::tiff::{read_tiff, write_tiff};
use super::{IoError, Result};

/// Container families a gallery can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Single frames: PNG or JPEG.
    Raster,
    /// Single frames or multi-page stacks.
    Tiff,
}

impl FileFormat {
    pub const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
    pub const TIFF_EXTENSIONS: &[&str] = &["tif", "tiff"];

    /// Picks the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| IoError::UnsupportedFormat(path.display().to_string()))?;
        if Self::RASTER_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Raster)
        } else if Self::TIFF_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Tiff)
        } else {
            Err(IoError::UnsupportedFormat(extension))
        }
    }
}

pub fn read_dataset(path: impl AsRef<Path>) -> Result<DatasetF32> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Raster => read_common_raster(path),
        FileFormat::Tiff => read_tiff(path),
    }
}

pub fn write_dataset(path: impl AsRef<Path>, dataset: &DatasetF32) -> Result<()> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Raster => write_common_raster(path, dataset),
        FileFormat::Tiff => write_tiff(path, dataset),
    }
}

/// Whether a directory listing should offer `path` as a gallery item.
pub fn is_supported(path: impl AsRef<Path>) -> bool {
    FileFormat::from_path(path.as_ref()).is_ok()
}
