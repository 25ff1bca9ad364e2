use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AxisKind, CoreError, PixelType, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dim {
    pub axis: AxisKind,
    pub size: usize,
}

impl Dim {
    pub fn new(axis: AxisKind, size: usize) -> Self {
        Self { axis, size }
    }
}

/// Axis layout and provenance of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub dims: Vec<Dim>,
    pub pixel_type: PixelType,
    pub channel_names: Vec<String>,
    pub source: Option<PathBuf>,
}

impl Metadata {
    pub fn from_shape(shape: &[usize], pixel_type: PixelType) -> Self {
        Self {
            dims: shape
                .iter()
                .enumerate()
                .map(|(position, &size)| Dim::new(AxisKind::for_position(position), size))
                .collect(),
            pixel_type,
            ..Self::default()
        }
    }

    /// Metadata of a dataset decoded from `path`.
    pub fn for_file(path: &Path, dims: Vec<Dim>, pixel_type: PixelType) -> Self {
        Self {
            dims,
            pixel_type,
            source: Some(path.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn axis_index(&self, axis: AxisKind) -> Option<usize> {
        self.dims.iter().position(|dim| dim.axis == axis)
    }

    pub fn axis_size(&self, axis: AxisKind) -> Option<usize> {
        self.axis_index(axis).map(|index| self.dims[index].size)
    }

    /// `(width, height)` of one frame, if both spatial axes are present.
    pub fn frame_size(&self) -> Option<(usize, usize)> {
        Some((self.axis_size(AxisKind::X)?, self.axis_size(AxisKind::Y)?))
    }

    /// Planes along Z. Datasets without a Z axis hold a single plane.
    pub fn depth(&self) -> usize {
        self.axis_size(AxisKind::Z).unwrap_or(1)
    }

    /// File name of the source, or `untitled`.
    pub fn title(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(
                || "untitled".to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
    }

    pub fn validate_shape(&self, shape: &[usize]) -> Result<()> {
        if self.dims.len() != shape.len() {
            return Err(CoreError::AxisCountMismatch {
                data: shape.len(),
                described: self.dims.len(),
            });
        }
        let mismatch = self
            .dims
            .iter()
            .zip(shape)
            .enumerate()
            .find(|(_, (dim, data))| dim.size == 0 || dim.size != **data);
        match mismatch {
            None => Ok(()),
            Some((axis, (dim, _))) if dim.size == 0 => Err(CoreError::EmptyAxis { axis }),
            Some((axis, (dim, &data))) => Err(CoreError::AxisLengthMismatch {
                axis,
                data,
                described: dim.size,
            }),
        }
    }
}
