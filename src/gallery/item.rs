use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, Luma};
use ndarray::Array2;

use super::ThumbSize;

/// One renderable gallery cell: a grey thumbnail plus the overlays the model
/// applies on every lookup.
#[derive(Debug, Clone)]
pub struct ImageItem {
    pub index: usize,
    pub key: String,
    pub label: String,
    pub thumbnail: Array2<f32>,
    pub selected: bool,
    pub show_label: bool,
    native_range: (f32, f32),
    display_range: (f32, f32),
}

impl ImageItem {
    pub fn new(
        index: usize,
        key: impl Into<String>,
        label: impl Into<String>,
        thumbnail: Array2<f32>,
    ) -> Self {
        let native_range = value_range(&thumbnail);
        Self {
            index,
            key: key.into(),
            label: label.into(),
            thumbnail,
            selected: false,
            show_label: false,
            native_range,
            display_range: native_range,
        }
    }

    pub fn width(&self) -> u32 {
        self.thumbnail.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.thumbnail.nrows() as u32
    }

    pub fn native_range(&self) -> (f32, f32) {
        self.native_range
    }

    pub fn display_range(&self) -> (f32, f32) {
        self.display_range
    }

    pub fn set_display_range(&mut self, min: f32, max: f32) {
        self.display_range = (min, max);
    }

    pub fn reset_display_range(&mut self) {
        self.display_range = self.native_range;
    }

    /// Maps the display range onto 0..=255. A flat range renders black.
    pub fn to_gray8(&self) -> GrayImage {
        let (min, max) = self.display_range;
        let span = max - min;
        let bytes = self
            .thumbnail
            .iter()
            .map(|value| {
                if span <= f32::EPSILON {
                    0
                } else {
                    (((*value - min) / span).clamp(0.0, 1.0) * 255.0).round() as u8
                }
            })
            .collect::<Vec<_>>();
        GrayImage::from_vec(self.width(), self.height(), bytes)
            .unwrap_or_else(|| GrayImage::new(self.width(), self.height()))
    }
}

fn value_range(values: &Array2<f32>) -> (f32, f32) {
    values
        .iter()
        .copied()
        .fold(None, |range: Option<(f32, f32)>, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
        .unwrap_or((0.0, 0.0))
}

/// Resamples a `[Y, X]` plane to the requested thumbnail size. The resize
/// filter clamps float samples to `[0, 1]`, so samples are mapped into that
/// range first and back to their own scale afterwards.
pub(crate) fn scale_plane(plane: &Array2<f32>, size: ThumbSize) -> Result<Array2<f32>, String> {
    let (height, width) = plane.dim();
    if width as u32 == size.width && height as u32 == size.height {
        return Ok(plane.clone());
    }
    let target = (size.height as usize, size.width as usize);
    let (min, max) = value_range(plane);
    let span = max - min;
    if span <= f32::EPSILON {
        return Ok(Array2::from_elem(target, min));
    }
    let samples = plane.iter().map(|value| (value - min) / span).collect::<Vec<_>>();
    let buffer = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(width as u32, height as u32, samples)
        .ok_or_else(|| format!("plane of {width}x{height} has an inconsistent sample count"))?;
    let resized = imageops::resize(&buffer, size.width, size.height, FilterType::Triangle);
    let restored = resized.into_raw().into_iter().map(|value| min + value * span).collect();
    Array2::from_shape_vec(target, restored).map_err(|error| error.to_string())
}
