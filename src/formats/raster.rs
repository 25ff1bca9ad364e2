use std::path::Path;

use crate::model::{AxisKind, Dataset, DatasetF32, Dim, Metadata, PixelType};
use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::{Array2, Array3, Axis};

use super::util::to_u8_samples;
use super::{IoError, Result};

/// Decodes a PNG or JPEG frame. Colour images keep their three channels as a
/// trailing `Channel` axis; everything else becomes a single `[Y, X]` plane.
pub(crate) fn read_common_raster(path: &Path) -> Result<DatasetF32> {
    let image = image::open(path)?;
    let color = image.color();
    let pixel_type = PixelType::from_sample_bytes(
        usize::from(color.bytes_per_pixel()) / usize::from(color.channel_count().max(1)),
    );
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut dims = vec![Dim::new(AxisKind::Y, height), Dim::new(AxisKind::X, width)];

    if color.has_color() {
        let data = Array3::from_shape_vec((height, width, 3), image.to_rgb32f().into_raw())
            .map_err(|error| IoError::UnsupportedLayout(error.to_string()))?
            .into_dyn();
        dims.push(Dim::new(AxisKind::Channel, 3));
        let mut metadata = Metadata::for_file(path, dims, pixel_type);
        metadata.channel_names = ["R", "G", "B"].map(String::from).to_vec();
        return Ok(Dataset::new(data, metadata)?);
    }

    let data = Array2::from_shape_vec((height, width), image.to_luma32f().into_raw())
        .map_err(|error| IoError::UnsupportedLayout(error.to_string()))?
        .into_dyn();
    Ok(Dataset::new(data, Metadata::for_file(path, dims, pixel_type))?)
}

/// Writes a single grey plane, or an RGB image when the dataset carries a
/// three-entry channel axis.
pub(crate) fn write_common_raster(path: &Path, dataset: &DatasetF32) -> Result<()> {
    if let Some(rgb) = to_rgb8(dataset)? {
        rgb.save(path)?;
        return Ok(());
    }
    if dataset.depth() != 1 || dataset.ndim() > 3 {
        return Err(IoError::UnsupportedLayout(format!(
            "a PNG or JPEG holds one plane, found shape {:?}",
            dataset.shape()
        )));
    }
    let plane = dataset.plane(0)?;
    let (height, width) = plane.dim();
    let values = plane.iter().copied().collect::<Vec<_>>();
    let image = GrayImage::from_vec(width as u32, height as u32, to_u8_samples(&values))
        .ok_or_else(|| IoError::UnsupportedLayout("grey buffer does not fit the frame".into()))?;
    DynamicImage::ImageLuma8(image).save(path)?;
    Ok(())
}

fn to_rgb8(dataset: &DatasetF32) -> Result<Option<RgbImage>> {
    let Some(channel) = dataset.axis_index(AxisKind::Channel) else {
        return Ok(None);
    };
    if dataset.ndim() != 3 || dataset.shape()[channel] != 3 {
        return Ok(None);
    }
    let Some((width, height)) = dataset.frame_size() else {
        return Ok(None);
    };
    let bytes = dataset
        .data
        .lanes(Axis(channel))
        .into_iter()
        .flat_map(|pixel| {
            pixel
                .iter()
                .map(|value| (value.clamp(0.0, 1.0) * 255.0).round() as u8)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    RgbImage::from_vec(width as u32, height as u32, bytes)
        .map(Some)
        .ok_or_else(|| IoError::UnsupportedLayout("RGB buffer does not fit the frame".into()))
}
