use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::model::{AxisKind, Dataset, DatasetF32, Dim, Metadata, PixelType};
use ndarray::{Array2, Axis};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{TiffEncoder, colortype};

use super::util::{to_u8_samples, to_u16_samples};
use super::{IoError, Result};

/// Reads every page of a TIFF file. Multi-page files become `[Y, X, Z]`
/// stacks, single pages stay `[Y, X]`. All pages must share the frame size
/// and sample type of the first one.
pub(crate) fn read_tiff(path: &Path) -> Result<DatasetF32> {
    let mut decoder = Decoder::new(File::open(path)?)?;
    let (width, height) = decoder.dimensions()?;
    let frame = (height as usize, width as usize);

    let (first, pixel_type) = decode_page(&mut decoder, frame)?;
    let mut planes = vec![first];
    while decoder.more_images() {
        decoder.next_image()?;
        if decoder.dimensions()? != (width, height) {
            return Err(IoError::UnsupportedLayout(format!(
                "TIFF page {} is not {width}x{height}",
                planes.len()
            )));
        }
        let (plane, found) = decode_page(&mut decoder, frame)?;
        if found != pixel_type {
            return Err(IoError::MixedPageTypes {
                page: planes.len(),
                expected: pixel_type,
                found,
            });
        }
        planes.push(plane);
    }

    let mut dims = vec![Dim::new(AxisKind::Y, frame.0), Dim::new(AxisKind::X, frame.1)];
    let data = if let [plane] = planes.as_slice() {
        plane.clone().into_dyn()
    } else {
        dims.push(Dim::new(AxisKind::Z, planes.len()));
        let views = planes.iter().map(Array2::view).collect::<Vec<_>>();
        ndarray::stack(Axis(2), &views)
            .map_err(|error| IoError::UnsupportedLayout(error.to_string()))?
            .into_dyn()
    };
    Ok(Dataset::new(data, Metadata::for_file(path, dims, pixel_type))?)
}

/// Decodes the current page into unit-scaled samples.
fn decode_page(
    decoder: &mut Decoder<File>,
    frame: (usize, usize),
) -> Result<(Array2<f32>, PixelType)> {
    let (samples, pixel_type) = match decoder.read_image()? {
        DecodingResult::U8(buffer) => (
            buffer.into_iter().map(|value| f32::from(value) / 255.0).collect(),
            PixelType::U8,
        ),
        DecodingResult::U16(buffer) => (
            buffer.into_iter().map(|value| f32::from(value) / 65_535.0).collect(),
            PixelType::U16,
        ),
        DecodingResult::F32(buffer) => (buffer, PixelType::F32),
        other => {
            return Err(IoError::UnsupportedLayout(format!(
                "unsupported TIFF sample type: {other:?}"
            )));
        }
    };
    let plane = Array2::from_shape_vec(frame, samples).map_err(|_| {
        IoError::UnsupportedLayout("only single-channel TIFF pages are supported".into())
    })?;
    Ok((plane, pixel_type))
}

/// Writes one grey page per Z plane using the dataset's pixel type.
pub(crate) fn write_tiff(path: &Path, dataset: &DatasetF32) -> Result<()> {
    if dataset.axis_index(AxisKind::Channel).is_some() || dataset.ndim() > 3 {
        return Err(IoError::UnsupportedLayout(format!(
            "TIFF pages hold [Y, X] or [Y, X, Z], found shape {:?}",
            dataset.shape()
        )));
    }
    let mut encoder = TiffEncoder::new(File::create(path)?)?;
    for z in 0..dataset.depth() {
        write_page(&mut encoder, &dataset.plane(z)?, dataset.metadata.pixel_type)?;
    }
    Ok(())
}

fn write_page<W: Write + Seek>(
    encoder: &mut TiffEncoder<W>,
    plane: &Array2<f32>,
    pixel_type: PixelType,
) -> Result<()> {
    let (height, width) = (plane.nrows() as u32, plane.ncols() as u32);
    let samples = plane.iter().copied().collect::<Vec<_>>();
    match pixel_type {
        PixelType::U8 => {
            encoder.write_image::<colortype::Gray8>(width, height, &to_u8_samples(&samples))?
        }
        PixelType::U16 => {
            encoder.write_image::<colortype::Gray16>(width, height, &to_u16_samples(&samples))?
        }
        PixelType::F32 => encoder.write_image::<colortype::Gray32Float>(width, height, &samples)?,
    }
    Ok(())
}
