use std::path::Path;

use ndarray::{Array2, Axis};

use crate::formats::{IoError, read_dataset, write_dataset};
use crate::model::{Dataset, DatasetF32, Metadata, PixelType};

use super::{AppError, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct IoService;

impl IoService {
    pub fn read(&self, path: impl AsRef<Path>) -> Result<DatasetF32> {
        let dataset = read_dataset(path)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn write(&self, path: impl AsRef<Path>, dataset: &DatasetF32) -> Result<()> {
        write_dataset(path, dataset)?;
        Ok(())
    }

    /// Writes the listed Z planes of `dataset`, in the given order.
    pub fn write_planes(
        &self,
        path: impl AsRef<Path>,
        dataset: &DatasetF32,
        indices: &[usize],
    ) -> Result<usize> {
        if indices.is_empty() {
            return Err(AppError::EmptySelection);
        }
        self.write(path, &dataset.select_planes(indices)?)?;
        Ok(indices.len())
    }

    /// Stacks equally sized planes along Z and writes them as one volume.
    pub fn write_stack(&self, path: impl AsRef<Path>, planes: &[Array2<f32>]) -> Result<usize> {
        if planes.is_empty() {
            return Err(AppError::EmptySelection);
        }
        let views = planes.iter().map(Array2::view).collect::<Vec<_>>();
        let volume = ndarray::stack(Axis(2), &views).map_err(|error| {
            IoError::UnsupportedLayout(format!("planes differ in size: {error}"))
        })?;
        let metadata = Metadata::from_shape(volume.shape(), PixelType::F32);
        let dataset = Dataset::new(volume.into_dyn(), metadata)?;
        self.write(path, &dataset)?;
        Ok(planes.len())
    }
}
