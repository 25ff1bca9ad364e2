use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayD, Axis, Ix2};

use super::{AxisKind, CoreError, Metadata, Result};

#[derive(Debug, Clone)]
pub struct Dataset<T> {
    pub data: ArrayD<T>,
    pub metadata: Metadata,
}

impl<T> Dataset<T> {
    pub fn new(data: ArrayD<T>, metadata: Metadata) -> Result<Self> {
        metadata.validate_shape(data.shape())?;
        Ok(Self { data, metadata })
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn axis_index(&self, axis: AxisKind) -> Option<usize> {
        self.metadata.axis_index(axis)
    }

    /// `(width, height)` of one plane.
    pub fn frame_size(&self) -> Option<(usize, usize)> {
        self.metadata.frame_size()
    }

    pub fn depth(&self) -> usize {
        self.metadata.depth()
    }

    pub fn validate(&self) -> Result<()> {
        self.metadata.validate_shape(self.data.shape())
    }
}

impl Dataset<f32> {
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let range = self
            .data
            .par_iter()
            .fold(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |(min, max), value| (min.min(*value), max.max(*value)),
            )
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |left, right| (left.0.min(right.0), left.1.max(right.1)),
            );
        Some(range)
    }

    /// Extracts plane `index` as a `[Y, X]` array. Channel axes are averaged
    /// down to a single grey value.
    pub fn plane(&self, index: usize) -> Result<Array2<f32>> {
        let y = self.axis_index(AxisKind::Y).ok_or(CoreError::MissingAxis("Y"))?;
        let x = self.axis_index(AxisKind::X).ok_or(CoreError::MissingAxis("X"))?;
        let depth = self.depth();
        if index >= depth {
            return Err(CoreError::PlaneOutOfRange { index, depth });
        }

        let mut order = vec![y, x];
        order.extend((0..self.ndim()).filter(|axis| *axis != y && *axis != x));
        let view = self.data.view().permuted_axes(order.clone());

        let mut plane = match self.axis_index(AxisKind::Z) {
            Some(z) => {
                let position = order
                    .iter()
                    .position(|axis| *axis == z)
                    .ok_or(CoreError::MissingAxis("Z"))?;
                view.index_axis_move(Axis(position), index).to_owned()
            }
            None => view.to_owned(),
        };
        while plane.ndim() > 2 {
            plane = plane
                .mean_axis(Axis(2))
                .ok_or_else(|| CoreError::PlaneShape("empty channel axis".into()))?;
        }
        plane
            .into_dimensionality::<Ix2>()
            .map_err(|error| CoreError::PlaneShape(error.to_string()))
    }

    /// Builds a new stack holding only the listed planes, in the given order.
    pub fn select_planes(&self, indices: &[usize]) -> Result<Self> {
        let depth = self.depth();
        if let Some(&index) = indices.iter().find(|index| **index >= depth) {
            return Err(CoreError::PlaneOutOfRange { index, depth });
        }
        let Some(z) = self.axis_index(AxisKind::Z) else {
            if indices.is_empty() {
                return Err(CoreError::EmptyAxis { axis: self.ndim() });
            }
            return Ok(self.clone());
        };
        let data = self.data.select(Axis(z), indices);
        let mut metadata = self.metadata.clone();
        metadata.dims[z].size = indices.len();
        Self::new(data, metadata)
    }
}

pub type DatasetF32 = Dataset<f32>;
