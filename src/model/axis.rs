use serde::{Deserialize, Serialize};

/// Role of one array axis. Volumes are `[Y, X, Z]`; colour and any other
/// extra axes are averaged away when a plane is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    Y,
    X,
    Z,
    Channel,
}

impl AxisKind {
    /// Role of the axis at `position` in a freshly shaped array.
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => Self::Y,
            1 => Self::X,
            2 => Self::Z,
            _ => Self::Channel,
        }
    }
}

/// Sample type a dataset was stored with. Samples are always held as `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelType {
    U8,
    U16,
    #[default]
    F32,
}

impl PixelType {
    pub fn from_sample_bytes(bytes: usize) -> Self {
        match bytes {
            1 => Self::U8,
            2 => Self::U16,
            _ => Self::F32,
        }
    }
}
