use serde::{Deserialize, Serialize};

use super::ThumbSize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl Insets {
    pub fn uniform(width: u32) -> Self {
        Self {
            top: width,
            left: width,
            bottom: width,
            right: width,
        }
    }

    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

/// Pixel sizes of thumbnails and table cells for a given zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    base_width: u32,
    base_height: u32,
    zoom: u32,
    show_labels: bool,
    label_height: u32,
    border: Insets,
    thumb: ThumbSize,
    cell: CellSize,
}

impl CellLayout {
    pub fn new(
        base_width: u32,
        base_height: u32,
        zoom: u32,
        label_height: u32,
        border: Insets,
    ) -> Self {
        let mut layout = Self {
            base_width,
            base_height,
            zoom: zoom.max(1),
            show_labels: false,
            label_height,
            border,
            thumb: ThumbSize {
                width: 1,
                height: 1,
            },
            cell: CellSize {
                width: 1,
                height: 1,
            },
        };
        layout.recalculate();
        layout
    }

    /// Returns whether the zoom changed. Zero is treated as one percent.
    pub fn set_zoom(&mut self, zoom: u32) -> bool {
        let zoom = zoom.max(1);
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        self.recalculate();
        true
    }

    pub fn set_show_labels(&mut self, show_labels: bool) -> bool {
        if show_labels == self.show_labels {
            return false;
        }
        self.show_labels = show_labels;
        self.recalculate();
        true
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn scale(&self) -> f32 {
        self.zoom as f32 / 100.0
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn label_height(&self) -> u32 {
        self.label_height
    }

    pub fn border(&self) -> Insets {
        self.border
    }

    pub fn thumb_size(&self) -> ThumbSize {
        self.thumb
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell
    }

    fn recalculate(&mut self) {
        self.thumb = ThumbSize {
            width: scaled(self.base_width, self.zoom),
            height: scaled(self.base_height, self.zoom),
        };
        let label = if self.show_labels { self.label_height } else { 0 };
        self.cell = CellSize {
            width: self.thumb.width + self.border.horizontal(),
            height: self.thumb.height + self.border.vertical() + label,
        };
    }
}

// floor(base * zoom / 100) in integers, kept at one pixel or more.
fn scaled(base: u32, zoom: u32) -> u32 {
    let value = u64::from(base) * u64::from(zoom) / 100;
    value.clamp(1, u64::from(u32::MAX)) as u32
}
