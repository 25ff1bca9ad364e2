//! Lazy, cache-backed thumbnail grid over a stack of images.
//!
//! [`GalleryModel`] maps a one dimensional collection of items onto rows and
//! columns, creates thumbnails on demand through a [`GallerySource`] and keeps
//! the per-item selection and global normalization state. Rendering surfaces
//! drain [`GalleryEvent`]s to learn which cells need repainting.

mod cache;
mod error;
mod events;
mod files;
mod geometry;
mod input;
mod item;
mod layout;
mod model;
mod selection;
mod sheet;
mod source;
mod stack;

#[cfg(test)]
mod tests;

pub use cache::{CacheBudget, CacheStats, DEFAULT_MEMORY_BYTES, ItemCache, MAX_PIXEL_BYTES};
pub use error::{GalleryError, Result};
pub use events::GalleryEvent;
pub use files::FileListSource;
pub use geometry::GridGeometry;
pub use input::GalleryInput;
pub use item::ImageItem;
pub use layout::{CellLayout, CellSize, Insets};
pub use model::{DEFAULT_BORDER, DEFAULT_LABEL_HEIGHT, GalleryModel, GalleryOptions};
pub use selection::Selection;
pub use sheet::{SheetCell, SheetLayout, render_sheet};
pub use source::{
    DimensionSource, GalleryDimensions, GallerySource, ItemFactory, KeyDeriver, RangeComputer,
    ThumbSize,
};
pub use stack::StackSource;
