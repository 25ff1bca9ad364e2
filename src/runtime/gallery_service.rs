use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{GallerySettings, save_document};
use crate::formats::IoError;
use crate::gallery::{
    GalleryError, GalleryInput, GalleryModel, ItemFactory, KeyDeriver, SheetLayout, ThumbSize, render_sheet,
};

use super::{AppError, IoService, Result};

/// Parses `0-5,7` style selections into sorted, distinct indices below
/// `item_count`.
pub fn parse_selection(spec: &str, item_count: usize) -> Result<Vec<usize>> {
    let invalid = |reason: String| AppError::InvalidSelection {
        spec: spec.to_string(),
        reason,
    };
    let number = |text: &str| -> Result<usize> {
        let index = text
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid(format!("`{}` is not an index", text.trim())))?;
        if index >= item_count {
            return Err(GalleryError::InvalidIndex { index, item_count }.into());
        }
        Ok(index)
    };

    let mut indices = BTreeSet::new();
    for part in spec.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (number(start)?, number(end)?);
                if start > end {
                    return Err(invalid(format!("range {start}-{end} runs backwards")));
                }
                indices.extend(start..=end);
            }
            None => {
                indices.insert(number(part)?);
            }
        }
    }
    if indices.is_empty() {
        return Err(AppError::EmptySelection);
    }
    Ok(indices.into_iter().collect())
}

/// Shape of an opened gallery, as reported by `info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GallerySummary {
    pub title: String,
    pub items: usize,
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub columns: usize,
    pub zoom: u32,
    pub thumb_width: u32,
    pub thumb_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub cache_capacity: usize,
    pub selected: Vec<usize>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GalleryService {
    io: IoService,
}

impl GalleryService {
    pub fn load_settings(&self, path: Option<&Path>) -> Result<GallerySettings> {
        match path {
            Some(path) => Ok(GallerySettings::load(path)?),
            None => Ok(GallerySettings::default()),
        }
    }

    /// Opens the inputs and applies every layout request from `settings`.
    /// The returned model has no pending events.
    pub fn open(
        &self,
        inputs: &[PathBuf],
        settings: &GallerySettings,
    ) -> Result<GalleryModel<GalleryInput>> {
        let source = GalleryInput::open(inputs)?;
        let mut model = GalleryModel::with_options(source, settings.options())?;
        settings.apply(&mut model);
        let applied = model.take_events();
        debug!(events = applied.len(), "applied gallery settings");
        Ok(model)
    }

    /// Replaces the selection with `indices`.
    pub fn select(&self, model: &mut GalleryModel<GalleryInput>, indices: &[usize]) -> Result<()> {
        model.clear_selection();
        for &index in indices {
            let (row, col) = model.index_to_coords(index);
            model.toggle_item(row, col)?;
        }
        Ok(())
    }

    pub fn summary(&self, model: &GalleryModel<GalleryInput>) -> GallerySummary {
        let dimensions = model.dimensions();
        let thumb = model.thumb_size();
        let cell = model.cell_size();
        GallerySummary {
            title: model.title(),
            items: dimensions.item_count,
            width: dimensions.width,
            height: dimensions.height,
            rows: model.row_count(),
            columns: model.column_count(),
            zoom: model.zoom(),
            thumb_width: thumb.width,
            thumb_height: thumb.height,
            cell_width: cell.width,
            cell_height: cell.height,
            cache_capacity: model.cache_capacity(),
            selected: model.selected_indices(),
        }
    }

    /// Paints the contact sheet to `output` and optionally saves its layout.
    pub fn render(
        &self,
        model: &mut GalleryModel<GalleryInput>,
        output: impl AsRef<Path>,
        layout_path: Option<&Path>,
    ) -> Result<SheetLayout> {
        let output = output.as_ref();
        let (image, layout) = render_sheet(model);
        image.save(output).map_err(IoError::from)?;
        if let Some(path) = layout_path {
            save_document(path, &layout)?;
        }
        info!(
            output = %output.display(),
            cells = layout.cells.len(),
            "rendered contact sheet"
        );
        Ok(layout)
    }

    /// Writes the selected items as one volume at full resolution. File
    /// lists are resampled to the first file's frame size.
    pub fn export_selection(
        &self,
        model: &GalleryModel<GalleryInput>,
        output: impl AsRef<Path>,
    ) -> Result<usize> {
        let indices = model.selected_indices();
        match model.source() {
            GalleryInput::Stack(stack) => self.io.write_planes(output, stack.dataset(), &indices),
            GalleryInput::Files(files) => {
                let dimensions = model.dimensions();
                let size = ThumbSize {
                    width: dimensions.width,
                    height: dimensions.height,
                };
                let planes = indices
                    .iter()
                    .map(|&index| -> Result<_> {
                        let key = files.key_for(index, size)?;
                        Ok(files.create(index, &key, size)?.thumbnail)
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.io.write_stack(output, &planes)
            }
        }
    }
}
