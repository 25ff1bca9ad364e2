use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    CacheBudget, CacheStats, CellLayout, CellSize, GalleryDimensions, GalleryError, GalleryEvent,
    GallerySource, GridGeometry, ImageItem, Insets, ItemCache, Result, Selection, ThumbSize,
};

/// Default height reserved under a thumbnail for its label.
pub const DEFAULT_LABEL_HEIGHT: u32 = 18;

/// Default border drawn around every thumbnail.
pub const DEFAULT_BORDER: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryOptions {
    pub zoom: u32,
    pub label_height: u32,
    pub border: Insets,
    pub cache: CacheBudget,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            zoom: 100,
            label_height: DEFAULT_LABEL_HEIGHT,
            border: Insets::uniform(DEFAULT_BORDER),
            cache: CacheBudget::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Normalization {
    enabled: bool,
    range: Option<(f32, f32)>,
}

impl Normalization {
    fn active_range(&self) -> Option<(f32, f32)> {
        if self.enabled { self.range } else { None }
    }
}

/// Table model for a thumbnail gallery.
///
/// The model is driven from a single UI thread. Every change of visible
/// layout queues a [`GalleryEvent`]; the renderer drains them with
/// [`GalleryModel::take_events`].
pub struct GalleryModel<S> {
    source: S,
    dimensions: GalleryDimensions,
    geometry: GridGeometry,
    layout: CellLayout,
    selection: Selection,
    cache: ItemCache<ImageItem>,
    normalization: Normalization,
    adjust_columns: bool,
    last_width: u32,
    events: Vec<GalleryEvent>,
}

impl<S: GallerySource> GalleryModel<S> {
    pub fn new(source: S, zoom: u32) -> Result<Self> {
        Self::with_options(
            source,
            GalleryOptions {
                zoom,
                ..GalleryOptions::default()
            },
        )
    }

    pub fn with_options(source: S, options: GalleryOptions) -> Result<Self> {
        let dimensions = source.dimensions()?;
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(GalleryError::DimensionUnavailable(format!(
                "{} has an empty {}x{} frame",
                source.title(),
                dimensions.width,
                dimensions.height
            )));
        }
        let layout = CellLayout::new(
            dimensions.width,
            dimensions.height,
            options.zoom,
            options.label_height,
            options.border,
        );
        let capacity = options
            .cache
            .capacity_for(dimensions.width, dimensions.height);
        debug!(
            title = %source.title(),
            items = dimensions.item_count,
            width = dimensions.width,
            height = dimensions.height,
            capacity,
            "opened gallery"
        );
        Ok(Self {
            source,
            dimensions,
            geometry: GridGeometry::new(dimensions.item_count),
            layout,
            selection: Selection::new(dimensions.item_count),
            cache: ItemCache::new(capacity),
            normalization: Normalization::default(),
            adjust_columns: false,
            last_width: 0,
            events: Vec::new(),
        })
    }

    /// Item at a cell, or `None` for empty trailing cells and items that
    /// failed to load. Load failures are logged, never returned.
    pub fn get_value(&mut self, row: usize, col: usize) -> Option<&ImageItem> {
        let index = self.checked_index(row, col).ok()?;
        match self.lookup(index) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(index, %error, "failed to load gallery item");
                None
            }
        }
    }

    fn lookup(&mut self, index: usize) -> Result<&ImageItem> {
        let size = self.layout.thumb_size();
        let key = self.source.key_for(index, size)?;
        if self.cache.get_mut(&key).is_none() {
            debug!(index, key = %key, "gallery cache miss");
            let item = self.source.create(index, &key, size)?;
            self.cache.put(key.clone(), item);
        }
        let item = self
            .cache
            .peek_mut(&key)
            .ok_or_else(|| GalleryError::ItemCreation {
                index,
                reason: "item left the cache before use".to_string(),
            })?;
        item.selected = self.selection.is_selected(index);
        item.show_label = self.layout.show_labels();
        match self.normalization.active_range() {
            Some((min, max)) => item.set_display_range(min, max),
            None => item.reset_display_range(),
        }
        Ok(&*item)
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.adjust_columns = false;
        if self.geometry.set_rows(rows) {
            self.structure_changed();
        }
    }

    pub fn set_columns(&mut self, cols: usize) {
        self.adjust_columns = false;
        if self.geometry.set_columns(cols) {
            self.structure_changed();
        }
    }

    /// Fits as many columns as possible into `width` pixels and keeps doing
    /// so on later cell size changes, until rows or columns are set.
    pub fn adjust_to_width(&mut self, width: u32) {
        self.last_width = width;
        self.adjust_columns = true;
        let cols = GridGeometry::columns_for_width(width, self.layout.cell_size().width);
        if self.geometry.set_columns(cols) {
            self.structure_changed();
        }
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        if self.layout.set_zoom(zoom) {
            debug!(zoom = self.layout.zoom(), "gallery zoom changed");
            self.events.push(GalleryEvent::AllCellsChanged);
            self.readjust();
        }
    }

    pub fn set_show_labels(&mut self, show_labels: bool) {
        if self.layout.set_show_labels(show_labels) {
            self.events.push(GalleryEvent::AllCellsChanged);
            self.readjust();
        }
    }

    /// Switches global normalization. The range over the whole source is
    /// computed the first time it is enabled and reused afterwards.
    pub fn set_normalized(&mut self, enabled: bool) {
        if enabled == self.normalization.enabled {
            return;
        }
        self.normalization.enabled = enabled;
        if enabled && self.normalization.range.is_none() {
            let (min, max) = self.source.min_max();
            debug!(min, max, "computed gallery normalization range");
            self.normalization.range = Some((min, max));
        }
        self.events.push(GalleryEvent::AllCellsChanged);
    }

    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        self.geometry.index_to_coords(index)
    }

    pub fn coords_to_index(&self, row: usize, col: usize) -> Option<usize> {
        self.geometry.coords_to_index(row, col)
    }

    /// Resets every selection flag. No event is queued.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Toggles every item between two corners, inclusive, in row-major
    /// order. A corner on an empty trailing cell, or one whose index does not
    /// fit in `usize`, stops at the last item.
    pub fn toggle_range(
        &mut self,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<()> {
        let first = self
            .geometry
            .coords_to_index(first_row, first_col)
            .unwrap_or(usize::MAX);
        let last = self
            .geometry
            .coords_to_index(last_row, last_col)
            .unwrap_or(usize::MAX);
        let (start, end) = (first.min(last), first.max(last));
        if !self.geometry.contains(start) {
            return Err(self.invalid_index(start));
        }
        self.selection.toggle_range(start..=end);
        self.events.push(GalleryEvent::AllCellsChanged);
        Ok(())
    }

    pub fn toggle_item(&mut self, row: usize, col: usize) -> Result<()> {
        let index = self.checked_index(row, col)?;
        self.selection.toggle(index);
        self.events.push(GalleryEvent::CellChanged { row, col });
        Ok(())
    }

    /// Clears the selection and selects only `index`.
    pub fn goto_item(&mut self, index: usize) -> Result<()> {
        if !self.geometry.contains(index) {
            return Err(self.invalid_index(index));
        }
        self.selection.clear();
        self.selection.toggle(index);
        let (row, col) = self.geometry.index_to_coords(index);
        self.events.push(GalleryEvent::CellChanged { row, col });
        Ok(())
    }

    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.indices()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.is_selected(index)
    }

    /// Replaces the cache budget and resizes the cache to match.
    pub fn set_cache_budget(&mut self, budget: CacheBudget) {
        let capacity = budget.capacity_for(self.dimensions.width, self.dimensions.height);
        self.cache.resize(capacity);
    }

    pub fn take_events(&mut self) -> Vec<GalleryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GalleryEvent] {
        &self.events
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn title(&self) -> String {
        self.source.title()
    }

    pub fn dimensions(&self) -> GalleryDimensions {
        self.dimensions
    }

    pub fn item_count(&self) -> usize {
        self.geometry.item_count()
    }

    pub fn row_count(&self) -> usize {
        self.geometry.rows()
    }

    pub fn column_count(&self) -> usize {
        self.geometry.cols()
    }

    /// One-based header text for a column.
    pub fn column_name(&self, col: usize) -> String {
        (col + 1).to_string()
    }

    pub fn zoom(&self) -> u32 {
        self.layout.zoom()
    }

    pub fn scale(&self) -> f32 {
        self.layout.scale()
    }

    pub fn thumb_size(&self) -> ThumbSize {
        self.layout.thumb_size()
    }

    pub fn cell_size(&self) -> CellSize {
        self.layout.cell_size()
    }

    pub fn border(&self) -> Insets {
        self.layout.border()
    }

    pub fn label_height(&self) -> u32 {
        self.layout.label_height()
    }

    pub fn show_labels(&self) -> bool {
        self.layout.show_labels()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalization.enabled
    }

    pub fn normalization_range(&self) -> Option<(f32, f32)> {
        self.normalization.range
    }

    pub fn adjusts_columns(&self) -> bool {
        self.adjust_columns
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn readjust(&mut self) {
        if self.adjust_columns {
            self.adjust_to_width(self.last_width);
        }
    }

    fn structure_changed(&mut self) {
        debug!(
            rows = self.geometry.rows(),
            cols = self.geometry.cols(),
            "gallery geometry changed"
        );
        self.events.push(GalleryEvent::StructureChanged);
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        match self.geometry.coords_to_index(row, col) {
            Some(index) if col < self.geometry.cols() && self.geometry.contains(index) => Ok(index),
            _ => Err(self.invalid_index(
                row.saturating_mul(self.geometry.cols()).saturating_add(col),
            )),
        }
    }

    fn invalid_index(&self, index: usize) -> GalleryError {
        GalleryError::InvalidIndex {
            index,
            item_count: self.geometry.item_count(),
        }
    }
}
