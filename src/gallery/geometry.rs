use serde::Serialize;

/// Row-major grid over `item_count` items: `index = row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridGeometry {
    item_count: usize,
    rows: usize,
    cols: usize,
}

impl GridGeometry {
    /// Starts as a single column holding every item.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            rows: item_count,
            cols: 1,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Fixes the row count and derives the columns. Returns whether the
    /// geometry changed.
    pub fn set_rows(&mut self, rows: usize) -> bool {
        let rows = rows.max(1);
        if rows == self.rows {
            return false;
        }
        self.rows = rows;
        self.cols = self.item_count.div_ceil(rows).max(1);
        true
    }

    /// Fixes the column count and derives the rows. Returns whether the
    /// geometry changed.
    pub fn set_columns(&mut self, cols: usize) -> bool {
        let cols = cols.max(1);
        if cols == self.cols {
            return false;
        }
        self.cols = cols;
        self.rows = self.item_count.div_ceil(cols);
        true
    }

    /// Columns of `cell_width` pixels that fit in `width`, never less than one.
    pub fn columns_for_width(width: u32, cell_width: u32) -> usize {
        (width / cell_width.max(1)).max(1) as usize
    }

    /// `None` when `row * cols + col` does not fit in `usize`.
    pub fn coords_to_index(&self, row: usize, col: usize) -> Option<usize> {
        row.checked_mul(self.cols)?.checked_add(col)
    }

    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.item_count
    }
}
