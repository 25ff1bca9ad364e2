/// Repaint notifications queued by the model for the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryEvent {
    /// Row or column count changed.
    StructureChanged,
    /// Every visible cell must be redrawn.
    AllCellsChanged,
    CellChanged { row: usize, col: usize },
}
