use super::{GalleryService, IoService, ToolService};

/// Process-wide services, created once by the binary and passed down.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    io_service: IoService,
    gallery_service: GalleryService,
    tool_service: ToolService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn io_service(&self) -> &IoService {
        &self.io_service
    }

    pub fn gallery_service(&self) -> &GalleryService {
        &self.gallery_service
    }

    pub fn tool_service(&self) -> &ToolService {
        &self.tool_service
    }
}
