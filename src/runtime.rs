mod context;
mod error;
mod gallery_service;
mod io_service;
mod tool_service;


pub use context::AppContext;
pub use error::{AppError, Result};
pub use gallery_service::{GalleryService, GallerySummary, parse_selection};
pub use io_service::IoService;
pub use tool_service::ToolService;
