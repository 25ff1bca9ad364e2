use crate::config::ConfigError;
use crate::formats::IoError;
use crate::gallery::GalleryError;
use crate::model::CoreError;
use crate::tools::ToolError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("dataset error: {0}")]
    Dataset(#[from] CoreError),

    #[error("I/O service error: {0}")]
    Io(#[from] IoError),

    #[error("gallery error: {0}")]
    Gallery(#[from] GalleryError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("external tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("invalid selection `{spec}`: {reason}")]
    InvalidSelection { spec: String, reason: String },

    #[error("nothing selected")]
    EmptySelection,
}
