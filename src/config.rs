mod document;
mod error;
mod properties;
mod settings;


pub use document::save_document;
pub use error::{ConfigError, Result};
pub use properties::Properties;
pub use settings::GallerySettings;
