use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gallery::{
    CacheBudget, DEFAULT_BORDER, DEFAULT_LABEL_HEIGHT, GalleryModel, GalleryOptions,
    GallerySource, Insets, MAX_PIXEL_BYTES,
};

use super::{ConfigError, Properties, Result};

const DEFAULT_CACHE_MEMORY_MB: usize = 64;

/// User facing gallery settings, loaded from YAML, JSON or `.properties`.
///
/// Layout requests are applied in order of precedence: `columns`, then
/// `rows`, then fitting to `width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    pub zoom: u32,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
    pub width: Option<u32>,
    pub show_labels: bool,
    pub normalize: bool,
    pub label_height: u32,
    pub border: u32,
    pub cache_memory_mb: usize,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            zoom: 100,
            columns: None,
            rows: None,
            width: None,
            show_labels: false,
            normalize: false,
            label_height: DEFAULT_LABEL_HEIGHT,
            border: DEFAULT_BORDER,
            cache_memory_mb: DEFAULT_CACHE_MEMORY_MB,
        }
    }
}

impl GallerySettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Ok(serde_yaml::from_str(&fs::read_to_string(path)?)?),
            "json" => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
            "properties" => Ok(Self::from_properties(&Properties::load(path)?)),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Missing or malformed keys keep their defaults.
    pub fn from_properties(properties: &Properties) -> Self {
        let defaults = Self::default();
        let count = |key: &str| {
            properties
                .get_number(key)
                .filter(|value| *value >= 0.0)
                .map(|value| value as usize)
        };
        Self {
            zoom: count("zoom").map_or(defaults.zoom, |value| value as u32),
            columns: count("columns"),
            rows: count("rows"),
            width: count("width").map(|value| value as u32),
            show_labels: properties.get_boolean("show_labels"),
            normalize: properties.get_boolean("normalize"),
            label_height: count("label_height").map_or(defaults.label_height, |value| value as u32),
            border: count("border").map_or(defaults.border, |value| value as u32),
            cache_memory_mb: count("cache_memory_mb").unwrap_or(defaults.cache_memory_mb),
        }
    }

    pub fn options(&self) -> GalleryOptions {
        GalleryOptions {
            zoom: self.zoom,
            label_height: self.label_height,
            border: Insets::uniform(self.border),
            cache: CacheBudget {
                memory_bytes: self.cache_memory_mb.saturating_mul(1024 * 1024),
                max_pixel_bytes: MAX_PIXEL_BYTES,
            },
        }
    }

    /// Applies layout, label and normalization requests to a fresh model.
    pub fn apply<S: GallerySource>(&self, model: &mut GalleryModel<S>) {
        if let Some(columns) = self.columns {
            model.set_columns(columns);
        } else if let Some(rows) = self.rows {
            model.set_rows(rows);
        } else if let Some(width) = self.width {
            model.adjust_to_width(width);
        }
        model.set_show_labels(self.show_labels);
        model.set_normalized(self.normalize);
    }
}
