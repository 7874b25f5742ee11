use std::path::PathBuf;
use thiserror::Error;

/// The main error type for zonecount operations.
#[derive(Debug, Error)]
pub enum ZoneCountError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid zone ({x1}, {y1}, {x2}, {y2}): {reason}")]
    InvalidZone {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        reason: &'static str,
    },

    #[error("Invalid class index {class_id} (registry has {class_count} class(es))")]
    InvalidClassIndex { class_id: f64, class_count: usize },

    #[error("Invalid image dimensions {width}x{height} (must be positive)")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("Image dimensions are required: pass --image, or both --width and --height")]
    MissingImageDimensions,

    #[error("Failed to read image size from {path}: {source}")]
    ImageSize {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Image {path} is too large ({width}x{height})")]
    ImageTooLarge {
        path: PathBuf,
        width: usize,
        height: usize,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write annotated image to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse detections from {path}: {source}")]
    DetectionsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}
