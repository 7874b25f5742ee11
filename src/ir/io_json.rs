//! JSON input and output.
//!
//! Detections are read as a JSON array of [`RawDetection`] records, each
//! either a `[x1, y1, x2, y2, score, class_id]` row or an object with the
//! same field names. Results and annotations are written as pretty JSON.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::detection::RawDetection;
use crate::error::ZoneCountError;

/// Reads raw detections from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_detections_json(path: &Path) -> Result<Vec<RawDetection>, ZoneCountError> {
    let file = File::open(path).map_err(ZoneCountError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ZoneCountError::DetectionsParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads raw detections from a JSON string.
pub fn from_detections_str(json: &str) -> Result<Vec<RawDetection>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads raw detections from a JSON byte slice.
pub fn from_detections_slice(bytes: &[u8]) -> Result<Vec<RawDetection>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes any serializable value as pretty JSON, followed by a newline.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ZoneCountError> {
    let file = File::create(path).map_err(ZoneCountError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
        ZoneCountError::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
