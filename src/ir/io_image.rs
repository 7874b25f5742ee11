//! Image metadata lookup.
//!
//! Only the header is read; the pipeline never needs pixel data.

use std::path::Path;

use crate::error::ZoneCountError;

/// Reads `(width, height)` from an image file header.
pub fn read_image_dimensions(path: &Path) -> Result<(u32, u32), ZoneCountError> {
    let size = imagesize::size(path).map_err(|source| ZoneCountError::ImageSize {
        path: path.to_path_buf(),
        source,
    })?;

    match (u32::try_from(size.width), u32::try_from(size.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(ZoneCountError::ImageTooLarge {
            path: path.to_path_buf(),
            width: size.width,
            height: size.height,
        }),
    }
}
