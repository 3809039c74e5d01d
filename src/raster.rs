//! Raster image decoding
//!
//! Reads an image file fully into a [`SourceImage`]. The format is sniffed
//! from the file content, so a PNG saved with a `.jpg` name still decodes.

use crate::error::{MosaicError, MosaicResult};
use crate::types::{Rgba, SourceImage};
use image::ImageReader;
use std::path::Path;
use tracing::debug;

/// Decode `path` into an in-memory RGBA grid.
///
/// The whole pixel buffer is decoded before returning and the file is closed
/// by the time this function returns.
pub fn read_source_image(path: &Path) -> MosaicResult<SourceImage> {
    let decode_error = |reason: String| MosaicError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    if !path.is_file() {
        return Err(decode_error("file does not exist".to_string()));
    }

    let decoded = ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))?;

    let buffer = decoded.into_rgba8();
    let (width, height) = buffer.dimensions();
    let pixels: Vec<Rgba> = buffer.pixels().map(|p| Rgba::from(p.0)).collect();

    debug!(path = %path.display(), width, height, "decoded source image");

    SourceImage::new(width, height, pixels)
        .ok_or_else(|| decode_error(format!("image has no pixels ({}x{})", width, height)))
}
