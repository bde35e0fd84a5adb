//! Image loading utilities for texture data
//!
//! Decodes the texture referenced by a material into RGBA pixels.

use std::path::Path;
use crate::assets::ImportError;

/// Decoded image data
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (typically 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// The file handle is scoped to this call and released on every path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path_ref = path.as_ref();

        let img = image::open(path_ref)
            .map_err(|e| ImportError::Texture(e.to_string()))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4, // RGBA
        })
    }
}
