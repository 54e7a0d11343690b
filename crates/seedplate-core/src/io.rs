use std::path::Path;

use image::DynamicImage;

use crate::error::Result;

/// Decode a full source image.
pub fn load_source(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Read a source image's native dimensions without decoding pixel data.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(image::image_dimensions(path)?)
}
