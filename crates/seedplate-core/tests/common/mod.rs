use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Write a `width`x`height` RGB image where each pixel encodes its own
/// coordinates, so crops can be checked for position after tiling.
pub fn write_coord_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(
                x,
                y,
                Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]),
            );
        }
    }
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}
