// SPDX-License-Identifier: MPL-2.0
//! Source image loading.

use crate::error::{Error, Result};
use image_rs::DynamicImage;
use resvg::usvg;
use std::fs;
use std::path::Path;

/// Load an image from the given path.
///
/// Supports common raster formats (PNG, JPEG, TIFF, etc.) as well as SVG,
/// which is rasterized at its intrinsic size.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The raster format is invalid or unsupported ([`Error::Image`])
/// - For SVG files: parsing fails or dimensions are zero ([`Error::Svg`])
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    if extension.eq_ignore_ascii_case("svg") {
        let svg_data = fs::read(path)?;
        return rasterize_svg(&svg_data);
    }

    let bytes = fs::read(path)?;
    Ok(image_rs::load_from_memory(&bytes)?)
}

fn rasterize_svg(svg_data: &[u8]) -> Result<DynamicImage> {
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // Pixmaps are premultiplied; the image crate expects straight alpha.
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    image_rs::RgbaImage::from_raw(width, height, pixels)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| Error::Svg("SVG pixel buffer has the wrong size".into()))
}
