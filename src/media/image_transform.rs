// SPDX-License-Identifier: MPL-2.0
//! Pixel adjustments applied to the source image before presentation.

use crate::domain::editing::AdjustmentPercent;
use crate::error::{Error, Result};
use image_rs::{DynamicImage, GenericImageView};
use tiny_skia::{ColorU8, Pixmap};

/// Adjust brightness of an image.
///
/// The `value` parameter ranges from -100 to +100:
/// - Negative values darken the image
/// - Positive values brighten the image
/// - Zero returns a clone of the original image
pub fn adjust_brightness(image: &DynamicImage, value: AdjustmentPercent) -> DynamicImage {
    if value.is_neutral() {
        return image.clone();
    }
    image.brighten(value.value())
}

/// Adjust contrast of an image.
///
/// The `value` parameter ranges from -100 to +100:
/// - Negative values reduce contrast (flatten toward gray)
/// - Positive values increase contrast
/// - Zero returns a clone of the original image
pub fn adjust_contrast(image: &DynamicImage, value: AdjustmentPercent) -> DynamicImage {
    if value.is_neutral() {
        return image.clone();
    }
    // The image crate interprets the factor as a percentage adjustment.
    image.adjust_contrast(value.value() as f32)
}

/// Brightness first, then contrast.
pub fn apply_adjustments(
    image: &DynamicImage,
    brightness: AdjustmentPercent,
    contrast: AdjustmentPercent,
) -> DynamicImage {
    let brightened = adjust_brightness(image, brightness);
    adjust_contrast(&brightened, contrast)
}

/// Convert a `DynamicImage` into a premultiplied `tiny_skia` pixmap.
///
/// # Errors
///
/// Returns [`Error::Image`] when the image has a zero dimension.
pub fn dynamic_to_pixmap(dynamic: &DynamicImage) -> Result<Pixmap> {
    let (width, height) = dynamic.dimensions();
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Image(format!("cannot allocate a {width}x{height} raster")))?;

    let rgba = dynamic.to_rgba8();
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::ImageBuffer;

    fn gray(value: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            2,
            2,
            image_rs::Rgba([value, value, value, 255]),
        ))
    }

    fn first_pixel(image: &DynamicImage) -> [u8; 4] {
        image.to_rgba8().get_pixel(0, 0).0
    }

    #[test]
    fn brightness_zero_returns_unchanged() {
        let img = gray(100);
        let result = adjust_brightness(&img, AdjustmentPercent::default());
        assert_eq!(first_pixel(&result), [100, 100, 100, 255]);
    }

    #[test]
    fn brightness_positive_lightens_image() {
        let pixel = first_pixel(&adjust_brightness(&gray(100), AdjustmentPercent::new(50)));
        assert!(pixel[0] > 100, "Red channel should be brighter");
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn brightness_negative_darkens_image() {
        let pixel = first_pixel(&adjust_brightness(&gray(100), AdjustmentPercent::new(-50)));
        assert!(pixel[0] < 100, "Red channel should be darker");
    }

    #[test]
    fn contrast_positive_pushes_away_from_mid_gray() {
        let dark = first_pixel(&adjust_contrast(&gray(60), AdjustmentPercent::new(50)));
        let light = first_pixel(&adjust_contrast(&gray(200), AdjustmentPercent::new(50)));
        assert!(dark[0] < 60);
        assert!(light[0] > 200);
    }

    #[test]
    fn pixmap_is_premultiplied() {
        let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            3,
            1,
            image_rs::Rgba([200, 100, 0, 128]),
        ));
        let pixmap = dynamic_to_pixmap(&img).expect("pixmap");
        assert_eq!((pixmap.width(), pixmap.height()), (3, 1));
        let pixel = pixmap.pixel(1, 0).expect("in bounds");
        assert_eq!(pixel.alpha(), 128);
        assert!(pixel.red() <= 101);
    }

    #[test]
    fn empty_image_cannot_become_pixmap() {
        let img = DynamicImage::new_rgba8(0, 4);
        assert!(matches!(dynamic_to_pixmap(&img), Err(Error::Image(_))));
    }
}
