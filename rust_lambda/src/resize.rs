//! Square resizing of encoded images.
//!
//! The output is always exactly `width x width`. The image is scaled, keeping
//! its aspect ratio, until it covers the square and the overflow is cropped
//! around the centre.

use crate::error::ResizeError;
use crate::image_type::ImageType;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use lambda_runtime::tracing;
use std::io::Cursor;

const JPEG_QUALITY: u8 = 80;

/// Decodes `original`, cover-crops it to `width x width` and re-encodes it as `image_type`.
///
/// The output format follows `image_type`, not the decoded format, so the
/// bytes always agree with the content type derived from the key.
pub(crate) fn resize_square(
    original: &[u8],
    width: u32,
    image_type: ImageType,
) -> Result<Bytes, ResizeError> {
    let img = image::load_from_memory(original).map_err(ResizeError::Decode)?;
    let (orig_w, orig_h) = img.dimensions();

    let resized = img.resize_to_fill(width, width, FilterType::Lanczos3);

    let mut buf = Vec::new();
    match image_type {
        // JPEG has no alpha channel.
        ImageType::Jpg => DynamicImage::ImageRgb8(resized.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)),
        ImageType::Png => resized.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png),
    }
    .map_err(ResizeError::Encode)?;
    let data = Bytes::from(buf);

    tracing::debug!(
        original_width = orig_w,
        original_height = orig_h,
        width,
        size = data.len(),
        %image_type,
        "Resized image"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_landscape_png_becomes_square() {
        let original = encode(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(640, 320, Rgba([10, 20, 30, 128]))),
            ImageFormat::Png,
        );

        let resized = resize_square(&original, 200, ImageType::Png).unwrap();

        let decoded = image::load_from_memory(&resized).unwrap();
        assert_eq!(decoded.dimensions(), (200, 200));
        assert_eq!(image::guess_format(&resized).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_portrait_jpeg_becomes_square() {
        let original = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(90, 300, Rgb([200, 100, 50]))),
            ImageFormat::Jpeg,
        );

        let resized = resize_square(&original, 200, ImageType::Jpg).unwrap();

        let decoded = image::load_from_memory(&resized).unwrap();
        assert_eq!(decoded.dimensions(), (200, 200));
        assert_eq!(image::guess_format(&resized).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_png_with_alpha_encodes_as_jpeg() {
        let original = encode(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 0]))),
            ImageFormat::Png,
        );

        let resized = resize_square(&original, 32, ImageType::Jpg).unwrap();

        assert_eq!(image::load_from_memory(&resized).unwrap().dimensions(), (32, 32));
    }

    #[test]
    fn test_wide_image_is_cropped_around_centre() {
        // Left eighth red, the rest blue.
        let img = RgbImage::from_fn(400, 100, |x, _| {
            if x < 50 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let original = encode(DynamicImage::ImageRgb8(img), ImageFormat::Png);

        let resized = resize_square(&original, 200, ImageType::Png).unwrap();

        let decoded = image::load_from_memory(&resized).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (200, 200));
        for x in [0, 2, 100, 197, 199] {
            let Rgb([r, g, b]) = *decoded.get_pixel(x, 100);
            assert!(r < 5 && g < 5 && b > 250, "pixel ({x}, 100) = {:?}", [r, g, b]);
        }
    }

    #[test]
    fn test_tall_image_is_cropped_around_centre() {
        // Top and bottom bands green, middle white.
        let img = RgbImage::from_fn(60, 240, |_, y| {
            if (60..180).contains(&y) {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 255, 0])
            }
        });
        let original = encode(DynamicImage::ImageRgb8(img), ImageFormat::Png);

        let resized = resize_square(&original, 30, ImageType::Png).unwrap();

        let decoded = image::load_from_memory(&resized).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (30, 30));
        for y in [0, 15, 29] {
            let Rgb(pixel) = *decoded.get_pixel(15, y);
            assert!(pixel.iter().all(|&c| c > 250), "row {y} = {pixel:?}");
        }
    }

    #[test]
    fn test_jpeg_quality() {
        let original = encode(
            DynamicImage::ImageRgb8(RgbImage::from_fn(300, 300, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
            })),
            ImageFormat::Png,
        );

        let resized = resize_square(&original, 200, ImageType::Jpg).unwrap();

        let expected_pixels = image::load_from_memory(&original)
            .unwrap()
            .resize_to_fill(200, 200, FilterType::Lanczos3)
            .to_rgb8();
        let mut expected = Vec::new();
        DynamicImage::ImageRgb8(expected_pixels)
            .write_with_encoder(JpegEncoder::new_with_quality(&mut expected, 80))
            .unwrap();
        assert_eq!(&resized[..], expected.as_slice());
    }

    #[test]
    fn test_undecodable_input() {
        let err = resize_square(b"definitely not an image", 200, ImageType::Png).unwrap_err();
        assert!(matches!(err, ResizeError::Decode(_)));
    }
}
