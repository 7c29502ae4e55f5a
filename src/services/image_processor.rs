// src/services/image_processor.rs
use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat};

use crate::errors::{EditorError, Result};
use crate::models::{ImageBlob, Transform};

/// Longest side sent to the generation backend.
pub const MAX_BACKEND_DIMENSION: u32 = 1024;
pub const BACKEND_JPEG_QUALITY: u8 = 92;

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProcessor;

impl ImageProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Decodes an upload far enough to know its size and MIME type.
    pub fn decode_dimensions(&self, filename: &str, data: &[u8]) -> Result<(u32, u32, String)> {
        let format = image::guess_format(data)
            .map_err(|_| EditorError::UploadRead(filename.to_string()))?;
        let img = image::load_from_memory_with_format(data, format)
            .map_err(|_| EditorError::UploadRead(filename.to_string()))?;
        let (width, height) = img.dimensions();
        Ok((width, height, mime_for(format).to_string()))
    }

    /// Downscales so the longer side is at most 1024 and re-encodes as JPEG.
    /// Images already within bounds are returned as they are.
    pub fn prepare_for_backend(&self, image: &ImageBlob) -> Result<ImageBlob> {
        let img = self.load(image)?;
        let (width, height) = img.dimensions();
        let longest = width.max(height);
        if longest <= MAX_BACKEND_DIMENSION {
            return Ok(image.clone());
        }

        let ratio = MAX_BACKEND_DIMENSION as f64 / longest as f64;
        let new_width = ((width as f64 * ratio).round() as u32).max(1);
        let new_height = ((height as f64 * ratio).round() as u32).max(1);
        let resized = img.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3);

        self.encode(resized, ImageOutputFormat::Jpeg(BACKEND_JPEG_QUALITY), "image/jpeg")
    }

    /// Rotates or flips the pixels and re-encodes as PNG.
    pub fn apply_transform(&self, image: &ImageBlob, transform: Transform) -> Result<ImageBlob> {
        let img = self.load(image)?;
        let transformed = match transform {
            Transform::RotateLeft => img.rotate270(),
            Transform::RotateRight => img.rotate90(),
            Transform::FlipHorizontal => img.fliph(),
            Transform::FlipVertical => img.flipv(),
        };
        self.encode(transformed, ImageOutputFormat::Png, "image/png")
    }

    pub fn encode_jpeg(&self, image: &ImageBlob, quality: u8) -> Result<ImageBlob> {
        let img = self.load(image)?;
        self.encode(img, ImageOutputFormat::Jpeg(quality.clamp(1, 100)), "image/jpeg")
    }

    fn load(&self, image: &ImageBlob) -> Result<DynamicImage> {
        image::load_from_memory(&image.data)
            .map_err(|e| EditorError::ImageProcessing(format!("Failed to load image: {}", e)))
    }

    fn encode(&self, img: DynamicImage, format: ImageOutputFormat, mime: &str) -> Result<ImageBlob> {
        // JPEG has no alpha channel
        let img = match format {
            ImageOutputFormat::Jpeg(_) => DynamicImage::ImageRgb8(img.to_rgb8()),
            _ => img,
        };
        let mut output = Cursor::new(Vec::new());
        img.write_to(&mut output, format)
            .map_err(|e| EditorError::ImageProcessing(format!("Failed to encode image: {}", e)))?;
        Ok(ImageBlob::new(output.into_inner(), mime))
    }
}

fn mime_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png(width: u32, height: u32) -> ImageBlob {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            if x == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 128])
            }
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageOutputFormat::Png)
            .unwrap();
        ImageBlob::new(out.into_inner(), "image/png")
    }

    #[test]
    fn decode_reports_size_and_mime() {
        let processor = ImageProcessor::new();
        let image = png(7, 3);
        assert_eq!(
            processor.decode_dimensions("a.png", &image.data).unwrap(),
            (7, 3, "image/png".to_string())
        );
        assert_eq!(
            processor.decode_dimensions("notes.txt", b"hello"),
            Err(EditorError::UploadRead("notes.txt".into()))
        );
    }

    #[test]
    fn small_images_pass_through_unchanged() {
        let processor = ImageProcessor::new();
        let image = png(64, 32);
        assert_eq!(processor.prepare_for_backend(&image).unwrap(), image);
    }

    #[test]
    fn large_images_are_downscaled_to_jpeg() {
        let processor = ImageProcessor::new();
        let prepared = processor.prepare_for_backend(&png(2000, 1000)).unwrap();
        assert_eq!(prepared.mime_type, "image/jpeg");
        let (w, h, mime) = processor.decode_dimensions("p", &prepared.data).unwrap();
        assert_eq!((w, h), (1024, 512));
        assert_eq!(mime, "image/jpeg");
    }

    #[test]
    fn rotation_swaps_dimensions_and_moves_pixels() {
        let processor = ImageProcessor::new();
        let rotated = processor.apply_transform(&png(4, 2), Transform::RotateRight).unwrap();
        let img = image::load_from_memory(&rotated.data).unwrap();
        assert_eq!(img.dimensions(), (2, 4));
        assert_eq!(rotated.mime_type, "image/png");
        // left column becomes the top row
        assert_eq!(img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(1, 0), Rgba([255, 0, 0, 255]));

        let flipped = processor.apply_transform(&png(4, 2), Transform::FlipHorizontal).unwrap();
        let img = image::load_from_memory(&flipped.data).unwrap();
        assert_eq!(img.get_pixel(3, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn jpeg_export_drops_alpha() {
        let processor = ImageProcessor::new();
        let exported = processor.encode_jpeg(&png(8, 8), 50).unwrap();
        assert_eq!(exported.mime_type, "image/jpeg");
        assert_eq!(
            image::guess_format(&exported.data).unwrap(),
            ImageFormat::Jpeg
        );
    }
}
